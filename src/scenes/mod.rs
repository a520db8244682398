pub mod geometry_explorer;
pub mod globe;
pub mod solar_system;

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::gpu_context::GpuContext;
use crate::core::window::WindowDimensions;
use crate::prefs::Preferences;
use crate::traits::Visualization;

pub use geometry_explorer::{ExplorerModel, ExplorerState, ExplorerView};
pub use globe::{GlobeModel, GlobeState, GlobeView};
pub use solar_system::{SolarModel, SolarView};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ViewKind {
    #[default]
    Solar,
    Globe,
    Geometry,
}

impl ViewKind {
    pub const ALL: [ViewKind; 3] = [ViewKind::Solar, ViewKind::Globe, ViewKind::Geometry];

    pub fn title(self) -> &'static str {
        match self {
            ViewKind::Solar => "🌟 Sistema Solar",
            ViewKind::Globe => "🌍 Globo Terráqueo",
            ViewKind::Geometry => "🔷 Explorador de Figuras",
        }
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ViewKind::Solar => "solar",
            ViewKind::Globe => "globe",
            ViewKind::Geometry => "geometry",
        })
    }
}

/// Inputs every visualization needs at mount time
#[derive(Clone)]
pub struct MountContext {
    pub gpu: GpuContext,
    pub color_format: wgpu::TextureFormat,
    pub size: WindowDimensions,
    pub asset_dir: PathBuf,
    /// Skip remote texture downloads
    pub offline: bool,
    pub texture_timeout: Duration,
    pub prefs: Preferences,
}

/// Build a fresh visualization of `kind`
pub fn mount(kind: ViewKind, ctx: &MountContext) -> Box<dyn Visualization> {
    match kind {
        ViewKind::Solar => Box::new(SolarView::new(ctx)),
        ViewKind::Globe => Box::new(GlobeView::new(ctx)),
        ViewKind::Geometry => Box::new(ExplorerView::new(ctx)),
    }
}
