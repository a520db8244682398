use crate::core::controller::Controller;
use crate::core::gpu_context::GpuContext;
use crate::core::lifecycle::Teardown;
use crate::core::picking::SurfaceRect;
use crate::core::window::WindowDimensions;
use crate::prefs::Preferences;
use crate::scenes::ViewKind;

/// Everything a visualization sees for one frame
pub struct FrameContext<'a> {
    pub gpu: &'a GpuContext,
    pub input: &'a dyn Controller,
    /// Completed left click in surface pixels that no panel consumed
    pub click: Option<(f32, f32)>,
    /// False while the pointer is over a panel; drags and wheel then belong to
    /// the UI
    pub pointer_free: bool,
    pub surface: SurfaceRect,
    /// Seconds since the previous frame
    pub delta: f32,
}

/// One mountable 3D view plus its panels
pub trait Visualization: Teardown {
    fn kind(&self) -> ViewKind;

    /// Input, animation and asset uploads for one frame
    fn update(&mut self, frame: &FrameContext<'_>);

    /// Draw the scene into `target`, clearing it first
    fn render(&mut self, gpu: &GpuContext, encoder: &mut wgpu::CommandEncoder, target: &wgpu::TextureView);

    /// Panels drawn over the scene
    fn ui(&mut self, ctx: &egui::Context);

    fn resize(&mut self, gpu: &GpuContext, size: WindowDimensions);

    /// Back to the initial camera and state
    fn reset(&mut self);

    /// Copy anything worth remembering into `prefs`
    fn store_preferences(&self, _prefs: &mut Preferences) {}
}
