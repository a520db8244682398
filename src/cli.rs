// cli.rs - Command-line interface configuration
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::scenes::ViewKind;

#[derive(Parser, Debug, Clone)]
#[command(name = "edu-viz")]
#[command(about = "Educational 3D viewer: solar system, globe and geometry explorer", long_about = None)]
pub struct Cli {
    /// View to open; defaults to the last one used
    #[arg(long, value_enum)]
    pub view: Option<ViewKind>,

    /// Directory holding `textures/planets` and `textures/earth`
    #[arg(long = "asset-dir", default_value = "assets")]
    pub asset_dir: PathBuf,

    /// Never fetch remote textures; fallbacks are used instead
    #[arg(long, default_value = "false")]
    pub offline: bool,

    /// Preferences file; defaults to the platform config dir
    #[arg(long)]
    pub prefs: Option<PathBuf>,

    /// Disable UI panels
    #[arg(long = "no-ui", default_value = "false")]
    pub no_ui: bool,

    #[arg(long, default_value_t = 1280)]
    pub width: u32,

    #[arg(long, default_value_t = 800)]
    pub height: u32,

    /// Per-request timeout for remote textures
    #[arg(long = "texture-timeout-ms", default_value_t = 10_000)]
    pub texture_timeout_ms: u64,
}

impl Cli {
    pub fn texture_timeout(&self) -> Duration {
        Duration::from_millis(self.texture_timeout_ms)
    }

    pub fn prefs_path(&self) -> Option<PathBuf> {
        self.prefs.clone().or_else(crate::prefs::Preferences::default_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::parse_from(["edu-viz"]);
        assert_eq!(cli.view, None);
        assert!(!cli.offline && !cli.no_ui);
        assert_eq!(cli.asset_dir, PathBuf::from("assets"));
        assert_eq!(cli.texture_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn all_flags() {
        let cli = Cli::parse_from([
            "edu-viz",
            "--view",
            "globe",
            "--asset-dir",
            "/tmp/a",
            "--offline",
            "--prefs",
            "/tmp/p.json",
            "--no-ui",
            "--width",
            "640",
            "--height",
            "480",
            "--texture-timeout-ms",
            "250",
        ]);
        assert_eq!(cli.view, Some(ViewKind::Globe));
        assert!(cli.offline && cli.no_ui);
        assert_eq!((cli.width, cli.height), (640, 480));
        assert_eq!(cli.prefs_path(), Some(PathBuf::from("/tmp/p.json")));
        assert_eq!(cli.texture_timeout(), Duration::from_millis(250));
    }

    #[test]
    fn unknown_view_is_rejected() {
        assert!(Cli::try_parse_from(["edu-viz", "--view", "mars"]).is_err());
    }
}
