use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::catalog::ShapeKind;
use crate::scenes::ViewKind;

const APP_DIR: &str = "edu-viz";
const FILE_NAME: &str = "preferences.json";

/// What survives between runs. Missing fields take their defaults so older
/// files keep loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub last_view: ViewKind,
    pub explorer_shape: ShapeKind,
    /// `#rrggbb`
    pub explorer_color: String,
    pub explorer_scale: f32,
    pub clouds_enabled: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            last_view: ViewKind::default(),
            explorer_shape: ShapeKind::default(),
            explorer_color: crate::scenes::geometry_explorer::DEFAULT_COLOR.to_hex(),
            explorer_scale: crate::scenes::geometry_explorer::DEFAULT_SCALE,
            clouds_enabled: true,
        }
    }
}

impl Preferences {
    /// `<config dir>/edu-viz/preferences.json`, if the platform has one
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(FILE_NAME))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("malformed preferences")
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize preferences")
    }

    /// Read preferences, falling back to defaults when the file is missing or
    /// unreadable
    pub fn load_or_default(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => Self::from_json(&json).unwrap_or_else(|err| {
                warn!("ignoring {}: {:#}", path.display(), err);
                Self::default()
            }),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(err) => {
                warn!("cannot read {}: {}", path.display(), err);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        fs::write(path, self.to_json()?).with_context(|| format!("failed to write {}", path.display()))?;
        info!("preferences saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_fills_defaults() {
        let prefs = Preferences::from_json(r#"{ "last_view": "globe", "clouds_enabled": false }"#).unwrap();
        assert_eq!(prefs.last_view, ViewKind::Globe);
        assert!(!prefs.clouds_enabled);
        assert_eq!(prefs.explorer_shape, ShapeKind::Cube);
        assert_eq!(prefs.explorer_color, "#60a5fa");
    }

    #[test]
    fn save_then_load() {
        let path = std::env::temp_dir()
            .join(format!("edu-viz-prefs-{}", std::process::id()))
            .join("prefs.json");
        let prefs = Preferences {
            explorer_shape: ShapeKind::Dodecahedron,
            explorer_scale: 1.5,
            ..Preferences::default()
        };
        prefs.save(&path).unwrap();
        assert_eq!(Preferences::load_or_default(&path), prefs);
        fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn garbage_falls_back() {
        let path = std::env::temp_dir().join(format!("edu-viz-bad-{}.json", std::process::id()));
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(Preferences::load_or_default(&path), Preferences::default());
        fs::remove_file(path).ok();
    }

    #[test]
    fn missing_file_is_default() {
        let path = Path::new("/nonexistent/edu-viz/preferences.json");
        assert_eq!(Preferences::load_or_default(path), Preferences::default());
    }
}
