use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Result, ViewerError};

/// Window theme
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeChoice {
    #[default]
    Dark,
    Light,
}

/// User configuration
///
/// Stored as JSON in the user's config directory:
/// - Linux: ~/.config/sequential-image-viewer/config.json
/// - macOS: ~/Library/Application Support/sequential-image-viewer/config.json
/// - Windows: %APPDATA%\sequential-image-viewer\config.json
///
/// Every field is optional in the file; missing fields take their default.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub theme: ThemeChoice,
    /// Initial size of each preview window
    pub window_width: f32,
    pub window_height: f32,
    /// Show dimensions, format and size under the image
    pub show_details: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: ThemeChoice::Dark,
            window_width: 1024.0,
            window_height: 768.0,
            show_details: true,
        }
    }
}

impl Config {
    /// Default location of the config file
    pub fn default_path() -> Option<PathBuf> {
        let mut path = dirs::config_dir().or_else(dirs::home_dir)?;
        path.push("sequential-image-viewer");
        path.push("config.json");
        Some(path)
    }

    /// Parse a config from JSON
    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Read the config at `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ViewerError::ConfigIo {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        Self::from_json(&json).map_err(|source| ViewerError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load the config from `path` (or the default location), falling back
    /// to defaults on any error. Errors are logged, never fatal.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let path = match path.map(Path::to_path_buf).or_else(Self::default_path) {
            Some(path) => path,
            None => {
                tracing::warn!("Could not determine config directory, using defaults");
                return Self::default();
            }
        };

        match Self::load_from(&path) {
            Ok(config) => {
                tracing::info!("Loaded config from {}", path.display());
                config
            }
            Err(err) => {
                tracing::warn!("{}; using defaults", err);
                Self::default()
            }
        }
    }

    pub fn window_size(&self) -> iced::Size {
        iced::Size::new(self.window_width.max(200.0), self.window_height.max(150.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = Config::from_json(r#"{ "theme": "light", "window_width": 640 }"#).unwrap();
        assert_eq!(config.theme, ThemeChoice::Light);
        assert_eq!(config.window_width, 640.0);
        assert_eq!(config.window_height, 768.0);
        assert!(config.show_details);
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempdir().expect("failed to create temp dir");
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_malformed_file() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(Config::load_from(&path), Err(ViewerError::Config { .. })));
        assert_eq!(Config::load_or_default(Some(&path)), Config::default());
    }

    #[test]
    fn test_unknown_theme_is_rejected() {
        assert!(Config::from_json(r#"{ "theme": "sepia" }"#).is_err());
    }

    #[test]
    fn test_window_size_has_floor() {
        let config = Config {
            window_width: 10.0,
            window_height: 10.0,
            ..Config::default()
        };
        assert_eq!(config.window_size(), iced::Size::new(200.0, 150.0));
    }
}
