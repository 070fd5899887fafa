//! User settings, read once at start-up from `<config_dir>/carscene/settings.json`.

use std::path::{Path, PathBuf};

use carscene_core::CameraSettings;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Use the desktop resolution instead of `width` and `height`.
    pub fullscreen: bool,
    /// Frame rate cap; `0` disables it.
    pub fps: u32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "carscene".to_string(),
            width: 1280,
            height: 720,
            fullscreen: false,
            fps: 60,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub window: WindowSettings,
    /// Directory holding the `.ply` models, relative to the working directory unless absolute.
    pub models_dir: PathBuf,
    /// One of `off`, `error`, `warn`, `info`, `debug`, `trace`.
    pub log_level: String,
    pub camera: CameraSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window: WindowSettings::default(),
            models_dir: PathBuf::from("models"),
            log_level: "info".to_string(),
            camera: CameraSettings::default(),
        }
    }
}

impl Settings {
    /// The OS configuration directory of the application.
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("carscene")
    }

    pub fn path() -> PathBuf {
        Self::config_dir().join("settings.json")
    }

    /// Loads the settings file, falling back to defaults when it is missing or malformed.
    ///
    /// Nothing is logged here since logging is configured from the result; problems are
    /// returned alongside so the caller can report them once the logger is up.
    pub fn load() -> (Self, Option<String>) {
        Self::load_from_path(&Self::path())
    }

    pub fn load_from_path(path: &Path) -> (Self, Option<String>) {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return (Self::default(), None),
            Err(e) => {
                return (
                    Self::default(),
                    Some(format!("Failed to read {}: {}", path.display(), e)),
                );
            }
        };
        match Self::parse(&content) {
            Ok(settings) => (settings, None),
            Err(e) => (
                Self::default(),
                Some(format!("Failed to parse {}: {}", path.display(), e)),
            ),
        }
    }

    pub fn parse(content: &str) -> Result<Self, String> {
        serde_json::from_str(content).map_err(|e| e.to_string())
    }

    /// The configured log level, or `Info` if it does not name one.
    pub fn level_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }
}

/// The OS data directory of the application, where the log and the saved car live.
pub fn data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("carscene")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_is_default() {
        assert_eq!(Settings::parse("{}").unwrap(), Settings::default());
    }

    #[test]
    fn test_partial_settings() {
        let settings = Settings::parse(
            r#"{
                "window": { "width": 800, "fps": 0 },
                "log_level": "debug",
                "camera": { "fov": 90.0 }
            }"#,
        )
        .unwrap();
        assert_eq!(settings.window.width, 800);
        assert_eq!(settings.window.height, 720);
        assert_eq!(settings.window.fps, 0);
        assert_eq!(settings.level_filter(), log::LevelFilter::Debug);
        assert_eq!(settings.camera.fov, 90.0);
        assert_eq!(settings.camera.near, CameraSettings::default().near);
        assert_eq!(settings.models_dir, PathBuf::from("models"));
    }

    #[test]
    fn test_bad_level_falls_back_to_info() {
        let settings = Settings::parse(r#"{ "log_level": "loud" }"#).unwrap();
        assert_eq!(settings.level_filter(), log::LevelFilter::Info);
    }

    #[test]
    fn test_malformed_file_uses_defaults() {
        let path = std::env::temp_dir().join(format!("carscene-settings-{}.json", std::process::id()));
        std::fs::write(&path, "{ not json").unwrap();
        let (settings, problem) = Settings::load_from_path(&path);
        std::fs::remove_file(&path).unwrap();
        assert_eq!(settings, Settings::default());
        assert!(problem.is_some());
    }

    #[test]
    fn test_missing_file_is_silent() {
        let (settings, problem) = Settings::load_from_path(Path::new("/nonexistent/carscene.json"));
        assert_eq!(settings, Settings::default());
        assert!(problem.is_none());
    }
}
