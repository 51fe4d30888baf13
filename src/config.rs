//! User settings persisted in the OS config directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::timeline::ZoomLevel;

/// Persisted user settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub zoom: ZoomLevel,
    /// Last opened project file.
    pub project_file: Option<PathBuf>,
    pub show_dependencies: bool,
    pub show_today: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            zoom: ZoomLevel::Month,
            project_file: None,
            show_dependencies: true,
            show_today: true,
        }
    }
}

impl AppSettings {
    /// `settings.json` under the platform config dir, or the working directory.
    pub fn default_path() -> PathBuf {
        match directories::ProjectDirs::from("", "", "PhaseTimeline") {
            Some(dirs) => dirs.config_dir().join("settings.json"),
            None => PathBuf::from(".").join("settings.json"),
        }
    }

    /// Load settings, falling back to defaults on any problem.
    pub fn load(path: &Path) -> Self {
        let contents = match std::fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Self::default(),
            Err(e) => {
                log::warn!("Could not read settings {}: {}", path.display(), e);
                return Self::default();
            }
        };
        serde_json::from_str(&contents).unwrap_or_else(|e| {
            log::warn!("Ignoring malformed settings {}: {}", path.display(), e);
            Self::default()
        })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let s: AppSettings = serde_json::from_str(r#"{"zoom":"week"}"#).unwrap();
        assert_eq!(s.zoom, ZoomLevel::Week);
        assert!(s.show_dependencies);
        assert_eq!(s.project_file, None);
    }

    #[test]
    fn round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let settings = AppSettings {
            zoom: ZoomLevel::Year,
            project_file: Some(PathBuf::from("/tmp/plan.timeline.json")),
            show_dependencies: false,
            show_today: true,
        };
        settings.save(&path).unwrap();
        assert_eq!(AppSettings::load(&path), settings);
    }

    #[test]
    fn corrupt_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert_eq!(AppSettings::load(&path), AppSettings::default());
    }
}
