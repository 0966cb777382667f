use crate::domain::{RefreshRate, TaskColor};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// User preferences stored in settings.json
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// How often task tiles are refreshed
    pub refresh_rate: RefreshRate,
    /// Color preselected in the add-task form, "#rrggbb"
    pub default_color: String,
    /// Send a desktop notification when a task passes its limit
    pub notify_on_limit: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            refresh_rate: RefreshRate::default(),
            default_color: TaskColor::default().to_string(),
            notify_on_limit: true,
        }
    }
}

impl Settings {
    /// Parsed default color; an unparsable value falls back to the built-in color
    pub fn default_task_color(&self) -> TaskColor {
        self.default_color.parse().unwrap_or_else(|err| {
            log::warn!("Ignoring default_color setting: {}", err);
            TaskColor::default()
        })
    }
}

/// Load settings, defaults if the file doesn't exist
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path = path.as_ref();

    let Some(content) = super::read_file(path)? else {
        return Ok(Settings::default());
    };

    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse settings: {}", path.display()))
}

pub fn save_settings<P: AsRef<Path>>(path: P, settings: &Settings) -> Result<()> {
    let json = serde_json::to_string_pretty(settings)?;
    super::atomic_write(path, &json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_load_nonexistent_settings() {
        let temp_dir = tempdir().unwrap();
        let settings = load_settings(temp_dir.path().join("settings.json")).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.refresh_rate, RefreshRate::Sec1);
        assert!(settings.notify_on_limit);
    }

    #[test]
    fn test_save_and_load_settings() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("settings.json");

        let settings = Settings {
            refresh_rate: RefreshRate::Ms100,
            default_color: "#00ff00".to_string(),
            notify_on_limit: false,
        };
        save_settings(&path, &settings).unwrap();

        let loaded = load_settings(&path).unwrap();
        assert_eq!(loaded, settings);
        assert_eq!(loaded.default_task_color(), TaskColor::new(0, 255, 0));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "refresh_rate": "5s" }"#).unwrap();

        let loaded = load_settings(&path).unwrap();
        assert_eq!(loaded.refresh_rate, RefreshRate::Sec5);
        assert_eq!(loaded.default_color, "#4886ce");
        assert!(loaded.notify_on_limit);
    }

    #[test]
    fn test_bad_color_falls_back() {
        let settings = Settings {
            default_color: "blue".to_string(),
            ..Settings::default()
        };
        assert_eq!(settings.default_task_color(), TaskColor::default());
    }
}
