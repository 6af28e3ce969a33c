//! User preferences
//!
//! Small JSON file under the platform config directory: log level and the
//! last resolution selection that was successfully applied. A missing file
//! yields defaults and is created on first load.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::info;

use crate::constants::config;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Preferences {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// The selection last applied successfully; offered as the default for
    /// the next enable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_resolution: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            last_resolution: None,
        }
    }
}

impl Preferences {
    pub fn path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(config::APP_DIR);
        path.push(config::FILENAME);
        path
    }

    /// Load preferences from disk or create the default file.
    pub fn load() -> Result<Self> {
        let path = Self::path();

        if !path.exists() {
            info!("preferences not found, creating defaults at {:?}", path);
            let preferences = Preferences::default();
            preferences.save()?;
            return Ok(preferences);
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read preferences from {path:?}"))?;
        let preferences: Preferences = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse preferences from {path:?}"))?;
        Ok(preferences)
    }

    /// Save preferences to disk, creating the directory if needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {parent:?}"))?;
        }

        let json = serde_json::to_string_pretty(self).context("Failed to serialize preferences")?;
        fs::write(&path, json).with_context(|| format!("Failed to write preferences to {path:?}"))?;
        Ok(())
    }

    /// Record a successfully applied selection.
    pub fn remember_selection(&mut self, selection: &str) {
        self.last_resolution = Some(selection.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let preferences = Preferences::default();
        assert_eq!(preferences.log_level, "info");
        assert_eq!(preferences.last_resolution, None);
    }

    #[test]
    fn test_json_round_trip() {
        let mut preferences = Preferences::default();
        preferences.remember_selection("2560x1440");

        let json = serde_json::to_string(&preferences).unwrap();
        let back: Preferences = serde_json::from_str(&json).unwrap();
        assert_eq!(back, preferences);
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let back: Preferences = serde_json::from_str("{}").unwrap();
        assert_eq!(back, Preferences::default());
    }

    #[test]
    fn test_unset_last_resolution_not_serialized() {
        let json = serde_json::to_string(&Preferences::default()).unwrap();
        assert!(!json.contains("last_resolution"));
    }
}
