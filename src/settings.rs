//! Game settings
//!
//! Timing knobs and an optional custom catalog, loaded from a JSON file named
//! by `CODE_HOP_SETTINGS`. Missing fields keep their defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::consts::{ADVANCE_WINDOW_MS, RESOLUTION_WINDOW_MS, TIME_BUDGET_SECS};
use crate::error::{Error, Result};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Timing ===
    /// Seconds on the clock for every level
    pub time_budget_secs: u32,
    /// Jump animation before a choice is scored (ms)
    pub resolution_window_ms: u64,
    /// Forward movement before the next level (ms)
    pub advance_window_ms: u64,

    // === Content ===
    /// Custom catalog JSON; the built-in levels when unset
    pub catalog_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            time_budget_secs: TIME_BUDGET_SECS,
            resolution_window_ms: RESOLUTION_WINDOW_MS,
            advance_window_ms: ADVANCE_WINDOW_MS,
            catalog_path: None,
        }
    }
}

impl Settings {
    /// Environment variable naming the settings file
    pub const ENV_VAR: &'static str = "CODE_HOP_SETTINGS";

    /// Reject settings that cannot drive a game
    pub fn validate(&self) -> Result<()> {
        if self.time_budget_secs == 0 {
            return Err(Error::InvalidSettings(
                "time_budget_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Parse and validate settings JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load settings from the file named by `CODE_HOP_SETTINGS`
    ///
    /// Falls back to defaults when the variable is unset or the file is bad.
    pub fn load() -> Self {
        let Some(path) = std::env::var_os(Self::ENV_VAR) else {
            log::info!("Using default settings");
            return Self::default();
        };

        let path = PathBuf::from(path);
        match Self::from_path(&path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!(
                    "Ignoring settings file {}: {e}; using defaults",
                    path.display()
                );
                Self::default()
            }
        }
    }

    /// The catalog these settings point at
    pub fn catalog(&self) -> Result<Catalog> {
        match &self.catalog_path {
            Some(path) => Catalog::from_path(path),
            None => Catalog::builtin(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.time_budget_secs, 15);
        assert_eq!(settings.resolution_window_ms, 800);
        assert_eq!(settings.advance_window_ms, 1500);
        assert!(settings.validate().is_ok());
        assert_eq!(settings.catalog().unwrap().len(), 10);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{"time_budget_secs": 30}"#).unwrap();
        assert_eq!(settings.time_budget_secs, 30);
        assert_eq!(settings.resolution_window_ms, 800);
        assert_eq!(settings.catalog_path, None);
    }

    #[test]
    fn test_zero_budget_rejected() {
        assert!(matches!(
            Settings::from_json(r#"{"time_budget_secs": 0}"#),
            Err(Error::InvalidSettings(_))
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(Settings::from_json("{"), Err(Error::Json(_))));
    }

    #[test]
    fn test_missing_catalog_file() {
        let settings = Settings {
            catalog_path: Some(PathBuf::from("/nonexistent/code-hop/levels.json")),
            ..Default::default()
        };
        assert!(matches!(settings.catalog(), Err(Error::Io(_))));
    }
}
