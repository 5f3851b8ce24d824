//! Session settings
//!
//! Stored as JSON next to the binary or wherever the caller points. Every
//! field has a default, so a partial (or empty `{}`) file is valid.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::{FIRE_WINDOW_MS, TICK_HZ};

/// Settings errors
#[derive(thiserror::Error, Debug)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Session settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// RNG seed; `None` picks one from the clock
    pub seed: Option<u64>,
    /// Simulation ticks per second
    pub tick_hz: u32,
    /// How long the dispatcher waits for an event before redrawing anyway
    pub poll_timeout_ms: u64,
    /// Action presses shorter than this fire on release
    pub fire_window_ms: u64,
    /// Log every key event at debug level
    pub log_inputs: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            tick_hz: TICK_HZ,
            poll_timeout_ms: 100,
            fire_window_ms: FIRE_WINDOW_MS,
            log_inputs: true,
        }
    }
}

impl Settings {
    /// Time between ticks
    pub fn tick_period(&self) -> Duration {
        Duration::from_secs(1) / self.tick_hz.max(1)
    }

    /// Dispatcher bounded wait
    pub fn poll_timeout(&self) -> Duration {
        Duration::from_millis(self.poll_timeout_ms)
    }

    /// Configured seed, or one derived from the system clock
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
        })
    }

    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Load settings, falling back to defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Using default settings ({}: {})", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.tick_hz, 10);
        assert_eq!(s.tick_period(), Duration::from_millis(100));
        assert_eq!(s.poll_timeout(), Duration::from_millis(100));
        assert_eq!(s.fire_window_ms, 200);
        assert_eq!(s.seed, None);
    }

    #[test]
    fn test_partial_json() {
        let s = Settings::from_json(r#"{ "seed": 42, "tick_hz": 20 }"#).unwrap();
        assert_eq!(s.seed, Some(42));
        assert_eq!(s.resolve_seed(), 42);
        assert_eq!(s.tick_period(), Duration::from_millis(50));
        assert_eq!(s.fire_window_ms, FIRE_WINDOW_MS);

        assert_eq!(Settings::from_json("{}").unwrap(), Settings::default());
    }

    #[test]
    fn test_zero_tick_rate_is_clamped() {
        let s = Settings {
            tick_hz: 0,
            ..Default::default()
        };
        assert_eq!(s.tick_period(), Duration::from_secs(1));
    }

    #[test]
    fn test_bad_json() {
        let err = Settings::from_json("{ \"tick_hz\": \"fast\" }").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let path = std::env::temp_dir().join("flip-rocks-definitely-missing.json");
        assert!(matches!(Settings::load(&path), Err(SettingsError::Io(_))));
        assert_eq!(Settings::load_or_default(&path), Settings::default());
    }

    #[test]
    fn test_save_load_file() {
        let path = std::env::temp_dir().join(format!("flip-rocks-settings-{}.json", std::process::id()));
        let s = Settings {
            seed: Some(7),
            log_inputs: false,
            ..Default::default()
        };
        s.save(&path).unwrap();
        assert_eq!(Settings::load(&path).unwrap(), s);
        let _ = std::fs::remove_file(&path);
    }
}
