//! Configuration for an advisory session.
//!
//! Loads settings from ~/.config/aethelred/config.toml or uses
//! defaults. Every field is optional in the file; partial configs
//! fill in from the defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::forecast::ForecastMode;

/// Session defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Scenario loaded when none is named explicitly.
    #[serde(default = "default_scenario")]
    pub scenario: String,

    /// Months of synthetic history generated per scenario.
    #[serde(default = "default_history_months")]
    pub history_months: usize,

    /// Forecast steps projected past the end of history.
    #[serde(default = "default_forecast_horizon")]
    pub forecast_horizon: usize,

    /// Confidence level recorded on forecast reports.
    #[serde(default = "default_confidence")]
    pub confidence: f64,

    /// Model family the forecaster fits.
    #[serde(default)]
    pub forecast_mode: ForecastMode,
}

fn default_scenario() -> String {
    "ukraine".to_string()
}

fn default_history_months() -> usize {
    12
}

fn default_forecast_horizon() -> usize {
    6
}

fn default_confidence() -> f64 {
    0.8
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            scenario: default_scenario(),
            history_months: default_history_months(),
            forecast_horizon: default_forecast_horizon(),
            confidence: default_confidence(),
            forecast_mode: ForecastMode::default(),
        }
    }
}

/// Terminal display preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// ANSI color output.
    #[serde(default = "default_color")]
    pub color: bool,

    /// Wrap width for advisor briefings.
    #[serde(default = "default_wrap_width")]
    pub wrap_width: usize,
}

fn default_color() -> bool {
    true
}

fn default_wrap_width() -> usize {
    88
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color: default_color(),
            wrap_width: default_wrap_width(),
        }
    }
}

/// Main configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Session defaults.
    #[serde(default)]
    pub session: SessionConfig,

    /// Display preferences.
    #[serde(default)]
    pub display: DisplayConfig,
}

impl Config {
    /// User config path: ~/.config/aethelred/config.toml
    pub fn user_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("/tmp"))
            .join("aethelred")
            .join("config.toml")
    }

    /// Load config from the user path, or return defaults.
    pub fn load() -> Self {
        Self::load_from_path(&Self::user_config_path()).unwrap_or_else(|e| {
            warn!("Config not found, using defaults: {:#}", e);
            Config::default()
        })
    }

    /// Load config from a specific path.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save a default config to a path (for init).
    pub fn save_default(path: &Path) -> Result<()> {
        let config = Config::default();
        let content = toml::to_string_pretty(&config)
            .context("Failed to serialize configuration")?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
        fs::write(path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Saved default config to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.session.scenario, "ukraine");
        assert_eq!(config.session.history_months, 12);
        assert_eq!(config.session.forecast_horizon, 6);
        assert_eq!(config.session.confidence, 0.8);
        assert_eq!(config.session.forecast_mode, ForecastMode::Ensemble);
        assert!(config.display.color);
        assert_eq!(config.display.wrap_width, 88);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let toml_str = r#"
[session]
scenario = "trade_war"
forecast_mode = "linear"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.session.scenario, "trade_war");
        assert_eq!(config.session.forecast_mode, ForecastMode::Linear);
        assert_eq!(config.session.forecast_horizon, 6);
        assert_eq!(config.display.wrap_width, 88);
    }

    #[test]
    fn test_empty_toml_is_all_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.session.scenario, "ukraine");
        assert!(config.display.color);
    }

    #[test]
    fn test_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        Config::save_default(&path).unwrap();
        let loaded = Config::load_from_path(&path).unwrap();
        assert_eq!(loaded.session.forecast_horizon, 6);
        assert_eq!(loaded.session.forecast_mode, ForecastMode::Ensemble);
    }

    #[test]
    fn test_malformed_toml_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut f = fs::File::create(&path).unwrap();
        writeln!(f, "session = 7").unwrap();
        assert!(Config::load_from_path(&path).is_err());
    }

    #[test]
    fn test_missing_file_errors() {
        assert!(Config::load_from_path(Path::new("/nonexistent/aethelred.toml")).is_err());
    }
}
