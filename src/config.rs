//! Configuration for the SleepWell simulator.

use crate::core::clock::{MAX_MULTIPLIER, MIN_MULTIPLIER};
use crate::core::history::DEFAULT_HISTORY_CAPACITY;
use crate::core::monitor::{MonitorSettings, DEFAULT_BED_PRESENCE_THRESHOLD};
use crate::core::policy::ScoringPolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Main configuration for the simulator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Virtual seconds per real second (1-3600)
    pub time_multiplier: f64,

    /// Wall-clock interval between monitor ticks
    #[serde(with = "duration_ms")]
    pub tick_interval: Duration,

    /// Minimum bed-pressure reading for a session to start or continue
    pub bed_presence_threshold: f64,

    /// Number of points kept in the rolling chart history
    pub history_capacity: usize,

    /// Scoring thresholds and rates
    pub policy: ScoringPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            time_multiplier: 1.0,
            tick_interval: Duration::from_millis(50),
            bed_presence_threshold: DEFAULT_BED_PRESENCE_THRESHOLD,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            policy: ScoringPolicy::default(),
        }
    }
}

impl Config {
    /// Load configuration from the default location.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from `path`, falling back to defaults if it is missing.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path())
    }

    /// Save configuration to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        self.validate()?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Get the path to the configuration file.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("sleepwell-simulator")
            .join("config.json")
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_multiplier(self.time_multiplier)?;
        if self.tick_interval.is_zero() {
            return Err(ConfigError::InvalidTickInterval);
        }
        Ok(())
    }

    /// Settings for a session monitor built from this configuration.
    pub fn monitor_settings(&self) -> MonitorSettings {
        MonitorSettings {
            policy: self.policy,
            time_multiplier: self.time_multiplier,
            bed_presence_threshold: self.bed_presence_threshold,
            history_capacity: self.history_capacity,
        }
    }
}

/// Reject multipliers outside the supported speed range.
pub fn validate_multiplier(multiplier: f64) -> Result<(), ConfigError> {
    if (MIN_MULTIPLIER..=MAX_MULTIPLIER).contains(&multiplier) {
        Ok(())
    } else {
        Err(ConfigError::InvalidMultiplier(multiplier))
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(serde_json::Error),
    #[error("Serialize error: {0}")]
    Serialize(serde_json::Error),
    #[error("time multiplier {0} is outside 1-3600")]
    InvalidMultiplier(f64),
    #[error("tick interval must be greater than zero")]
    InvalidTickInterval,
}

/// Serde support for Duration as milliseconds.
mod duration_ms {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        (duration.as_millis() as u64).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.time_multiplier, 1.0);
        assert_eq!(config.tick_interval, Duration::from_millis(50));
        assert_eq!(config.bed_presence_threshold, 20.0);
        assert_eq!(config.history_capacity, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = Config {
            time_multiplier: 600.0,
            ..Config::default()
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = Config::load_from(&dir.path().join("absent.json")).unwrap();
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "time_multiplier": 120.0, "tick_interval": 100 }"#).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.time_multiplier, 120.0);
        assert_eq!(loaded.tick_interval, Duration::from_millis(100));
        assert_eq!(loaded.policy, ScoringPolicy::default());
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            validate_multiplier(0.5),
            Err(ConfigError::InvalidMultiplier(_))
        ));
        assert!(validate_multiplier(3600.0).is_ok());

        let config = Config {
            tick_interval: Duration::ZERO,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidTickInterval)
        ));
    }

    #[test]
    fn test_garbage_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::Parse(_))
        ));
    }
}
