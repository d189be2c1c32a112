//! Balancer configuration.
//!
//! Loaded from a TOML file, with every key optional:
//!
//! ```toml
//! group_count = 4
//! max_trials = 5000
//! good_enough = 1.0
//! threads = 4
//! seed = 42
//! history_capacity = 10
//! export_bom = true
//! ```
//!
//! Individual keys can also be changed at runtime through `set_option`.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::history::DEFAULT_HISTORY_CAPACITY;
use crate::roster::group::MAX_GROUPS;
use crate::search::{SearchConfig, DEFAULT_GOOD_ENOUGH, DEFAULT_MAX_TRIALS};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Session-wide settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BalancerConfig {
    /// Groups to balance into (2 to 6).
    pub group_count: usize,
    /// Trial budget per balancing run.
    pub max_trials: usize,
    /// Objective at or below which a run stops early.
    pub good_enough: f64,
    /// Search workers; 1 runs the search on the calling thread.
    pub threads: usize,
    /// RNG seed; 0 draws from entropy.
    pub seed: u64,
    /// History records kept.
    pub history_capacity: usize,
    /// Prefix CSV exports with a UTF-8 byte order mark.
    pub export_bom: bool,
}

impl Default for BalancerConfig {
    fn default() -> Self {
        BalancerConfig {
            group_count: 2,
            max_trials: DEFAULT_MAX_TRIALS,
            good_enough: DEFAULT_GOOD_ENOUGH,
            threads: 1,
            seed: 0,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            export_bom: true,
        }
    }
}

impl BalancerConfig {
    /// Reads and validates a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Parses and validates TOML text.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: BalancerConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.group_count < 2 || self.group_count > MAX_GROUPS {
            return Err(ConfigError::Invalid(format!(
                "group_count must be between 2 and {}, got {}",
                MAX_GROUPS, self.group_count
            )));
        }
        if self.max_trials == 0 {
            return Err(ConfigError::Invalid("max_trials must be at least 1".to_string()));
        }
        if self.threads == 0 {
            return Err(ConfigError::Invalid("threads must be at least 1".to_string()));
        }
        if !self.good_enough.is_finite() {
            return Err(ConfigError::Invalid("good_enough must be finite".to_string()));
        }
        Ok(())
    }

    /// Search limits derived from this config.
    pub fn search(&self) -> SearchConfig {
        SearchConfig {
            max_trials: self.max_trials,
            good_enough: self.good_enough,
            threads: self.threads,
        }
    }

    /// Applies a named option. Names are the protocol option ids
    /// (`Trials`, `GoodEnough`, `Threads`, `ExportBom`).
    pub fn set_option(&mut self, name: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = || ConfigError::Invalid(format!("bad value '{}' for option {}", value, name));
        let mut next = self.clone();
        match name {
            "Trials" => next.max_trials = value.parse().map_err(|_| invalid())?,
            "GoodEnough" => next.good_enough = value.parse().map_err(|_| invalid())?,
            "Threads" => next.threads = value.parse().map_err(|_| invalid())?,
            "ExportBom" => next.export_bom = value.parse().map_err(|_| invalid())?,
            other => return Err(ConfigError::Invalid(format!("unknown option '{}'", other))),
        }
        next.validate()?;
        *self = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = BalancerConfig::default();
        assert_eq!(c.max_trials, 5000);
        assert_eq!(c.good_enough, 1.0);
        assert_eq!(c.history_capacity, 10);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let c = BalancerConfig::from_toml_str("group_count = 4\nseed = 42\n").unwrap();
        assert_eq!(c.group_count, 4);
        assert_eq!(c.seed, 42);
        assert_eq!(c.max_trials, 5000);
        assert!(c.export_bom);
    }

    #[test]
    fn rejects_bad_group_count() {
        let err = BalancerConfig::from_toml_str("group_count = 9").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_zero_trial_budget() {
        let err = BalancerConfig::from_toml_str("max_trials = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        let mut c = BalancerConfig::default();
        assert!(c.set_option("Trials", "0").is_err());
        assert_eq!(c.max_trials, 5000);
    }

    #[test]
    fn rejects_malformed_toml() {
        let err = BalancerConfig::from_toml_str("group_count = ").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn set_option_updates_and_validates() {
        let mut c = BalancerConfig::default();
        c.set_option("Trials", "200").unwrap();
        assert_eq!(c.search().max_trials, 200);
        c.set_option("ExportBom", "false").unwrap();
        assert!(!c.export_bom);
        assert!(c.set_option("Threads", "0").is_err());
        assert_eq!(c.threads, 1);
        assert!(c.set_option("Colour", "red").is_err());
        assert!(c.set_option("Trials", "many").is_err());
    }
}
