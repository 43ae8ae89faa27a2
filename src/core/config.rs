//! Match configuration
//!
//! Every tunable of a match run lives here. Values come from `Default`,
//! optionally overridden by a TOML file, optionally overridden again by
//! command line flags.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::core::types::Round;

/// Rounds in a full contest match
pub const DEFAULT_ROUNDS: Round = 100_000;

/// Seed of the reference trace
pub const DEFAULT_SEED: u64 = 12345;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("Invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("{0}")]
    Invalid(String),
}

/// Configuration for one match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MatchConfig {
    /// Seed of the engine's random generator. Must be positive.
    pub seed: u64,

    /// Number of rounds to play
    pub rounds: Round,

    /// Rounds run per batch before control returns to the host
    ///
    /// Only affects responsiveness; results are identical for any value.
    pub batch_size: Round,

    /// Record a food tally every this many rounds
    pub tally_interval: Round,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            rounds: DEFAULT_ROUNDS,
            batch_size: 1000,
            tally_interval: 100,
        }
    }
}

impl MatchConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML text; missing keys take their defaults
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: MatchConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.seed == 0 {
            return Err(ConfigError::Invalid("seed must be a positive integer".into()));
        }
        if self.batch_size == 0 {
            return Err(ConfigError::Invalid("batch_size must be positive".into()));
        }
        if self.tally_interval == 0 {
            return Err(ConfigError::Invalid("tally_interval must be positive".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(MatchConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = MatchConfig::from_toml_str("seed = 42\nrounds = 500\n").unwrap();
        assert_eq!(config.seed, 42);
        assert_eq!(config.rounds, 500);
        assert_eq!(config.batch_size, MatchConfig::default().batch_size);
    }

    #[test]
    fn test_zero_seed_rejected() {
        let err = MatchConfig::from_toml_str("seed = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_zero_batch_rejected() {
        let config = MatchConfig {
            batch_size: 0,
            ..MatchConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = MatchConfig::from_toml_str("sead = 3").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }
}
