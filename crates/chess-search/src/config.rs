//! Search configuration loaded from TOML.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur when loading or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    /// A field holds a value the search cannot run with.
    #[error("Invalid config value for `{field}`: must be at least 1")]
    Invalid {
        /// Name of the offending field.
        field: &'static str,
    },
}

/// Settings for the searcher and the coordinator.
///
/// Every field is optional in TOML and falls back to its default.
///
/// ```toml
/// max_depth = 6
/// node_check_interval = 2048
/// default_time_limit_ms = 500
/// seed = 42
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SearchConfig {
    /// Hard cap on iterative deepening. Defaults to 32.
    #[serde(default = "default_max_depth")]
    pub max_depth: u32,
    /// How many nodes to visit between deadline checks. Defaults to 1024.
    #[serde(default = "default_node_check_interval")]
    pub node_check_interval: u64,
    /// Time budget used when a caller does not give one. Defaults to 1000.
    #[serde(default = "default_time_limit_ms")]
    pub default_time_limit_ms: u64,
    /// Seed for root tie-breaking. `None` seeds from the OS.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Maximum number of queued coordinator requests. Defaults to 8.
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
}

fn default_max_depth() -> u32 {
    32
}

fn default_node_check_interval() -> u64 {
    1024
}

fn default_time_limit_ms() -> u64 {
    1000
}

fn default_queue_capacity() -> usize {
    8
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            max_depth: default_max_depth(),
            node_check_interval: default_node_check_interval(),
            default_time_limit_ms: default_time_limit_ms(),
            seed: None,
            queue_capacity: default_queue_capacity(),
        }
    }
}

impl SearchConfig {
    /// Parses and validates a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ParseError`] for malformed TOML and
    /// [`ConfigError::Invalid`] for zero depth, interval or capacity.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: SearchConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a configuration file from disk.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file cannot be read, or any
    /// error [`Self::from_toml_str`] reports.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Checks that every limit is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == 0 {
            return Err(ConfigError::Invalid { field: "max_depth" });
        }
        if self.node_check_interval == 0 {
            return Err(ConfigError::Invalid {
                field: "node_check_interval",
            });
        }
        if self.queue_capacity == 0 {
            return Err(ConfigError::Invalid {
                field: "queue_capacity",
            });
        }
        Ok(())
    }
}
