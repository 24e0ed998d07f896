//! # Calculator Configuration
//!
//! Loaded from a JSON file named by `EPI_CONFIG_PATH`, falling back to
//! defaults when the variable is unset or blank. Command-line flags are
//! applied on top by the binary.

use std::path::{Path, PathBuf};
use std::{env, fs};

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::history::DEFAULT_HISTORY_FILE;

pub const CONFIG_PATH_ENV: &str = "EPI_CONFIG_PATH";

pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    /// Flat history file used by the interactive loop
    pub history_path: PathBuf,
    /// Save history on exit and load it on start
    pub persist_history: bool,
    /// strftime pattern for entry timestamps
    pub timestamp_format: String,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            history_path: PathBuf::from(DEFAULT_HISTORY_FILE),
            persist_history: true,
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
        }
    }
}

impl CalculatorConfig {
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_json(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read the file named by `EPI_CONFIG_PATH`, or defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let Ok(path) = env::var(CONFIG_PATH_ENV) else {
            return Ok(Self::default());
        };

        let path = path.trim();
        if path.is_empty() {
            return Ok(Self::default());
        }

        log::debug!("Loading config from {CONFIG_PATH_ENV}='{path}'");
        Self::from_file(Path::new(path))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("history_path is empty".to_string()));
        }
        if self.timestamp_format.trim().is_empty() {
            return Err(ConfigError::Invalid("timestamp_format is empty".to_string()));
        }
        if StrftimeItems::new(&self.timestamp_format).any(|item| matches!(item, Item::Error)) {
            return Err(ConfigError::Invalid(format!(
                "timestamp_format '{}' is not a valid strftime pattern",
                self.timestamp_format
            )));
        }
        Ok(())
    }
}
