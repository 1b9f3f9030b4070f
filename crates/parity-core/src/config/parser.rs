//! Configuration parsing from YAML/JSON.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::engine::validate;

/// Input length accepted by the form.
pub const DEFAULT_MAX_INPUT_LEN: usize = 8;

/// Input the form starts with.
pub const DEFAULT_INPUT: &str = "1101";

/// Errors that can occur when loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Config validation failed: {0}")]
    ValidationError(String),

    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),
}

/// Settings for the parity form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParityConfig {
    /// Maximum number of characters the form accepts
    pub max_input_len: usize,

    /// Input shown before the user types anything
    pub default_input: String,
}

impl Default for ParityConfig {
    fn default() -> Self {
        Self {
            max_input_len: DEFAULT_MAX_INPUT_LEN,
            default_input: DEFAULT_INPUT.to_string(),
        }
    }
}

impl ParityConfig {
    /// Parse a config from YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: ParityConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a config from JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: ParityConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file, picking the format from its extension.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        let contents = fs::read_to_string(path)?;
        match extension.as_str() {
            "yaml" | "yml" => Self::from_yaml(&contents),
            "json" => Self::from_json(&contents),
            other => Err(ConfigError::UnsupportedFormat(format!(
                "{} (expected .yaml, .yml or .json)",
                if other.is_empty() { "no extension" } else { other }
            ))),
        }
    }

    /// Validate the config values.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_input_len == 0 {
            return Err(ConfigError::ValidationError(
                "max_input_len must be at least 1".to_string(),
            ));
        }

        if !validate(&self.default_input) {
            return Err(ConfigError::ValidationError(format!(
                "default_input {:?} is not a binary string",
                self.default_input
            )));
        }

        if self.default_input.len() > self.max_input_len {
            return Err(ConfigError::ValidationError(format!(
                "default_input is {} characters, longer than max_input_len {}",
                self.default_input.len(),
                self.max_input_len
            )));
        }

        Ok(())
    }
}
