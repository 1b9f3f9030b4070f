//! Form configuration.
//!
//! Configuration is plain structured data read from YAML or JSON.
//! This module handles parsing it and validating the values.

mod parser;

pub use parser::{ConfigError, ParityConfig, DEFAULT_INPUT, DEFAULT_MAX_INPUT_LEN};
