//! Verdicts and the report of a single parity check.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::engine::ParityBit;

/// Outcome of validating or checking a binary string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    /// Input is a binary string
    Valid,
    /// Input contains a character other than '0' or '1'
    InvalidInput,
    /// Data + parity has an odd count of ones
    ErrorDetected,
    /// Data + parity has an even count of ones
    NoError,
}

impl Verdict {
    /// Human-readable status text.
    pub fn message(&self) -> &'static str {
        match self {
            Verdict::Valid => "Valid binary string.",
            Verdict::InvalidInput => "Please enter a valid binary string (only 0s and 1s).",
            Verdict::ErrorDetected => "Error detected in data transmission!",
            Verdict::NoError => "No error detected.",
        }
    }

    /// Short title shown above the message.
    pub fn title(&self) -> &'static str {
        match self {
            Verdict::Valid => "Validation",
            Verdict::InvalidInput => "Validation Error",
            Verdict::ErrorDetected | Verdict::NoError => "Error Detection",
        }
    }

    /// Whether this verdict stops the parity bit from being computed.
    pub fn is_blocking(&self) -> bool {
        matches!(self, Verdict::InvalidInput)
    }

    /// Whether this verdict should be surfaced as an error.
    pub fn is_error(&self) -> bool {
        matches!(self, Verdict::InvalidInput | Verdict::ErrorDetected)
    }

    /// Validation verdict for a raw string.
    pub fn from_validation(valid: bool) -> Self {
        if valid {
            Verdict::Valid
        } else {
            Verdict::InvalidInput
        }
    }

    /// Detection verdict for the result of an error check.
    pub fn from_detection(detected: bool) -> Self {
        if detected {
            Verdict::ErrorDetected
        } else {
            Verdict::NoError
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Result of the "Calculate Parity" action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckReport {
    /// The input exactly as given
    pub input: String,

    /// Count of ones in the input (absent when invalid)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ones: Option<usize>,

    /// Computed even-parity bit (absent when invalid)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parity_bit: Option<ParityBit>,

    /// Input followed by its parity bit (absent when invalid)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_with_parity: Option<String>,

    pub verdict: Verdict,
}

impl CheckReport {
    /// Report for input that failed validation.
    pub fn invalid(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            ones: None,
            parity_bit: None,
            data_with_parity: None,
            verdict: Verdict::InvalidInput,
        }
    }

    pub fn is_valid(&self) -> bool {
        !self.verdict.is_blocking()
    }

    pub fn message(&self) -> &'static str {
        self.verdict.message()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            Verdict::InvalidInput.message(),
            "Please enter a valid binary string (only 0s and 1s)."
        );
        assert_eq!(
            Verdict::ErrorDetected.to_string(),
            "Error detected in data transmission!"
        );
    }

    #[test]
    fn test_titles() {
        assert_eq!(Verdict::InvalidInput.title(), "Validation Error");
        assert_eq!(Verdict::ErrorDetected.title(), "Error Detection");
    }

    #[test]
    fn test_only_invalid_input_blocks() {
        assert!(Verdict::InvalidInput.is_blocking());
        assert!(!Verdict::ErrorDetected.is_blocking());
        assert!(!Verdict::NoError.is_blocking());
        assert!(!Verdict::Valid.is_blocking());
    }

    #[test]
    fn test_error_verdicts() {
        assert!(Verdict::ErrorDetected.is_error());
        assert!(Verdict::InvalidInput.is_error());
        assert!(!Verdict::NoError.is_error());
    }

    #[test]
    fn test_invalid_report_serialization() {
        let report = CheckReport::invalid("11a1");
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["verdict"], "INVALID_INPUT");
        assert_eq!(json["input"], "11a1");
        assert!(json.get("parity_bit").is_none());
        assert!(!report.is_valid());
    }
}
