//! # parity-core
//!
//! Deterministic even-parity generation and single-bit error detection.
//!
//! This crate answers three questions about a short binary string:
//! - Is it a valid binary string?
//! - Which parity bit makes its count of ones even?
//! - Does a received data + parity frame show a transmission error?
//!
//! ## Key Guarantees
//!
//! 1. **Deterministic**: Same input always produces same output
//! 2. **Stateless engine**: All state lives in the caller-owned [`ParityForm`]
//! 3. **Total**: Non-binary input yields an error or verdict, never a panic
//! 4. **Single-bit detection**: Exactly one flipped bit is always detected.
//!    An even number of flips is not, which is inherent to a single parity bit.
//!
//! ## Example
//!
//! ```rust
//! use parity_core::{check, ParityBit, Verdict};
//!
//! let report = check("1101");
//! assert_eq!(report.parity_bit, Some(ParityBit::One));
//! assert_eq!(report.data_with_parity.as_deref(), Some("11011"));
//! assert_eq!(report.verdict, Verdict::NoError);
//!
//! let report = check("11a1");
//! assert_eq!(report.verdict, Verdict::InvalidInput);
//! assert!(report.parity_bit.is_none());
//! ```

pub mod config;
pub mod engine;
pub mod form;
pub mod verdict;

// Re-export main types at crate root
pub use config::{ConfigError, ParityConfig};
pub use engine::{
    compute_parity, count_ones, detect_error, detect_error_in_frame, flip_bit, validate,
    BinaryString, ParityBit,
};
pub use form::ParityForm;
pub use verdict::{CheckReport, Verdict};

use thiserror::Error;
use tracing::{debug, warn};

/// Errors that can occur while computing or checking parity.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParityError {
    #[error("Invalid input format: {found:?} at position {position} is not a binary digit")]
    InvalidInputFormat { position: usize, found: char },

    #[error("Invalid parity bit: {0:?} (expected '0' or '1')")]
    InvalidParityBit(char),

    #[error("Input too long: {len} characters (maximum {max})")]
    InputTooLong { len: usize, max: usize },

    #[error("Bit index {index} out of range for frame of length {len}")]
    BitIndexOutOfRange { index: usize, len: usize },

    #[error("Frame is empty: expected data bits followed by a parity bit")]
    EmptyFrame,
}

/// Run the "Calculate Parity" action on a raw input string.
///
/// This is the main entry point: validate, then compute the parity bit,
/// then re-check the combined frame.
///
/// # Returns
///
/// A `CheckReport` containing:
/// - `verdict`: `InvalidInput`, or `NoError` / `ErrorDetected` for valid input
/// - `parity_bit` and `data_with_parity`: present only for valid input
/// - `ones`: number of `'1'` characters in the data, for valid input
pub fn check(data: &str) -> CheckReport {
    let binary = match BinaryString::parse(data) {
        Ok(binary) => binary,
        Err(e) => {
            warn!(input = data, error = %e, "Rejected non-binary input");
            return CheckReport::invalid(data);
        }
    };

    let ones = binary.ones();
    let parity_bit = binary.parity();
    let verdict = Verdict::from_detection(binary.has_error(parity_bit));

    debug!(input = data, ones, parity = %parity_bit, verdict = ?verdict, "Parity check complete");

    CheckReport {
        input: data.to_string(),
        ones: Some(ones),
        parity_bit: Some(parity_bit),
        data_with_parity: Some(binary.with_parity()),
        verdict,
    }
}

/// Check received data against an externally supplied parity character.
///
/// Invalid data yields `Verdict::InvalidInput`; a parity character other
/// than `'0'` or `'1'` is an error because there is nothing to compare.
pub fn verify(data: &str, parity: char) -> Result<Verdict, ParityError> {
    let parity_bit = ParityBit::try_from(parity)?;

    let verdict = match BinaryString::parse(data) {
        Ok(binary) => Verdict::from_detection(binary.has_error(parity_bit)),
        Err(e) => {
            warn!(input = data, error = %e, "Rejected non-binary input");
            Verdict::InvalidInput
        }
    };

    debug!(input = data, parity = %parity_bit, verdict = ?verdict, "Verified received frame");
    Ok(verdict)
}
