//! Form state: the current input, its parity bit and the error text.
//!
//! The engine keeps no state. `ParityForm` is the caller-owned record a
//! front end binds to; every field is replaced on the next input change.

use tracing::{debug, warn};

use crate::config::ParityConfig;
use crate::engine::{detect_error_in_frame, ParityBit};
use crate::verdict::{CheckReport, Verdict};
use crate::ParityError;

/// State of the interactive parity form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParityForm {
    input: String,
    parity_bit: Option<ParityBit>,
    error: Option<String>,
    max_input_len: usize,
}

impl ParityForm {
    /// Start from the configured default input with nothing computed.
    pub fn new(config: &ParityConfig) -> Self {
        Self {
            input: config.default_input.clone(),
            parity_bit: None,
            error: None,
            max_input_len: config.max_input_len,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn parity_bit(&self) -> Option<ParityBit> {
        self.parity_bit
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn max_input_len(&self) -> usize {
        self.max_input_len
    }

    /// The input followed by its parity bit, once calculated.
    pub fn data_with_parity(&self) -> Option<String> {
        self.parity_bit
            .map(|bit| format!("{}{}", self.input, bit))
    }

    /// Replace the input, clearing the parity bit and error text.
    ///
    /// Input longer than the configured limit is rejected and the state
    /// is left as it was.
    pub fn set_input(&mut self, text: impl Into<String>) -> Result<(), ParityError> {
        let text = text.into();
        let len = text.chars().count();
        if len > self.max_input_len {
            warn!(len, max = self.max_input_len, "Input exceeds form limit");
            return Err(ParityError::InputTooLong {
                len,
                max: self.max_input_len,
            });
        }

        self.input = text;
        self.parity_bit = None;
        self.error = None;
        Ok(())
    }

    /// Run "Calculate Parity" on the current input.
    pub fn calculate(&mut self) -> CheckReport {
        let report = crate::check(&self.input);

        match report.verdict {
            Verdict::InvalidInput => {
                self.parity_bit = None;
                self.error = Some(report.message().to_string());
            }
            Verdict::ErrorDetected => {
                self.parity_bit = report.parity_bit;
                self.error = Some(report.message().to_string());
            }
            Verdict::Valid | Verdict::NoError => {
                self.parity_bit = report.parity_bit;
                self.error = None;
            }
        }

        debug!(input = %self.input, parity = ?self.parity_bit, error = ?self.error, "Form updated");
        report
    }

    /// Check a received data + parity frame, updating the error text.
    ///
    /// Only the error text changes. The input and parity bit still describe
    /// the sent frame, so `data_with_parity()` and `error()` can refer to
    /// different frames afterwards. A malformed frame is returned as an error
    /// and leaves the state untouched.
    pub fn receive(&mut self, frame: &str) -> Result<Verdict, ParityError> {
        let verdict = Verdict::from_detection(detect_error_in_frame(frame)?);

        self.error = verdict
            .is_error()
            .then(|| verdict.message().to_string());

        debug!(frame, verdict = ?verdict, "Received frame checked");
        Ok(verdict)
    }
}

impl Default for ParityForm {
    fn default() -> Self {
        Self::new(&ParityConfig::default())
    }
}
