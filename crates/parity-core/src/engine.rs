//! Parity Engine: pure functions over binary strings.
//!
//! Every function here is stateless. The string-level functions are total:
//! they validate their input and return [`ParityError::InvalidInputFormat`]
//! instead of producing a meaningless bit. [`BinaryString`] is the typed
//! path: once one exists, parity and detection cannot fail.
//!
//! Even parity is used throughout. A frame (data followed by its parity
//! bit) is error-free when its count of ones is even.

use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ParityError;

lazy_static! {
    /// Binary string pattern. Anchored at both ends, so the empty string matches.
    pub static ref BINARY_PATTERN: Regex = Regex::new(r"^[01]*$").unwrap();
}

// =========================================================================
// PARITY BIT
// =========================================================================

/// A single parity bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParityBit {
    #[serde(rename = "0")]
    Zero,
    #[serde(rename = "1")]
    One,
}

impl ParityBit {
    /// The even-parity bit for a given count of ones.
    pub fn for_ones(ones: usize) -> Self {
        if ones % 2 == 0 {
            ParityBit::Zero
        } else {
            ParityBit::One
        }
    }

    pub fn as_char(self) -> char {
        match self {
            ParityBit::Zero => '0',
            ParityBit::One => '1',
        }
    }

    /// The opposite bit.
    pub fn flipped(self) -> Self {
        match self {
            ParityBit::Zero => ParityBit::One,
            ParityBit::One => ParityBit::Zero,
        }
    }

    fn ones(self) -> usize {
        match self {
            ParityBit::Zero => 0,
            ParityBit::One => 1,
        }
    }
}

impl TryFrom<char> for ParityBit {
    type Error = ParityError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            '0' => Ok(ParityBit::Zero),
            '1' => Ok(ParityBit::One),
            other => Err(ParityError::InvalidParityBit(other)),
        }
    }
}

impl From<ParityBit> for char {
    fn from(bit: ParityBit) -> Self {
        bit.as_char()
    }
}

impl fmt::Display for ParityBit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

// =========================================================================
// BINARY STRING
// =========================================================================

/// A string made only of `'0'` and `'1'` characters.
///
/// Length is not bounded here; the form applies its own input limit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BinaryString(String);

impl BinaryString {
    /// Parse a binary string, rejecting any other character.
    pub fn parse(data: &str) -> Result<Self, ParityError> {
        ensure_binary(data)?;
        Ok(Self(data.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of `'1'` characters.
    pub fn ones(&self) -> usize {
        count_ones(&self.0)
    }

    /// The even-parity bit for this data.
    pub fn parity(&self) -> ParityBit {
        ParityBit::for_ones(self.ones())
    }

    /// The data followed by its parity bit.
    pub fn with_parity(&self) -> String {
        format!("{}{}", self.0, self.parity())
    }

    /// Whether the frame `self + parity_bit` has an odd count of ones.
    pub fn has_error(&self, parity_bit: ParityBit) -> bool {
        (self.ones() + parity_bit.ones()) % 2 != 0
    }
}

impl TryFrom<String> for BinaryString {
    type Error = ParityError;

    fn try_from(data: String) -> Result<Self, Self::Error> {
        ensure_binary(&data)?;
        Ok(Self(data))
    }
}

impl From<BinaryString> for String {
    fn from(binary: BinaryString) -> Self {
        binary.0
    }
}

impl FromStr for BinaryString {
    type Err = ParityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for BinaryString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BinaryString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =========================================================================
// ENGINE OPERATIONS
// =========================================================================

/// Check whether every character is `'0'` or `'1'`. The empty string is valid.
pub fn validate(data: &str) -> bool {
    BINARY_PATTERN.is_match(data)
}

/// Count the `'1'` characters in `data`.
pub fn count_ones(data: &str) -> usize {
    data.chars().filter(|&c| c == '1').count()
}

/// Compute the even-parity bit for `data`.
///
/// The returned bit makes the total count of ones in `data + bit` even.
pub fn compute_parity(data: &str) -> Result<ParityBit, ParityError> {
    ensure_binary(data)?;

    let ones = count_ones(data);
    let parity = ParityBit::for_ones(ones);
    debug!(data, ones, parity = %parity, "Computed parity bit");

    Ok(parity)
}

/// Check `data` followed by `parity_bit` for a transmission error.
///
/// Returns `true` when the combined count of ones is odd. An even number
/// of flipped bits leaves the count even and is reported as no error.
pub fn detect_error(data: &str, parity_bit: ParityBit) -> Result<bool, ParityError> {
    ensure_binary(data)?;

    let frame = format!("{}{}", data, parity_bit);
    let ones = count_ones(&frame);
    let detected = ones % 2 != 0;
    debug!(frame = %frame, ones, detected, "Checked frame parity");

    Ok(detected)
}

/// Same check as [`detect_error`] on an already combined frame.
///
/// The last character of `frame` is taken as the parity bit, so the frame
/// must hold at least one character.
pub fn detect_error_in_frame(frame: &str) -> Result<bool, ParityError> {
    if frame.is_empty() {
        return Err(ParityError::EmptyFrame);
    }
    ensure_binary(frame)?;

    let ones = count_ones(frame);
    let detected = ones % 2 != 0;
    debug!(frame, ones, detected, "Checked frame parity");

    Ok(detected)
}

/// Flip the bit at `index` (0-based from the left) in a binary frame.
pub fn flip_bit(frame: &str, index: usize) -> Result<String, ParityError> {
    ensure_binary(frame)?;

    let len = frame.len();
    if index >= len {
        return Err(ParityError::BitIndexOutOfRange { index, len });
    }

    Ok(frame
        .chars()
        .enumerate()
        .map(|(i, c)| match (i == index, c) {
            (true, '0') => '1',
            (true, _) => '0',
            (false, c) => c,
        })
        .collect())
}

fn ensure_binary(data: &str) -> Result<(), ParityError> {
    if validate(data) {
        return Ok(());
    }

    let (position, found) = data
        .chars()
        .enumerate()
        .find(|(_, c)| !matches!(c, '0' | '1'))
        .unwrap_or_default();

    Err(ParityError::InvalidInputFormat { position, found })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use proptest::sample::Index;

    #[test]
    fn test_validate() {
        assert!(validate(""));
        assert!(validate("101"));
        assert!(!validate("102"));
        assert!(!validate("abc"));
        assert!(!validate("10\n"));
        assert!(!validate(" 101"));
    }

    #[test]
    fn test_compute_parity_examples() {
        assert_eq!(compute_parity("1101"), Ok(ParityBit::One));
        assert_eq!(compute_parity("1100"), Ok(ParityBit::Zero));
        assert_eq!(compute_parity(""), Ok(ParityBit::Zero));
        assert_eq!(compute_parity("11111111"), Ok(ParityBit::Zero));
    }

    #[test]
    fn test_compute_parity_rejects_invalid() {
        assert_eq!(
            compute_parity("11a1"),
            Err(ParityError::InvalidInputFormat {
                position: 2,
                found: 'a'
            })
        );
    }

    #[test]
    fn test_detect_error_examples() {
        assert_eq!(detect_error("1101", ParityBit::One), Ok(false));
        assert_eq!(detect_error("1100", ParityBit::Zero), Ok(false));
        assert_eq!(detect_error("1101", ParityBit::Zero), Ok(true));
        assert!(detect_error("1x", ParityBit::Zero).is_err());
    }

    #[test]
    fn test_detect_error_in_frame() {
        assert_eq!(detect_error_in_frame("11011"), Ok(false));
        assert_eq!(detect_error_in_frame("11001"), Ok(true));
        assert_eq!(detect_error_in_frame(""), Err(ParityError::EmptyFrame));
    }

    #[test]
    fn test_flip_bit() {
        assert_eq!(flip_bit("11011", 0).as_deref(), Ok("01011"));
        assert_eq!(flip_bit("11011", 4).as_deref(), Ok("11010"));
        assert_eq!(
            flip_bit("11011", 5),
            Err(ParityError::BitIndexOutOfRange { index: 5, len: 5 })
        );
    }

    #[test]
    fn test_parity_bit_conversions() {
        assert_eq!(ParityBit::try_from('1'), Ok(ParityBit::One));
        assert_eq!(ParityBit::try_from('x'), Err(ParityError::InvalidParityBit('x')));
        assert_eq!(char::from(ParityBit::Zero), '0');
        assert_eq!(ParityBit::One.flipped(), ParityBit::Zero);
        assert_eq!(serde_json::to_string(&ParityBit::One).unwrap(), "\"1\"");
    }

    #[test]
    fn test_binary_string_serde() {
        let binary: BinaryString = serde_json::from_str("\"1011\"").unwrap();
        assert_eq!(binary.as_str(), "1011");
        assert!(serde_json::from_str::<BinaryString>("\"10a1\"").is_err());
    }

    /// Split a frame back into data and parity bit.
    fn split(frame: &str) -> (&str, ParityBit) {
        let (data, last) = frame.split_at(frame.len() - 1);
        let bit = ParityBit::try_from(last.chars().next().unwrap()).unwrap();
        (data, bit)
    }

    proptest! {
        #[test]
        fn parity_makes_total_even(s in "[01]{0,16}") {
            let bit = compute_parity(&s).unwrap();
            let frame = format!("{}{}", s, bit);
            prop_assert_eq!(count_ones(&frame) % 2, 0);
        }

        #[test]
        fn correct_parity_reports_no_error(s in "[01]{0,16}") {
            let bit = compute_parity(&s).unwrap();
            prop_assert!(!detect_error(&s, bit).unwrap());
        }

        #[test]
        fn single_flip_is_detected(s in "[01]{0,16}", at in any::<Index>()) {
            let frame = BinaryString::parse(&s).unwrap().with_parity();
            let flipped = flip_bit(&frame, at.index(frame.len())).unwrap();

            let (data, bit) = split(&flipped);
            prop_assert!(detect_error(data, bit).unwrap());
            prop_assert!(detect_error_in_frame(&flipped).unwrap());
        }

        #[test]
        fn double_flip_goes_undetected(
            s in "[01]{1,16}",
            first in any::<Index>(),
            offset in any::<Index>()
        ) {
            let frame = BinaryString::parse(&s).unwrap().with_parity();
            let len = frame.len();
            let i = first.index(len);
            let j = (i + 1 + offset.index(len - 1)) % len;

            let flipped = flip_bit(&flip_bit(&frame, i).unwrap(), j).unwrap();

            let (data, bit) = split(&flipped);
            prop_assert!(!detect_error(data, bit).unwrap());
        }

        #[test]
        fn typed_path_matches_string_path(s in "[01]{0,16}") {
            let binary = BinaryString::parse(&s).unwrap();
            prop_assert_eq!(binary.parity(), compute_parity(&s).unwrap());
            prop_assert_eq!(binary.has_error(ParityBit::One), detect_error(&s, ParityBit::One).unwrap());
        }

        #[test]
        fn non_binary_input_is_rejected(s in "[01]{0,4}[^01][01]{0,4}") {
            prop_assert!(!validate(&s));
            prop_assert!(compute_parity(&s).is_err());
            prop_assert!(BinaryString::parse(&s).is_err());
        }
    }
}
