// SPDX-License-Identifier: Apache-2.0

use core::str::FromStr;

use crate::int_parser::{from_ascii_i64, IntParseError};
use crate::ParseError;

/// How a JSON number is delivered to the binder.
///
/// The choice is made from the digits alone, before anything is known about
/// the slot the number is headed for.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum NumberResult {
    /// Integer that fits in `i64`
    Integer(i64),
    /// Number with a fraction or exponent and a finite `f64` value
    Float(f64),
    /// Too large for `i64` / `f64`; the raw text is the only exact representation
    Overflow,
}

/// Detects if a number byte slice represents an integer (no decimal point or exponent).
pub fn is_integer(bytes: &[u8]) -> bool {
    !bytes.iter().any(|&b| matches!(b, b'.' | b'e' | b'E'))
}

/// Classifies grammar-checked number bytes.
pub fn classify(bytes: &[u8]) -> Result<NumberResult, ParseError> {
    if is_integer(bytes) {
        return match from_ascii_i64(bytes) {
            Ok(val) => Ok(NumberResult::Integer(val)),
            Err(IntParseError::Overflow) => Ok(NumberResult::Overflow),
            Err(_) => Err(ParseError::InvalidNumber),
        };
    }
    let text = crate::shared::from_utf8(bytes)?;
    match f64::from_str(text) {
        Ok(val) if val.is_finite() => Ok(NumberResult::Float(val)),
        Ok(_) => Ok(NumberResult::Overflow),
        Err(_) => Err(ParseError::InvalidNumber),
    }
}
