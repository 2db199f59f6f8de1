// SPDX-License-Identifier: Apache-2.0

// Panic-free base-10 parsing of JSON integer digits into i64.

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum IntParseError {
    Empty,
    InvalidDigit,
    /// Does not fit in i64; the caller keeps the raw digits instead.
    Overflow,
}

/// Parses `-?[0-9]+` into an `i64`.
///
/// Negative numbers accumulate downward from zero so that `i64::MIN` parses
/// without a detour through an unrepresentable positive value.
pub const fn from_ascii_i64(src: &[u8]) -> Result<i64, IntParseError> {
    let (is_negative, mut digits) = match src {
        [b'-', rest @ ..] => (true, rest),
        _ => (false, src),
    };
    if digits.is_empty() {
        return Err(IntParseError::Empty);
    }

    let mut result: i64 = 0;
    while let Some((&byte, rest)) = digits.split_first() {
        let digit = match byte {
            b'0'..=b'9' => (byte - b'0') as i64,
            _ => return Err(IntParseError::InvalidDigit),
        };
        result = match result.checked_mul(10) {
            Some(val) => val,
            None => return Err(IntParseError::Overflow),
        };
        let next = if is_negative {
            result.checked_sub(digit)
        } else {
            result.checked_add(digit)
        };
        result = match next {
            Some(val) => val,
            None => return Err(IntParseError::Overflow),
        };
        digits = rest;
    }
    Ok(result)
}
