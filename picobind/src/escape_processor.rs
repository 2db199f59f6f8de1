// SPDX-License-Identifier: Apache-2.0

use alloc::string::String;
use alloc::vec::Vec;

use crate::parse_error::ParseError;

/// Decodes JSON string escapes.
///
/// Input is string content already checked by the tokenizer, so every
/// backslash is followed by a known escape character and `\u` by four hex
/// digits. What is left to check here is Unicode validity.
pub struct EscapeProcessor;

impl EscapeProcessor {
    /// Process a simple escape sequence character and return the unescaped byte.
    pub fn process_simple_escape(escape_char: u8) -> Result<u8, ParseError> {
        match escape_char {
            b'n' => Ok(b'\n'),
            b't' => Ok(b'\t'),
            b'r' => Ok(b'\r'),
            b'\\' => Ok(b'\\'),
            b'"' => Ok(b'"'),
            b'/' => Ok(b'/'),
            b'b' => Ok(0x08), // Backspace
            b'f' => Ok(0x0C), // Form feed
            _ => Err(ParseError::InvalidEscapeSequence),
        }
    }

    /// Numeric value of a hex digit.
    pub fn hex_value(byte: u8) -> Result<u32, ParseError> {
        match byte {
            b'0'..=b'9' => Ok((byte - b'0') as u32),
            b'a'..=b'f' => Ok((byte - b'a' + 10) as u32),
            b'A'..=b'F' => Ok((byte - b'A' + 10) as u32),
            _ => Err(ParseError::InvalidEscapeSequence),
        }
    }

    /// Parses the four hex digits of a `\uXXXX` escape.
    pub fn parse_hex4(digits: &[u8]) -> Result<u32, ParseError> {
        if digits.len() != 4 {
            return Err(ParseError::InvalidEscapeSequence);
        }
        digits
            .iter()
            .try_fold(0u32, |acc, &b| Ok((acc << 4) | Self::hex_value(b)?))
    }

    pub fn is_high_surrogate(codepoint: u32) -> bool {
        (0xD800..=0xDBFF).contains(&codepoint)
    }

    pub fn is_low_surrogate(codepoint: u32) -> bool {
        (0xDC00..=0xDFFF).contains(&codepoint)
    }

    /// Combine a high and low surrogate pair into a single Unicode codepoint
    pub fn combine_surrogate_pair(high: u32, low: u32) -> Result<u32, ParseError> {
        if !Self::is_high_surrogate(high) || !Self::is_low_surrogate(low) {
            return Err(ParseError::InvalidUnicodeCodepoint);
        }
        Ok(0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00))
    }

    /// Unescapes raw string content into owned text.
    pub fn unescape(raw: &[u8]) -> Result<String, ParseError> {
        let mut out = Vec::with_capacity(raw.len());
        let mut i = 0;
        while let Some(&byte) = raw.get(i) {
            if byte != b'\\' {
                out.push(byte);
                i += 1;
                continue;
            }
            let escape_char = *raw.get(i + 1).ok_or(ParseError::InvalidEscapeSequence)?;
            if escape_char != b'u' {
                out.push(Self::process_simple_escape(escape_char)?);
                i += 2;
                continue;
            }
            let (codepoint, consumed) = Self::unicode_escape(raw, i)?;
            let ch = char::from_u32(codepoint).ok_or(ParseError::InvalidUnicodeCodepoint)?;
            let mut utf8 = [0u8; 4];
            out.extend_from_slice(ch.encode_utf8(&mut utf8).as_bytes());
            i += consumed;
        }
        String::from_utf8(out).map_err(|e| ParseError::InvalidUtf8(e.utf8_error()))
    }

    /// Decodes the `\uXXXX` escape at `at`, pairing it with a following low
    /// surrogate escape when it is a high surrogate. Returns the codepoint and
    /// the number of bytes consumed.
    fn unicode_escape(raw: &[u8], at: usize) -> Result<(u32, usize), ParseError> {
        let hex = raw
            .get(at + 2..at + 6)
            .ok_or(ParseError::InvalidEscapeSequence)?;
        let first = Self::parse_hex4(hex)?;
        if Self::is_low_surrogate(first) {
            return Err(ParseError::InvalidUnicodeCodepoint);
        }
        if !Self::is_high_surrogate(first) {
            return Ok((first, 6));
        }
        match raw.get(at + 6..at + 12) {
            Some([b'\\', b'u', low @ ..]) => {
                let low = Self::parse_hex4(low)?;
                Ok((Self::combine_surrogate_pair(first, low)?, 12))
            }
            _ => Err(ParseError::InvalidUnicodeCodepoint),
        }
    }
}
