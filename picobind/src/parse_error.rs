// SPDX-License-Identifier: Apache-2.0

use crate::tokenizer;

/// Errors that can occur while turning JSON text into events.
#[derive(Debug, PartialEq, Clone)]
pub enum ParseError {
    /// A grammar violation reported by the tokenizer.
    TokenizerError(tokenizer::Error),
    /// A string slice was not valid UTF-8.
    InvalidUtf8(core::str::Utf8Error),
    /// A number string could not be parsed.
    InvalidNumber,
    /// A `\u` escape named a lone surrogate or an invalid codepoint.
    InvalidUnicodeCodepoint,
    /// Invalid escape sequence character.
    InvalidEscapeSequence,
    /// Error from the underlying reader (I/O error, not end-of-stream)
    ReaderError,
}

impl From<tokenizer::Error> for ParseError {
    fn from(err: tokenizer::Error) -> Self {
        ParseError::TokenizerError(err)
    }
}

impl From<core::str::Utf8Error> for ParseError {
    fn from(err: core::str::Utf8Error) -> Self {
        ParseError::InvalidUtf8(err)
    }
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ParseError::TokenizerError(e) => write!(f, "{e}"),
            ParseError::InvalidUtf8(e) => write!(f, "Invalid UTF-8: {e}"),
            _ => write!(f, "{self:?}"),
        }
    }
}

impl core::error::Error for ParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf8_error_conversion() {
        // Create the invalid sequence at runtime to avoid a lint on invalid literals
        let mut invalid_utf8_array = [0u8; 1];
        invalid_utf8_array[0] = 0b10000000u8; // continuation byte without start
        match core::str::from_utf8(&invalid_utf8_array) {
            Err(utf8_error) => {
                let parse_error: ParseError = utf8_error.into();
                assert!(matches!(parse_error, ParseError::InvalidUtf8(_)));
                assert!(parse_error.to_string().starts_with("Invalid UTF-8"));
            }
            Ok(_) => panic!("Expected UTF-8 validation to fail"),
        }
    }

    #[test]
    fn test_display_falls_back_to_debug() {
        assert_eq!(ParseError::InvalidNumber.to_string(), "InvalidNumber");
        assert_eq!(ParseError::ReaderError.to_string(), "ReaderError");
    }
}
