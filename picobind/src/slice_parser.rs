// SPDX-License-Identifier: Apache-2.0

use alloc::borrow::Cow;

use crate::escape_processor::EscapeProcessor;
use crate::json_number::{classify, NumberResult};
use crate::parse_error::ParseError;
use crate::shared::{from_utf8, Event, PullParser};
use crate::tokenizer::{RawString, Token, Tokenizer};

/// A pull parser that parses JSON from a slice.
///
/// Strings without escapes are borrowed straight from the input; escaped
/// strings are unescaped into owned text.
// Lifetime 'a is the input buffer lifetime
pub struct SliceParser<'a> {
    tokenizer: Tokenizer<'a>,
}

impl<'a> SliceParser<'a> {
    /// Creates a new parser for the given JSON input.
    ///
    /// # Example
    /// ```
    /// use picobind::{Event, PullParser, SliceParser};
    /// let mut parser = SliceParser::new(r#"{"name": "value"}"#);
    /// assert_eq!(parser.next_event(), Ok(Event::StartObject));
    /// ```
    pub fn new(input: &'a str) -> Self {
        Self::new_from_slice(input.as_bytes())
    }

    /// Creates a new parser from a byte slice. Content is validated as UTF-8
    /// string by string.
    pub fn new_from_slice(input: &'a [u8]) -> Self {
        SliceParser {
            tokenizer: Tokenizer::new(input),
        }
    }

    fn decode_string(raw: RawString<'a>) -> Result<Cow<'a, str>, ParseError> {
        if raw.escaped {
            EscapeProcessor::unescape(raw.bytes).map(Cow::Owned)
        } else {
            from_utf8(raw.bytes).map(Cow::Borrowed)
        }
    }

    fn number_event(raw: &'a [u8]) -> Result<Event<'a>, ParseError> {
        let event = match classify(raw)? {
            NumberResult::Integer(val) => Event::Integer(val),
            NumberResult::Float(val) => Event::Decimal(val),
            NumberResult::Overflow => Event::BigNumber(from_utf8(raw)?),
        };
        Ok(event)
    }
}

impl PullParser for SliceParser<'_> {
    fn next_event(&mut self) -> Result<Event<'_>, ParseError> {
        let event = match self.tokenizer.next_token()? {
            Token::ObjectStart => Event::StartObject,
            Token::ObjectEnd => Event::EndObject,
            Token::ArrayStart => Event::StartArray,
            Token::ArrayEnd => Event::EndArray,
            Token::Key(raw) | Token::String(raw) => Event::String(Self::decode_string(raw)?),
            Token::Number(raw) => Self::number_event(raw)?,
            Token::True => Event::Bool(true),
            Token::False => Event::Bool(false),
            Token::Null => Event::Null,
            Token::EndDocument => Event::EndDocument,
        };
        Ok(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::ErrKind;
    use test_log::test;

    fn borrowed(s: &str) -> Event<'_> {
        Event::String(Cow::Borrowed(s))
    }

    #[test]
    fn make_parser() {
        let mut parser = SliceParser::new(r#"{"key": "value"}"#);
        assert_eq!(parser.next_event(), Ok(Event::StartObject));
        assert_eq!(parser.next_event(), Ok(borrowed("key")));
        assert_eq!(parser.next_event(), Ok(borrowed("value")));
        assert_eq!(parser.next_event(), Ok(Event::EndObject));
        assert_eq!(parser.next_event(), Ok(Event::EndDocument));
        assert_eq!(parser.next_event(), Ok(Event::EndDocument));
    }

    #[test]
    fn parse_numbers() {
        let mut parser =
            SliceParser::new("[1242, -2.5, 123456789012345678901234567890, 1e999]");
        assert_eq!(parser.next_event(), Ok(Event::StartArray));
        assert_eq!(parser.next_event(), Ok(Event::Integer(1242)));
        assert_eq!(parser.next_event(), Ok(Event::Decimal(-2.5)));
        assert_eq!(
            parser.next_event(),
            Ok(Event::BigNumber("123456789012345678901234567890"))
        );
        assert_eq!(parser.next_event(), Ok(Event::BigNumber("1e999")));
        assert_eq!(parser.next_event(), Ok(Event::EndArray));
        assert_eq!(parser.next_event(), Ok(Event::EndDocument));
    }

    #[test]
    fn escaped_strings_are_owned() {
        let mut parser = SliceParser::new(r#"["Hello\nWorld", "plain"]"#);
        assert_eq!(parser.next_event(), Ok(Event::StartArray));
        match parser.next_event() {
            Ok(Event::String(Cow::Owned(s))) => assert_eq!(s, "Hello\nWorld"),
            other => panic!("Expected owned string, got: {:?}", other),
        }
        match parser.next_event() {
            Ok(Event::String(Cow::Borrowed(s))) => assert_eq!(s, "plain"),
            other => panic!("Expected borrowed string, got: {:?}", other),
        }
    }

    #[test]
    fn parse_literals() {
        let mut parser = SliceParser::new("[true, false, null]");
        assert_eq!(parser.next_event(), Ok(Event::StartArray));
        assert_eq!(parser.next_event(), Ok(Event::Bool(true)));
        assert_eq!(parser.next_event(), Ok(Event::Bool(false)));
        assert_eq!(parser.next_event(), Ok(Event::Null));
        assert_eq!(parser.next_event(), Ok(Event::EndArray));
    }

    #[test]
    fn iterator_style_next() {
        let mut parser = SliceParser::new("[1, 2]");
        let mut count = 0;
        while let Some(event) = parser.next() {
            event.unwrap();
            count += 1;
        }
        assert_eq!(count, 4);
    }

    #[test]
    fn invalid_utf8_is_reported() {
        let input = [b'[', b'"', 0xC3, 0x28, b'"', b']'];
        let mut parser = SliceParser::new_from_slice(&input);
        assert_eq!(parser.next_event(), Ok(Event::StartArray));
        assert!(matches!(
            parser.next_event(),
            Err(ParseError::InvalidUtf8(_))
        ));
    }

    #[test]
    fn tokenizer_errors_propagate() {
        let mut parser = SliceParser::new(r#"{name: "value"}"#);
        assert_eq!(parser.next_event(), Ok(Event::StartObject));
        match parser.next_event() {
            Err(ParseError::TokenizerError(e)) => assert_eq!(e.kind(), ErrKind::ExpectedObjectKey),
            other => panic!("Expected TokenizerError for unquoted key, got: {:?}", other),
        }
    }
}
