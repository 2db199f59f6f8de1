// SPDX-License-Identifier: Apache-2.0

//! Event vocabulary shared by event sources and the binder.

use alloc::borrow::Cow;

use crate::ParseError;

/// Events produced by JSON event sources.
///
/// Object keys arrive as [`Event::String`] just like string values; telling
/// them apart is the binder's job.
#[derive(Debug, PartialEq, Clone)]
pub enum Event<'a> {
    /// The start of an object (e.g., `{`).
    StartObject,
    /// The end of an object (e.g., `}`).
    EndObject,
    /// The start of an array (e.g., `[`).
    StartArray,
    /// The end of an array (e.g., `]`).
    EndArray,
    /// An object key or string value. Borrowed when no unescaping was needed.
    String(Cow<'a, str>),
    /// An integer that fits in `i64`.
    Integer(i64),
    /// A number with a fraction or exponent.
    Decimal(f64),
    /// A number too large for `i64`/`f64`, as its exact source text.
    BigNumber(&'a str),
    /// A boolean value (e.g., `true` or `false`).
    Bool(bool),
    /// A null value (e.g., `null`).
    Null,
    /// End of the document.
    EndDocument,
}

impl Event<'_> {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::StartObject => EventKind::StartObject,
            Event::EndObject => EventKind::EndObject,
            Event::StartArray => EventKind::StartArray,
            Event::EndArray => EventKind::EndArray,
            Event::String(_) => EventKind::String,
            Event::Integer(_) => EventKind::Integer,
            Event::Decimal(_) => EventKind::Decimal,
            Event::BigNumber(_) => EventKind::BigNumber,
            Event::Bool(_) => EventKind::Bool,
            Event::Null => EventKind::Null,
            Event::EndDocument => EventKind::EndDocument,
        }
    }
}

/// Payload-free discriminant of an [`Event`], used in diagnostics.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum EventKind {
    StartObject,
    EndObject,
    StartArray,
    EndArray,
    String,
    Integer,
    Decimal,
    BigNumber,
    Bool,
    Null,
    EndDocument,
}

impl core::fmt::Display for EventKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            EventKind::StartObject => "object",
            EventKind::EndObject => "end of object",
            EventKind::StartArray => "array",
            EventKind::EndArray => "end of array",
            EventKind::String => "string",
            EventKind::Integer => "integer",
            EventKind::Decimal => "decimal",
            EventKind::BigNumber => "big number",
            EventKind::Bool => "boolean",
            EventKind::Null => "null",
            EventKind::EndDocument => "end of document",
        };
        f.write_str(name)
    }
}

/// Trait for event sources that can be used in a pull-based manner.
///
/// The binder is generic over this trait; [`SliceParser`](crate::SliceParser)
/// is the implementation shipped with the crate.
pub trait PullParser {
    /// Iterator-like method that returns None when parsing is complete.
    /// This method returns None when EndDocument is reached, Some(Ok(event)) for successful events,
    /// and Some(Err(error)) for parsing errors.
    fn next(&mut self) -> Option<Result<Event<'_>, ParseError>> {
        match self.next_event() {
            Ok(Event::EndDocument) => None,
            other => Some(other),
        }
    }
    /// Returns the next JSON event or an error if parsing fails.
    /// Parsing continues until `EndDocument` is returned or an error occurs.
    fn next_event(&mut self) -> Result<Event<'_>, ParseError>;
}

impl<P: PullParser + ?Sized> PullParser for &mut P {
    fn next_event(&mut self) -> Result<Event<'_>, ParseError> {
        (**self).next_event()
    }
}

pub const fn from_utf8(v: &[u8]) -> Result<&str, ParseError> {
    match core::str::from_utf8(v) {
        Ok(s) => Ok(s),
        Err(e) => Err(ParseError::InvalidUtf8(e)),
    }
}
