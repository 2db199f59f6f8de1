// SPDX-License-Identifier: Apache-2.0

//! Byte-level JSON grammar enforcement.
//!
//! The tokenizer walks an in-memory byte slice and hands out one [`Token`] per
//! call. It validates structure (nesting, separators, number grammar, escape
//! syntax) but does not decode anything: strings are returned as raw byte
//! ranges with a flag telling whether they contain escapes, numbers as their
//! raw digits.

use alloc::vec::Vec;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Container {
    Object,
    Array,
}

#[derive(Debug, Clone, Default)]
struct ParseContext {
    /// Keeps track of the stack of objects/arrays
    stack: Vec<Container>,
}

impl ParseContext {
    fn enter(&mut self, container: Container) {
        self.stack.push(container);
    }

    fn exit(&mut self) {
        self.stack.pop();
    }

    fn top(&self) -> Option<Container> {
        self.stack.last().copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum State {
    Idle,
    Object { expect: Object },
    Array { expect: Array },
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Object {
    FirstKeyOrEnd,
    Key,
    Colon,
    Value,
    CommaOrEnd,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Array {
    FirstItemOrEnd,
    Item,
    CommaOrEnd,
}

/// Raw string content between the quotes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct RawString<'a> {
    pub bytes: &'a [u8],
    /// At least one backslash escape is present.
    pub escaped: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Token<'a> {
    ObjectStart,
    ObjectEnd,
    ArrayStart,
    ArrayEnd,
    Key(RawString<'a>),
    String(RawString<'a>),
    Number(&'a [u8]),
    True,
    False,
    Null,
    EndDocument,
}

/// A grammar violation, located by byte offset.
#[derive(PartialEq, Clone)]
pub struct Error {
    kind: ErrKind,
    character: u8,
    position: usize,
}

/// What kind of grammar violation was found.
#[derive(PartialEq, Debug, Clone, Copy)]
pub enum ErrKind {
    UnfinishedStream,
    InvalidRoot,
    InvalidToken,
    UnescapedControlCharacter,
    TrailingComma,
    ContentEnded,
    InvalidNumber,
    InvalidUnicodeEscape,
    InvalidStringEscape,
    ExpectedObjectKey,
    ExpectedObjectValue,
    ExpectedColon,
    ExpectedArrayItem,
    ExpectedCommaOrEnd,
}

impl Error {
    pub(crate) fn new<T>(kind: ErrKind, character: u8, position: usize) -> Result<T, Self> {
        Err(Self {
            kind,
            character,
            position,
        })
    }

    pub fn kind(&self) -> ErrKind {
        self.kind
    }

    /// Byte offset of the offending character.
    pub fn position(&self) -> usize {
        self.position
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{:?}({}) at {}",
            self.kind,
            self.character.escape_ascii(),
            self.position
        )
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Debug::fmt(self, f)
    }
}

const LITERALS: [(&[u8], Token<'static>); 3] = [
    (b"true", Token::True),
    (b"false", Token::False),
    (b"null", Token::Null),
];

pub(crate) struct Tokenizer<'a> {
    data: &'a [u8],
    pos: usize,
    state: State,
    context: ParseContext,
}

impl<'a> Tokenizer<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Tokenizer {
            data,
            pos: 0,
            state: State::Idle,
            context: ParseContext::default(),
        }
    }

    /// Returns the next token. Once the root value is complete every further
    /// call yields `EndDocument`, or `ContentEnded` if non-whitespace follows.
    pub fn next_token(&mut self) -> Result<Token<'a>, Error> {
        loop {
            self.skip_whitespace();
            let pos = self.pos;
            let Some(&byte) = self.data.get(pos) else {
                return self.finish();
            };

            match (self.state, byte) {
                (State::Finished, _) => return Error::new(ErrKind::ContentEnded, byte, pos),
                (
                    State::Object {
                        expect: Object::FirstKeyOrEnd | Object::Key,
                    },
                    b'"',
                ) => {
                    let raw = self.scan_string()?;
                    self.state = State::Object {
                        expect: Object::Colon,
                    };
                    return Ok(Token::Key(raw));
                }
                (
                    State::Object {
                        expect: Object::FirstKeyOrEnd | Object::CommaOrEnd,
                    },
                    b'}',
                ) => return Ok(self.close(Token::ObjectEnd)),
                (
                    State::Object {
                        expect: Object::Key,
                    },
                    b'}',
                )
                | (
                    State::Array {
                        expect: Array::Item,
                    },
                    b']',
                ) => return Error::new(ErrKind::TrailingComma, byte, pos),
                (
                    State::Object {
                        expect: Object::FirstKeyOrEnd | Object::Key,
                    },
                    _,
                ) => return Error::new(ErrKind::ExpectedObjectKey, byte, pos),
                (
                    State::Object {
                        expect: Object::Colon,
                    },
                    b':',
                ) => {
                    self.pos += 1;
                    self.state = State::Object {
                        expect: Object::Value,
                    };
                }
                (
                    State::Object {
                        expect: Object::Colon,
                    },
                    _,
                ) => return Error::new(ErrKind::ExpectedColon, byte, pos),
                (
                    State::Object {
                        expect: Object::CommaOrEnd,
                    },
                    b',',
                ) => {
                    self.pos += 1;
                    self.state = State::Object {
                        expect: Object::Key,
                    };
                }
                (
                    State::Array {
                        expect: Array::CommaOrEnd,
                    },
                    b',',
                ) => {
                    self.pos += 1;
                    self.state = State::Array {
                        expect: Array::Item,
                    };
                }
                (
                    State::Array {
                        expect: Array::FirstItemOrEnd | Array::CommaOrEnd,
                    },
                    b']',
                ) => return Ok(self.close(Token::ArrayEnd)),
                (
                    State::Object {
                        expect: Object::CommaOrEnd,
                    }
                    | State::Array {
                        expect: Array::CommaOrEnd,
                    },
                    _,
                ) => return Error::new(ErrKind::ExpectedCommaOrEnd, byte, pos),
                // Idle, Object::Value, Array::FirstItemOrEnd and Array::Item all expect a value
                _ => return self.scan_value(byte, pos),
            }
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(b' ' | b'\t' | b'\n' | b'\r') = self.data.get(self.pos) {
            self.pos += 1;
        }
    }

    fn finish(&self) -> Result<Token<'a>, Error> {
        match self.state {
            // Nothing but whitespace: an empty document
            State::Idle | State::Finished => Ok(Token::EndDocument),
            _ => Error::new(ErrKind::UnfinishedStream, b' ', self.pos),
        }
    }

    fn after_value(&self) -> State {
        match self.context.top() {
            Some(Container::Object) => State::Object {
                expect: Object::CommaOrEnd,
            },
            Some(Container::Array) => State::Array {
                expect: Array::CommaOrEnd,
            },
            None => State::Finished,
        }
    }

    fn close(&mut self, token: Token<'a>) -> Token<'a> {
        self.pos += 1;
        self.context.exit();
        self.state = self.after_value();
        token
    }

    fn open(&mut self, container: Container) -> Token<'a> {
        self.pos += 1;
        self.context.enter(container);
        match container {
            Container::Object => {
                self.state = State::Object {
                    expect: Object::FirstKeyOrEnd,
                };
                Token::ObjectStart
            }
            Container::Array => {
                self.state = State::Array {
                    expect: Array::FirstItemOrEnd,
                };
                Token::ArrayStart
            }
        }
    }

    fn scan_value(&mut self, byte: u8, pos: usize) -> Result<Token<'a>, Error> {
        let token = match byte {
            b'{' => return Ok(self.open(Container::Object)),
            b'[' => return Ok(self.open(Container::Array)),
            b'"' => Token::String(self.scan_string()?),
            b't' | b'f' | b'n' => self.scan_literal(byte, pos)?,
            b'-' | b'0'..=b'9' => Token::Number(self.scan_number()?),
            _ => {
                let kind = match self.state {
                    State::Idle => ErrKind::InvalidRoot,
                    State::Array { .. } => ErrKind::ExpectedArrayItem,
                    _ => ErrKind::ExpectedObjectValue,
                };
                return Error::new(kind, byte, pos);
            }
        };
        self.state = self.after_value();
        Ok(token)
    }

    fn scan_literal(&mut self, byte: u8, pos: usize) -> Result<Token<'a>, Error> {
        let Some((literal, token)) = LITERALS.iter().find(|(text, _)| text[0] == byte) else {
            return Error::new(ErrKind::InvalidToken, byte, pos);
        };
        for (offset, expected) in literal.iter().enumerate() {
            match self.data.get(pos + offset) {
                Some(found) if found == expected => {}
                Some(&found) => return Error::new(ErrKind::InvalidToken, found, pos + offset),
                None => return Error::new(ErrKind::UnfinishedStream, b' ', pos + offset),
            }
        }
        self.pos = pos + literal.len();
        Ok(*token)
    }

    /// Scans from the opening quote through the closing quote.
    fn scan_string(&mut self) -> Result<RawString<'a>, Error> {
        let start = self.pos + 1;
        let mut i = start;
        let mut escaped = false;
        loop {
            match self.data.get(i) {
                None => return Error::new(ErrKind::UnfinishedStream, b' ', i),
                Some(b'"') => {
                    self.pos = i + 1;
                    return Ok(RawString {
                        bytes: &self.data[start..i],
                        escaped,
                    });
                }
                Some(b'\\') => {
                    escaped = true;
                    i = self.scan_escape(i)?;
                }
                Some(&c) if c < 0x20 => {
                    return Error::new(ErrKind::UnescapedControlCharacter, c, i);
                }
                Some(_) => i += 1,
            }
        }
    }

    /// Validates the escape starting at the backslash at `at`, returning the
    /// index just past it.
    fn scan_escape(&self, at: usize) -> Result<usize, Error> {
        match self.data.get(at + 1) {
            Some(b'"' | b'\\' | b'/' | b'b' | b'f' | b'n' | b'r' | b't') => Ok(at + 2),
            Some(b'u') => {
                for i in at + 2..at + 6 {
                    match self.data.get(i) {
                        Some(c) if c.is_ascii_hexdigit() => {}
                        Some(&c) => return Error::new(ErrKind::InvalidUnicodeEscape, c, i),
                        None => return Error::new(ErrKind::UnfinishedStream, b' ', i),
                    }
                }
                Ok(at + 6)
            }
            Some(&c) => Error::new(ErrKind::InvalidStringEscape, c, at + 1),
            None => Error::new(ErrKind::UnfinishedStream, b' ', at + 1),
        }
    }

    fn scan_number(&mut self) -> Result<&'a [u8], Error> {
        let start = self.pos;
        let mut i = start;
        if self.data.get(i) == Some(&b'-') {
            i += 1;
        }
        match self.data.get(i) {
            Some(b'0') => i += 1,
            Some(b'1'..=b'9') => i = self.digits(i),
            Some(&c) => return Error::new(ErrKind::InvalidNumber, c, i),
            None => return Error::new(ErrKind::UnfinishedStream, b' ', i),
        }
        if self.data.get(i) == Some(&b'.') {
            i = self.required_digits(i + 1)?;
        }
        if let Some(b'e' | b'E') = self.data.get(i) {
            i += 1;
            if let Some(b'+' | b'-') = self.data.get(i) {
                i += 1;
            }
            i = self.required_digits(i)?;
        }
        self.pos = i;
        Ok(&self.data[start..i])
    }

    fn digits(&self, mut i: usize) -> usize {
        while let Some(b'0'..=b'9') = self.data.get(i) {
            i += 1;
        }
        i
    }

    fn required_digits(&self, i: usize) -> Result<usize, Error> {
        match self.data.get(i) {
            Some(b'0'..=b'9') => Ok(self.digits(i)),
            Some(&c) => Error::new(ErrKind::InvalidNumber, c, i),
            None => Error::new(ErrKind::UnfinishedStream, b' ', i),
        }
    }
}
