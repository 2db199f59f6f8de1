// SPDX-License-Identifier: Apache-2.0

//! The object and array binders.
//!
//! Both consume events up to and including their container's closing event.
//! They recurse into each other through the [`Bind`] impls of nested field
//! types, so recursion depth follows the nesting of *declared* structure.
//! Values nobody declared are skipped with a flat loop instead.

use alloc::string::String;
use alloc::vec::Vec;
use log::{debug, trace};

use crate::bind_error::{BindError, Path, PathComponent};
use crate::options::{BindOptions, MismatchPolicy};
use crate::pending_key::PendingKey;
use crate::record::{Bind, Binding, FieldType, Incoming, Scalar, Target};
use crate::shared::{Event, EventKind, PullParser};

/// One event, detached from the parser's input buffer.
enum Step {
    Value(Incoming),
    EndObject,
    EndArray,
    End,
}

impl Step {
    fn kind(&self) -> EventKind {
        match self {
            Step::Value(value) => value.kind(),
            Step::EndObject => EventKind::EndObject,
            Step::EndArray => EventKind::EndArray,
            Step::End => EventKind::EndDocument,
        }
    }
}

/// Drives a [`PullParser`] and writes what it produces into targets.
///
/// Hand-written [`Bind`] and [`Target`] impls receive the binder so they can
/// recurse into nested containers or report a mismatch.
pub struct Binder<P> {
    parser: P,
    options: BindOptions,
    pending: PendingKey,
    depth: usize,
}

impl<P: PullParser> Binder<P> {
    pub fn new(parser: P) -> Self {
        Self::with_options(parser, BindOptions::default())
    }

    pub fn with_options(parser: P, options: BindOptions) -> Self {
        Binder {
            parser,
            options,
            pending: PendingKey::default(),
            depth: 0,
        }
    }

    pub fn options(&self) -> &BindOptions {
        &self.options
    }

    pub fn into_inner(self) -> P {
        self.parser
    }

    /// Binds one whole document.
    ///
    /// Returns `Ok(None)` when the stream ends before any value. The root
    /// must be an object or array that `T` can accept, and nothing but the
    /// end of the document may follow it.
    pub fn bind_root<T: Bind>(&mut self) -> Result<Option<T>, BindError> {
        let value = match self.step()? {
            Step::End => {
                trace!("empty document");
                return Ok(None);
            }
            Step::Value(value @ (Incoming::Object | Incoming::Array)) => value,
            Step::Value(value) => return Err(BindError::InvalidRoot(value.kind())),
            other => return Err(BindError::UnexpectedEvent(other.kind())),
        };
        let expected = T::declared();
        if !expected.accepts(value.kind()) {
            return Err(BindError::FieldTypeMismatch {
                path: Path::root(),
                expected,
                found: value.kind(),
            });
        }
        trace!("binding {} root as {}", value.kind(), expected);
        let mut root = T::construct()?;
        root.bind(value, self)?;
        match self.step()? {
            Step::End => Ok(Some(root)),
            other => Err(BindError::TrailingContent(other.kind())),
        }
    }

    /// Consumes the rest of an object whose opening event was just read,
    /// offering each key/value pair to `target`.
    pub fn bind_object<T: Target + ?Sized>(&mut self, target: &mut T) -> Result<(), BindError> {
        self.enter()?;
        loop {
            let value = match self.step()? {
                Step::Value(Incoming::Scalar(Scalar::Text(text))) if self.pending.is_empty() => {
                    self.pending.push(text);
                    continue;
                }
                Step::Value(value) => value,
                Step::EndObject => break,
                other => return Err(BindError::UnexpectedEvent(other.kind())),
            };
            let Some(key) = self.pending.pop() else {
                return Err(BindError::ValueWithoutKey(value.kind()));
            };
            if value == Incoming::Null {
                trace!("\"{key}\" is null, leaving default");
                continue;
            }
            trace!("\"{key}\" <- {}", value.kind());
            match target.bind_field(&key, value, self) {
                Ok(Binding::Unknown(value)) => {
                    debug!("discarding {} under unknown key \"{key}\"", value.kind());
                    self.discard(value)?;
                }
                Ok(_) => {}
                Err(e) => return Err(e.within(PathComponent::Key(key))),
            }
        }
        if let Some(key) = self.pending.pop() {
            return Err(BindError::KeyWithoutValue(key));
        }
        self.leave();
        Ok(())
    }

    /// Consumes the rest of an array whose opening event was just read.
    ///
    /// Every scalar, `null` or object item appends exactly one entry. Items
    /// that are `null` or were skipped under [`MismatchPolicy::Skip`] append
    /// `T::construct()`, so later items keep their indices. Nested arrays are
    /// consumed and contribute nothing.
    pub fn bind_array<T: Bind>(&mut self, items: &mut Vec<T>) -> Result<(), BindError> {
        self.enter()?;
        let mut index = 0;
        loop {
            let value = match self.step()? {
                Step::Value(value) => value,
                Step::EndArray => break,
                other => return Err(BindError::UnexpectedEvent(other.kind())),
            };
            match value {
                Incoming::Array => {
                    trace!("dropping nested array at index {index}");
                    self.skip_container()?;
                }
                Incoming::Null => items.push(T::construct()?),
                value => {
                    let mut item = T::construct()?;
                    match item.bind(value, self) {
                        Ok(true) => items.push(item),
                        Ok(false) => items.push(T::construct()?),
                        Err(e) => return Err(e.within(PathComponent::Index(index))),
                    }
                }
            }
            index += 1;
        }
        self.leave();
        Ok(())
    }

    /// Applies the mismatch policy to a value `expected` cannot hold.
    ///
    /// Fails with a [`BindError::FieldTypeMismatch`] rooted at the current
    /// slot, or consumes the value and returns `Ok(false)`.
    pub fn mismatch(&mut self, expected: FieldType, value: Incoming) -> Result<bool, BindError> {
        match self.options.mismatch_policy() {
            MismatchPolicy::Fail => Err(BindError::FieldTypeMismatch {
                path: Path::root(),
                expected,
                found: value.kind(),
            }),
            MismatchPolicy::Skip => {
                debug!("skipping {} where {} is declared", value.kind(), expected);
                self.discard(value)?;
                Ok(false)
            }
        }
    }

    /// Consumes whatever is left of `value` without storing it.
    pub fn discard(&mut self, value: Incoming) -> Result<(), BindError> {
        match value {
            Incoming::Object | Incoming::Array => self.skip_container(),
            _ => Ok(()),
        }
    }

    fn skip_container(&mut self) -> Result<(), BindError> {
        let mut open = 1usize;
        while open > 0 {
            match self.parser.next_event()? {
                Event::StartObject | Event::StartArray => open += 1,
                Event::EndObject | Event::EndArray => open -= 1,
                Event::EndDocument => {
                    return Err(BindError::UnexpectedEvent(EventKind::EndDocument))
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn enter(&mut self) -> Result<(), BindError> {
        let limit = self.options.max_depth();
        if self.depth >= limit {
            return Err(BindError::DepthLimitExceeded { limit });
        }
        self.depth += 1;
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn step(&mut self) -> Result<Step, BindError> {
        let step = match self.parser.next_event()? {
            Event::StartObject => Step::Value(Incoming::Object),
            Event::StartArray => Step::Value(Incoming::Array),
            Event::EndObject => Step::EndObject,
            Event::EndArray => Step::EndArray,
            Event::String(s) => Step::Value(Incoming::Scalar(Scalar::Text(s.into_owned()))),
            Event::Integer(v) => Step::Value(Incoming::Scalar(Scalar::Integer(v))),
            Event::Decimal(v) => Step::Value(Incoming::Scalar(Scalar::Decimal(v))),
            Event::BigNumber(text) => {
                Step::Value(Incoming::Scalar(Scalar::BigNumber(String::from(text))))
            }
            Event::Bool(v) => Step::Value(Incoming::Scalar(Scalar::Bool(v))),
            Event::Null => Step::Value(Incoming::Null),
            Event::EndDocument => Step::End,
        };
        Ok(step)
    }
}
