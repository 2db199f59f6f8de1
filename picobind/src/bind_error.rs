// SPDX-License-Identifier: Apache-2.0

use alloc::string::String;
use alloc::vec::Vec;

use crate::record::FieldType;
use crate::shared::EventKind;
use crate::ParseError;

/// One step from a parent container to a child value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathComponent {
    Key(String),
    Index(usize),
}

/// Location of a value inside the document, rendered as `$.items[0].id`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Path(Vec<PathComponent>);

impl Path {
    /// The document root, `$`.
    pub fn root() -> Self {
        Path(Vec::new())
    }

    pub fn components(&self) -> &[PathComponent] {
        &self.0
    }

    fn prepend(&mut self, component: PathComponent) {
        self.0.insert(0, component);
    }
}

impl core::fmt::Display for Path {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("$")?;
        for component in &self.0 {
            match component {
                PathComponent::Key(key) => write!(f, ".{key}")?,
                PathComponent::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

/// Errors that abort binding. No partially bound value is ever returned
/// alongside one of these.
#[derive(Debug, Clone, PartialEq)]
pub enum BindError {
    /// The event source rejected the input.
    Parse(ParseError),
    /// A target instance could not be constructed.
    Construction {
        type_name: &'static str,
        reason: String,
    },
    /// An incoming value cannot be stored losslessly in the declared slot.
    FieldTypeMismatch {
        path: Path,
        expected: FieldType,
        found: EventKind,
    },
    /// Nesting went deeper than `BindOptions::max_depth`.
    DepthLimitExceeded { limit: usize },
    /// The document root is a bare scalar rather than an object or array.
    InvalidRoot(EventKind),
    /// A non-string value arrived inside an object with no key pending.
    ValueWithoutKey(EventKind),
    /// An object ended while a key was still waiting for its value.
    KeyWithoutValue(String),
    /// An event that cannot occur at this point in a well-formed stream.
    UnexpectedEvent(EventKind),
    /// Something other than end of document followed the root value.
    TrailingContent(EventKind),
}

impl BindError {
    /// Records that the error happened below `component`. Called while the
    /// error unwinds, so paths are built outermost-last.
    pub fn within(mut self, component: PathComponent) -> Self {
        if let BindError::FieldTypeMismatch { path, .. } = &mut self {
            path.prepend(component);
        }
        self
    }
}

impl From<ParseError> for BindError {
    fn from(err: ParseError) -> Self {
        BindError::Parse(err)
    }
}

impl core::fmt::Display for BindError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BindError::Parse(e) => write!(f, "parse error: {e}"),
            BindError::Construction { type_name, reason } => {
                write!(f, "cannot construct {type_name}: {reason}")
            }
            BindError::FieldTypeMismatch {
                path,
                expected,
                found,
            } => write!(f, "{path}: expected {expected}, found {found}"),
            BindError::DepthLimitExceeded { limit } => {
                write!(f, "nesting deeper than {limit} levels")
            }
            BindError::InvalidRoot(kind) => {
                write!(f, "document root must be an object or array, found {kind}")
            }
            BindError::ValueWithoutKey(kind) => write!(f, "{kind} value without a key"),
            BindError::KeyWithoutValue(key) => write!(f, "key \"{key}\" has no value"),
            BindError::UnexpectedEvent(kind) => write!(f, "unexpected {kind}"),
            BindError::TrailingContent(kind) => {
                write!(f, "{kind} after the end of the root value")
            }
        }
    }
}

impl core::error::Error for BindError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            BindError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::boxed::Box;

    #[test]
    fn test_path_display() {
        let err = BindError::FieldTypeMismatch {
            path: Path::root(),
            expected: FieldType::Integer,
            found: EventKind::String,
        };
        let err = err
            .within(PathComponent::Key("id".into()))
            .within(PathComponent::Index(3))
            .within(PathComponent::Key("items".into()));
        assert_eq!(
            err.to_string(),
            "$.items[3].id: expected integer, found string"
        );
    }

    #[test]
    fn test_within_leaves_other_errors_alone() {
        let err = BindError::KeyWithoutValue("a".into()).within(PathComponent::Index(0));
        assert_eq!(err, BindError::KeyWithoutValue("a".into()));
    }

    #[test]
    fn test_display() {
        assert_eq!(
            BindError::InvalidRoot(EventKind::Integer).to_string(),
            "document root must be an object or array, found integer"
        );
        let mismatch = BindError::FieldTypeMismatch {
            path: Path::root(),
            expected: FieldType::List(Box::new(FieldType::Text)),
            found: EventKind::StartObject,
        };
        assert_eq!(mismatch.to_string(), "$: expected list of text, found object");
    }

    #[test]
    fn test_source_is_parse_error() {
        use core::error::Error;
        let err = BindError::from(ParseError::InvalidNumber);
        assert!(err.source().is_some());
        assert!(BindError::DepthLimitExceeded { limit: 1 }.source().is_none());
    }
}
