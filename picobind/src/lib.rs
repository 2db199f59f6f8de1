// SPDX-License-Identifier: Apache-2.0

//! Binds a stream of JSON events straight into statically declared records,
//! without building an intermediate tree.
//!
//! ```
//! picobind::record! {
//!     #[derive(Debug, Default)]
//!     struct Response {
//!         kind: String,
//!         total_items: i64 as "totalItems",
//!     }
//! }
//!
//! let response: Response = picobind::from_str(r#"{"kind":"string","totalItems":2}"#)
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(response.kind, "string");
//! assert_eq!(response.total_items, 2);
//! ```
//!
//! Unknown keys are consumed and dropped, `null` leaves a field at its
//! default, and a value that does not fit its declared field is handled by
//! the configured [`MismatchPolicy`].

#![cfg_attr(not(any(test, feature = "std")), no_std)]

extern crate alloc;

mod tokenizer;
pub use tokenizer::{ErrKind, Error as TokenizerError};

mod int_parser;

mod json_number;

mod escape_processor;

mod parse_error;
pub use parse_error::ParseError;

mod shared;
pub use shared::{Event, EventKind, PullParser};

mod slice_parser;
pub use slice_parser::SliceParser;

mod pending_key;

mod record;
pub use record::{
    bind_record, Bind, Binding, Field, FieldType, Incoming, Record, Scalar, Target,
};

mod value;
pub use value::{BigNumber, Map, Value};

mod options;
pub use options::{BindOptions, MismatchPolicy};

mod bind_error;
pub use bind_error::{BindError, Path, PathComponent};

mod binder;
pub use binder::Binder;

mod driver;
#[cfg(feature = "std")]
pub use driver::{from_reader, from_reader_with_options};
pub use driver::{
    from_parser, from_slice, from_slice_with_options, from_str, from_str_with_options,
};

mod macros;

#[doc(hidden)]
pub mod __private {
    pub use alloc::vec;
    pub use alloc::vec::Vec;
}
