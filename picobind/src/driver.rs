// SPDX-License-Identifier: Apache-2.0

//! Entry points binding a whole document.
//!
//! All of them return `Ok(None)` for an empty (or whitespace-only) document
//! and never hand back a partially bound value on error.

use crate::binder::Binder;
use crate::options::BindOptions;
use crate::record::Bind;
use crate::shared::PullParser;
use crate::slice_parser::SliceParser;
use crate::BindError;

/// Binds a JSON document held in a string.
///
/// ```
/// let counts: Vec<u32> = picobind::from_str("[1, 2, 3]").unwrap().unwrap();
/// assert_eq!(counts, [1, 2, 3]);
/// ```
pub fn from_str<T: Bind>(input: &str) -> Result<Option<T>, BindError> {
    from_str_with_options(input, BindOptions::default())
}

pub fn from_str_with_options<T: Bind>(
    input: &str,
    options: BindOptions,
) -> Result<Option<T>, BindError> {
    from_parser(SliceParser::new(input), options)
}

/// Binds a JSON document from raw bytes. UTF-8 is checked as strings are read.
pub fn from_slice<T: Bind>(input: &[u8]) -> Result<Option<T>, BindError> {
    from_slice_with_options(input, BindOptions::default())
}

pub fn from_slice_with_options<T: Bind>(
    input: &[u8],
    options: BindOptions,
) -> Result<Option<T>, BindError> {
    from_parser(SliceParser::new_from_slice(input), options)
}

/// Binds the document produced by any event source.
pub fn from_parser<T: Bind, P: PullParser>(
    parser: P,
    options: BindOptions,
) -> Result<Option<T>, BindError> {
    Binder::with_options(parser, options).bind_root()
}

/// Reads `reader` to the end and binds the document it held.
#[cfg(feature = "std")]
pub fn from_reader<T: Bind, R: std::io::Read>(reader: R) -> Result<Option<T>, BindError> {
    from_reader_with_options(reader, BindOptions::default())
}

#[cfg(feature = "std")]
pub fn from_reader_with_options<T: Bind, R: std::io::Read>(
    mut reader: R,
    options: BindOptions,
) -> Result<Option<T>, BindError> {
    let mut buffer = std::vec::Vec::new();
    if let Err(e) = reader.read_to_end(&mut buffer) {
        log::error!("failed to read JSON input: {e}");
        return Err(crate::ParseError::ReaderError.into());
    }
    from_slice_with_options(&buffer, options)
}
