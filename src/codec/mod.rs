//! Codec module
//!
//! Bidirectional conversion between configuration documents and records:
//! a lenient decoder and a strict, sparse encoder writing into a
//! fixed-capacity buffer.

mod buffer;
mod decode;
mod encode;
pub(crate) mod fields;

pub use buffer::JsonBuffer;
pub use decode::decode_wireless;
pub use encode::{encode_wireless, encode_wireless_into};

use thiserror::Error;

/// Decode and encode failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Input text is not JSON
    #[error("failed to parse JSON: {0}")]
    Parse(String),

    /// A required top-level object is missing
    #[error("'{0}' object not found")]
    MissingSection(&'static str),

    /// The record handed to a codec belongs to another type
    #[error("record of type '{found}' cannot be handled as '{expected}'")]
    RecordMismatch { expected: &'static str, found: &'static str },

    /// Serialization failed
    #[error("failed to serialize document: {0}")]
    Serialize(String),

    /// Output does not fit the caller's buffer
    #[error("buffer too small (required={required}, given={capacity})")]
    BufferTooSmall { required: usize, capacity: usize },
}
