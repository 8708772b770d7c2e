//! Pipeline error taxonomy

use std::fmt;

use thiserror::Error;

use crate::codec::CodecError;
use crate::schema::ValidationError;
use crate::southbound::BackendError;

/// Failure of a set or get request, one variant per pipeline step
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Empty type name, empty document or zero-capacity buffer
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// No handler is registered under the requested name
    #[error("unknown configuration type '{0}'")]
    UnknownType(String),

    /// The input document was rejected
    #[error("validation failed for '{type_name}': {source}")]
    Validation {
        type_name: &'static str,
        #[source]
        source: ValidationError,
    },

    /// The input document could not be decoded
    #[error("decode failed for '{type_name}': {source}")]
    Decode {
        type_name: &'static str,
        #[source]
        source: CodecError,
    },

    /// No southbound binding, or the binding lacks the operation
    #[error("no southbound {operation} operation for '{type_name}'")]
    BackendUnavailable {
        type_name: String,
        operation: &'static str,
    },

    /// The backend refused or failed the operation
    #[error("southbound {operation} failed for '{type_name}': {source}")]
    BackendOperation {
        type_name: &'static str,
        operation: &'static str,
        #[source]
        source: BackendError,
    },

    /// The record could not be written to the output buffer
    #[error("encode failed for '{type_name}': {source}")]
    Encode {
        type_name: &'static str,
        #[source]
        source: CodecError,
    },

    /// The encoded output failed its own validation
    #[error("re-export validation failed for '{type_name}': {source}")]
    ReexportValidation {
        type_name: &'static str,
        #[source]
        source: ValidationError,
    },
}

/// Kind of a `PipelineError`, without details
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidArgument,
    UnknownType,
    ValidationFailure,
    DecodeFailure,
    BackendUnavailable,
    BackendOperationFailure,
    EncodeFailure,
    ReexportValidationFailure,
}

impl PipelineError {
    /// Kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            PipelineError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            PipelineError::UnknownType(_) => ErrorKind::UnknownType,
            PipelineError::Validation { .. } => ErrorKind::ValidationFailure,
            PipelineError::Decode { .. } => ErrorKind::DecodeFailure,
            PipelineError::BackendUnavailable { .. } => ErrorKind::BackendUnavailable,
            PipelineError::BackendOperation { .. } => ErrorKind::BackendOperationFailure,
            PipelineError::Encode { .. } => ErrorKind::EncodeFailure,
            PipelineError::ReexportValidation { .. } => ErrorKind::ReexportValidationFailure,
        }
    }

    /// Whether the output buffer was too small
    pub fn is_buffer_too_small(&self) -> bool {
        matches!(
            self,
            PipelineError::Encode { source: CodecError::BufferTooSmall { .. }, .. }
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::InvalidArgument => "InvalidArgument",
            ErrorKind::UnknownType => "UnknownType",
            ErrorKind::ValidationFailure => "ValidationFailure",
            ErrorKind::DecodeFailure => "DecodeFailure",
            ErrorKind::BackendUnavailable => "BackendUnavailable",
            ErrorKind::BackendOperationFailure => "BackendOperationFailure",
            ErrorKind::EncodeFailure => "EncodeFailure",
            ErrorKind::ReexportValidationFailure => "ReexportValidationFailure",
        };
        f.write_str(s)
    }
}
