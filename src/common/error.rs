//! Error handling module
//!
//! This module defines the crate-level error type and result alias. Each
//! layer keeps its own error enum; they all convert into `DevconfError`.

use thiserror::Error;
use std::io;

use crate::codec::CodecError;
use crate::config::SettingsError;
use crate::pipeline::PipelineError;
use crate::registry::RegistryError;
use crate::schema::ValidationError;
use crate::southbound::BackendError;

/// Device configuration error type
#[derive(Error, Debug)]
pub enum DevconfError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Runtime settings error
    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

    /// Registry setup error
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    /// Document rejected by the validation engine
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Decode or encode error
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    /// Southbound backend error
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    /// Set/get pipeline error
    #[error("{0}")]
    Pipeline(#[from] PipelineError),

    /// Other error
    #[error("Other error: {0}")]
    Other(String),
}

/// Result type alias
///
/// This is a `Result` type alias that uses our custom `DevconfError`.
pub type Result<T> = std::result::Result<T, DevconfError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let err: DevconfError = io_err.into();

        match err {
            DevconfError::Io(_) => {}
            _ => panic!("Should convert to IO error"),
        }
    }

    #[test]
    fn test_error_display() {
        let err = DevconfError::Pipeline(PipelineError::UnknownType("display".to_string()));
        let err_str = format!("{}", err);
        assert!(err_str.contains("display"));
    }
}
