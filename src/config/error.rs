//! Settings error types

use std::path::PathBuf;

use thiserror::Error;

/// Failures while loading or checking process settings
#[derive(Debug, Error)]
pub enum SettingsError {
    /// An explicitly requested settings file does not exist
    #[error("settings file not found: {0}")]
    FileNotFound(PathBuf),

    /// File or environment could not be read or deserialized
    #[error("error loading settings: {0}")]
    Load(#[from] config::ConfigError),

    /// A field holds an unusable value
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}
