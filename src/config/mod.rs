//! Process settings
//!
//! Backend selection and the knobs of the pipeline and its backends. This is
//! process configuration, distinct from the device configuration documents
//! the pipeline handles.

mod defaults;
mod error;
mod loader;
mod types;

pub use self::error::SettingsError;
pub use self::types::{BackendKind, Settings};

pub use defaults::{CONFIG_FILE_ENV, DEFAULT_CONFIG_FILE, ENV_PREFIX};
