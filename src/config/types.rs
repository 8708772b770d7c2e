//! Settings types

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::defaults;
use super::SettingsError;

/// Southbound backend selection
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// In-process store, echoes the last applied configuration
    Memory,
    /// Local key-value configuration file
    KvStore,
    /// Remote HTTP configuration service
    Rest,
}

// Accept any case, like the CLI does
impl<'de> Deserialize<'de> for BackendKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        BackendKind::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl Default for BackendKind {
    fn default() -> Self {
        defaults::backend()
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Memory => write!(f, "memory"),
            Self::KvStore => write!(f, "kvstore"),
            Self::Rest => write!(f, "rest"),
        }
    }
}

impl FromStr for BackendKind {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "kvstore" => Ok(Self::KvStore),
            "rest" => Ok(Self::Rest),
            _ => Err(SettingsError::InvalidValue {
                field: "backend",
                reason: format!("'{}'. Valid values are: memory, kvstore, rest", s),
            }),
        }
    }
}

/// Process settings
///
/// Loaded from an optional JSON file with `DEVCONF_*` environment variables
/// layered on top; see [`Settings::load`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Southbound backend (memory, kvstore, rest)
    #[serde(default)]
    pub backend: BackendKind,

    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "defaults::log_level")]
    pub log_level: String,

    /// Re-validate every encoded document before returning it from `get`
    #[serde(default = "defaults::revalidate_output")]
    pub revalidate_output: bool,

    /// File used by the key-value store backend
    #[serde(default = "defaults::kvstore_path")]
    pub kvstore_path: PathBuf,

    /// Endpoint of the configuration service
    #[serde(default = "defaults::rest_base_url")]
    pub rest_base_url: String,

    #[serde(default = "defaults::rest_timeout_secs")]
    pub rest_timeout_secs: u64,

    #[serde(default = "defaults::rest_max_response_bytes")]
    pub rest_max_response_bytes: usize,

    /// Capacity of the buffer `get` writes into, terminator included
    #[serde(default = "defaults::get_buffer_size")]
    pub get_buffer_size: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            backend: defaults::backend(),
            log_level: defaults::log_level(),
            revalidate_output: defaults::revalidate_output(),
            kvstore_path: defaults::kvstore_path(),
            rest_base_url: defaults::rest_base_url(),
            rest_timeout_secs: defaults::rest_timeout_secs(),
            rest_max_response_bytes: defaults::rest_max_response_bytes(),
            get_buffer_size: defaults::get_buffer_size(),
        }
    }
}

impl Settings {
    /// Check values serde cannot check
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.rest_timeout_secs == 0 {
            return Err(SettingsError::InvalidValue {
                field: "rest_timeout_secs",
                reason: "must be greater than zero".to_string(),
            });
        }

        if self.rest_max_response_bytes == 0 {
            return Err(SettingsError::InvalidValue {
                field: "rest_max_response_bytes",
                reason: "must be greater than zero".to_string(),
            });
        }

        if self.get_buffer_size == 0 {
            return Err(SettingsError::InvalidValue {
                field: "get_buffer_size",
                reason: "must be greater than zero".to_string(),
            });
        }

        if !(self.rest_base_url.starts_with("http://") || self.rest_base_url.starts_with("https://")) {
            return Err(SettingsError::InvalidValue {
                field: "rest_base_url",
                reason: format!("'{}' is not an http(s) URL", self.rest_base_url),
            });
        }

        Ok(())
    }
}
