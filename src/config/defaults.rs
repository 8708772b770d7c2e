//! Default settings values
//!
//! Single source of truth for defaults, referenced by serde and `Default`.

use std::path::PathBuf;

use super::types::BackendKind;

/// Prefix of environment variables that override settings
pub const ENV_PREFIX: &str = "DEVCONF";

/// Environment variable naming the settings file
pub const CONFIG_FILE_ENV: &str = "DEVCONF_CONFIG_FILE";

/// Settings file read when none is named
pub const DEFAULT_CONFIG_FILE: &str = "/etc/devconf/devconf.json";

pub const LOG_LEVEL_STR: &str = "info";
pub const KVSTORE_PATH_STR: &str = "/etc/devconf/wireless.conf";
pub const REST_BASE_URL_STR: &str = "http://127.0.0.1:5566/v1/wlan/setting";

pub fn backend() -> BackendKind {
    BackendKind::Memory
}

pub fn log_level() -> String {
    LOG_LEVEL_STR.to_string()
}

pub fn revalidate_output() -> bool {
    true
}

pub fn kvstore_path() -> PathBuf {
    PathBuf::from(KVSTORE_PATH_STR)
}

pub fn rest_base_url() -> String {
    REST_BASE_URL_STR.to_string()
}

/// Seconds before a request to the configuration service is abandoned
pub fn rest_timeout_secs() -> u64 {
    10
}

/// Largest configuration service response accepted, in bytes
pub fn rest_max_response_bytes() -> usize {
    4096
}

/// Output buffer capacity for `get`, terminator included
pub fn get_buffer_size() -> usize {
    4096
}
