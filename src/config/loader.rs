//! Settings loader
//!
//! Layers, lowest priority first: serde defaults, the JSON settings file,
//! `DEVCONF_*` environment variables.

use std::env;
use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use log::debug;

use super::defaults::{CONFIG_FILE_ENV, DEFAULT_CONFIG_FILE, ENV_PREFIX};
use super::{Settings, SettingsError};

impl Settings {
    /// Load settings
    ///
    /// The settings file is `path` if given, else the file named by
    /// `DEVCONF_CONFIG_FILE`, else the default location. A file named
    /// explicitly must exist; the default one may be absent.
    pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
        let (config_path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => match env::var(CONFIG_FILE_ENV) {
                Ok(p) if !p.is_empty() => (PathBuf::from(p), true),
                _ => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
            },
        };

        if required && !config_path.is_file() {
            return Err(SettingsError::FileNotFound(config_path));
        }

        let settings: Settings = Config::builder()
            .add_source(
                File::from(config_path.as_path())
                    .format(FileFormat::Json)
                    .required(false),
            )
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .source(Some(overrides_from_env())),
            )
            .build()?
            .try_deserialize()?;

        if config_path.is_file() {
            debug!("Settings loaded from {}", config_path.display());
        }

        settings.validate()?;
        Ok(settings)
    }
}

// The settings file variable shares the prefix but is not a setting.
fn overrides_from_env() -> config::Map<String, String> {
    env::vars()
        .filter(|(key, _)| key != CONFIG_FILE_ENV)
        .collect()
}
