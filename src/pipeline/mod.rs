//! Pipeline module
//!
//! The set/get orchestrator and its error taxonomy, plus the lazily built
//! process-wide manager behind the crate's free functions.

mod error;
mod manager;

pub use error::{ErrorKind, PipelineError};
pub use manager::ConfigManager;

use log::error;
use once_cell::sync::Lazy;

use crate::config::{Settings, SettingsError};
use crate::registry::TypeRegistry;
use crate::southbound::SouthboundRegistry;

static GLOBAL: Lazy<ConfigManager> = Lazy::new(|| build_global(Settings::load(None)));

/// Process-wide manager, built from `Settings::load(None)` on first use
pub fn global() -> &'static ConfigManager {
    &GLOBAL
}

/// Manager with no southbound binding; every request fails with
/// `BackendUnavailable`
fn unbound() -> ConfigManager {
    ConfigManager::new(TypeRegistry::with_defaults(), SouthboundRegistry::new())
}

fn build_global(loaded: Result<Settings, SettingsError>) -> ConfigManager {
    let settings = match loaded {
        Ok(settings) => settings,
        Err(e) => {
            error!("Failed to load settings: {}", e);
            return unbound();
        }
    };

    ConfigManager::from_settings(&settings).unwrap_or_else(|e| {
        error!("Failed to create southbound backend: {}", e);
        unbound().with_revalidation(settings.revalidate_output)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"{"wireless":{"radio":[{"power":80,"channel2g":6,"channel5g":36,"bandwidth2g":20,"bandwidth5g":80,"dfs":false,"atf":true,"bandsteering":true,"zerowait":false}],"ssid":[{"ssid":"net1","hide":false,"security":3,"password":"abc123","password_onscreen":false,"enable2g":true,"enable5g":true,"isolation":false,"hopping":false}]}}"#;

    #[test]
    fn test_settings_failure_leaves_manager_unbound() {
        let manager = build_global(Err(SettingsError::InvalidValue {
            field: "rest_timeout_secs",
            reason: "must be positive".to_string(),
        }));

        let err = manager.try_set("wireless", DOC).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BackendUnavailable);
        assert!(!manager.config_set("wireless", DOC));
    }

    #[test]
    fn test_default_settings_bind_memory_backend() {
        let manager = build_global(Ok(Settings::default()));
        assert!(manager.config_set("wireless", DOC));
    }
}
