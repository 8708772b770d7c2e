//! Backend factory
//!
//! Selects and builds the process's southbound backend from settings.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, info};

use crate::config::{BackendKind, Settings};
use super::{Backend, BackendError, KvStoreBackend, MemoryBackend, RestBackend};

/// Create the backend named by `settings.backend`
///
/// # Arguments
///
/// * `settings` - Process settings; only the fields of the selected backend are read
///
/// # Returns
///
/// A shared backend ready to be bound into a `SouthboundRegistry`
pub fn create_backend(settings: &Settings) -> Result<Arc<dyn Backend>, BackendError> {
    let backend: Arc<dyn Backend> = match settings.backend {
        BackendKind::Memory => Arc::new(MemoryBackend::new()),
        BackendKind::KvStore => {
            debug!("Using key-value store at {}", settings.kvstore_path.display());
            Arc::new(KvStoreBackend::new(&settings.kvstore_path))
        }
        BackendKind::Rest => {
            debug!(
                "Using configuration service at {} (timeout {}s)",
                settings.rest_base_url, settings.rest_timeout_secs
            );
            Arc::new(RestBackend::new(
                &settings.rest_base_url,
                Duration::from_secs(settings.rest_timeout_secs),
                settings.rest_max_response_bytes,
            )?)
        }
    };

    info!("Southbound backend: {}", backend.name());
    Ok(backend)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_each_backend() {
        let mut settings = Settings::default();
        assert_eq!(create_backend(&settings).unwrap().name(), "memory");

        settings.backend = BackendKind::KvStore;
        assert_eq!(create_backend(&settings).unwrap().name(), "kvstore");

        settings.backend = BackendKind::Rest;
        assert_eq!(create_backend(&settings).unwrap().name(), "rest");
    }
}
