//! Southbound dispatch registry
//!
//! Binds a configuration type name to apply/fetch operations over an
//! untyped `ConfigRecord`.

use std::fmt;
use std::sync::Arc;

use log::{debug, warn};

use crate::model::ConfigRecord;
use crate::registry::{find_by_name, RegistryError};
use super::{Backend, BackendError};

type ApplyFn = Box<dyn Fn(&ConfigRecord) -> Result<(), BackendError> + Send + Sync>;
type FetchFn = Box<dyn Fn(&mut ConfigRecord) -> Result<(), BackendError> + Send + Sync>;

/// Apply and fetch operations for one configuration type
pub struct SouthboundBinding {
    name: &'static str,
    apply: Option<ApplyFn>,
    fetch: Option<FetchFn>,
}

impl SouthboundBinding {
    /// Create a binding with no operations
    pub fn new(name: &'static str) -> Self {
        Self { name, apply: None, fetch: None }
    }

    /// Set the apply operation
    pub fn with_apply<F>(mut self, apply: F) -> Self
    where
        F: Fn(&ConfigRecord) -> Result<(), BackendError> + Send + Sync + 'static,
    {
        self.apply = Some(Box::new(apply));
        self
    }

    /// Set the fetch operation
    pub fn with_fetch<F>(mut self, fetch: F) -> Self
    where
        F: Fn(&mut ConfigRecord) -> Result<(), BackendError> + Send + Sync + 'static,
    {
        self.fetch = Some(Box::new(fetch));
        self
    }

    /// Bound type name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether an apply operation is bound
    pub fn can_apply(&self) -> bool {
        self.apply.is_some()
    }

    /// Whether a fetch operation is bound
    pub fn can_fetch(&self) -> bool {
        self.fetch.is_some()
    }

    /// Push `record` to the backend
    pub fn apply(&self, record: &ConfigRecord) -> Result<(), BackendError> {
        match &self.apply {
            Some(apply) => apply(record),
            None => Err(BackendError::Unsupported("apply")),
        }
    }

    /// Fill `record` from the backend
    pub fn fetch(&self, record: &mut ConfigRecord) -> Result<(), BackendError> {
        match &self.fetch {
            Some(fetch) => fetch(record),
            None => Err(BackendError::Unsupported("fetch")),
        }
    }
}

impl fmt::Debug for SouthboundBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SouthboundBinding")
            .field("name", &self.name)
            .field("apply", &self.can_apply())
            .field("fetch", &self.can_fetch())
            .finish()
    }
}

/// Name to southbound bindings, fixed after startup
#[derive(Debug, Default)]
pub struct SouthboundRegistry {
    bindings: Vec<SouthboundBinding>,
}

impl SouthboundRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Adapt a backend into bindings for every type it can serve
    ///
    /// An operation the backend does not implement is left unbound.
    pub fn for_backend(backend: Arc<dyn Backend>) -> Self {
        let caps = backend.capabilities();
        debug!("SouthboundRegistry: binding backend '{}' ({:?})", backend.name(), caps);

        let mut wireless = SouthboundBinding::new("wireless");
        if caps.wireless_set {
            let backend = Arc::clone(&backend);
            wireless = wireless.with_apply(move |record| {
                let cfg = record.as_wireless().ok_or(BackendError::RecordMismatch {
                    expected: "wireless",
                    found: record.type_name(),
                })?;
                backend.set_wireless_config(cfg)
            });
        }
        if caps.wireless_get {
            let backend = Arc::clone(&backend);
            wireless = wireless.with_fetch(move |record| {
                let found = record.type_name();
                let cfg = record.as_wireless_mut().ok_or(BackendError::RecordMismatch {
                    expected: "wireless",
                    found,
                })?;
                backend.get_wireless_config(cfg)
            });
        }

        let mut registry = Self::new();
        registry
            .register(wireless)
            .expect("built-in southbound names are unique");
        registry
    }

    /// Add a binding
    ///
    /// Names are compared case-insensitively; a duplicate is an error.
    pub fn register(&mut self, binding: SouthboundBinding) -> Result<(), RegistryError> {
        if binding.name.is_empty() {
            return Err(RegistryError::EmptyName);
        }
        if find_by_name(&self.bindings, binding.name, |b| b.name()).is_some() {
            return Err(RegistryError::Duplicate(binding.name.to_string()));
        }
        self.bindings.push(binding);
        Ok(())
    }

    /// Look up a binding by case-insensitive name
    pub fn find(&self, name: &str) -> Option<&SouthboundBinding> {
        debug!("SouthboundRegistry: searching type='{}' in {} entries", name, self.bindings.len());
        let found = find_by_name(&self.bindings, name, |b| b.name());
        if found.is_none() {
            warn!("SouthboundRegistry: no entry found for type '{}'", name);
        }
        found
    }

    /// Registered names in registration order
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.bindings.iter().map(SouthboundBinding::name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::WirelessConfig;
    use crate::southbound::{BackendCapabilities, MemoryBackend};

    #[derive(Debug)]
    struct ReadOnly;

    impl Backend for ReadOnly {
        fn name(&self) -> &'static str {
            "read-only"
        }

        fn capabilities(&self) -> BackendCapabilities {
            BackendCapabilities { wireless_set: false, wireless_get: true }
        }

        fn set_wireless_config(&self, _cfg: &WirelessConfig) -> Result<(), BackendError> {
            unreachable!("not bound")
        }

        fn get_wireless_config(&self, cfg: &mut WirelessConfig) -> Result<(), BackendError> {
            cfg.radio[0].power = 7;
            Ok(())
        }
    }

    #[test]
    fn test_for_backend_binds_wireless() {
        let registry = SouthboundRegistry::for_backend(Arc::new(MemoryBackend::new()));
        let binding = registry.find("Wireless").unwrap();
        assert!(binding.can_apply());
        assert!(binding.can_fetch());
        assert!(registry.find("display").is_none());
    }

    #[test]
    fn test_missing_capability_leaves_operation_unbound() {
        let registry = SouthboundRegistry::for_backend(Arc::new(ReadOnly));
        let binding = registry.find("wireless").unwrap();
        assert!(!binding.can_apply());
        assert!(binding.can_fetch());

        let mut record = ConfigRecord::Wireless(WirelessConfig::default());
        assert!(matches!(binding.apply(&record), Err(BackendError::Unsupported("apply"))));

        binding.fetch(&mut record).unwrap();
        assert_eq!(record.as_wireless().unwrap().radio[0].power, 7);
    }

    #[test]
    fn test_register_rejects_duplicates() {
        let mut registry = SouthboundRegistry::for_backend(Arc::new(MemoryBackend::new()));
        let err = registry.register(SouthboundBinding::new("WIRELESS")).unwrap_err();
        assert_eq!(err, RegistryError::Duplicate("WIRELESS".to_string()));
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["wireless"]);
    }
}
