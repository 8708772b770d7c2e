//! In-memory backend
//!
//! Keeps the last applied configuration and hands it back on fetch. Useful
//! as a default for hosts without a device and as a test double.

use std::sync::{Mutex, PoisonError};
use std::sync::atomic::{AtomicUsize, Ordering};

use log::{debug, info};

use crate::model::WirelessConfig;
use super::{Backend, BackendError};

/// Echoing backend
#[derive(Debug, Default)]
pub struct MemoryBackend {
    wireless: Mutex<WirelessConfig>,
    applied: AtomicUsize,
}

impl MemoryBackend {
    /// Create a backend holding an empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend that reports `cfg` until something is applied
    pub fn with_initial(cfg: WirelessConfig) -> Self {
        Self {
            wireless: Mutex::new(cfg),
            applied: AtomicUsize::new(0),
        }
    }

    /// Configuration currently held
    pub fn current(&self) -> WirelessConfig {
        self.wireless.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Number of successful applies
    pub fn apply_count(&self) -> usize {
        self.applied.load(Ordering::Relaxed)
    }
}

impl Backend for MemoryBackend {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn set_wireless_config(&self, cfg: &WirelessConfig) -> Result<(), BackendError> {
        let first = cfg.populated_ssids().next().map(|s| s.name.as_str()).unwrap_or("");
        info!("[memory] set_wireless_config, ssid0={}", first);

        *self.wireless.lock().unwrap_or_else(PoisonError::into_inner) = cfg.clone();
        self.applied.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn get_wireless_config(&self, cfg: &mut WirelessConfig) -> Result<(), BackendError> {
        debug!("[memory] get_wireless_config");
        *cfg = self.current();
        Ok(())
    }
}
