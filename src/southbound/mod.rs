//! Southbound module
//!
//! The backend-facing side of the pipeline. A single `Backend` per process
//! applies configuration to, or reads it from, the device or a remote
//! service. `SouthboundRegistry` adapts that backend into per-type
//! operations over `ConfigRecord`, independent of the type registry.

mod dispatch;
mod factory;
pub mod kvstore;
pub mod memory;
pub mod rest;

pub use dispatch::{SouthboundBinding, SouthboundRegistry};
pub use factory::create_backend;
pub use kvstore::KvStoreBackend;
pub use memory::MemoryBackend;
pub use rest::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, ReqwestTransport, RestBackend};

use std::fmt::Debug;
use std::io;

use thiserror::Error;

use crate::model::WirelessConfig;

/// Southbound failures
#[derive(Debug, Error)]
pub enum BackendError {
    /// The backend does not implement this operation
    #[error("operation '{0}' is not supported by this backend")]
    Unsupported(&'static str),

    /// A record of another configuration type was passed in
    #[error("record of type '{found}' cannot be handled as '{expected}'")]
    RecordMismatch { expected: &'static str, found: &'static str },

    /// Request could not be sent or its response not read
    #[error("transport error: {0}")]
    Transport(String),

    /// The remote service answered with a non-success status
    #[error("unexpected HTTP status {0}")]
    Status(u16),

    /// The remote service answered with more data than accepted
    #[error("response of {size} bytes exceeds limit of {limit} bytes")]
    ResponseTooLarge { size: usize, limit: usize },

    /// The remote service answered with something unusable
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Local store could not be read or written
    #[error("store IO error: {0}")]
    Io(#[from] io::Error),

    /// Local store content is malformed
    #[error("store format error: {0}")]
    Store(String),
}

/// Which operations a backend implements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackendCapabilities {
    /// Can apply wireless configuration
    pub wireless_set: bool,
    /// Can read wireless configuration
    pub wireless_get: bool,
}

impl BackendCapabilities {
    /// Every operation available
    pub const fn all() -> Self {
        Self { wireless_set: true, wireless_get: true }
    }
}

impl Default for BackendCapabilities {
    fn default() -> Self {
        Self::all()
    }
}

/// A concrete southbound transport
///
/// One implementation is chosen at startup. Calls block the caller for as
/// long as the transport needs.
pub trait Backend: Send + Sync + Debug {
    /// Short name used in logs and settings
    fn name(&self) -> &'static str;

    /// Operations this backend implements
    fn capabilities(&self) -> BackendCapabilities {
        BackendCapabilities::all()
    }

    /// Apply a wireless configuration
    fn set_wireless_config(&self, cfg: &WirelessConfig) -> Result<(), BackendError>;

    /// Read the current wireless configuration into `cfg`
    fn get_wireless_config(&self, cfg: &mut WirelessConfig) -> Result<(), BackendError>;
}
