//! devconf: typed device configuration pipeline
//!
//! Accepts JSON configuration documents for named configuration types,
//! validates them against per-type rules, decodes them into fixed-capacity
//! records, and dispatches them to a southbound backend. The reverse path
//! fetches a record from the backend and encodes it into a caller-supplied
//! buffer.
//!
//! # Main Features
//!
//! - Case-insensitive type registry with a declarative rule table per type
//! - Lenient decoder, sparse encoder into a fixed-capacity buffer
//! - Southbound backends: in-memory, local key-value store, remote HTTP service
//! - Boolean and structured (`Result`) entry points
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use devconf::codec::JsonBuffer;
//! use devconf::pipeline::ConfigManager;
//! use devconf::registry::TypeRegistry;
//! use devconf::southbound::{MemoryBackend, SouthboundRegistry};
//!
//! let manager = ConfigManager::new(
//!     TypeRegistry::with_defaults(),
//!     SouthboundRegistry::for_backend(Arc::new(MemoryBackend::new())),
//! );
//!
//! let document = std::fs::read_to_string("wireless.json").unwrap();
//! if manager.config_set("wireless", &document) {
//!     let mut out = JsonBuffer::with_capacity(4096);
//!     if manager.config_get("wireless", &mut out) {
//!         println!("{}", out);
//!     }
//! }
//! ```

pub mod codec;
pub mod common;
pub mod config;
pub mod model;
pub mod pipeline;
pub mod registry;
pub mod schema;
pub mod southbound;

pub use codec::JsonBuffer;
pub use common::{DevconfError, Result};
pub use pipeline::{ConfigManager, ErrorKind, PipelineError};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");

/// Apply a configuration document through the process-wide manager
///
/// Returns `false` on any failure; the reason is logged.
pub fn config_set(type_name: &str, document: &str) -> bool {
    pipeline::global().config_set(type_name, document)
}

/// Read a configuration through the process-wide manager into `out`
///
/// Returns `false` on any failure, leaving `out` empty.
pub fn config_get(type_name: &str, out: &mut JsonBuffer) -> bool {
    pipeline::global().config_get(type_name, out)
}
