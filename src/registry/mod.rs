//! Type registry module
//!
//! Maps configuration type names to their validator, decoder, encoder and
//! canonical record.

mod handler;
mod types;

pub use handler::{ConfigHandler, WirelessHandler};
pub use types::{HandlerBinding, TypeRegistry};

use thiserror::Error;

/// Registration failures, reported at startup
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A binding with the same case-insensitive name exists
    #[error("type '{0}' is already registered")]
    Duplicate(String),

    /// Bindings need a name
    #[error("type name must not be empty")]
    EmptyName,
}

/// Case-insensitive linear lookup
pub(crate) fn find_by_name<'a, T>(items: &'a [T], name: &str, key: impl Fn(&T) -> &str) -> Option<&'a T> {
    items.iter().find(|&item| key(item).eq_ignore_ascii_case(name))
}
