//! Type registry
//!
//! Binds a configuration type name to its handler and canonical record.

use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use log::{debug, warn};

use crate::model::ConfigRecord;
use super::handler::{ConfigHandler, WirelessHandler};
use super::{find_by_name, RegistryError};

/// A registered configuration type
pub struct HandlerBinding {
    name: &'static str,
    handler: Box<dyn ConfigHandler>,
    record: Mutex<ConfigRecord>,
}

impl HandlerBinding {
    fn new(name: &'static str, handler: Box<dyn ConfigHandler>) -> Self {
        let record = Mutex::new(handler.new_record());
        Self { name, handler, record }
    }

    /// Registered type name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Identifier of the document schema
    pub fn schema_id(&self) -> &'static str {
        self.handler.schema().id
    }

    /// Validator, decoder and encoder
    pub fn handler(&self) -> &dyn ConfigHandler {
        self.handler.as_ref()
    }

    /// Lock the canonical record
    ///
    /// Every set and get overwrites the whole record before reading it, so
    /// a record left behind by a panicking holder is still usable.
    pub fn lock_record(&self) -> MutexGuard<'_, ConfigRecord> {
        self.record.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for HandlerBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerBinding")
            .field("name", &self.name)
            .field("schema_id", &self.schema_id())
            .finish()
    }
}

/// Name to handler bindings, fixed after startup
#[derive(Debug, Default)]
pub struct TypeRegistry {
    bindings: Vec<HandlerBinding>,
}

impl TypeRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding every built-in type
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry
            .register("wireless", Box::new(WirelessHandler))
            .expect("built-in type names are unique");
        registry
    }

    /// Add a binding
    ///
    /// Names are compared case-insensitively; a duplicate is an error.
    pub fn register(&mut self, name: &'static str, handler: Box<dyn ConfigHandler>) -> Result<(), RegistryError> {
        if name.is_empty() {
            return Err(RegistryError::EmptyName);
        }
        if self.find(name).is_some() {
            return Err(RegistryError::Duplicate(name.to_string()));
        }

        debug!("TypeRegistry: registered '{}' ({})", name, handler.schema().id);
        self.bindings.push(HandlerBinding::new(name, handler));
        Ok(())
    }

    /// Look up a binding by case-insensitive name
    pub fn find(&self, name: &str) -> Option<&HandlerBinding> {
        debug!("TypeRegistry: searching type='{}' in {} handlers", name, self.bindings.len());
        let found = find_by_name(&self.bindings, name, |b| b.name());
        if found.is_none() {
            warn!("TypeRegistry: no handler found for type '{}'", name);
        }
        found
    }

    /// Registered names in registration order
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.bindings.iter().map(HandlerBinding::name)
    }

    /// All bindings
    pub fn iter(&self) -> impl Iterator<Item = &HandlerBinding> {
        self.bindings.iter()
    }
}
