//! Configuration manager
//!
//! Runs the set and get pipelines over a type registry and a southbound
//! registry:
//!
//! set: validate → decode into the canonical record → apply
//! get: fetch into the canonical record → encode → re-validate
//!
//! The canonical record of a type stays locked for a whole request, so
//! concurrent requests on one type run one after another.

use log::{debug, error, info, warn};

use crate::codec::JsonBuffer;
use crate::config::Settings;
use crate::registry::{HandlerBinding, TypeRegistry};
use crate::southbound::{create_backend, BackendError, SouthboundBinding, SouthboundRegistry};
use super::PipelineError;

/// Orchestrates set and get requests
#[derive(Debug)]
pub struct ConfigManager {
    types: TypeRegistry,
    southbound: SouthboundRegistry,
    revalidate_output: bool,
}

impl ConfigManager {
    /// Create a manager over both registries
    ///
    /// Types bound in only one registry are logged as warnings; requests
    /// for them fail at lookup.
    pub fn new(types: TypeRegistry, southbound: SouthboundRegistry) -> Self {
        let manager = Self {
            types,
            southbound,
            revalidate_output: true,
        };
        for warning in manager.binding_warnings() {
            warn!("{}", warning);
        }
        manager
    }

    /// Build the built-in types over the backend selected in `settings`
    pub fn from_settings(settings: &Settings) -> Result<Self, BackendError> {
        let backend = create_backend(settings)?;
        let manager = Self::new(TypeRegistry::with_defaults(), SouthboundRegistry::for_backend(backend))
            .with_revalidation(settings.revalidate_output);
        Ok(manager)
    }

    /// Turn re-validation of encoded output on or off
    pub fn with_revalidation(mut self, enabled: bool) -> Self {
        self.revalidate_output = enabled;
        self
    }

    /// Registered configuration types
    pub fn types(&self) -> &TypeRegistry {
        &self.types
    }

    /// Registered southbound bindings
    pub fn southbound(&self) -> &SouthboundRegistry {
        &self.southbound
    }

    /// Names bound in one registry but not the other
    pub fn binding_warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        for name in self.types.names() {
            if !self.southbound.names().any(|s| s.eq_ignore_ascii_case(name)) {
                warnings.push(format!("type '{}' has no southbound binding", name));
            }
        }
        for name in self.southbound.names() {
            if !self.types.names().any(|t| t.eq_ignore_ascii_case(name)) {
                warnings.push(format!("southbound binding '{}' has no registered type", name));
            }
        }
        warnings
    }

    /// Apply a configuration document of the given type
    pub fn try_set(&self, type_name: &str, document: &str) -> Result<(), PipelineError> {
        if type_name.is_empty() {
            return Err(PipelineError::InvalidArgument("empty type name"));
        }
        if document.is_empty() {
            return Err(PipelineError::InvalidArgument("empty document"));
        }

        let binding = self.lookup_type(type_name)?;
        let name = binding.name();
        let handler = binding.handler();

        handler.validate(document).map_err(|source| {
            error!("Validation failed for type '{}': {}", name, source);
            PipelineError::Validation { type_name: name, source }
        })?;
        debug!("Document for '{}' passed validation", name);

        let mut record = binding.lock_record();
        handler.decode(document, &mut record).map_err(|source| {
            error!("Failed to decode document for type '{}': {}", name, source);
            PipelineError::Decode { type_name: name, source }
        })?;

        let southbound = self.lookup_southbound(type_name, "apply", SouthboundBinding::can_apply)?;
        southbound.apply(&record).map_err(|source| {
            error!("Southbound apply failed for type '{}': {}", name, source);
            PipelineError::BackendOperation { type_name: name, operation: "apply", source }
        })?;

        info!("Configuration set for type '{}'", name);
        Ok(())
    }

    /// Read the current configuration of the given type into `out`
    ///
    /// On any failure `out` is left empty.
    pub fn try_get(&self, type_name: &str, out: &mut JsonBuffer) -> Result<(), PipelineError> {
        let result = self.get_into(type_name, out);
        if result.is_err() {
            out.clear();
        }
        result
    }

    fn get_into(&self, type_name: &str, out: &mut JsonBuffer) -> Result<(), PipelineError> {
        if type_name.is_empty() {
            return Err(PipelineError::InvalidArgument("empty type name"));
        }
        if out.capacity() == 0 {
            return Err(PipelineError::InvalidArgument("zero-capacity output buffer"));
        }

        let binding = self.lookup_type(type_name)?;
        let name = binding.name();
        let handler = binding.handler();
        let southbound = self.lookup_southbound(type_name, "fetch", SouthboundBinding::can_fetch)?;

        let mut record = binding.lock_record();
        southbound.fetch(&mut record).map_err(|source| {
            error!("Southbound fetch failed for type '{}': {}", name, source);
            PipelineError::BackendOperation { type_name: name, operation: "fetch", source }
        })?;

        handler.encode(&record, out).map_err(|source| {
            error!("Failed to encode type '{}': {}", name, source);
            PipelineError::Encode { type_name: name, source }
        })?;
        drop(record);

        if self.revalidate_output {
            handler.validate(out.as_str()).map_err(|source| {
                error!("Encoded document for type '{}' failed validation: {}", name, source);
                PipelineError::ReexportValidation { type_name: name, source }
            })?;
        }

        info!("Configuration retrieved for type '{}' ({} bytes)", name, out.as_str().len());
        Ok(())
    }

    /// Run only the validation step for a document
    pub fn validate(&self, type_name: &str, document: &str) -> Result<(), PipelineError> {
        if type_name.is_empty() {
            return Err(PipelineError::InvalidArgument("empty type name"));
        }
        let binding = self.lookup_type(type_name)?;
        binding
            .handler()
            .validate(document)
            .map_err(|source| PipelineError::Validation { type_name: binding.name(), source })
    }

    /// Boolean form of [`try_set`](Self::try_set)
    pub fn config_set(&self, type_name: &str, document: &str) -> bool {
        self.try_set(type_name, document)
            .map_err(|e| debug!("config_set({}) failed: {} [{}]", type_name, e, e.kind()))
            .is_ok()
    }

    /// Boolean form of [`try_get`](Self::try_get)
    pub fn config_get(&self, type_name: &str, out: &mut JsonBuffer) -> bool {
        self.try_get(type_name, out)
            .map_err(|e| debug!("config_get({}) failed: {} [{}]", type_name, e, e.kind()))
            .is_ok()
    }

    fn lookup_type(&self, type_name: &str) -> Result<&HandlerBinding, PipelineError> {
        self.types.find(type_name).ok_or_else(|| {
            error!("Unknown configuration type '{}'", type_name);
            PipelineError::UnknownType(type_name.to_string())
        })
    }

    fn lookup_southbound(
        &self,
        type_name: &str,
        operation: &'static str,
        bound: fn(&SouthboundBinding) -> bool,
    ) -> Result<&SouthboundBinding, PipelineError> {
        match self.southbound.find(type_name) {
            Some(binding) if bound(binding) => Ok(binding),
            _ => {
                error!("No southbound {} operation for type '{}'", operation, type_name);
                Err(PipelineError::BackendUnavailable {
                    type_name: type_name.to_string(),
                    operation,
                })
            }
        }
    }
}
