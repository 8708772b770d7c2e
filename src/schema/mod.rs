//! Schema module
//!
//! Hardcoded per-type document rules expressed as data, and the validation
//! engine that enforces them. This is not a general JSON-schema interpreter.

pub mod rules;
mod validator;

pub use rules::{DocumentSchema, FieldKind, FieldRule, SectionRule, WIRELESS_SCHEMA, RADIO_FIELDS, SSID_FIELDS};
pub use validator::ValidationError;
