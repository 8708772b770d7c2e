//! Declarative rule table
//!
//! Each configuration document is described as a root key holding an object
//! of fixed-size arrays, and each array item as a closed set of fields.

use serde_json::Value;

use crate::model::{MAX_NAME_LEN, MAX_PASSWORD_LEN, MAX_POWER, MAX_RADIOS, MAX_SSIDS};

/// Type and bounds of one field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// JSON number, inclusive bounds
    Integer { min: i64, max: i64 },
    /// JSON boolean
    Boolean,
    /// JSON string, inclusive byte-length bounds
    Text { min_len: usize, max_len: usize },
}

impl FieldKind {
    /// Name used in error messages
    pub fn expected(&self) -> &'static str {
        match self {
            FieldKind::Integer { .. } => "number",
            FieldKind::Boolean => "boolean",
            FieldKind::Text { .. } => "string",
        }
    }
}

/// One required field of an object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    /// Wire name
    pub name: &'static str,
    /// Type and bounds
    pub kind: FieldKind,
}

/// An array of closed objects inside the root object
#[derive(Debug, Clone, Copy)]
pub struct SectionRule {
    /// Key of the array
    pub name: &'static str,
    /// Minimum number of items
    pub min_items: usize,
    /// Maximum number of items
    pub max_items: usize,
    /// Fields every item must carry, and the only fields it may carry
    pub fields: &'static [FieldRule],
}

/// A whole configuration document
#[derive(Debug, Clone, Copy)]
pub struct DocumentSchema {
    /// Identifier reported by the type registry
    pub id: &'static str,
    /// The single top-level key
    pub root: &'static str,
    /// Arrays the root object must hold, and the only keys it may hold
    pub sections: &'static [SectionRule],
}

const fn non_negative(name: &'static str, max: i64) -> FieldRule {
    FieldRule { name, kind: FieldKind::Integer { min: 0, max } }
}

const fn flag(name: &'static str) -> FieldRule {
    FieldRule { name, kind: FieldKind::Boolean }
}

/// Fields of a radio object
pub const RADIO_FIELDS: [FieldRule; 9] = [
    non_negative("power", MAX_POWER as i64),
    non_negative("channel2g", i64::MAX),
    non_negative("channel5g", i64::MAX),
    non_negative("bandwidth2g", i64::MAX),
    non_negative("bandwidth5g", i64::MAX),
    flag("dfs"),
    flag("atf"),
    flag("bandsteering"),
    flag("zerowait"),
];

/// Fields of an SSID object
pub const SSID_FIELDS: [FieldRule; 9] = [
    FieldRule { name: "ssid", kind: FieldKind::Text { min_len: 1, max_len: MAX_NAME_LEN } },
    flag("hide"),
    non_negative("security", i64::MAX),
    FieldRule { name: "password", kind: FieldKind::Text { min_len: 0, max_len: MAX_PASSWORD_LEN } },
    flag("password_onscreen"),
    flag("enable2g"),
    flag("enable5g"),
    flag("isolation"),
    flag("hopping"),
];

/// Schema of the wireless document
pub const WIRELESS_SCHEMA: DocumentSchema = DocumentSchema {
    id: "schema/wireless_data_model_schema.json",
    root: "wireless",
    sections: &[
        SectionRule { name: "radio", min_items: 1, max_items: MAX_RADIOS, fields: &RADIO_FIELDS },
        SectionRule { name: "ssid", min_items: 1, max_items: MAX_SSIDS, fields: &SSID_FIELDS },
    ],
};

/// Read a JSON number as an integer
///
/// Fractional numbers are truncated toward zero; values outside `i64`
/// saturate. Returns `None` for anything that is not a number.
pub fn integer_value(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| value.as_f64().map(|f| f as i64))
}
