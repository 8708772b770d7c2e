//! Validation engine
//!
//! Walks a parsed document against a `DocumentSchema`. The first violation
//! aborts the check; there is no partial acceptance.

use log::{debug, warn};
use serde_json::{Map, Value};
use thiserror::Error;

use super::rules::{integer_value, DocumentSchema, FieldKind, FieldRule, SectionRule};

/// Why a document was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The text is not JSON
    #[error("document is not valid JSON: {0}")]
    Parse(String),

    /// A value that must be an object is not
    #[error("'{path}' must be an object")]
    NotAnObject { path: String },

    /// A value that must be an array is missing or not an array
    #[error("'{path}' must be an array")]
    NotAnArray { path: String },

    /// A required field is absent
    #[error("'{path}' is required")]
    MissingField { path: String },

    /// A field has the wrong JSON type
    #[error("'{path}' must be a {expected}")]
    WrongType { path: String, expected: &'static str },

    /// A number is outside its bounds
    #[error("'{path}' is {value}, expected {min}..={max}")]
    OutOfRange { path: String, value: i64, min: i64, max: i64 },

    /// A string is too short or too long
    #[error("'{path}' is {len} bytes, expected {min}..={max}")]
    BadLength { path: String, len: usize, min: usize, max: usize },

    /// An array holds too few or too many items
    #[error("'{path}' has {count} items, expected {min}..={max}")]
    ItemCount { path: String, count: usize, min: usize, max: usize },

    /// An object carries a field outside its closed set
    #[error("'{path}' has unknown field '{field}'")]
    UnknownField { path: String, field: String },
}

impl DocumentSchema {
    /// Validate document text
    pub fn validate(&self, document: &str) -> Result<(), ValidationError> {
        let root: Value = serde_json::from_str(document).map_err(|e| {
            warn!("validate: JSON parse error: {}", e);
            ValidationError::Parse(e.to_string())
        })?;
        self.validate_value(&root)
    }

    /// Validate an already parsed document
    pub fn validate_value(&self, root: &Value) -> Result<(), ValidationError> {
        debug!("validate: checking document against {}", self.id);

        let root_obj = root.as_object().ok_or_else(|| ValidationError::NotAnObject {
            path: "$".to_string(),
        })?;

        let body = root_obj
            .get(self.root)
            .and_then(Value::as_object)
            .ok_or_else(|| ValidationError::NotAnObject { path: self.root.to_string() })?;

        for section in self.sections {
            validate_section(self.root, body, section)?;
        }

        let allowed: Vec<&str> = self.sections.iter().map(|s| s.name).collect();
        reject_unknown(self.root, body, &allowed)?;
        reject_unknown("$", root_obj, &[self.root])?;

        debug!("validate: document accepted by {}", self.id);
        Ok(())
    }
}

fn validate_section(
    parent: &str,
    body: &Map<String, Value>,
    section: &SectionRule,
) -> Result<(), ValidationError> {
    let path = format!("{}.{}", parent, section.name);

    let items = body
        .get(section.name)
        .and_then(Value::as_array)
        .ok_or_else(|| ValidationError::NotAnArray { path: path.clone() })?;

    if items.len() < section.min_items || items.len() > section.max_items {
        return Err(ValidationError::ItemCount {
            path,
            count: items.len(),
            min: section.min_items,
            max: section.max_items,
        });
    }

    for (index, item) in items.iter().enumerate() {
        let item_path = format!("{}[{}]", path, index);
        if let Err(e) = validate_item(&item_path, item, section.fields) {
            warn!("validate: invalid '{}' item at index {}: {}", section.name, index, e);
            return Err(e);
        }
    }

    Ok(())
}

fn validate_item(path: &str, item: &Value, fields: &[FieldRule]) -> Result<(), ValidationError> {
    let obj = item.as_object().ok_or_else(|| ValidationError::NotAnObject {
        path: path.to_string(),
    })?;

    for rule in fields {
        let field_path = format!("{}.{}", path, rule.name);
        let value = obj
            .get(rule.name)
            .ok_or_else(|| ValidationError::MissingField { path: field_path.clone() })?;
        validate_field(field_path, value, rule.kind)?;
    }

    let allowed: Vec<&str> = fields.iter().map(|f| f.name).collect();
    reject_unknown(path, obj, &allowed)
}

fn validate_field(path: String, value: &Value, kind: FieldKind) -> Result<(), ValidationError> {
    match kind {
        FieldKind::Integer { min, max } => {
            let n = integer_value(value).ok_or_else(|| ValidationError::WrongType {
                path: path.clone(),
                expected: kind.expected(),
            })?;
            if n < min || n > max {
                return Err(ValidationError::OutOfRange { path, value: n, min, max });
            }
        }
        FieldKind::Boolean => {
            if !value.is_boolean() {
                return Err(ValidationError::WrongType { path, expected: kind.expected() });
            }
        }
        FieldKind::Text { min_len, max_len } => {
            let s = value.as_str().ok_or_else(|| ValidationError::WrongType {
                path: path.clone(),
                expected: kind.expected(),
            })?;
            if s.len() < min_len || s.len() > max_len {
                return Err(ValidationError::BadLength { path, len: s.len(), min: min_len, max: max_len });
            }
        }
    }
    Ok(())
}

fn reject_unknown(path: &str, obj: &Map<String, Value>, allowed: &[&str]) -> Result<(), ValidationError> {
    match obj.keys().find(|k| !allowed.contains(&k.as_str())) {
        Some(field) => {
            warn!("validate: '{}' has unknown field '{}'", path, field);
            Err(ValidationError::UnknownField { path: path.to_string(), field: field.clone() })
        }
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::WIRELESS_SCHEMA;
    use serde_json::{json, Value};

    fn radio() -> Value {
        json!({
            "power": 50, "channel2g": 6, "channel5g": 36,
            "bandwidth2g": 20, "bandwidth5g": 80,
            "dfs": false, "atf": true, "bandsteering": true, "zerowait": false
        })
    }

    fn ssid(name: &str) -> Value {
        json!({
            "ssid": name, "hide": false, "security": 3, "password": "abc123",
            "password_onscreen": false, "enable2g": true, "enable5g": true,
            "isolation": false, "hopping": false
        })
    }

    fn document(radios: Vec<Value>, ssids: Vec<Value>) -> Value {
        json!({ "wireless": { "radio": radios, "ssid": ssids } })
    }

    fn check(doc: &Value) -> Result<(), ValidationError> {
        WIRELESS_SCHEMA.validate(&doc.to_string())
    }

    #[test]
    fn test_valid_document() {
        assert!(check(&document(vec![radio()], vec![ssid("net1")])).is_ok());
        assert!(check(&document(vec![radio(); 4], vec![ssid("a"), ssid("b"), ssid("c"), ssid("d")])).is_ok());
    }

    #[test]
    fn test_not_json() {
        assert!(matches!(WIRELESS_SCHEMA.validate("{not json"), Err(ValidationError::Parse(_))));
        assert!(matches!(WIRELESS_SCHEMA.validate("[]"), Err(ValidationError::NotAnObject { .. })));
    }

    #[test]
    fn test_power_range() {
        for (power, ok) in [(100, true), (0, true), (150, false), (-1, false)] {
            let mut r = radio();
            r["power"] = json!(power);
            assert_eq!(check(&document(vec![r], vec![ssid("net1")])).is_ok(), ok, "power {}", power);
        }
    }

    #[test]
    fn test_counts_above_u32_range() {
        let mut r = radio();
        r["channel2g"] = json!(5000000000i64);
        let mut s = ssid("net1");
        s["security"] = json!(5000000000i64);
        assert!(check(&document(vec![r], vec![s])).is_ok());

        let mut s = ssid("net1");
        s["security"] = json!(-1);
        let err = check(&document(vec![radio()], vec![s])).unwrap_err();
        assert!(matches!(err, ValidationError::OutOfRange { ref path, .. } if path == "wireless.ssid[0].security"));
    }

    #[test]
    fn test_negative_channel() {
        let mut r = radio();
        r["channel5g"] = json!(-36);
        let err = check(&document(vec![r], vec![ssid("net1")])).unwrap_err();
        assert!(matches!(err, ValidationError::OutOfRange { ref path, .. } if path == "wireless.radio[0].channel5g"));
    }

    #[test]
    fn test_wrong_types() {
        let mut r = radio();
        r["dfs"] = json!(0);
        assert!(matches!(
            check(&document(vec![r], vec![ssid("net1")])),
            Err(ValidationError::WrongType { expected: "boolean", .. })
        ));

        let mut s = ssid("net1");
        s["security"] = json!("wpa2");
        assert!(matches!(
            check(&document(vec![radio()], vec![s])),
            Err(ValidationError::WrongType { expected: "number", .. })
        ));
    }

    #[test]
    fn test_missing_field() {
        let mut s = ssid("net1");
        s.as_object_mut().unwrap().remove("hopping");
        assert!(matches!(
            check(&document(vec![radio()], vec![s])),
            Err(ValidationError::MissingField { .. })
        ));
    }

    #[test]
    fn test_item_counts() {
        assert!(matches!(
            check(&document(vec![], vec![ssid("net1")])),
            Err(ValidationError::ItemCount { count: 0, .. })
        ));
        assert!(matches!(
            check(&document(vec![radio()], vec![ssid("a"), ssid("b"), ssid("c"), ssid("d"), ssid("e")])),
            Err(ValidationError::ItemCount { count: 5, .. })
        ));
    }

    #[test]
    fn test_ssid_lengths() {
        assert!(matches!(
            check(&document(vec![radio()], vec![ssid("")])),
            Err(ValidationError::BadLength { .. })
        ));
        assert!(check(&document(vec![radio()], vec![ssid(&"n".repeat(64))])).is_ok());
        assert!(check(&document(vec![radio()], vec![ssid(&"n".repeat(65))])).is_err());

        let mut s = ssid("net1");
        s["password"] = json!("");
        assert!(check(&document(vec![radio()], vec![s.clone()])).is_ok());
        s["password"] = json!("p".repeat(65));
        assert!(check(&document(vec![radio()], vec![s])).is_err());
    }

    #[test]
    fn test_closed_objects() {
        let mut doc = document(vec![radio()], vec![ssid("net1")]);
        doc["wireless"]["mesh"] = json!(true);
        assert!(matches!(check(&doc), Err(ValidationError::UnknownField { ref field, .. }) if field == "mesh"));

        let mut doc = document(vec![radio()], vec![ssid("net1")]);
        doc["display"] = json!({});
        assert!(matches!(check(&doc), Err(ValidationError::UnknownField { ref path, .. }) if path == "$"));

        let mut s = ssid("net1");
        s["vlan"] = json!(10);
        assert!(matches!(
            check(&document(vec![radio()], vec![s])),
            Err(ValidationError::UnknownField { .. })
        ));
    }

    #[test]
    fn test_first_bad_item_aborts() {
        let mut bad = radio();
        bad["power"] = json!(101);
        let err = check(&document(vec![radio(), bad, radio()], vec![ssid("net1")])).unwrap_err();
        assert!(err.to_string().contains("radio[1]"));
    }
}
