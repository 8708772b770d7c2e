//! Lenient field readers
//!
//! Absent or mistyped fields fall back to the zero value of the target.

use log::warn;
use serde_json::{Map, Value};

use crate::model::BoundedString;
use crate::schema::rules::integer_value;

/// Unsigned record field types with a saturation ceiling
pub trait Saturating: TryFrom<i64> + Default {
    const MAX: Self;
}

impl Saturating for u8 {
    const MAX: Self = u8::MAX;
}

impl Saturating for u32 {
    const MAX: Self = u32::MAX;
}

/// Read an integer field, defaulting to zero
///
/// Non-negative numbers too large for `T` saturate to `T::MAX`; negative
/// numbers count as mistyped.
pub fn integer<T: Saturating>(obj: &Map<String, Value>, key: &str) -> T {
    match obj.get(key).and_then(integer_value) {
        Some(n) if n >= 0 => T::try_from(n).unwrap_or(T::MAX),
        _ => T::default(),
    }
}

/// Read a boolean field, defaulting to `false`
pub fn boolean(obj: &Map<String, Value>, key: &str) -> bool {
    obj.get(key).and_then(Value::as_bool).unwrap_or(false)
}

/// Read a string field into a bounded string, defaulting to empty
///
/// Over-long values are cut to capacity and a warning naming `path` is logged.
pub fn text<const N: usize>(obj: &Map<String, Value>, key: &str, path: &str) -> BoundedString<N> {
    match obj.get(key).and_then(Value::as_str) {
        Some(s) => {
            let (value, truncated) = BoundedString::truncating(s);
            if truncated {
                warn!("{}.{} truncated from {} to {} bytes", path, key, s.len(), value.len());
            }
            value
        }
        None => BoundedString::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(v: Value) -> Map<String, Value> {
        v.as_object().cloned().unwrap()
    }

    #[test]
    fn test_integer_defaults() {
        let obj = object(json!({ "a": 5, "b": "5", "c": -3, "d": 300 }));
        assert_eq!(integer::<u32>(&obj, "a"), 5);
        assert_eq!(integer::<u32>(&obj, "b"), 0);
        assert_eq!(integer::<u32>(&obj, "c"), 0);
        assert_eq!(integer::<u8>(&obj, "d"), u8::MAX);
        assert_eq!(integer::<u32>(&obj, "missing"), 0);
    }

    #[test]
    fn test_integer_saturates_above_range() {
        let obj = object(json!({ "big": 5000000000i64, "huge": 1e30, "neg": -5000000000i64 }));
        assert_eq!(integer::<u32>(&obj, "big"), u32::MAX);
        assert_eq!(integer::<u32>(&obj, "huge"), u32::MAX);
        assert_eq!(integer::<u8>(&obj, "big"), u8::MAX);
        assert_eq!(integer::<u32>(&obj, "neg"), 0);
    }

    #[test]
    fn test_boolean_defaults() {
        let obj = object(json!({ "a": true, "b": 1 }));
        assert!(boolean(&obj, "a"));
        assert!(!boolean(&obj, "b"));
        assert!(!boolean(&obj, "missing"));
    }

    #[test]
    fn test_text_truncates() {
        let obj = object(json!({ "a": "abcdef", "b": 7 }));
        assert_eq!(text::<4>(&obj, "a", "x").as_str(), "abcd");
        assert_eq!(text::<4>(&obj, "b", "x").as_str(), "");
    }
}
