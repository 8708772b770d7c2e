//! Fixed-capacity string type
//!
//! Record fields that the device stores in fixed byte slots are modelled as
//! `BoundedString<N>`: at most `N` bytes of UTF-8.

use std::fmt;
use std::ops::Deref;

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Returned when a value does not fit in a bounded string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("value is {len} bytes, capacity is {capacity}")]
pub struct CapacityError {
    /// Length of the rejected value in bytes
    pub len: usize,
    /// Capacity of the target field in bytes
    pub capacity: usize,
}

/// A string holding at most `N` bytes
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BoundedString<const N: usize> {
    inner: String,
}

impl<const N: usize> BoundedString<N> {
    /// Capacity in bytes
    pub const CAPACITY: usize = N;

    /// Create a bounded string, rejecting values longer than `N` bytes
    pub fn new(value: &str) -> Result<Self, CapacityError> {
        if value.len() > N {
            return Err(CapacityError { len: value.len(), capacity: N });
        }
        Ok(Self { inner: value.to_string() })
    }

    /// Create a bounded string, cutting the value down to `N` bytes
    ///
    /// The cut never splits a UTF-8 character. The returned flag is `true`
    /// when bytes were dropped.
    pub fn truncating(value: &str) -> (Self, bool) {
        if value.len() <= N {
            return (Self { inner: value.to_string() }, false);
        }

        let mut end = N;
        while !value.is_char_boundary(end) {
            end -= 1;
        }
        (Self { inner: value[..end].to_string() }, true)
    }

    /// Borrow the contents
    pub fn as_str(&self) -> &str {
        &self.inner
    }
}

impl<const N: usize> Deref for BoundedString<N> {
    type Target = str;

    fn deref(&self) -> &str {
        &self.inner
    }
}

impl<const N: usize> AsRef<str> for BoundedString<N> {
    fn as_ref(&self) -> &str {
        &self.inner
    }
}

impl<const N: usize> fmt::Display for BoundedString<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inner)
    }
}

impl<const N: usize> TryFrom<&str> for BoundedString<N> {
    type Error = CapacityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl<const N: usize> Serialize for BoundedString<N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.inner)
    }
}
