//! Fixed-capacity output buffer
//!
//! Models a caller-supplied text buffer of `capacity` bytes that must also
//! hold a terminator. A write either fits completely or leaves the buffer
//! empty.

use std::fmt;

use super::CodecError;

/// Caller-owned buffer receiving an encoded document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonBuffer {
    text: String,
    capacity: usize,
}

impl JsonBuffer {
    /// Create an empty buffer of `capacity` bytes, terminator included
    pub fn with_capacity(capacity: usize) -> Self {
        Self { text: String::new(), capacity }
    }

    /// Total capacity in bytes
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Current contents
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Whether the buffer holds nothing
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Drop the contents, keeping the capacity
    pub fn clear(&mut self) {
        self.text.clear();
    }

    /// Replace the contents with `text`
    ///
    /// Fails with `BufferTooSmall` when `text` plus a terminator exceeds the
    /// capacity; the buffer is then left empty.
    pub fn write(&mut self, text: &str) -> Result<(), CodecError> {
        let required = text.len() + 1;
        if required > self.capacity {
            self.text.clear();
            return Err(CodecError::BufferTooSmall { required, capacity: self.capacity });
        }

        self.text.clear();
        self.text.push_str(text);
        Ok(())
    }
}

impl fmt::Display for JsonBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_fits_with_terminator() {
        let mut buf = JsonBuffer::with_capacity(5);
        buf.write("abcd").unwrap();
        assert_eq!(buf.as_str(), "abcd");
    }

    #[test]
    fn test_write_too_large_leaves_empty() {
        let mut buf = JsonBuffer::with_capacity(5);
        buf.write("ab").unwrap();

        let err = buf.write("abcde").unwrap_err();
        assert!(matches!(err, CodecError::BufferTooSmall { required: 6, capacity: 5 }));
        assert!(buf.is_empty());
    }

    #[test]
    fn test_zero_capacity_rejects_everything() {
        let mut buf = JsonBuffer::with_capacity(0);
        assert!(buf.write("").is_err());
    }
}
