//! # Record - decoded segment entries
//!
//! Segments hold raw entries in the textual form `key:value`. A [`Record`]
//! is the decoded pair. Decoding splits on the **first** `:` only, so the key
//! can never contain the delimiter while the value may contain any number of
//! them:
//!
//! ```rust
//! use record::Record;
//!
//! let r = Record::decode("user:42:active").unwrap();
//! assert_eq!(r.key(), "user");
//! assert_eq!(r.value(), "42:active");
//! assert_eq!(r.to_string(), "user:42:active");
//! ```
use std::fmt;
use thiserror::Error;

/// Separator between key and value in a raw segment entry.
pub const DELIMITER: char = ':';

/// A raw entry had no `key:value` separator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("entry {raw:?} must be in the format key:value")]
pub struct MalformedRecord {
    pub raw: String,
}

/// An immutable `(key, value)` pair decoded from a segment entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Record {
    key: String,
    value: String,
}

impl Record {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Decodes a raw `key:value` entry, splitting on the first delimiter.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedRecord`] if `raw` contains no delimiter.
    pub fn decode(raw: &str) -> Result<Self, MalformedRecord> {
        match raw.split_once(DELIMITER) {
            Some((key, value)) => Ok(Self::new(key, value)),
            None => Err(MalformedRecord {
                raw: raw.to_string(),
            }),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replaces the value, keeping the key.
    pub fn set_value(&mut self, value: String) {
        self.value = value;
    }

    pub fn into_parts(self) -> (String, String) {
        (self.key, self.value)
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.key, DELIMITER, self.value)
    }
}

/// One line of merge output: the winning record for a key and the segment it
/// came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedRecord {
    pub segment_id: usize,
    pub record: Record,
}

impl MergedRecord {
    pub fn new(segment_id: usize, record: Record) -> Self {
        Self { segment_id, record }
    }

    pub fn key(&self) -> &str {
        self.record.key()
    }

    pub fn value(&self) -> &str {
        self.record.value()
    }
}

impl fmt::Display for MergedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "segment={} {}", self.segment_id, self.record)
    }
}
