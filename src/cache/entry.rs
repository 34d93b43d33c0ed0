//! Cache Entry Module
//!
//! Defines the key-value pair stored by the cache and its byte footprint.

// == Cache Entry ==
/// A single key-value pair owned by the recency list.
///
/// The key is immutable for the lifetime of the entry; the value may be
/// overwritten in place by update operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// The cache key
    pub key: String,
    /// The stored value
    pub value: String,
}

impl Entry {
    // == Constructor ==
    /// Creates a new entry from a key and value.
    pub fn new(key: String, value: String) -> Self {
        Self { key, value }
    }

    // == Footprint ==
    /// Returns the byte cost of this entry: key length plus value length.
    ///
    /// This is the quantity charged against the cache capacity, and the
    /// exact quantity released again on delete or eviction.
    pub fn footprint(&self) -> usize {
        self.key.len() + self.value.len()
    }
}

/// Computes the footprint of a key-value pair before an entry exists.
///
/// Used by insert paths to decide whether a candidate entry can ever fit
/// without constructing it first.
pub fn footprint_of(key: &str, value: &str) -> usize {
    key.len() + value.len()
}
