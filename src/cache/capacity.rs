//! Capacity Governor Module
//!
//! Byte accounting for the capacity invariant: the sum of all stored
//! entry footprints never exceeds the configured maximum.
//!
//! The governor only tracks bytes; the eviction loop that frees space
//! lives in the store, because eviction must touch the recency list and
//! the key index together.

// == Capacity Governor ==
/// Tracks aggregate stored bytes against a fixed maximum capacity.
#[derive(Debug)]
pub struct CapacityGovernor {
    /// Bytes currently charged against the capacity
    used: usize,
    /// Maximum aggregate footprint, fixed at construction
    max_capacity: usize,
}

impl CapacityGovernor {
    // == Constructor ==
    /// Creates a governor for the given maximum capacity in bytes.
    pub fn new(max_capacity: usize) -> Self {
        Self {
            used: 0,
            max_capacity,
        }
    }

    // == Fits ==
    /// Returns true if `additional` bytes fit right now, without eviction.
    pub fn fits(&self, additional: usize) -> bool {
        self.used + additional <= self.max_capacity
    }

    // == Would Ever Fit ==
    /// Returns true if `additional` bytes could fit with the store empty.
    ///
    /// Insert paths check this before any eviction begins, so a request
    /// that can never succeed does not evict the rest of the cache.
    pub fn would_ever_fit(&self, additional: usize) -> bool {
        additional <= self.max_capacity
    }

    // == Charge ==
    /// Charges `bytes` against the capacity.
    ///
    /// Callers must have established via `fits` that the charge keeps
    /// `used` within `max_capacity`.
    pub fn charge(&mut self, bytes: usize) {
        debug_assert!(
            self.fits(bytes),
            "charge of {} bytes would exceed capacity ({} used of {})",
            bytes,
            self.used,
            self.max_capacity
        );
        self.used += bytes;
    }

    // == Release ==
    /// Releases exactly `bytes` previously charged.
    ///
    /// Used on delete, on eviction, and on in-place overwrites before the
    /// new value's footprint is accounted.
    pub fn release(&mut self, bytes: usize) {
        debug_assert!(
            bytes <= self.used,
            "release of {} bytes exceeds {} bytes used",
            bytes,
            self.used
        );
        self.used = self.used.saturating_sub(bytes);
    }

    // == Used ==
    /// Returns the bytes currently charged.
    pub fn used(&self) -> usize {
        self.used
    }

    // == Max Capacity ==
    /// Returns the fixed maximum capacity in bytes.
    pub fn max_capacity(&self) -> usize {
        self.max_capacity
    }
}
