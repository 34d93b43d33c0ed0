//! Cache Module
//!
//! Provides a byte-bounded in-memory key-value store with LRU eviction.

mod capacity;
mod entry;
mod list;
mod stats;
mod store;


// Re-export public types
pub use capacity::CapacityGovernor;
pub use entry::Entry;
pub use list::RecencyList;
pub use stats::CacheStats;
pub use store::CacheStore;

// == Public Constants ==
/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;

/// Maximum allowed value size in bytes
pub const MAX_VALUE_SIZE: usize = 1024 * 1024; // 1 MB
