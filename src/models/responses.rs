//! Response DTOs for the cache server API
//!
//! Defines the structure of outgoing HTTP response bodies. Each success
//! body carries a wire status token ("stored", "found", "deleted") in the
//! memcached tradition; error conditions use `ErrorResponse` via the
//! error type's response mapping.

use serde::Serialize;

/// Response body for the store operations (PUT /put, /add, /set)
#[derive(Debug, Clone, Serialize)]
pub struct StoreResponse {
    /// Wire status token ("stored")
    pub status: String,
    /// The key that was stored
    pub key: String,
}

impl StoreResponse {
    /// Creates a "stored" response for the given key
    pub fn stored(key: impl Into<String>) -> Self {
        Self {
            status: "stored".to_string(),
            key: key.into(),
        }
    }
}

/// Response body for the GET operation (GET /get/:key)
#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    /// Wire status token ("found")
    pub status: String,
    /// The requested key
    pub key: String,
    /// The stored value
    pub value: String,
}

impl GetResponse {
    /// Creates a "found" response carrying the value
    pub fn found(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            status: "found".to_string(),
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Response body for the DELETE operation (DELETE /del/:key)
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    /// Wire status token ("deleted")
    pub status: String,
    /// The key that was deleted
    pub key: String,
}

impl DeleteResponse {
    /// Creates a "deleted" response for the given key
    pub fn deleted(key: impl Into<String>) -> Self {
        Self {
            status: "deleted".to_string(),
            key: key.into(),
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Number of evictions
    pub evictions: u64,
    /// Current number of entries in cache
    pub total_entries: usize,
    /// Aggregate footprint of stored entries in bytes
    pub used_bytes: usize,
    /// Fixed maximum capacity in bytes
    pub max_capacity: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl StatsResponse {
    /// Creates a new StatsResponse from cache statistics
    pub fn new(
        hits: u64,
        misses: u64,
        evictions: u64,
        total_entries: usize,
        used_bytes: usize,
        max_capacity: usize,
    ) -> Self {
        let total_requests = hits + misses;
        let hit_rate = if total_requests > 0 {
            hits as f64 / total_requests as f64
        } else {
            0.0
        };
        Self {
            hits,
            misses,
            evictions,
            total_entries,
            used_bytes,
            max_capacity,
            hit_rate,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
