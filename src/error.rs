//! Error types for the cache server
//!
//! Provides unified error handling using thiserror.
//!
//! The cache core itself never returns errors; expected conditions are
//! boolean or optional results. This enum exists at the HTTP boundary,
//! where the command-execution layer maps those results to wire
//! responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache server.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Key not found in cache
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Key already present on an add operation
    #[error("Key already exists: {0}")]
    KeyExists(String),

    /// A single entry's footprint exceeds the maximum capacity
    #[error("Entry too large for cache capacity: {0}")]
    CapacityExceeded(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            CacheError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            CacheError::KeyExists(msg) => (StatusCode::CONFLICT, msg.clone()),
            CacheError::CapacityExceeded(msg) => (StatusCode::PAYLOAD_TOO_LARGE, msg.clone()),
            CacheError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            CacheError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache server.
pub type Result<T> = std::result::Result<T, CacheError>;
