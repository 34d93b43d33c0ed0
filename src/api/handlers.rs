//! API Handlers
//!
//! The command-execution layer: each handler invokes exactly one cache
//! operation and maps its boolean or optional result to a wire response.

use std::sync::Arc;
use tokio::sync::RwLock;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::cache::CacheStore;
use crate::error::{CacheError, Result};
use crate::models::{
    DeleteResponse, GetResponse, HealthResponse, StatsResponse, StoreRequest, StoreResponse,
};

/// Application state shared across all handlers.
///
/// The cache store sits behind a single exclusive lock; every cache
/// operation acquires it in write mode for its full duration (get also
/// mutates — it promotes the entry), so operations from concurrent
/// connections never interleave.
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe cache store
    pub cache: Arc<RwLock<CacheStore>>,
}

impl AppState {
    /// Creates a new AppState with the given cache store.
    pub fn new(cache: CacheStore) -> Self {
        Self {
            cache: Arc::new(RwLock::new(cache)),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Initializes the cache store with parameters from the Config.
    pub fn from_config(config: &crate::config::Config) -> Self {
        let cache = CacheStore::new(config.max_capacity);
        Self::new(cache)
    }
}

/// Handler for PUT /put
///
/// Stores a key-value pair, overwriting any existing value. Fails only
/// if the entry's footprint alone exceeds the cache capacity.
pub async fn put_handler(
    State(state): State<AppState>,
    Json(req): Json<StoreRequest>,
) -> Result<Json<StoreResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let mut cache = state.cache.write().await;
    if cache.put(&req.key, req.value) {
        Ok(Json(StoreResponse::stored(req.key)))
    } else {
        Err(CacheError::CapacityExceeded(req.key))
    }
}

/// Handler for PUT /add
///
/// Stores a key-value pair only if the key is not already present.
pub async fn add_handler(
    State(state): State<AppState>,
    Json(req): Json<StoreRequest>,
) -> Result<Json<StoreResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let mut cache = state.cache.write().await;
    if cache.put_if_absent(&req.key, req.value) {
        return Ok(Json(StoreResponse::stored(req.key)));
    }
    // Distinguish the two failure causes for the wire response.
    if cache.contains_key(&req.key) {
        Err(CacheError::KeyExists(req.key))
    } else {
        Err(CacheError::CapacityExceeded(req.key))
    }
}

/// Handler for PUT /set
///
/// Updates the value of an existing key; fails if the key is absent.
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<StoreRequest>,
) -> Result<Json<StoreResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let mut cache = state.cache.write().await;
    if cache.set(&req.key, req.value) {
        return Ok(Json(StoreResponse::stored(req.key)));
    }
    if cache.contains_key(&req.key) {
        Err(CacheError::CapacityExceeded(req.key))
    } else {
        Err(CacheError::NotFound(req.key))
    }
}

/// Handler for GET /get/:key
///
/// Retrieves a value from the cache by key, marking it most recently
/// used.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    // Write lock: a lookup promotes the entry and updates stats.
    let mut cache = state.cache.write().await;
    match cache.get(&key) {
        Some(value) => Ok(Json(GetResponse::found(key, value))),
        None => Err(CacheError::NotFound(key)),
    }
}

/// Handler for DELETE /del/:key
///
/// Deletes a key from the cache.
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<DeleteResponse>> {
    let mut cache = state.cache.write().await;
    if cache.delete(&key) {
        Ok(Json(DeleteResponse::deleted(key)))
    } else {
        Err(CacheError::NotFound(key))
    }
}

/// Handler for GET /stats
///
/// Returns current cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let cache = state.cache.read().await;
    let stats = cache.stats();

    Json(StatsResponse::new(
        stats.hits,
        stats.misses,
        stats.evictions,
        stats.total_entries,
        stats.used_bytes,
        cache.max_capacity(),
    ))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
