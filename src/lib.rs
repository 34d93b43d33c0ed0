//! Memcache Lite - A lightweight in-memory key-value cache server
//!
//! Provides memcached-like storage semantics with a byte-bounded LRU
//! eviction policy.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;

pub use api::AppState;
pub use config::Config;
