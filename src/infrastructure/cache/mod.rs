//! Two-tier caching layer for localized read results.
//!
//! Provides a [`CacheBackend`] trait with three implementations and a
//! [`LayeredCache`] facade combining a primary in-process tier with an
//! optional shared mirror:
//! - [`InMemoryCache`] - process-local primary tier with per-entry TTL
//! - [`RedisCache`] - shared Redis mirror
//! - [`NullCache`] - no-op implementation for testing/disabled caching

mod layered;
mod memory_cache;
mod null_cache;
mod redis_cache;
mod service;

pub use layered::LayeredCache;
pub use memory_cache::InMemoryCache;
pub use null_cache::NullCache;
pub use redis_cache::RedisCache;
pub use service::{CacheBackend, CacheError, CacheResult};
