//! Cache backend trait and error types.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during cache operations.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    Connection(String),
    #[error("Cache operation error: {0}")]
    Operation(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// A single cache tier storing serialized (JSON) values under string keys.
///
/// Implementations must be thread-safe and handle errors gracefully without
/// disrupting the application: a failing backend degrades reads to store
/// lookups, it never fails them.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::InMemoryCache`] - in-process primary tier
/// - [`crate::infrastructure::cache::RedisCache`] - shared Redis mirror
/// - [`crate::infrastructure::cache::NullCache`] - no-op for disabled caching
#[async_trait]
pub trait CacheBackend: Send + Sync {
    /// Retrieves a value.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(value))` on hit
    /// - `Ok(None)` on miss (production implementations also map backend
    ///   errors to a miss and log them — fail-open)
    async fn get(&self, key: &str) -> CacheResult<Option<String>>;

    /// Stores a value under `key` for `ttl`.
    ///
    /// # Errors
    ///
    /// Should not propagate errors in production implementations; a failed
    /// write is logged and the entry is simply absent on the next read.
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()>;

    /// Lists all live keys starting with `prefix`.
    async fn keys(&self, prefix: &str) -> CacheResult<Vec<String>>;

    /// Deletes the given keys, returning how many existed.
    async fn delete(&self, keys: &[String]) -> CacheResult<u64>;

    /// Checks if the backend is healthy. Used by the health endpoint.
    async fn health_check(&self) -> bool;
}
