//! No-op cache implementation for testing or disabled caching.

use super::service::{CacheBackend, CacheResult};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// A cache backend that does nothing.
///
/// All operations succeed immediately without storing or retrieving data.
///
/// # Use Cases
///
/// - Testing scenarios where caching should be bypassed
/// - Running with caching explicitly disabled
pub struct NullCache;

impl NullCache {
    pub fn new() -> Self {
        debug!("Using NullCache (caching disabled)");
        Self
    }
}

impl Default for NullCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheBackend for NullCache {
    async fn get(&self, _key: &str) -> CacheResult<Option<String>> {
        Ok(None)
    }

    async fn set(&self, _key: &str, _value: &str, _ttl: Duration) -> CacheResult<()> {
        Ok(())
    }

    async fn keys(&self, _prefix: &str) -> CacheResult<Vec<String>> {
        Ok(Vec::new())
    }

    async fn delete(&self, _keys: &[String]) -> CacheResult<u64> {
        Ok(0)
    }

    async fn health_check(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_everything_is_a_miss() {
        let cache = NullCache::new();
        cache
            .set("job:1:en", "value", Duration::from_secs(60))
            .await
            .unwrap();
        assert_eq!(cache.get("job:1:en").await.unwrap(), None);
        assert!(cache.keys("job").await.unwrap().is_empty());
        assert_eq!(cache.delete(&["job:1:en".to_string()]).await.unwrap(), 0);
        assert!(cache.health_check().await);
    }
}
