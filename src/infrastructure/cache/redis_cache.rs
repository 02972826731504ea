//! Redis-backed cache implementation, used as the shared mirror tier.

use super::service::{CacheBackend, CacheError, CacheResult};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Redis mirror of the in-process cache.
///
/// Uses connection pooling via `ConnectionManager` for efficient connection
/// reuse. All operations are fail-open: errors are logged but don't
/// propagate to callers, so an unreachable mirror never affects reads or
/// primary-tier invalidation.
pub struct RedisCache {
    client: ConnectionManager,
}

impl RedisCache {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Connection`] if the URL is invalid, the
    /// connection cannot be established, or the PING health check fails.
    pub async fn connect(redis_url: &str) -> CacheResult<Self> {
        info!("Connecting to Redis at {}", redis_url);

        let client = Client::open(redis_url).map_err(|e| {
            CacheError::Connection(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client)
            .await
            .map_err(|e| CacheError::Connection(format!("Failed to connect to Redis: {}", e)))?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| CacheError::Connection(format!("Redis PING failed: {}", e)))?;

        info!("✓ Connected to Redis");

        Ok(Self { client: manager })
    }
}

#[async_trait]
impl CacheBackend for RedisCache {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        let mut conn = self.client.clone();

        match conn.get::<_, Option<String>>(key).await {
            Ok(Some(value)) => {
                debug!("Mirror HIT: {}", key);
                Ok(Some(value))
            }
            Ok(None) => {
                debug!("Mirror MISS: {}", key);
                Ok(None)
            }
            Err(e) => {
                error!("Redis GET error for {}: {}", key, e);
                Ok(None)
            }
        }
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()> {
        let mut conn = self.client.clone();
        let ttl_seconds = ttl.as_secs().max(1);

        match conn.set_ex::<_, _, ()>(key, value, ttl_seconds).await {
            Ok(_) => {
                debug!("Mirror SET: {} (TTL: {}s)", key, ttl_seconds);
                Ok(())
            }
            Err(e) => {
                warn!("Redis SET error for {}: {}", key, e);
                Ok(())
            }
        }
    }

    async fn keys(&self, prefix: &str) -> CacheResult<Vec<String>> {
        let mut conn = self.client.clone();
        let pattern = format!("{prefix}*");

        match conn.keys::<_, Vec<String>>(&pattern).await {
            Ok(keys) => Ok(keys),
            Err(e) => {
                warn!("Redis KEYS error for {}: {}", pattern, e);
                Ok(Vec::new())
            }
        }
    }

    async fn delete(&self, keys: &[String]) -> CacheResult<u64> {
        if keys.is_empty() {
            return Ok(0);
        }
        let mut conn = self.client.clone();

        match conn.del::<_, u64>(keys).await {
            Ok(deleted) => {
                if deleted > 0 {
                    debug!("Mirror DEL: {} keys", deleted);
                }
                Ok(deleted)
            }
            Err(e) => {
                warn!("Redis DEL error: {}", e);
                Ok(0)
            }
        }
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }
}
