//! Two-tier read-through cache with prefix invalidation.

use super::service::CacheBackend;
use crate::error::AppError;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Read-through facade over the primary in-process tier and an optional
/// shared mirror.
///
/// The mirror is an explicit constructor argument: components that need a
/// second tier receive a statically-typed handle instead of discovering one
/// at runtime. Cache entries are derived data, so every failure path is
/// fail-open:
///
/// - a primary read error degrades to a miss and the value is recomputed
///   from the store;
/// - a failed population write is logged and swallowed;
/// - an unreachable mirror never blocks reads or primary invalidation.
pub struct LayeredCache {
    primary: Arc<dyn CacheBackend>,
    mirror: Option<Arc<dyn CacheBackend>>,
    default_ttl: Duration,
}

impl LayeredCache {
    pub fn new(
        primary: Arc<dyn CacheBackend>,
        mirror: Option<Arc<dyn CacheBackend>>,
        default_ttl: Duration,
    ) -> Self {
        Self {
            primary,
            mirror,
            default_ttl,
        }
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    pub fn has_mirror(&self) -> bool {
        self.mirror.is_some()
    }

    /// Returns the cached value for `key`, or computes, stores and returns it.
    ///
    /// The computed value is serialized once and written to both tiers; the
    /// mirror write is best-effort. Errors from `compute` (store failures,
    /// not-found outcomes) propagate to the caller and are never cached.
    pub async fn get_or_compute<T, F, Fut>(
        &self,
        key: &str,
        ttl: Duration,
        compute: F,
    ) -> Result<T, AppError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, AppError>>,
    {
        match self.primary.get(key).await {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(value) => {
                    debug!(key, "cache hit");
                    return Ok(value);
                }
                Err(e) => {
                    warn!(key, error = %e, "corrupt cache entry, recomputing");
                }
            },
            Ok(None) => debug!(key, "cache miss"),
            Err(e) => warn!(key, error = %e, "primary cache read failed, falling through"),
        }

        let value = compute().await?;

        match serde_json::to_string(&value) {
            Ok(raw) => {
                if let Err(e) = self.primary.set(key, &raw, ttl).await {
                    warn!(key, error = %e, "failed to populate primary cache");
                }
                if let Some(mirror) = &self.mirror {
                    if let Err(e) = mirror.set(key, &raw, ttl).await {
                        warn!(key, error = %e, "failed to sync cache mirror");
                    }
                }
            }
            Err(e) => warn!(key, error = %e, "failed to serialize value for caching"),
        }

        Ok(value)
    }

    /// Deletes every key starting with `prefix` in the primary tier and in
    /// the mirror. Mirror failures are logged and do not affect the primary.
    pub async fn invalidate_prefix(&self, prefix: &str) {
        match self.primary.keys(prefix).await {
            Ok(keys) if !keys.is_empty() => match self.primary.delete(&keys).await {
                Ok(count) => info!(prefix, count, "invalidated primary cache keys"),
                Err(e) => warn!(prefix, error = %e, "failed to delete primary cache keys"),
            },
            Ok(_) => {}
            Err(e) => warn!(prefix, error = %e, "failed to list primary cache keys"),
        }

        if let Some(mirror) = &self.mirror {
            match mirror.keys(prefix).await {
                Ok(keys) if !keys.is_empty() => match mirror.delete(&keys).await {
                    Ok(count) => info!(prefix, count, "invalidated mirror cache keys"),
                    Err(e) => warn!(prefix, error = %e, "failed to delete mirror cache keys"),
                },
                Ok(_) => {}
                Err(e) => warn!(prefix, error = %e, "failed to list mirror cache keys"),
            }
        }
    }

    /// Health of both tiers: `(primary, mirror)`. The mirror slot is `None`
    /// when no mirror is configured.
    pub async fn health_check(&self) -> (bool, Option<bool>) {
        let primary = self.primary.health_check().await;
        let mirror = match &self.mirror {
            Some(m) => Some(m.health_check().await),
            None => None,
        };
        (primary, mirror)
    }
}
