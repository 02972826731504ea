//! In-process cache backend, the primary tier.

use super::service::{CacheBackend, CacheResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

struct Entry {
    value: String,
    stored_at: Instant,
    ttl: Duration,
}

impl Entry {
    fn is_expired(&self) -> bool {
        self.stored_at.elapsed() >= self.ttl
    }
}

/// Process-local cache with per-entry TTL.
///
/// Entries are dropped lazily: an expired entry is removed when read and the
/// whole map is swept on every write. All state lives behind a
/// `tokio::sync::RwLock`, so concurrent readers do not contend.
#[derive(Default)]
pub struct InMemoryCache {
    entries: RwLock<HashMap<String, Entry>>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live (unexpired) entries. Test and introspection helper.
    pub async fn len(&self) -> usize {
        self.entries
            .read()
            .await
            .values()
            .filter(|e| !e.is_expired())
            .count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl CacheBackend for InMemoryCache {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some(entry) if !entry.is_expired() => return Ok(Some(entry.value.clone())),
                Some(_) => {}
                None => return Ok(None),
            }
        }

        // Expired: take the write lock and drop the entry if still stale.
        let mut entries = self.entries.write().await;
        if entries.get(key).is_some_and(Entry::is_expired) {
            entries.remove(key);
        }
        Ok(None)
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()> {
        let mut entries = self.entries.write().await;
        entries.retain(|_, e| !e.is_expired());
        entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                stored_at: Instant::now(),
                ttl,
            },
        );
        Ok(())
    }

    async fn keys(&self, prefix: &str) -> CacheResult<Vec<String>> {
        let entries = self.entries.read().await;
        Ok(entries
            .iter()
            .filter(|(k, e)| k.starts_with(prefix) && !e.is_expired())
            .map(|(k, _)| k.clone())
            .collect())
    }

    async fn delete(&self, keys: &[String]) -> CacheResult<u64> {
        let mut entries = self.entries.write().await;
        let mut deleted = 0;
        for key in keys {
            if entries.remove(key).is_some() {
                deleted += 1;
            }
        }
        Ok(deleted)
    }

    async fn health_check(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(60);

    #[tokio::test]
    async fn test_set_then_get() {
        let cache = InMemoryCache::new();
        cache.set("job:1:en", "{\"id\":1}", TTL).await.unwrap();
        assert_eq!(
            cache.get("job:1:en").await.unwrap(),
            Some("{\"id\":1}".to_string())
        );
    }

    #[tokio::test]
    async fn test_get_missing_key() {
        let cache = InMemoryCache::new();
        assert_eq!(cache.get("job:404:en").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_entries_expire() {
        let cache = InMemoryCache::new();
        cache
            .set("job:1:en", "v", Duration::from_millis(10))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert_eq!(cache.get("job:1:en").await.unwrap(), None);
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_overwrite_refreshes_value() {
        let cache = InMemoryCache::new();
        cache.set("k", "old", TTL).await.unwrap();
        cache.set("k", "new", TTL).await.unwrap();
        assert_eq!(cache.get("k").await.unwrap(), Some("new".to_string()));
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_keys_filters_by_prefix() {
        let cache = InMemoryCache::new();
        cache.set("job:1:en", "a", TTL).await.unwrap();
        cache.set("job:search:x", "b", TTL).await.unwrap();
        cache.set("category:1:en", "c", TTL).await.unwrap();

        let mut keys = cache.keys("job").await.unwrap();
        keys.sort();
        assert_eq!(keys, vec!["job:1:en", "job:search:x"]);
    }

    #[tokio::test]
    async fn test_keys_skips_expired_entries() {
        let cache = InMemoryCache::new();
        cache
            .set("job:1:en", "a", Duration::from_millis(10))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert!(cache.keys("job").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_reports_count() {
        let cache = InMemoryCache::new();
        cache.set("a", "1", TTL).await.unwrap();
        cache.set("b", "2", TTL).await.unwrap();
        let deleted = cache
            .delete(&["a".to_string(), "b".to_string(), "ghost".to_string()])
            .await
            .unwrap();
        assert_eq!(deleted, 2);
        assert!(cache.is_empty().await);
    }
}
