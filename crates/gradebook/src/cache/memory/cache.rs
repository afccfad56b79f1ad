//! In-memory cache implementation with LRU eviction.
//!
//! Provides a thread-safe in-memory cache with TTL support using
//! tokio synchronization primitives and LRU eviction policy.
//!
//! Expiry is lazy: expired entries are reported absent on read and swept
//! out when their namespace is invalidated.

use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use lru::LruCache;
use tokio::sync::RwLock;

use gradebook_core::cache::{namespace_prefix, Cache, CacheBackendStats, Result};

/// A single cache entry with optional expiration.
#[derive(Debug, Clone)]
struct CacheEntry {
    value: Vec<u8>,
    expires_at: Option<Instant>,
}

impl CacheEntry {
    /// Creates a new cache entry with optional TTL.
    fn new(value: Vec<u8>, ttl: Option<Duration>) -> Self {
        let expires_at = ttl.map(|d| Instant::now() + d);
        Self { value, expires_at }
    }

    /// Returns true if this entry has expired.
    fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|exp| Instant::now() > exp)
    }
}

/// In-memory cache implementation with LRU eviction.
///
/// Thread-safe cache using `Arc<RwLock<LruCache>>` for concurrent access.
/// The LRU bound limits memory usage; it is a resource guard, not an
/// eviction policy surface.
///
/// Hit/miss/command counters approximate the Redis `INFO stats` counters so
/// the backend-stats endpoint works against this backend too.
#[derive(Debug, Clone)]
pub struct MemoryCache {
    store: Arc<RwLock<LruCache<String, CacheEntry>>>,
    commands: Arc<AtomicU64>,
    hits: Arc<AtomicU64>,
    misses: Arc<AtomicU64>,
}

impl MemoryCache {
    /// Creates a new in-memory cache with LRU eviction.
    ///
    /// # Panics
    ///
    /// Panics if `max_entries` is 0.
    pub fn new(max_entries: usize) -> Self {
        let capacity = NonZeroUsize::new(max_entries).expect("max_entries must be > 0");
        Self {
            store: Arc::new(RwLock::new(LruCache::new(capacity))),
            commands: Arc::new(AtomicU64::new(0)),
            hits: Arc::new(AtomicU64::new(0)),
            misses: Arc::new(AtomicU64::new(0)),
        }
    }
}

#[async_trait]
impl Cache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.commands.fetch_add(1, Ordering::Relaxed);
        let mut store = self.store.write().await;

        match store.get(key) {
            Some(entry) if entry.is_expired() => {
                // Expired but not yet swept - report absent.
                self.misses.fetch_add(1, Ordering::Relaxed);
                Ok(None)
            }
            Some(entry) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Ok(Some(entry.value.clone()))
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                Ok(None)
            }
        }
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()> {
        self.commands.fetch_add(1, Ordering::Relaxed);
        let mut store = self.store.write().await;
        let entry = CacheEntry::new(value.to_vec(), ttl);
        store.put(key.to_string(), entry);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.commands.fetch_add(1, Ordering::Relaxed);
        let mut store = self.store.write().await;
        store.pop(key);
        Ok(())
    }

    async fn delete_namespace(&self, namespace: &str) -> Result<u64> {
        self.commands.fetch_add(1, Ordering::Relaxed);
        let prefix = namespace_prefix(namespace);
        let mut store = self.store.write().await;

        let keys_to_delete: Vec<String> = store
            .iter()
            .filter(|(key, _)| key.starts_with(&prefix))
            .map(|(key, _)| key.clone())
            .collect();

        let mut deleted = 0u64;
        for key in keys_to_delete {
            if let Some(entry) = store.pop(&key) {
                // Expired leftovers are swept but not counted as live entries.
                if !entry.is_expired() {
                    deleted += 1;
                }
            }
        }

        Ok(deleted)
    }

    async fn backend_stats(&self) -> Result<CacheBackendStats> {
        Ok(CacheBackendStats {
            total_connections: 1,
            total_commands: self.commands.load(Ordering::Relaxed),
            keyspace_hits: self.hits.load(Ordering::Relaxed),
            keyspace_misses: self.misses.load(Ordering::Relaxed),
            used_memory_human: "N/A".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gradebook_core::cache::{students_key, STUDENTS_NAMESPACE};
    use gradebook_core::student::StudentQuery;
    use std::time::Duration;

    /// Default max entries for tests
    const TEST_MAX_ENTRIES: usize = 1000;

    #[tokio::test]
    async fn test_set_and_get() {
        let cache = MemoryCache::new(TEST_MAX_ENTRIES);
        let key = "test:key";
        let value = b"test value";

        cache.set(key, value, None).await.unwrap();
        let result = cache.get(key).await.unwrap();

        assert_eq!(result, Some(value.to_vec()));
    }

    #[tokio::test]
    async fn test_get_nonexistent() {
        let cache = MemoryCache::new(TEST_MAX_ENTRIES);
        let result = cache.get("nonexistent:key").await.unwrap();

        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn test_delete() {
        let cache = MemoryCache::new(TEST_MAX_ENTRIES);
        let key = "test:delete";

        cache.set(key, b"to be deleted", None).await.unwrap();
        assert!(cache.get(key).await.unwrap().is_some());

        cache.delete(key).await.unwrap();
        assert!(cache.get(key).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_ttl_expiration() {
        let cache = MemoryCache::new(TEST_MAX_ENTRIES);
        let key = "test:ttl";

        // Set with a very short TTL
        cache
            .set(key, b"short-lived", Some(Duration::from_millis(50)))
            .await
            .unwrap();

        // Should exist immediately
        assert!(cache.get(key).await.unwrap().is_some());

        // Wait for expiration
        tokio::time::sleep(Duration::from_millis(100)).await;

        // Should be expired now
        assert!(cache.get(key).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_set_resets_ttl() {
        let cache = MemoryCache::new(TEST_MAX_ENTRIES);
        let key = "test:ttl-reset";

        cache
            .set(key, b"v1", Some(Duration::from_millis(50)))
            .await
            .unwrap();
        cache
            .set(key, b"v2", Some(Duration::from_secs(60)))
            .await
            .unwrap();

        tokio::time::sleep(Duration::from_millis(100)).await;

        // The overwrite replaced the entry and its expiry wholesale.
        assert_eq!(cache.get(key).await.unwrap(), Some(b"v2".to_vec()));
    }

    #[tokio::test]
    async fn test_delete_namespace_counts_entries() {
        let cache = MemoryCache::new(TEST_MAX_ENTRIES);

        let all = students_key(&StudentQuery::All);
        let filtered = students_key(&StudentQuery::from_filter(Some("zoe")));

        cache.set(&all, b"[]", None).await.unwrap();
        cache.set(&filtered, b"[]", None).await.unwrap();
        cache.set("other:key", b"kept", None).await.unwrap();

        let deleted = cache.delete_namespace(STUDENTS_NAMESPACE).await.unwrap();

        assert_eq!(deleted, 2);
        assert!(cache.get(&all).await.unwrap().is_none());
        assert!(cache.get(&filtered).await.unwrap().is_none());
        assert!(cache.get("other:key").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_delete_namespace_empty_is_zero() {
        let cache = MemoryCache::new(TEST_MAX_ENTRIES);

        let deleted = cache.delete_namespace(STUDENTS_NAMESPACE).await.unwrap();

        assert_eq!(deleted, 0);
    }

    #[tokio::test]
    async fn test_delete_namespace_skips_expired_in_count() {
        let cache = MemoryCache::new(TEST_MAX_ENTRIES);

        cache
            .set("students:all", b"[]", Some(Duration::from_millis(10)))
            .await
            .unwrap();
        cache.set("students:filter:a", b"[]", None).await.unwrap();

        tokio::time::sleep(Duration::from_millis(50)).await;

        let deleted = cache.delete_namespace(STUDENTS_NAMESPACE).await.unwrap();

        assert_eq!(deleted, 1);
    }

    #[tokio::test]
    async fn test_overwrite_value() {
        let cache = MemoryCache::new(TEST_MAX_ENTRIES);
        let key = "test:overwrite";

        cache.set(key, b"first", None).await.unwrap();
        cache.set(key, b"second", None).await.unwrap();

        let result = cache.get(key).await.unwrap();
        assert_eq!(result, Some(b"second".to_vec()));
    }

    #[tokio::test]
    async fn test_no_ttl_never_expires() {
        let cache = MemoryCache::new(TEST_MAX_ENTRIES);
        let key = "test:no-ttl";

        cache.set(key, b"persistent", None).await.unwrap();

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(cache.get(key).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_backend_stats_track_hits_and_misses() {
        let cache = MemoryCache::new(TEST_MAX_ENTRIES);

        cache.set("a", b"1", None).await.unwrap();
        cache.get("a").await.unwrap(); // hit
        cache.get("b").await.unwrap(); // miss
        cache.get("b").await.unwrap(); // miss

        let stats = cache.backend_stats().await.unwrap();
        assert_eq!(stats.keyspace_hits, 1);
        assert_eq!(stats.keyspace_misses, 2);
        assert_eq!(stats.total_commands, 4);
        assert_eq!(stats.used_memory_human, "N/A");
    }

    #[tokio::test]
    async fn test_lru_eviction() {
        // Create a cache with only 3 entries max
        let cache = MemoryCache::new(3);

        cache.set("key1", b"value1", None).await.unwrap();
        cache.set("key2", b"value2", None).await.unwrap();
        cache.set("key3", b"value3", None).await.unwrap();

        // Access key1 to make it recently used
        cache.get("key1").await.unwrap();

        // Insert a 4th entry - should evict key2 (least recently used)
        cache.set("key4", b"value4", None).await.unwrap();

        assert!(cache.get("key1").await.unwrap().is_some());
        assert!(cache.get("key2").await.unwrap().is_none());
        assert!(cache.get("key3").await.unwrap().is_some());
        assert!(cache.get("key4").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_binary_data() {
        let cache = MemoryCache::new(TEST_MAX_ENTRIES);
        let value: Vec<u8> = (0..=255).collect();

        cache.set("test:binary", &value, None).await.unwrap();

        let result = cache.get("test:binary").await.unwrap();
        assert_eq!(result, Some(value));
    }

    #[tokio::test]
    #[should_panic(expected = "max_entries must be > 0")]
    async fn test_zero_max_entries_panics() {
        let _ = MemoryCache::new(0);
    }
}
