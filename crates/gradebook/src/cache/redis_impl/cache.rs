//! Redis cache implementation.
//!
//! Uses set-based key tracking for namespace deletion without SCAN or KEYS.
//! Every data key `ns:...` is registered in the Redis Set `ns:_keys`;
//! invalidating the namespace deletes the tracked members and the set.
//!
//! # Non-Atomicity Safety
//!
//! `set`, `delete` and `delete_namespace` issue multiple Redis commands and
//! are not atomic as a group. Per-key atomicity still holds: a concurrent
//! `get` sees each key either fully present or fully gone. The tracking set
//! can transiently reference expired or deleted keys; `SREM` on a missing
//! member and `DEL` on a missing key are no-ops, so later invalidations
//! finish the cleanup.

use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;

use gradebook_core::cache::{namespace_tracking_key, Cache, CacheBackendStats, Result};

use super::error::map_redis_error;
use super::info::stats_from_info;

/// Splits `ns:rest` keys into their namespace part, if any.
fn key_namespace(key: &str) -> Option<&str> {
    key.split_once(':').map(|(ns, _)| ns)
}

/// Redis cache backend using connection manager for pooling.
pub struct RedisCache {
    conn: redis::aio::ConnectionManager,
}

impl RedisCache {
    /// Creates a new Redis cache connection.
    ///
    /// # Arguments
    ///
    /// * `url` - Redis connection URL (e.g., "redis://localhost:6379")
    ///
    /// # Errors
    ///
    /// Returns `CacheError::ConnectionFailed` if the connection cannot be
    /// established.
    pub async fn new(url: &str) -> Result<Self> {
        let client = redis::Client::open(url).map_err(map_redis_error)?;
        let conn = redis::aio::ConnectionManager::new(client)
            .await
            .map_err(map_redis_error)?;
        Ok(Self { conn })
    }
}

#[async_trait]
impl Cache for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut conn = self.conn.clone();
        let result: Option<Vec<u8>> = conn.get(key).await.map_err(map_redis_error)?;
        Ok(result)
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()> {
        let mut conn = self.conn.clone();

        match ttl {
            Some(duration) => {
                let seconds = duration.as_secs().max(1);
                conn.set_ex::<_, _, ()>(key, value, seconds)
                    .await
                    .map_err(map_redis_error)?;
            }
            None => {
                conn.set::<_, _, ()>(key, value)
                    .await
                    .map_err(map_redis_error)?;
            }
        }

        // Register the key in its namespace tracking set
        if let Some(namespace) = key_namespace(key) {
            let tracking_key = namespace_tracking_key(namespace);
            conn.sadd::<_, _, ()>(&tracking_key, key)
                .await
                .map_err(map_redis_error)?;
        }

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut conn = self.conn.clone();

        if let Some(namespace) = key_namespace(key) {
            let tracking_key = namespace_tracking_key(namespace);
            conn.srem::<_, _, ()>(&tracking_key, key)
                .await
                .map_err(map_redis_error)?;
        }

        conn.del::<_, ()>(key).await.map_err(map_redis_error)?;

        Ok(())
    }

    async fn delete_namespace(&self, namespace: &str) -> Result<u64> {
        let mut conn = self.conn.clone();
        let tracking_key = namespace_tracking_key(namespace);

        let tracked_keys: Vec<String> = conn
            .smembers(&tracking_key)
            .await
            .map_err(map_redis_error)?;

        let mut deleted = 0u64;
        if !tracked_keys.is_empty() {
            // DEL reports how many of the tracked keys still existed, which
            // excludes entries Redis already expired.
            deleted = conn
                .del(&tracked_keys)
                .await
                .map_err(map_redis_error)?;
        }

        conn.del::<_, ()>(&tracking_key)
            .await
            .map_err(map_redis_error)?;

        Ok(deleted)
    }

    async fn backend_stats(&self) -> Result<CacheBackendStats> {
        let mut conn = self.conn.clone();

        let stats_info: String = redis::cmd("INFO")
            .arg("stats")
            .query_async(&mut conn)
            .await
            .map_err(map_redis_error)?;
        let memory_info: String = redis::cmd("INFO")
            .arg("memory")
            .query_async(&mut conn)
            .await
            .map_err(map_redis_error)?;

        Ok(stats_from_info(&stats_info, &memory_info))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    /// Helper to get Redis URL from environment.
    fn redis_url() -> String {
        std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string())
    }

    /// Skip test if Redis not available.
    async fn get_test_cache() -> Option<RedisCache> {
        RedisCache::new(&redis_url()).await.ok()
    }

    /// Generate a unique test namespace to avoid conflicts.
    fn test_namespace(suffix: &str) -> String {
        format!("test-gradebook-{}-{}", rand::random::<u64>(), suffix)
    }

    #[test]
    fn test_key_namespace() {
        assert_eq!(key_namespace("students:all"), Some("students"));
        assert_eq!(key_namespace("students:filter:zoe"), Some("students"));
        assert_eq!(key_namespace("no-colon"), None);
    }

    #[tokio::test]
    async fn test_redis_set_and_get() {
        let Some(cache) = get_test_cache().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        let ns = test_namespace("set-get");
        let key = format!("{ns}:all");

        cache.set(&key, b"hello world", None).await.unwrap();

        let result = cache.get(&key).await.unwrap();
        assert_eq!(result, Some(b"hello world".to_vec()));

        cache.delete_namespace(&ns).await.unwrap();
    }

    #[tokio::test]
    async fn test_redis_get_nonexistent() {
        let Some(cache) = get_test_cache().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        let key = format!("{}:all", test_namespace("nonexistent"));
        let result = cache.get(&key).await.unwrap();
        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn test_redis_delete() {
        let Some(cache) = get_test_cache().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        let ns = test_namespace("delete");
        let key = format!("{ns}:all");

        cache.set(&key, b"to be deleted", None).await.unwrap();
        assert!(cache.get(&key).await.unwrap().is_some());

        cache.delete(&key).await.unwrap();
        assert!(cache.get(&key).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_redis_ttl() {
        let Some(cache) = get_test_cache().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        let ns = test_namespace("ttl");
        let key = format!("{ns}:all");

        cache
            .set(&key, b"expiring value", Some(Duration::from_secs(1)))
            .await
            .unwrap();

        assert!(cache.get(&key).await.unwrap().is_some());

        tokio::time::sleep(Duration::from_millis(1500)).await;

        assert!(cache.get(&key).await.unwrap().is_none());

        cache.delete_namespace(&ns).await.unwrap();
    }

    #[tokio::test]
    async fn test_redis_delete_namespace_counts_and_spares_others() {
        let Some(cache) = get_test_cache().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        let ns = test_namespace("invalidate");
        let other_ns = test_namespace("other");
        let key1 = format!("{ns}:all");
        let key2 = format!("{ns}:filter:zoe");
        let key3 = format!("{other_ns}:all");

        cache.set(&key1, b"value1", None).await.unwrap();
        cache.set(&key2, b"value2", None).await.unwrap();
        cache.set(&key3, b"value3", None).await.unwrap();

        let deleted = cache.delete_namespace(&ns).await.unwrap();

        assert_eq!(deleted, 2);
        assert!(cache.get(&key1).await.unwrap().is_none());
        assert!(cache.get(&key2).await.unwrap().is_none());
        assert!(cache.get(&key3).await.unwrap().is_some());

        cache.delete_namespace(&other_ns).await.unwrap();
    }

    #[tokio::test]
    async fn test_redis_delete_namespace_empty_is_zero() {
        let Some(cache) = get_test_cache().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        let deleted = cache
            .delete_namespace(&test_namespace("empty"))
            .await
            .unwrap();
        assert_eq!(deleted, 0);
    }

    #[tokio::test]
    async fn test_redis_delete_removes_from_tracking() {
        let Some(cache) = get_test_cache().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        let ns = test_namespace("tracking");
        let key1 = format!("{ns}:all");
        let key2 = format!("{ns}:filter:zoe");

        cache.set(&key1, b"value1", None).await.unwrap();
        cache.set(&key2, b"value2", None).await.unwrap();

        // Deleting one key removes it from the tracking set, so a later
        // namespace invalidation only counts the survivor.
        cache.delete(&key1).await.unwrap();

        let deleted = cache.delete_namespace(&ns).await.unwrap();
        assert_eq!(deleted, 1);
    }

    #[tokio::test]
    async fn test_redis_overwrite() {
        let Some(cache) = get_test_cache().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        let ns = test_namespace("overwrite");
        let key = format!("{ns}:all");

        cache.set(&key, b"initial", None).await.unwrap();
        assert_eq!(cache.get(&key).await.unwrap(), Some(b"initial".to_vec()));

        cache.set(&key, b"updated", None).await.unwrap();
        assert_eq!(cache.get(&key).await.unwrap(), Some(b"updated".to_vec()));

        cache.delete_namespace(&ns).await.unwrap();
    }

    #[tokio::test]
    async fn test_redis_binary_data() {
        let Some(cache) = get_test_cache().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        let ns = test_namespace("binary");
        let key = format!("{ns}:all");
        let value: Vec<u8> = (0..=255).collect();

        cache.set(&key, &value, None).await.unwrap();

        let result = cache.get(&key).await.unwrap();
        assert_eq!(result, Some(value));

        cache.delete_namespace(&ns).await.unwrap();
    }

    #[tokio::test]
    async fn test_redis_backend_stats() {
        let Some(cache) = get_test_cache().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        let stats = cache.backend_stats().await.unwrap();

        // A live server always reports at least this connection and memory.
        assert!(stats.total_connections >= 1);
        assert_ne!(stats.used_memory_human, "N/A");
    }
}
