use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use super::Result;

/// Trait for the read-through cache backing student listings.
///
/// Implementations must never panic on backend unavailability: `get` reports
/// it as [`super::CacheError::ConnectionFailed`], which callers degrade to a
/// miss and serve from the record store instead.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Gets a value from the cache by key.
    ///
    /// Returns `Ok(None)` when the key is unset or past its expiry.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Sets a value in the cache with an optional TTL, replacing any
    /// existing entry wholesale and resetting its expiry.
    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()>;

    /// Deletes a value from the cache by key.
    async fn delete(&self, key: &str) -> Result<()>;

    /// Deletes every entry whose key starts with `{namespace}:` and returns
    /// the number of entries removed.
    ///
    /// Per-key atomicity is sufficient: a concurrent `get` sees each key
    /// either fully present or fully gone, but may observe a partially
    /// drained namespace.
    async fn delete_namespace(&self, namespace: &str) -> Result<u64>;

    /// Returns operational statistics of the backend (connection and command
    /// counters, hit/miss counters, memory usage). Best-effort: callers
    /// substitute defaults on error.
    async fn backend_stats(&self) -> Result<CacheBackendStats>;
}

/// Operational statistics reported by the cache backend.
///
/// For Redis these are passed through verbatim from `INFO`; the in-memory
/// backend synthesizes the counters it can and reports `"N/A"` memory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheBackendStats {
    pub total_connections: u64,
    pub total_commands: u64,
    pub keyspace_hits: u64,
    pub keyspace_misses: u64,
    pub used_memory_human: String,
}

impl Default for CacheBackendStats {
    fn default() -> Self {
        Self {
            total_connections: 0,
            total_commands: 0,
            keyspace_hits: 0,
            keyspace_misses: 0,
            used_memory_human: "N/A".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_stats_report_no_memory_reading() {
        let stats = CacheBackendStats::default();
        assert_eq!(stats.total_connections, 0);
        assert_eq!(stats.keyspace_hits, 0);
        assert_eq!(stats.used_memory_human, "N/A");
    }

    #[test]
    fn test_stats_serialize_to_flat_json() {
        let stats = CacheBackendStats {
            total_connections: 4,
            total_commands: 128,
            keyspace_hits: 90,
            keyspace_misses: 10,
            used_memory_human: "1.02M".to_string(),
        };
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["total_commands"], 128);
        assert_eq!(json["used_memory_human"], "1.02M");
    }
}
