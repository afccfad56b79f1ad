//! Redis-backed metrics recorder.
//!
//! Each source's latency history is a Redis list at `metrics:<source>`,
//! pushed at the head and trimmed to the retained capacity, so the history
//! is shared by every service instance pointed at the same Redis.

use async_trait::async_trait;
use redis::AsyncCommands;

use gradebook_core::metrics::{
    summarize, MetricSource, MetricsError, MetricsRecorder, MetricsSnapshot, Result,
    HISTORY_CAPACITY,
};

/// Returns the Redis list key holding a source's latency history.
fn history_key(source: MetricSource) -> String {
    format!("metrics:{source}")
}

/// Redis metrics recorder using connection manager for pooling.
pub struct RedisMetrics {
    conn: redis::aio::ConnectionManager,
}

impl RedisMetrics {
    /// Creates a new Redis metrics recorder.
    ///
    /// # Errors
    ///
    /// Returns `MetricsError::RecordFailed` if the connection cannot be
    /// established.
    pub async fn new(url: &str) -> Result<Self> {
        let client =
            redis::Client::open(url).map_err(|e| MetricsError::RecordFailed(e.to_string()))?;
        let conn = redis::aio::ConnectionManager::new(client)
            .await
            .map_err(|e| MetricsError::RecordFailed(e.to_string()))?;
        Ok(Self { conn })
    }

    async fn history(&self, source: MetricSource) -> Result<Vec<f64>> {
        let mut conn = self.conn.clone();
        let raw: Vec<String> = conn
            .lrange(history_key(source), 0, -1)
            .await
            .map_err(|e| MetricsError::SnapshotFailed(e.to_string()))?;

        // Foreign values in the list are skipped rather than failing the
        // whole snapshot.
        Ok(raw.iter().filter_map(|v| v.parse().ok()).collect())
    }
}

#[async_trait]
impl MetricsRecorder for RedisMetrics {
    async fn record(&self, source: MetricSource, latency_ms: f64) -> Result<()> {
        let mut conn = self.conn.clone();
        let key = history_key(source);

        conn.lpush::<_, _, ()>(&key, latency_ms)
            .await
            .map_err(|e| MetricsError::RecordFailed(e.to_string()))?;
        conn.ltrim::<_, ()>(&key, 0, HISTORY_CAPACITY as isize - 1)
            .await
            .map_err(|e| MetricsError::RecordFailed(e.to_string()))?;

        Ok(())
    }

    async fn snapshot(&self) -> Result<MetricsSnapshot> {
        let cache = self.history(MetricSource::Cache).await?;
        let database = self.history(MetricSource::Database).await?;

        Ok(MetricsSnapshot {
            cache: summarize(&cache),
            database: summarize(&database),
        })
    }
}
