//! In-memory metrics recorder.
//!
//! Keeps the per-source latency histories in process memory. Used alongside
//! the in-memory cache backend in development and tests.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use gradebook_core::metrics::{
    summarize, MetricSource, MetricsRecorder, MetricsSnapshot, Result, HISTORY_CAPACITY,
};

#[derive(Debug, Default)]
struct Histories {
    cache: VecDeque<f64>,
    database: VecDeque<f64>,
}

impl Histories {
    fn for_source(&mut self, source: MetricSource) -> &mut VecDeque<f64> {
        match source {
            MetricSource::Cache => &mut self.cache,
            MetricSource::Database => &mut self.database,
        }
    }
}

/// In-memory metrics recorder with bounded per-source histories.
#[derive(Debug, Clone, Default)]
pub struct MemoryMetrics {
    histories: Arc<RwLock<Histories>>,
}

impl MemoryMetrics {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MetricsRecorder for MemoryMetrics {
    async fn record(&self, source: MetricSource, latency_ms: f64) -> Result<()> {
        let mut histories = self.histories.write().await;
        let history = histories.for_source(source);

        history.push_front(latency_ms);
        history.truncate(HISTORY_CAPACITY);

        Ok(())
    }

    async fn snapshot(&self) -> Result<MetricsSnapshot> {
        let histories = self.histories.read().await;

        let cache: Vec<f64> = histories.cache.iter().copied().collect();
        let database: Vec<f64> = histories.database.iter().copied().collect();

        Ok(MetricsSnapshot {
            cache: summarize(&cache),
            database: summarize(&database),
        })
    }
}
