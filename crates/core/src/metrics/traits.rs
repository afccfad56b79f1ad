use async_trait::async_trait;

use super::{MetricSource, MetricsSnapshot, Result};

/// Trait for recording access-latency samples and reading them back.
///
/// Implementations keep a bounded most-recent-first history per source
/// (capacity [`super::HISTORY_CAPACITY`]). Recording is O(1) amortized.
#[async_trait]
pub trait MetricsRecorder: Send + Sync {
    /// Pushes a sample to the front of the source's history, truncating the
    /// oldest entries beyond capacity.
    async fn record(&self, source: MetricSource, latency_ms: f64) -> Result<()>;

    /// Returns the per-source statistics over the retained histories.
    async fn snapshot(&self) -> Result<MetricsSnapshot>;
}
