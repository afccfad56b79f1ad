use serde::Serialize;

/// How many latency samples each source retains. Older samples are truncated
/// away, pure FIFO.
pub const HISTORY_CAPACITY: usize = 100;

/// How many of the most recent samples a snapshot exposes for display.
pub const RECENT_WINDOW: usize = 20;

/// Where a latency sample was measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricSource {
    Cache,
    Database,
}

impl MetricSource {
    /// The tag used in backend storage keys and log fields.
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricSource::Cache => "cache",
            MetricSource::Database => "database",
        }
    }
}

impl std::fmt::Display for MetricSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregate statistics for one source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceMetrics {
    /// Most recent samples first, at most [`RECENT_WINDOW`] of them.
    pub recent_samples: Vec<f64>,
    /// Arithmetic mean over the full retained history, rounded to 2
    /// decimals. `0.0` when nothing has been recorded.
    pub average: f64,
    /// Number of retained samples.
    pub count: usize,
}

impl SourceMetrics {
    pub fn empty() -> Self {
        Self {
            recent_samples: Vec::new(),
            average: 0.0,
            count: 0,
        }
    }
}

/// Per-source statistics, one entry for every tracked source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    pub cache: SourceMetrics,
    pub database: SourceMetrics,
}

impl MetricsSnapshot {
    pub fn empty() -> Self {
        Self {
            cache: SourceMetrics::empty(),
            database: SourceMetrics::empty(),
        }
    }
}

/// Rounds to 2 decimal places, the precision used for every latency value
/// that leaves the service.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Computes the snapshot statistics for one source from its most-recent-first
/// sample history.
///
/// The average is taken over the whole retained window, not just the
/// [`RECENT_WINDOW`] samples returned for display.
pub fn summarize(samples: &[f64]) -> SourceMetrics {
    if samples.is_empty() {
        return SourceMetrics::empty();
    }

    let sum: f64 = samples.iter().sum();
    let average = round2(sum / samples.len() as f64);
    let recent_samples = samples.iter().take(RECENT_WINDOW).copied().collect();

    SourceMetrics {
        recent_samples,
        average,
        count: samples.len(),
    }
}
