mod error;
mod traits;
mod types;

pub use error::{MetricsError, Result};
pub use traits::MetricsRecorder;
pub use types::{
    round2, summarize, MetricSource, MetricsSnapshot, SourceMetrics, HISTORY_CAPACITY,
    RECENT_WINDOW,
};
