use thiserror::Error;

/// Errors that can occur in the metrics recorder.
///
/// Recording is best-effort telemetry: callers log these and carry on, they
/// never fail the primary request.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MetricsError {
    #[error("Failed to record sample: {0}")]
    RecordFailed(String),
    #[error("Failed to read metrics: {0}")]
    SnapshotFailed(String),
}

/// Result type for metrics operations.
pub type Result<T> = std::result::Result<T, MetricsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_failed_display() {
        let error = MetricsError::RecordFailed("connection reset".to_string());
        assert_eq!(error.to_string(), "Failed to record sample: connection reset");
    }

    #[test]
    fn test_snapshot_failed_display() {
        let error = MetricsError::SnapshotFailed("timeout".to_string());
        assert_eq!(error.to_string(), "Failed to read metrics: timeout");
    }
}
