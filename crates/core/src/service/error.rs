use thiserror::Error;

use crate::cache::CacheError;
use crate::storage::{repository_error_to_status_code, RepositoryError};
use crate::student::ValidationError;

/// The error taxonomy of the grade service, as seen by the HTTP front end.
///
/// Cache failures on the read and invalidation paths never surface here:
/// they are absorbed inside the service and the request is served from the
/// record store. The `Cache` variant only appears for explicit cache
/// administration (manual clearing), where the backend failure *is* the
/// outcome.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ServiceError {
    /// Bad input shape or range. Raised before any store mutation.
    #[error("{0}")]
    Validation(#[from] ValidationError),
    /// The identifier does not resolve to a record.
    #[error("Student not found: {id}")]
    NotFound { id: i64 },
    /// The record store failed; any partial mutation was rolled back.
    #[error("{0}")]
    Storage(#[from] RepositoryError),
    /// The cache backend failed during explicit cache administration.
    #[error("{0}")]
    Cache(#[from] CacheError),
}

/// Result type for grade service operations.
pub type Result<T> = std::result::Result<T, ServiceError>;

/// Maps a [`ServiceError`] to an HTTP status code.
pub fn service_error_to_status_code(error: &ServiceError) -> u16 {
    match error {
        ServiceError::Validation(_) => 400,
        ServiceError::NotFound { .. } => 404,
        ServiceError::Storage(e) => repository_error_to_status_code(e),
        ServiceError::Cache(CacheError::ConnectionFailed(_)) => 503,
        ServiceError::Cache(_) => 500,
    }
}
