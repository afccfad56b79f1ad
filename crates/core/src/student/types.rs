use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A student record with its grade.
///
/// `id` and both timestamps are assigned by the record store; `grade` always
/// satisfies `GRADE_MIN <= grade <= GRADE_MAX` for persisted records because
/// writes are validated before they reach the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub grade: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Student {
    /// Creates a student with both timestamps set to `timestamp`.
    ///
    /// Repositories build records through this when inserting; tests use it
    /// to construct fixtures with fixed timestamps.
    pub fn new(id: i64, name: impl Into<String>, grade: f64, timestamp: DateTime<Utc>) -> Self {
        Self {
            id,
            name: name.into(),
            grade,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }
}
