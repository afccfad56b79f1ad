//! API request and response payloads.
//!
//! Response shapes mirror the JSON contract consumed by the dashboard
//! front end: every body carries a `success` flag, listings carry their
//! cache provenance and measured access time.

use serde::{Deserialize, Serialize};

use gradebook_core::cache::CacheBackendStats;
use gradebook_core::metrics::MetricsSnapshot;
use gradebook_core::serde::{
    deserialize_grade, deserialize_optional_grade, deserialize_optional_string,
};
use gradebook_core::student::Student;

/// Query parameters for listing students.
#[derive(Debug, Default, Deserialize)]
pub struct ListStudentsQuery {
    /// Optional name fragment; a blank value means "no filter".
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub name: Option<String>,
}

/// Request payload for creating a student.
#[derive(Debug, Deserialize)]
pub struct CreateStudent {
    pub name: String,
    #[serde(deserialize_with = "deserialize_grade")]
    pub grade: f64,
}

/// Request payload for partially updating a student.
///
/// `name` stays a plain `Option` here: an explicitly supplied empty name
/// must reach validation and be rejected, not silently dropped.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateStudent {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_grade")]
    pub grade: Option<f64>,
}

/// Response body for the listing endpoint.
#[derive(Debug, Serialize)]
pub struct ListStudentsResponse {
    pub success: bool,
    pub students: Vec<Student>,
    pub from_cache: bool,
    /// Measured lookup latency in milliseconds, rounded to 2 decimals.
    pub access_time: f64,
    pub count: usize,
}

/// Response body for create and update.
#[derive(Debug, Serialize)]
pub struct StudentResponse {
    pub success: bool,
    pub message: String,
    pub student: Student,
}

/// Response body for delete.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

/// Response body for the manual cache-clear endpoint.
#[derive(Debug, Serialize)]
pub struct ClearCacheResponse {
    pub success: bool,
    pub message: String,
    pub deleted: u64,
}

/// Response body for the performance metrics endpoint.
#[derive(Debug, Serialize)]
pub struct MetricsResponse {
    pub success: bool,
    pub metrics: MetricsSnapshot,
    pub cache_stats: CacheBackendStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_accepts_numeric_string_grade() {
        let payload: CreateStudent = serde_json::from_str(r#"{"name": "Zoe", "grade": "18"}"#)
            .expect("string grades are accepted");
        assert_eq!(payload.grade, 18.0);
    }

    #[test]
    fn test_create_rejects_non_numeric_grade() {
        let result: Result<CreateStudent, _> =
            serde_json::from_str(r#"{"name": "Zoe", "grade": "eighteen"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_update_fields_default_to_none() {
        let payload: UpdateStudent = serde_json::from_str("{}").unwrap();
        assert_eq!(payload.name, None);
        assert_eq!(payload.grade, None);
    }

    #[test]
    fn test_update_keeps_supplied_empty_name() {
        // Validation rejects it later; deserialization must not hide it.
        let payload: UpdateStudent = serde_json::from_str(r#"{"name": ""}"#).unwrap();
        assert_eq!(payload.name, Some(String::new()));
    }

    #[test]
    fn test_list_query_blank_name_is_none() {
        let query: ListStudentsQuery = serde_json::from_str(r#"{"name": "  "}"#).unwrap();
        assert_eq!(query.name, None);
    }
}
