//! Pure functions for serializing/deserializing student listings to/from
//! cache bytes.
//!
//! Cache values are JSON so they stay human-readable when inspected directly
//! in the backend.

use crate::student::Student;
use thiserror::Error;

/// Errors that can occur during cache serialization/deserialization.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SerializationError {
    /// Failed to serialize a value to bytes.
    #[error("Failed to serialize: {0}")]
    SerializeFailed(String),
    /// Failed to deserialize bytes to a value.
    #[error("Failed to deserialize: {0}")]
    DeserializeFailed(String),
}

/// Result type for serialization operations.
pub type Result<T> = std::result::Result<T, SerializationError>;

/// Serializes an ordered student listing to JSON bytes.
pub fn serialize_students(students: &[Student]) -> Result<Vec<u8>> {
    serde_json::to_vec(students).map_err(|e| SerializationError::SerializeFailed(e.to_string()))
}

/// Deserializes JSON bytes back into a student listing.
pub fn deserialize_students(bytes: &[u8]) -> Result<Vec<Student>> {
    serde_json::from_slice(bytes).map_err(|e| SerializationError::DeserializeFailed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn fixed_timestamp() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap()
    }

    #[test]
    fn test_roundtrip_listing() {
        let students = vec![
            Student::new(1, "Alice Dupont", 15.5, fixed_timestamp()),
            Student::new(2, "Bob Martin", 12.0, fixed_timestamp()),
        ];

        let bytes = serialize_students(&students).expect("serialize should succeed");
        let deserialized = deserialize_students(&bytes).expect("deserialize should succeed");

        assert_eq!(students, deserialized);
    }

    #[test]
    fn test_serialize_empty_listing() {
        let students: Vec<Student> = vec![];

        let bytes = serialize_students(&students).expect("serialize should succeed");
        let deserialized = deserialize_students(&bytes).expect("deserialize should succeed");

        assert!(deserialized.is_empty());
        assert_eq!(bytes, b"[]");
    }

    #[test]
    fn test_deserialize_malformed_bytes() {
        let result = deserialize_students(b"not valid json");

        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, SerializationError::DeserializeFailed(_)));
    }

    #[test]
    fn test_deserialize_wrong_shape() {
        let result = deserialize_students(b"{\"id\": 1}");

        assert!(matches!(
            result,
            Err(SerializationError::DeserializeFailed(_))
        ));
    }
}
