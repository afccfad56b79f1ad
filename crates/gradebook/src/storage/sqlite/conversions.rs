//! SQLite row conversion functions.
//!
//! Pure functions for converting between SQLite rows and domain types.
//! These are testable in isolation without database access.

use chrono::{DateTime, Utc};
use rusqlite::Row;

use gradebook_core::student::Student;

/// Convert a SQLite row to a Student.
///
/// Expected columns: id, name, grade, created_at, updated_at
pub fn row_to_student(row: &Row) -> rusqlite::Result<Student> {
    let id: i64 = row.get(0)?;
    let name: String = row.get(1)?;
    let grade: f64 = row.get(2)?;
    let created_at: String = row.get(3)?;
    let updated_at: String = row.get(4)?;

    Ok(Student {
        id,
        name,
        grade,
        created_at: parse_datetime(&created_at)?,
        updated_at: parse_datetime(&updated_at)?,
    })
}

/// Parse an RFC 3339 datetime from SQLite TEXT storage.
fn parse_datetime(s: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
        })
}

/// Format a datetime for SQLite storage.
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_datetime_roundtrip() {
        let dt = Utc.with_ymd_and_hms(2025, 3, 10, 9, 30, 15).unwrap();

        let formatted = format_datetime(&dt);
        let parsed = parse_datetime(&formatted).unwrap();

        assert_eq!(parsed, dt);
    }

    #[test]
    fn test_parse_datetime_with_offset_normalizes_to_utc() {
        let parsed = parse_datetime("2025-03-10T11:30:00+02:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2025, 3, 10, 9, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_datetime_invalid() {
        assert!(parse_datetime("yesterday").is_err());
    }
}
