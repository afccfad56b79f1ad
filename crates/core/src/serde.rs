//! Serde helper functions for API payload deserialization.
//!
//! Grades arrive from clients either as JSON numbers or as numeric strings
//! (form-originated payloads); both are accepted and range-checked later by
//! the validation layer.

use serde::{Deserialize, Deserializer};

/// A grade value as it appears on the wire: a number or a numeric string.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawGrade {
    Number(f64),
    Text(String),
}

impl RawGrade {
    fn parse(self) -> Result<f64, String> {
        match self {
            RawGrade::Number(n) => Ok(n),
            RawGrade::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| format!("invalid grade format: {s:?}")),
        }
    }
}

/// Deserialize a grade, accepting a JSON number or a numeric string.
pub fn deserialize_grade<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    RawGrade::deserialize(deserializer)?
        .parse()
        .map_err(serde::de::Error::custom)
}

/// Deserialize an optional grade, accepting a JSON number or a numeric
/// string. Missing fields stay `None` (combine with `#[serde(default)]`).
pub fn deserialize_optional_grade<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<RawGrade> = Option::deserialize(deserializer)?;
    raw.map(RawGrade::parse)
        .transpose()
        .map_err(serde::de::Error::custom)
}

/// Deserialize an optional string, treating empty strings as None.
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.filter(|s| !s.trim().is_empty()))
}
