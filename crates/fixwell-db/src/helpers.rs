//! Row-to-entity parsing helpers.
//!
//! Repositories convert `libsql::Row` (column-indexed) into typed entity
//! structs. These helpers isolate the parsing quirks, chiefly the dual
//! datetime format (`SQLite`'s `datetime('now')` vs Rust's `to_rfc3339()`).

use chrono::{DateTime, Utc};

use crate::error::DatabaseError;

/// Parse a required TEXT column as `DateTime<Utc>`.
///
/// Handles both RFC 3339 (`"2026-08-29T14:30:00+00:00"`) and `SQLite`'s
/// default format (`"2026-08-29 14:30:00"`).
///
/// # Errors
///
/// Returns `DatabaseError::InvalidState` if the string matches neither format.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, DatabaseError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|e| DatabaseError::InvalidState(format!("unparseable datetime '{s}': {e}")))
}

/// Parse a TEXT column into a serde-deserializable enum.
///
/// Works with the fixwell-core enums, which all use
/// `#[serde(rename_all = "snake_case")]`.
///
/// # Errors
///
/// Returns `DatabaseError::InvalidState` if the string matches no variant.
pub fn parse_enum<T: serde::de::DeserializeOwned>(s: &str) -> Result<T, DatabaseError> {
    serde_json::from_value(serde_json::Value::String(s.to_string()))
        .map_err(|e| DatabaseError::InvalidState(format!("unrecognized enum value '{s}': {e}")))
}

/// Read a nullable TEXT column. Returns `None` for both SQL NULL and empty
/// string — `row.get::<String>` on a NULL column errors rather than
/// returning `""`.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_opt_string(row: &libsql::Row, idx: i32) -> Result<Option<String>, DatabaseError> {
    match row.get::<Option<String>>(idx)? {
        Some(s) if s.is_empty() => Ok(None),
        other => Ok(other),
    }
}
