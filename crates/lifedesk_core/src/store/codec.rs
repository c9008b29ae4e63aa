//! Row codec helpers shared by `Record` implementations.
//!
//! # Responsibility
//! - Encode Rust-side field types into SQLite bind values.
//! - Decode columns back with typed `InvalidData` errors.
//!
//! # Invariants
//! - Dates are ISO `YYYY-MM-DD` TEXT, so SQL ordering is chronological.
//! - Flags are stored as 0/1 integers; any other value is invalid data.

use crate::store::{RecordId, StoreError, StoreResult};
use chrono::NaiveDate;
use rusqlite::types::Value;
use rusqlite::Row;
use uuid::Uuid;

pub fn id_value(id: RecordId) -> Value {
    Value::Text(id.to_string())
}

pub fn text(value: &str) -> Value {
    Value::Text(value.to_string())
}

pub fn opt_text(value: Option<&str>) -> Value {
    match value {
        Some(inner) => Value::Text(inner.to_string()),
        None => Value::Null,
    }
}

pub fn int(value: i64) -> Value {
    Value::Integer(value)
}

pub fn opt_int(value: Option<i64>) -> Value {
    match value {
        Some(inner) => Value::Integer(inner),
        None => Value::Null,
    }
}

pub fn date(value: NaiveDate) -> Value {
    Value::Text(value.to_string())
}

pub fn opt_date(value: Option<NaiveDate>) -> Value {
    match value {
        Some(inner) => date(inner),
        None => Value::Null,
    }
}

pub fn flag(value: bool) -> Value {
    Value::Integer(if value { 1 } else { 0 })
}

/// Encodes a tag list as a JSON array column.
pub fn tags(values: &[String]) -> Value {
    let encoded =
        serde_json::to_string(values).expect("a vector of strings always serializes to JSON");
    Value::Text(encoded)
}

pub fn parse_id(row: &Row<'_>, column: &'static str) -> StoreResult<RecordId> {
    let raw: String = row.get(column)?;
    Uuid::parse_str(&raw)
        .map_err(|_| StoreError::InvalidData(format!("invalid uuid value `{raw}` in {column}")))
}

pub fn parse_date(row: &Row<'_>, column: &'static str) -> StoreResult<NaiveDate> {
    let raw: String = row.get(column)?;
    raw.parse::<NaiveDate>()
        .map_err(|_| StoreError::InvalidData(format!("invalid date value `{raw}` in {column}")))
}

pub fn parse_opt_date(row: &Row<'_>, column: &'static str) -> StoreResult<Option<NaiveDate>> {
    let raw: Option<String> = row.get(column)?;
    match raw {
        Some(value) => {
            let parsed = value.parse::<NaiveDate>().map_err(|_| {
                StoreError::InvalidData(format!("invalid date value `{value}` in {column}"))
            })?;
            Ok(Some(parsed))
        }
        None => Ok(None),
    }
}

pub fn parse_flag(row: &Row<'_>, column: &'static str) -> StoreResult<bool> {
    match row.get::<_, i64>(column)? {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(StoreError::InvalidData(format!(
            "invalid flag value `{other}` in {column}"
        ))),
    }
}

pub fn parse_tags(row: &Row<'_>, column: &'static str) -> StoreResult<Vec<String>> {
    let raw: String = row.get(column)?;
    serde_json::from_str(&raw)
        .map_err(|_| StoreError::InvalidData(format!("invalid tag list `{raw}` in {column}")))
}
