//! Dynamic row decoding for AI-generated SELECT statements.
//!
//! The chat path executes SQL whose column set is not known at compile
//! time, so rows are probed column-by-column into JSON values.

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::{Map, Number, Value};
use sqlx::postgres::PgRow;
use sqlx::sqlite::SqliteRow;
use sqlx::{Column, Row};

macro_rules! probe_column {
    ($row:expr, $idx:expr) => {{
        if let Ok(v) = $row.try_get::<Option<i64>, _>($idx) {
            v.map(Value::from).unwrap_or(Value::Null)
        } else if let Ok(v) = $row.try_get::<Option<f64>, _>($idx) {
            v.and_then(Number::from_f64)
                .map(Value::Number)
                .unwrap_or(Value::Null)
        } else if let Ok(v) = $row.try_get::<Option<bool>, _>($idx) {
            v.map(Value::Bool).unwrap_or(Value::Null)
        } else if let Ok(v) = $row.try_get::<Option<DateTime<Utc>>, _>($idx) {
            v.map(|dt| Value::String(dt.to_rfc3339()))
                .unwrap_or(Value::Null)
        } else if let Ok(v) = $row.try_get::<Option<NaiveDate>, _>($idx) {
            v.map(|d| Value::String(d.to_string())).unwrap_or(Value::Null)
        } else if let Ok(v) = $row.try_get::<Option<String>, _>($idx) {
            v.map(Value::String).unwrap_or(Value::Null)
        } else {
            Value::Null
        }
    }};
}

pub fn pg_row_to_json(row: &PgRow) -> Map<String, Value> {
    let mut map = Map::new();
    for (idx, column) in row.columns().iter().enumerate() {
        map.insert(column.name().to_string(), probe_column!(row, idx));
    }
    map
}

pub fn sqlite_row_to_json(row: &SqliteRow) -> Map<String, Value> {
    let mut map = Map::new();
    for (idx, column) in row.columns().iter().enumerate() {
        map.insert(column.name().to_string(), probe_column!(row, idx));
    }
    map
}
