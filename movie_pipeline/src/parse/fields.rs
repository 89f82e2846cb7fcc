//! Field coercions and projections over decoded cells.
//!
//! Every function here degrades instead of failing: a value that cannot be
//! coerced comes back as `None` and the caller picks the default.

use chrono::{DateTime, NaiveDate};
use serde_json::Value;

use super::literal::StructuredField;

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];
const DIRECTOR_JOB: &str = "Director";

/// The string `name` of a structured entry.
pub fn name_of(entry: &Value) -> Option<&str> {
    entry.get("name")?.as_str()
}

/// Names of all list entries, in order. Entries without a string `name` are skipped.
pub fn names(field: &StructuredField) -> Vec<String> {
    field
        .entries()
        .iter()
        .filter_map(name_of)
        .map(str::to_string)
        .collect()
}

/// Name of the first crew entry whose job is exactly `Director`.
pub fn director_of(crew: &StructuredField) -> Option<String> {
    crew.entries()
        .iter()
        .filter(|entry| entry.get("job").and_then(Value::as_str) == Some(DIRECTOR_JOB))
        .find_map(name_of)
        .map(str::to_string)
}

/// Names within the first `limit` cast entries.
pub fn cast_names(cast: &StructuredField, limit: usize) -> Vec<String> {
    cast.entries()
        .iter()
        .take(limit)
        .filter_map(name_of)
        .map(str::to_string)
        .collect()
}

/// A positive integral identifier. `"862"` and `"862.0"` both give 862.
pub fn parse_id(text: &str) -> Option<i64> {
    parse_int(text).filter(|id| *id > 0)
}

/// A finite number.
pub fn parse_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// An integer, accepting float text with no fractional part.
pub fn parse_int(text: &str) -> Option<i64> {
    let text = text.trim();
    if let Ok(v) = text.parse::<i64>() {
        return Some(v);
    }
    let v = parse_number(text)?;
    let in_range = v >= i64::MIN as f64 && v < i64::MAX as f64;
    (v.fract() == 0.0 && in_range).then_some(v as i64)
}

/// A calendar date in one of the accepted formats, or an RFC 3339 timestamp.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(text)
                .ok()
                .map(|ts| ts.date_naive())
        })
}
