//! Tolerant readers for Django REST Framework payloads.
//!
//! DRF renders `DecimalField` as strings, foreign keys either as bare ids or
//! as nested `{id, nome}` objects depending on the serializer, and dates
//! either as `YYYY-MM-DD` or as full ISO datetimes. Everything that crosses
//! the fetch boundary goes through these helpers exactly once.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Reads a monetary value from a number or a decimal string.
pub fn amount_from_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|v| v.is_finite())
}

/// Reads an identifier from a number, a non-empty string or an object with an `id` key.
pub fn id_from_value(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => Some(
            n.as_i64()
                .map(|i| i.to_string())
                .unwrap_or_else(|| n.to_string()),
        ),
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Object(map) => map.get("id").and_then(id_from_value),
        _ => None,
    }
}

/// Reads a display name from a nested `{nome}` object.
pub fn name_from_value(value: &Value) -> Option<String> {
    value
        .get("nome")
        .and_then(|n| n.as_str())
        .map(|s| s.to_string())
}

/// Reads a calendar date from `YYYY-MM-DD` or an ISO datetime.
pub fn date_from_str(s: &str) -> Option<NaiveDate> {
    let date_part = s.trim().split('T').next().unwrap_or_default();
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

pub fn date_from_value(value: &Value) -> Option<NaiveDate> {
    value.as_str().and_then(date_from_str)
}

/// serde adapter: missing, null or unparseable amounts become `0.0`,
/// the same as `parseFloat(x) || 0` on the API's other clients.
pub fn amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(amount_from_value).unwrap_or(0.0))
}

/// serde adapter for counters that may arrive as numbers or strings.
pub fn count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(amount_from_value)
        .map(|v| v.max(0.0) as u64)
        .unwrap_or(0))
}
