//! Normalizer — resolves a [`RawLogRecord`] into a canonical [`LogRow`].
//!
//! Every field has a fallback chain and normalisation never fails. A nested
//! JSON blob that will not parse degrades to the next link in its chain.
//!
//! | Field       | Precedence |
//! |-------------|------------|
//! | `id`        | `log_id` / `log-id` → positional index |
//! | `timestamp` | `@timestamp` → `current-interaction` → now |
//! | `source`    | geolocation `"ip (country)"` → `ip` → `country` → raw `source` → `"system"` |
//! | `message`   | `gemini-response.description` → raw `message` → `"No message available"` |

use crate::raw::RawLogRecord;
use crate::types::LogRow;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;

/// Source label used when nothing in the record identifies the origin.
pub const DEFAULT_SOURCE: &str = "system";
/// Message used when the record carries neither a description nor a message.
pub const DEFAULT_MESSAGE: &str = "No message available";

/// How many layers of JSON-in-a-string the normalizer will peel off.
const MAX_NESTED_DECODE: usize = 3;

/// Epoch values at or above this magnitude are read as milliseconds.
const EPOCH_MILLIS_THRESHOLD: f64 = 1e11;

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Normalise `raw` using the wall clock as the timestamp fallback.
pub fn normalize(raw: &RawLogRecord, index: usize) -> LogRow {
    normalize_at(raw, index, Utc::now())
}

/// Normalise `raw`, using `now` when the record carries no usable timestamp.
pub fn normalize_at(raw: &RawLogRecord, index: usize, now: DateTime<Utc>) -> LogRow {
    let geo = raw.event_original.as_ref().and_then(geolocation);
    let ip = geo.as_ref().and_then(|g| g.get("ip")).and_then(scalar_text);
    let country = geo.as_ref().and_then(|g| g.get("country")).and_then(scalar_text);

    LogRow {
        id: raw
            .log_id
            .as_ref()
            .and_then(scalar_text)
            .unwrap_or_else(|| index.to_string()),
        timestamp: raw
            .timestamp
            .as_ref()
            .and_then(parse_timestamp)
            .or_else(|| raw.current_interaction.as_ref().and_then(parse_timestamp))
            .unwrap_or(now),
        attacker_id: raw.attacker_id.as_ref().and_then(scalar_text),
        source: derive_source(ip.as_deref(), country.as_deref(), raw.source.as_ref()),
        host: raw.host.as_ref().and_then(host_name),
        message: raw
            .gemini_response
            .as_ref()
            .and_then(decode_object)
            .and_then(|g| g.get("description").and_then(scalar_text))
            .or_else(|| raw.message.as_ref().and_then(display_text))
            .unwrap_or_else(|| DEFAULT_MESSAGE.to_string()),
        country,
    }
}

/// Normalise a whole fetched batch and sort it ascending by timestamp.
///
/// Indexes are positional within `records`. The sort is stable, so rows that
/// share a timestamp keep their fetch order.
pub fn normalize_batch(records: &[RawLogRecord], now: DateTime<Utc>) -> Vec<LogRow> {
    let mut rows: Vec<LogRow> = records
        .iter()
        .enumerate()
        .map(|(index, raw)| normalize_at(raw, index, now))
        .collect();
    rows.sort_by_key(|row| row.timestamp);
    rows
}

// ---------------------------------------------------------------------------
// Field resolution
// ---------------------------------------------------------------------------

fn derive_source(ip: Option<&str>, country: Option<&str>, raw_source: Option<&Value>) -> String {
    match (ip, country) {
        (Some(ip), Some(country)) => format!("{ip} ({country})"),
        (Some(ip), None) => ip.to_string(),
        (None, Some(country)) => country.to_string(),
        (None, None) => raw_source
            .and_then(scalar_text)
            .unwrap_or_else(|| DEFAULT_SOURCE.to_string()),
    }
}

/// `event.original.geolocation`, decoding either level from a string if needed.
fn geolocation(event_original: &Value) -> Option<Value> {
    let original = decode_object(event_original)?;
    original.get("geolocation").and_then(decode_object)
}

fn host_name(host: &Value) -> Option<String> {
    match host {
        Value::Object(obj) => obj.get("name").and_then(scalar_text),
        other => scalar_text(other),
    }
}

/// Peel JSON-in-a-string layers until an object appears.
fn decode_object(value: &Value) -> Option<Value> {
    let mut current = value.clone();
    for _ in 0..=MAX_NESTED_DECODE {
        match current {
            Value::Object(_) => return Some(current),
            Value::String(s) => match serde_json::from_str::<Value>(s.trim()) {
                Ok(inner) => current = inner,
                Err(_) => return None,
            },
            _ => return None,
        }
    }
    None
}

/// Text for identifier-like values: non-blank strings, numbers and booleans.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Like [`scalar_text`] but renders structured messages as compact JSON.
fn display_text(value: &Value) -> Option<String> {
    match value {
        Value::Array(_) | Value::Object(_) => serde_json::to_string(value).ok(),
        other => scalar_text(other),
    }
}

// ---------------------------------------------------------------------------
// Timestamps
// ---------------------------------------------------------------------------

/// Parse an ISO-8601-ish string or a numeric epoch into UTC.
///
/// Naive date-times (no offset) are taken to be UTC. Numbers at or above
/// 1e11 in magnitude are milliseconds, smaller ones seconds.
pub fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => parse_timestamp_str(s.trim()),
        Value::Number(n) => {
            let n = n.as_f64()?;
            let millis = if n.abs() >= EPOCH_MILLIS_THRESHOLD { n } else { n * 1000.0 };
            if !millis.is_finite() {
                return None;
            }
            Utc.timestamp_millis_opt(millis.round() as i64).single()
        }
        _ => None,
    }
}

fn parse_timestamp_str(s: &str) -> Option<DateTime<Utc>> {
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
