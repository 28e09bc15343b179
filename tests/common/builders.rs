//! Test builders — ergonomic constructors for raw backend records.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They build the JSON a backend would send and hand back a
//! [`RawLogRecord`] parsed from it, so every test goes through the same
//! decoding path as a live fetch.

use burrow_core::RawLogRecord;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::{json, Map, Value};

// ---------------------------------------------------------------------------
// RawRecordBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for raw honeypot records.
///
/// # Example
///
/// ```rust
/// let raw = RawRecordBuilder::new()
///     .log_id(7)
///     .timestamp("2025-03-19T04:50:39Z")
///     .geolocation("1.2.3.4", Some("US"))
///     .description("Suspicious login")
///     .build();
/// ```
#[derive(Default)]
pub struct RawRecordBuilder {
    fields: Map<String, Value>,
}

impl RawRecordBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log_id(self, id: impl Into<Value>) -> Self {
        self.field("log_id", id)
    }

    pub fn timestamp(self, ts: impl Into<Value>) -> Self {
        self.field("@timestamp", ts)
    }

    pub fn at(self, ts: DateTime<Utc>) -> Self {
        self.timestamp(ts.to_rfc3339())
    }

    pub fn current_interaction(self, ts: impl Into<Value>) -> Self {
        self.field("current-interaction", ts)
    }

    pub fn attacker(self, id: &str) -> Self {
        self.field("attacker-id", id)
    }

    pub fn source(self, source: &str) -> Self {
        self.field("source", source)
    }

    pub fn host(self, host: &str) -> Self {
        self.field("host", host)
    }

    pub fn message(self, message: &str) -> Self {
        self.field("message", message)
    }

    /// `gemini-response` as a JSON-encoded string, the way the backend sends it.
    pub fn description(self, description: &str) -> Self {
        let encoded = json!({ "description": description }).to_string();
        self.field("gemini-response", encoded)
    }

    /// `event.original` as a JSON string whose `geolocation` is itself a string.
    pub fn geolocation(self, ip: &str, country: Option<&str>) -> Self {
        let mut geo = Map::new();
        geo.insert("ip".to_string(), json!(ip));
        if let Some(country) = country {
            geo.insert("country".to_string(), json!(country));
        }
        let original = json!({ "geolocation": Value::Object(geo).to_string() }).to_string();
        self.field("event", json!({ "original": original }))
    }

    pub fn field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.fields.clone())
    }

    pub fn build(self) -> RawLogRecord {
        RawLogRecord::from_value(&self.to_value())
    }
}

// ---------------------------------------------------------------------------
// Corpus helpers
// ---------------------------------------------------------------------------

/// First minute of the sequential corpus: 2025-03-19 04:50:00 UTC.
pub fn corpus_start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 19, 4, 50, 0).unwrap()
}

/// `n` records one minute apart starting at [`corpus_start`], ids `1..=n`,
/// cycling through a handful of sources.
pub fn sequential_builders(n: usize) -> Vec<RawRecordBuilder> {
    const SOURCES: &[&str] = &["sshd", "nginx", "mysqld", "firewall"];
    (0..n)
        .map(|i| {
            RawRecordBuilder::new()
                .log_id(i as u64 + 1)
                .at(corpus_start() + Duration::minutes(i as i64))
                .source(SOURCES[i % SOURCES.len()])
                .message(&format!("event {}", i + 1))
        })
        .collect()
}

pub fn sequential_records(n: usize) -> Vec<RawLogRecord> {
    sequential_builders(n).into_iter().map(RawRecordBuilder::build).collect()
}

/// `{ "message": [...] }` body for the given builders.
pub fn envelope(builders: &[RawRecordBuilder]) -> Value {
    json!({ "message": builders.iter().map(RawRecordBuilder::to_value).collect::<Vec<_>>() })
}
