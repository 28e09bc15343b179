//! Raw record model — the backend's loosely-shaped JSON, pinned to the keys
//! burrow understands.
//!
//! The backend does not control its field naming: the honeypot writes
//! `attacker-id` in one place and `attacker_id` in another, `event.original`
//! may be an object or a JSON string (sometimes encoded twice), and any field
//! may be missing or `null`. [`RawLogRecord`] captures each recognised key as
//! an untyped [`Value`] so that the normalizer can resolve precedence in one
//! place. Nothing downstream of the normalizer sees a `Value`.

use serde_json::{Map, Value};

/// One security-event record as returned by the backend.
///
/// Every field is optional; `null` is stored as `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawLogRecord {
    /// `@timestamp`
    pub timestamp: Option<Value>,
    /// `current-interaction`
    pub current_interaction: Option<Value>,
    /// `attacker-id`, falling back to `attacker_id`
    pub attacker_id: Option<Value>,
    /// `event.original`, either nested or as a flattened dotted key
    pub event_original: Option<Value>,
    /// `gemini-response` (object or JSON string); the normalizer reads its
    /// `description`
    pub gemini_response: Option<Value>,
    /// `log_id`, falling back to `log-id`
    pub log_id: Option<Value>,
    pub message: Option<Value>,
    pub source: Option<Value>,
    /// `host` — a plain string or an ECS-style `{ "name": ... }` object
    pub host: Option<Value>,
}

impl RawLogRecord {
    /// Pick the recognised keys out of a JSON value. Never fails: anything
    /// that is not an object produces an empty record.
    pub fn from_value(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            return Self::default();
        };

        let event_original = obj
            .get("event")
            .and_then(|event| event.as_object())
            .and_then(|event| present(event, "original"))
            .or_else(|| present(obj, "event.original"));

        Self {
            timestamp: present(obj, "@timestamp"),
            current_interaction: present(obj, "current-interaction"),
            attacker_id: present(obj, "attacker-id").or_else(|| present(obj, "attacker_id")),
            event_original,
            gemini_response: present(obj, "gemini-response"),
            log_id: present(obj, "log_id").or_else(|| present(obj, "log-id")),
            message: present(obj, "message"),
            source: present(obj, "source"),
            host: present(obj, "host"),
        }
    }
}

impl From<Value> for RawLogRecord {
    fn from(value: Value) -> Self {
        Self::from_value(&value)
    }
}

impl From<&Value> for RawLogRecord {
    fn from(value: &Value) -> Self {
        Self::from_value(value)
    }
}

fn present(obj: &Map<String, Value>, key: &str) -> Option<Value> {
    obj.get(key).filter(|v| !v.is_null()).cloned()
}
