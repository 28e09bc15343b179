//! Core types for burrow-core.
//!
//! This module defines the canonical row shape shared across every layer of
//! the pipeline: the normalised [`LogRow`], the per-minute [`TimeBucket`], and
//! the [`RowOrigin`] discriminant recording where a row set came from.

use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};
use serde::Serialize;

/// A normalised security-event row produced by the normalizer.
///
/// Rows are immutable once normalised; search and pagination only ever derive
/// views over them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogRow {
    /// `log_id` / `log-id` from the raw record, or the positional index.
    /// Unique within a batch on a best-effort basis only.
    pub id: String,
    /// Event time (UTC). Falls back to the normalisation time when the raw
    /// record carries no usable timestamp.
    pub timestamp: DateTime<Utc>,
    pub attacker_id: Option<String>,
    /// `"ip (country)"`, `ip`, `country`, the raw `source`, or `"system"`.
    pub source: String,
    pub host: Option<String>,
    /// Country code from the event geolocation, when present.
    pub country: Option<String>,
    /// AI-generated description, the raw message, or `"No message available"`.
    pub message: String,
}

impl LogRow {
    /// The row's timestamp in the form JavaScript's `toISOString` produces
    /// (`2025-03-19T04:50:39.000Z`).
    pub fn iso_timestamp(&self) -> String {
        self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    /// The timestamp moved to the display offset and formatted with the
    /// strftime `format`. Offsets outside ±1 day fall back to UTC.
    pub fn display_timestamp(&self, utc_offset_minutes: i32, format: &str) -> String {
        match display_offset(utc_offset_minutes) {
            Some(offset) => self.timestamp.with_timezone(&offset).format(format).to_string(),
            None => self.timestamp.format(format).to_string(),
        }
    }

    /// All present field values joined with single spaces, in declaration
    /// order. This is the haystack the search filter matches against.
    pub fn search_text(&self) -> String {
        let timestamp = self.iso_timestamp();
        let parts = [
            Some(self.id.as_str()),
            Some(timestamp.as_str()),
            self.attacker_id.as_deref(),
            Some(self.source.as_str()),
            self.host.as_deref(),
            self.country.as_deref(),
            Some(self.message.as_str()),
        ];
        parts.into_iter().flatten().collect::<Vec<_>>().join(" ")
    }
}

/// `utc_offset_minutes` as a chrono offset, `None` when it is not within a day.
pub fn display_offset(utc_offset_minutes: i32) -> Option<FixedOffset> {
    utc_offset_minutes.checked_mul(60).and_then(FixedOffset::east_opt)
}

/// Number of log rows that fell into one minute of the day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeBucket {
    /// `HH:MM` after the display offset has been applied.
    pub label: String,
    /// UTC minute of the day (0..1440) before the display offset. Buckets are
    /// ordered by this value, never by `label`.
    pub minute: u16,
    pub count: usize,
}

/// Where the rows currently held by the store came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowOrigin {
    /// Normalised from a successful fetch.
    Live,
    /// Normalised from the injected fallback dataset after a failed fetch.
    Fallback,
}

impl std::fmt::Display for RowOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RowOrigin::Live => write!(f, "live"),
            RowOrigin::Fallback => write!(f, "fallback"),
        }
    }
}
