//! Built-in sample dataset shown when the live fetch fails.
//!
//! The samples are kept as raw records so they take the same normalisation
//! path as live data. Callers hand them to the orchestrator explicitly; tests
//! substitute their own.

use crate::raw::RawLogRecord;
use serde_json::json;

/// (log id, timestamp, source, host)
const SAMPLES: &[(&str, &str, &str, &str)] = &[
    ("1", "2025-03-19T04:50:39Z", "mysqld", "ubuntu-bionic"),
    ("2", "2025-03-19T04:52:10Z", "firewall", "ubuntu-bionic"),
    ("3", "2025-03-19T04:55:22Z", "auth", "ubuntu-bionic"),
    ("4", "2025-03-19T05:01:00Z", "syslog", "ubuntu-bionic"),
    ("5", "2025-03-19T05:03:15Z", "nginx", "web-server-01"),
];

const REPEATS: usize = 4;

/// The 20-record sample set: the five samples above, four times over.
pub fn builtin_records() -> Vec<RawLogRecord> {
    std::iter::repeat(SAMPLES)
        .take(REPEATS)
        .flatten()
        .map(|(id, ts, source, host)| {
            RawLogRecord::from_value(&json!({
                "log_id": id,
                "@timestamp": ts,
                "source": source,
                "host": host,
                "message": "test",
            }))
        })
        .collect()
}
