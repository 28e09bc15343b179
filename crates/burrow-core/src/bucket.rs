//! Time bucketer — per-minute row counts for the "Log Entries Over Time" chart.
//!
//! Rows are keyed by their UTC minute of the day. Buckets are ordered by that
//! pre-shift key and only then labelled with the display offset applied, so a
//! run of minutes that wraps past midnight once shifted (`04:50`, `05:03` at
//! −5 h → `23:50`, `00:03`) still reads in chronological order.

use crate::types::{LogRow, TimeBucket};
use chrono::Timelike;
use std::collections::BTreeMap;

pub const MINUTES_PER_DAY: i32 = 24 * 60;

/// Display offset used by the original dashboard: UTC−5.
pub const DEFAULT_UTC_OFFSET_MINUTES: i32 = -5 * 60;

/// Group `rows` into one bucket per distinct UTC minute of the day.
///
/// Rows from different days that share an `HH:MM` fall into the same bucket.
pub fn bucket(rows: &[LogRow], utc_offset_minutes: i32) -> Vec<TimeBucket> {
    let mut counts: BTreeMap<u16, usize> = BTreeMap::new();
    for row in rows {
        *counts.entry(minute_of_day(row)).or_default() += 1;
    }

    counts
        .into_iter()
        .map(|(minute, count)| TimeBucket {
            label: shifted_label(minute, utc_offset_minutes),
            minute,
            count,
        })
        .collect()
}

fn minute_of_day(row: &LogRow) -> u16 {
    let t = row.timestamp.time();
    // hour < 24 and minute < 60, so this is always < 1440
    (t.hour() * 60 + t.minute()) as u16
}

/// `HH:MM` for `minute` moved by `offset` minutes, wrapping within the day.
pub fn shifted_label(minute: u16, offset: i32) -> String {
    let shifted = (i32::from(minute) + offset.rem_euclid(MINUTES_PER_DAY)).rem_euclid(MINUTES_PER_DAY);
    format!("{:02}:{:02}", shifted / 60, shifted % 60)
}
