//! Chart adapter — turns buckets and rows into the series the dashboard draws.
//!
//! Two series are produced: the per-minute bar chart ([`series`]) and the
//! attacker-country ranking ([`top_countries`]), whose counts are banded into
//! a [`Heat`] level for colouring.

use crate::types::{LogRow, TimeBucket};
use serde::Serialize;
use std::collections::HashMap;

/// Countries shown in the ranking panel unless configured otherwise.
pub const DEFAULT_TOP_COUNTRIES: usize = 5;

/// One bar of the "Log Entries Over Time" chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartPoint {
    pub time: String,
    pub count: u64,
}

/// Build the bar-chart point series. Order is preserved from `buckets`.
pub fn series(buckets: &[TimeBucket]) -> Vec<ChartPoint> {
    buckets
        .iter()
        .map(|b| ChartPoint {
            time: b.label.clone(),
            count: b.count as u64,
        })
        .collect()
}

/// Number of rows attributed to one country code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryCount {
    pub code: String,
    pub count: u64,
}

impl CountryCount {
    pub fn heat(&self) -> Heat {
        Heat::from_count(self.count)
    }
}

/// Count rows per (upper-cased) country code. Rows without a country are skipped.
pub fn country_counts(rows: &[LogRow]) -> HashMap<String, u64> {
    let mut counts: HashMap<String, u64> = HashMap::new();
    for country in rows.iter().filter_map(|r| r.country.as_deref()) {
        *counts.entry(country.trim().to_uppercase()).or_default() += 1;
    }
    counts
}

/// The `n` countries with the most rows, highest first; ties break on code.
pub fn top_countries(rows: &[LogRow], n: usize) -> Vec<CountryCount> {
    let mut ranked: Vec<CountryCount> = country_counts(rows)
        .into_iter()
        .map(|(code, count)| CountryCount { code, count })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.code.cmp(&b.code)));
    ranked.truncate(n);
    ranked
}

/// Colour band for an attacker count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Heat {
    /// 0
    None,
    /// 1–2
    Low,
    /// 3–10
    Moderate,
    /// 11–20
    High,
    /// 21 and above
    Severe,
}

impl Heat {
    pub fn from_count(count: u64) -> Self {
        match count {
            0 => Heat::None,
            1..=2 => Heat::Low,
            3..=10 => Heat::Moderate,
            11..=20 => Heat::High,
            _ => Heat::Severe,
        }
    }
}
