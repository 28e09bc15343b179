//! Search filter — case-insensitive substring match over a row's text.
//!
//! The query has no syntax: it is lower-cased and looked for verbatim in
//! [`LogRow::search_text`]. Filtering never touches the input slice.

use crate::types::LogRow;

/// Rows whose joined field text contains `query`, ignoring case.
///
/// An empty query returns every row unchanged.
pub fn filter(rows: &[LogRow], query: &str) -> Vec<LogRow> {
    if query.is_empty() {
        return rows.to_vec();
    }
    let needle = query.to_lowercase();
    rows.iter()
        .filter(|row| matches_lowercase(row, &needle))
        .cloned()
        .collect()
}

/// Whether `row` matches `query`, ignoring case.
pub fn matches(row: &LogRow, query: &str) -> bool {
    query.is_empty() || matches_lowercase(row, &query.to_lowercase())
}

fn matches_lowercase(row: &LogRow, needle: &str) -> bool {
    row.search_text().to_lowercase().contains(needle)
}
