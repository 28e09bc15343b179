//! Domain-specific assertion macros for burrow harnesses.
//!
//! These wrap `pretty_assertions` and add context-rich failure messages that
//! make it clear which pipeline property was violated.

/// Assert that rows are in non-decreasing timestamp order.
#[macro_export]
macro_rules! assert_sorted_ascending {
    ($rows:expr) => {{
        let rows: &[burrow_core::LogRow] = &$rows;
        for (i, pair) in rows.windows(2).enumerate() {
            if pair[0].timestamp > pair[1].timestamp {
                panic!(
                    "assert_sorted_ascending! failed at index {}:\n  {} ({})\n  > {} ({})",
                    i, pair[0].timestamp, pair[0].id, pair[1].timestamp, pair[1].id
                );
            }
        }
    }};
}

/// Assert the ids of `rows`, in order.
///
/// ```rust
/// assert_ids!(store.page(), ["1", "2", "3"]);
/// ```
#[macro_export]
macro_rules! assert_ids {
    ($rows:expr, [$($id:expr),* $(,)?]) => {{
        let rows: &[burrow_core::LogRow] = &$rows;
        let actual: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
        let expected: Vec<&str> = vec![$($id),*];
        pretty_assertions::assert_eq!(actual, expected, "row ids differ");
    }};
}

/// Assert that every row's search text contains `query`, ignoring case.
#[macro_export]
macro_rules! assert_all_match {
    ($rows:expr, $query:expr) => {{
        let rows: &[burrow_core::LogRow] = &$rows;
        let needle = $query.to_lowercase();
        for row in rows {
            let text = row.search_text().to_lowercase();
            if !text.contains(&needle) {
                panic!(
                    "assert_all_match! failed: row {} does not contain {:?}\n  text: {:?}",
                    row.id, needle, text
                );
            }
        }
    }};
}

/// Assert bucket labels and counts, in emitted order.
///
/// ```rust
/// assert_buckets!(store.buckets(), [("23:50", 1), ("00:03", 2)]);
/// ```
#[macro_export]
macro_rules! assert_buckets {
    ($buckets:expr, [$(($label:expr, $count:expr)),* $(,)?]) => {{
        let buckets: &[burrow_core::TimeBucket] = &$buckets;
        let actual: Vec<(&str, usize)> =
            buckets.iter().map(|b| (b.label.as_str(), b.count)).collect();
        let expected: Vec<(&str, usize)> = vec![$(($label, $count)),*];
        pretty_assertions::assert_eq!(actual, expected, "buckets differ");
    }};
}
