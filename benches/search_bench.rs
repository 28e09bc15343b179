//! Search, pagination and bucketing benchmarks.
//!
//! Typing in the search bar re-filters on every keystroke, so `filter` plus
//! the pager reset must stay well under a frame.
//!
//! # Groups
//!
//! | Group | What it measures |
//! |-------|-----------------|
//! | `filter` | Substring filter: empty, rare, common and no-match queries |
//! | `store` | `LogStore::set_query` (filter + pager reset) and `replace` (with bucketing) |
//!
//! # Viewing results
//!
//! ```sh
//! cargo bench --bench search_bench
//! ```

use burrow_core::normalizer::normalize_batch;
use burrow_core::search::filter;
use burrow_core::{LogRow, LogStore, RawLogRecord};
use chrono::{Duration, TimeZone, Utc};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use serde_json::json;
use std::hint::black_box;

const SOURCES: &[&str] = &["sshd", "nginx", "mysqld", "firewall", "auth", "syslog"];

fn corpus(n: usize) -> Vec<LogRow> {
    let start = Utc.with_ymd_and_hms(2025, 3, 19, 4, 0, 0).unwrap();
    let raws: Vec<RawLogRecord> = (0..n)
        .map(|i| {
            RawLogRecord::from_value(&json!({
                "log_id": i,
                "@timestamp": (start + Duration::seconds(i as i64 * 7)).to_rfc3339(),
                "source": SOURCES[i % SOURCES.len()],
                "message": if i % 97 == 0 { "Suspicious login from TOR exit" } else { "Failed password for root" },
            }))
        })
        .collect();
    normalize_batch(&raws, start)
}

// ---------------------------------------------------------------------------
// Filter
// ---------------------------------------------------------------------------

fn filter_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter");
    let rows = corpus(10_000);
    group.throughput(Throughput::Elements(rows.len() as u64));

    for (name, query) in [
        ("empty", ""),
        ("rare", "tor exit"),
        ("common", "password"),
        ("no_match", "kerberos"),
    ] {
        group.bench_with_input(BenchmarkId::new(name, query), &query, |b, query| {
            b.iter(|| black_box(filter(black_box(&rows), query)))
        });
    }

    group.finish();
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

fn store_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("store");

    for size in [1_000usize, 10_000] {
        let rows = corpus(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("replace", size), &rows, |b, rows| {
            b.iter_batched(
                || rows.clone(),
                |rows| {
                    let mut store = LogStore::default();
                    store.replace(rows);
                    black_box(store.buckets().len())
                },
                criterion::BatchSize::LargeInput,
            )
        });

        let mut store = LogStore::default();
        store.replace(rows);
        let mut flip = false;
        group.bench_function(BenchmarkId::new("set_query", size), |b| {
            b.iter(|| {
                // Alternate so every call actually re-filters.
                flip = !flip;
                store.set_query(if flip { "sshd" } else { "nginx" });
                black_box(store.page().len())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, filter_bench, store_bench);
criterion_main!(benches);
