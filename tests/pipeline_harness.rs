//! End-to-end pipeline harness: source → Orchestrator → LogStore → views.
//!
//! # What this covers
//!
//! - **Full scenario**: 20 sequential records, one carrying a Gemini
//!   description, fetched over HTTP from the fake backend; row count, page 1
//!   contents, the description as message, one chart point per minute.
//! - **Fallback**: a failing, malformed or hung backend yields the built-in
//!   sample rows without an error reaching the caller.
//! - **Midnight ordering**: bucket labels after the display shift stay in
//!   chronological order.
//! - **Search resets paging** and never re-fetches.
//! - **Stale results**: a superseded fetch cannot overwrite a newer one.
//!
//! # Running
//!
//! ```sh
//! cargo test --test pipeline_harness
//! ```

mod common;

use burrow_core::fallback::builtin_records;
use burrow_core::{FetchError, FetchPhase, LogStore, Orchestrator, RowOrigin};
use burrow_feeds::HttpLogSource;
use common::fake_log_api::FakeLogApi;
use common::*;
use pretty_assertions::assert_eq;
use std::time::Duration;

fn orchestrator() -> Orchestrator {
    Orchestrator::new(LogStore::default(), builtin_records())
}

async fn backend(status: u16, body: String) -> (FakeLogApi, HttpLogSource) {
    let api = FakeLogApi::start().await.unwrap();
    api.respond(status, body).await;
    let source = HttpLogSource::new(&api.base_url(), "/api/requestlogs").unwrap();
    (api, source)
}

// ---------------------------------------------------------------------------
// Live data
// ---------------------------------------------------------------------------

#[tokio::test]
async fn twenty_sequential_records_end_to_end() {
    let mut builders = sequential_builders(20);
    builders[13] = std::mem::take(&mut builders[13]).description("Suspicious login");
    let (api, source) = backend(200, envelope(&builders).to_string()).await;

    let mut orch = orchestrator();
    assert_eq!(orch.refresh(&source).await, Some(RowOrigin::Live));
    assert_eq!(api.requests().await, 1);

    let store = orch.store();
    assert_eq!(store.rows().len(), 20);
    assert_sorted_ascending!(store.rows());
    assert_ids!(store.page(), ["1", "2", "3", "4", "5", "6", "7", "8", "9", "10"]);
    assert_eq!(store.pager().label(), "Page 1 of 2");

    let described = store.rows().iter().find(|r| r.id == "14").unwrap();
    assert_eq!(described.message, "Suspicious login");

    let chart = store.chart();
    assert_eq!(chart.len(), 20);
    assert!(chart.iter().all(|p| p.count == 1));
    assert_eq!(chart[0].time, "23:50");
    assert_eq!(chart[19].time, "00:09");
}

#[tokio::test]
async fn search_filters_without_refetching() {
    let (api, source) = backend(200, envelope(&sequential_builders(40)).to_string()).await;
    let mut orch = orchestrator();
    orch.refresh(&source).await;

    orch.store_mut().goto_page(3);
    orch.store_mut().set_query("MYSQLD");
    let store = orch.store();
    assert_eq!(store.pager().current(), 1);
    assert_eq!(store.filtered().len(), 10);
    assert_all_match!(store.filtered(), "mysqld");
    assert_eq!(api.requests().await, 1);
}

// ---------------------------------------------------------------------------
// Fallback
// ---------------------------------------------------------------------------

#[tokio::test]
async fn server_error_installs_fallback() {
    let (_api, source) = backend(500, "boom".to_string()).await;
    let mut orch = orchestrator();
    assert_eq!(orch.refresh(&source).await, Some(RowOrigin::Fallback));
    assert_eq!(orch.store().rows().len(), 20);
    assert_eq!(orch.last_error(), Some(&FetchError::Status { status: 500 }));
    assert_eq!(orch.phase(), &FetchPhase::Normalized { origin: RowOrigin::Fallback });
}

#[tokio::test]
async fn malformed_body_installs_fallback() {
    let (_api, source) = backend(200, GARBAGE.to_string()).await;
    let mut orch = orchestrator();
    assert_eq!(orch.refresh(&source).await, Some(RowOrigin::Fallback));
    assert!(matches!(orch.last_error(), Some(FetchError::Decode(_))));
    assert!(!orch.store().rows().is_empty());
}

#[tokio::test]
async fn unreachable_backend_installs_fallback() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let source = HttpLogSource::new(&format!("http://{addr}"), "/api/requestlogs").unwrap();

    let mut orch = orchestrator();
    assert_eq!(orch.refresh(&source).await, Some(RowOrigin::Fallback));
    assert!(matches!(orch.last_error(), Some(FetchError::Transport(_))));
}

#[tokio::test]
async fn hung_backend_times_out_into_fallback() {
    let (api, source) = backend(200, envelope(&sequential_builders(3)).to_string()).await;
    api.delay(Duration::from_secs(5)).await;

    let mut orch = orchestrator().with_timeout(Duration::from_millis(100));
    assert_eq!(orch.refresh(&source).await, Some(RowOrigin::Fallback));
    assert_eq!(orch.last_error(), Some(&FetchError::Timeout(Duration::from_millis(100))));
}

#[tokio::test]
async fn injected_fallback_is_used() {
    let (_api, source) = backend(503, String::new()).await;
    let mut orch = Orchestrator::new(LogStore::default(), sequential_records(3));
    orch.refresh(&source).await;
    assert_ids!(orch.store().rows(), ["1", "2", "3"]);
}

// ---------------------------------------------------------------------------
// Ordering
// ---------------------------------------------------------------------------

#[test]
fn bucket_order_survives_midnight_shift() {
    let raws = vec![
        RawRecordBuilder::new().timestamp("2025-03-19T05:03:00Z").build(),
        RawRecordBuilder::new().timestamp("2025-03-19T04:50:00Z").build(),
        RawRecordBuilder::new().timestamp("2025-03-19T05:03:30Z").build(),
    ];
    let mut orch = orchestrator();
    let ticket = orch.begin();
    orch.complete(ticket, Ok(raws));
    assert_buckets!(orch.store().buckets(), [("23:50", 1), ("00:03", 2)]);
}

#[test]
fn superseded_result_is_dropped() {
    let mut orch = orchestrator();
    let first = orch.begin();
    let second = orch.begin();

    assert_eq!(orch.complete(second, Ok(sequential_records(2))), Some(RowOrigin::Live));
    assert_eq!(orch.complete(first, Ok(sequential_records(7))), None);
    assert_eq!(orch.store().rows().len(), 2);
}
