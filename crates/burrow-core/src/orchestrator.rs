//! Orchestrator — fetch → normalise → sort → store, one cycle per refresh.
//!
//! # Lifecycle
//!
//! ```text
//! Idle ──begin()──► Fetching{g} ──complete(Ok)──► Normalized{Live}
//!                       │
//!                       └──complete(Err)──► Normalized{Fallback}
//! ```
//!
//! `Normalized` is terminal until the next [`Orchestrator::begin`]. Every
//! `begin` bumps a generation counter and hands out a [`Ticket`]; a result
//! carrying an older ticket is dropped, so the last *issued* request wins
//! regardless of completion order.
//!
//! Fetch failures never reach the caller. They are logged at `warn` and the
//! injected fallback dataset is normalised in place of the live data.

use crate::error::FetchError;
use crate::normalizer::normalize_batch;
use crate::raw::RawLogRecord;
use crate::store::LogStore;
use crate::types::RowOrigin;
use chrono::{DateTime, Utc};
use std::future::Future;
use std::time::Duration;

/// Upper bound on a single fetch unless configured otherwise.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

// ---------------------------------------------------------------------------
// Source seam
// ---------------------------------------------------------------------------

/// Anything that can produce a batch of raw records.
pub trait LogSource: Send + Sync {
    /// Short human-readable description for the status line and logs.
    fn describe(&self) -> String;

    fn fetch(&self) -> impl Future<Output = Result<Vec<RawLogRecord>, FetchError>> + Send;
}

/// Run `source.fetch()` with an upper bound on its duration.
pub async fn fetch_with_timeout<S: LogSource>(
    source: &S,
    timeout: Duration,
) -> Result<Vec<RawLogRecord>, FetchError> {
    match tokio::time::timeout(timeout, source.fetch()).await {
        Ok(result) => result,
        Err(_) => Err(FetchError::Timeout(timeout)),
    }
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// Identifies one fetch cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket {
    generation: u64,
}

impl Ticket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchPhase {
    Idle,
    Fetching { generation: u64 },
    Normalized { origin: RowOrigin },
}

impl FetchPhase {
    pub fn is_fetching(&self) -> bool {
        matches!(self, FetchPhase::Fetching { .. })
    }
}

pub struct Orchestrator {
    store: LogStore,
    fallback: Vec<RawLogRecord>,
    timeout: Duration,
    generation: u64,
    phase: FetchPhase,
    last_error: Option<FetchError>,
}

impl Orchestrator {
    /// `fallback` is normalised whenever a fetch fails.
    pub fn new(store: LogStore, fallback: Vec<RawLogRecord>) -> Self {
        Self {
            store,
            fallback,
            timeout: DEFAULT_FETCH_TIMEOUT,
            generation: 0,
            phase: FetchPhase::Idle,
            last_error: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Enter `Fetching` and issue a ticket that supersedes every earlier one.
    pub fn begin(&mut self) -> Ticket {
        self.generation += 1;
        self.phase = FetchPhase::Fetching {
            generation: self.generation,
        };
        tracing::debug!(generation = self.generation, "orchestrator: fetch started");
        Ticket {
            generation: self.generation,
        }
    }

    /// Whether `ticket` belongs to the most recent `begin`.
    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.generation == self.generation
    }

    /// Install the result of the fetch identified by `ticket`.
    ///
    /// Returns the origin of the installed rows, or `None` when the ticket
    /// was superseded and the result dropped.
    pub fn complete(
        &mut self,
        ticket: Ticket,
        result: Result<Vec<RawLogRecord>, FetchError>,
    ) -> Option<RowOrigin> {
        self.complete_at(ticket, result, Utc::now())
    }

    /// [`complete`](Self::complete) with an explicit timestamp fallback.
    pub fn complete_at(
        &mut self,
        ticket: Ticket,
        result: Result<Vec<RawLogRecord>, FetchError>,
        now: DateTime<Utc>,
    ) -> Option<RowOrigin> {
        if !self.is_current(ticket) {
            tracing::debug!(
                stale = ticket.generation,
                current = self.generation,
                "orchestrator: dropping superseded result"
            );
            return None;
        }

        let origin = match result {
            Ok(records) => {
                self.last_error = None;
                self.store.replace(normalize_batch(&records, now));
                RowOrigin::Live
            }
            Err(err) => {
                tracing::warn!(error = %err, "log fetch failed; showing fallback dataset");
                self.last_error = Some(err);
                self.store.replace(normalize_batch(&self.fallback, now));
                RowOrigin::Fallback
            }
        };

        self.phase = FetchPhase::Normalized { origin };
        tracing::debug!(
            generation = ticket.generation,
            %origin,
            rows = self.store.rows().len(),
            "orchestrator: rows installed"
        );
        Some(origin)
    }

    /// One complete cycle against `source`.
    pub async fn refresh<S: LogSource>(&mut self, source: &S) -> Option<RowOrigin> {
        let ticket = self.begin();
        let result = fetch_with_timeout(source, self.timeout).await;
        self.complete(ticket, result)
    }

    pub fn phase(&self) -> &FetchPhase {
        &self.phase
    }

    /// The error behind the current fallback rows, if any. Not shown to the
    /// user; kept for diagnostics.
    pub fn last_error(&self) -> Option<&FetchError> {
        self.last_error.as_ref()
    }

    pub fn store(&self) -> &LogStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut LogStore {
        &mut self.store
    }
}
