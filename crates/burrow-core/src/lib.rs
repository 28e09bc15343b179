//! burrow-core — the log ingestion and presentation pipeline.
//!
//! # Architecture
//!
//! ```text
//! LogSource ──► Orchestrator ──► Normalizer ──► LogStore ─┬─► Bucketer ──► Chart
//!                   │  (sort ascending)                   └─► Search ──► Pager ──► page
//!                   └── on error: fallback dataset
//! ```
//!
//! The fetch is the only asynchronous step. Everything after it is a
//! synchronous transformation over the in-memory rows of the latest fetch;
//! changing the search query never re-fetches.

pub mod bucket;
pub mod chart;
pub mod config;
pub mod error;
pub mod export;
pub mod fallback;
pub mod normalizer;
pub mod orchestrator;
pub mod paginate;
pub mod raw;
pub mod search;
pub mod store;
pub mod types;

pub use error::FetchError;
pub use orchestrator::{FetchPhase, LogSource, Orchestrator, Ticket};
pub use raw::RawLogRecord;
pub use store::LogStore;
pub use types::{LogRow, RowOrigin, TimeBucket};
