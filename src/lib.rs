//! burrow — terminal dashboard for honeypot security-event logs.
//!
//! The binary is a thin shell over the workspace crates; this library
//! re-exports them so integration tests and benches can reach every layer
//! through one path.
//!
//! # Architecture
//!
//! ```text
//! burrow-feeds ──► burrow-core ──► burrow-tui
//!  (LogSource)    (Orchestrator,    (dashboard)
//!                  Normalizer,  └──► headless (stdout)
//!                  Store, ...)
//! ```

pub mod headless;

pub use burrow_core as core;
pub use burrow_feeds as feeds;

pub use burrow_core::{
    FetchError, FetchPhase, LogRow, LogSource, LogStore, Orchestrator, RawLogRecord, RowOrigin,
    Ticket, TimeBucket,
};
pub use burrow_feeds::{AnySource, ElasticSource, FileSource, HttpLogSource};
