//! Fetch errors.
//!
//! Every variant is recoverable: the orchestrator logs it and substitutes the
//! fallback dataset. The type is `Clone` so it can travel through the TUI's
//! result channel.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The configured endpoint could not be turned into a request URI.
    #[error("invalid endpoint {endpoint:?}: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    /// Connection refused, reset, DNS failure, …
    #[error("transport error: {0}")]
    Transport(String),

    /// The backend answered with a non-2xx status.
    #[error("backend responded with HTTP {status}")]
    Status { status: u16 },

    /// The body was not JSON, or not the expected shape.
    #[error("malformed response body: {0}")]
    Decode(String),

    #[error("fetch timed out after {0:?}")]
    Timeout(Duration),

    #[error("could not read {path}: {reason}")]
    Io { path: PathBuf, reason: String },

    /// A newer refresh superseded this fetch before it finished.
    #[error("fetch cancelled")]
    Cancelled,
}
