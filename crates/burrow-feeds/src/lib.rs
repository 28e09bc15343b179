//! burrow-feeds — log sources for burrow.
//!
//! Each source implements [`burrow_core::LogSource`]: one call to `fetch`
//! yields one batch of raw records. [`AnySource`] picks between them at
//! runtime from the CLI flags.

pub mod decode;
pub mod elastic;
pub mod file;
pub mod http;
mod transport;

pub use elastic::ElasticSource;
pub use file::{FileSource, FileWatch};
pub use http::HttpLogSource;

use burrow_core::{FetchError, LogSource, RawLogRecord};

#[derive(Clone)]
pub enum AnySource {
    Http(HttpLogSource),
    Elastic(ElasticSource),
    File(FileSource),
}

impl AnySource {
    /// The file source, when this is one; the only kind that can be watched.
    pub fn as_file(&self) -> Option<&FileSource> {
        match self {
            AnySource::File(source) => Some(source),
            _ => None,
        }
    }
}

impl LogSource for AnySource {
    fn describe(&self) -> String {
        match self {
            AnySource::Http(source) => source.describe(),
            AnySource::Elastic(source) => source.describe(),
            AnySource::File(source) => source.describe(),
        }
    }

    async fn fetch(&self) -> Result<Vec<RawLogRecord>, FetchError> {
        match self {
            AnySource::Http(source) => source.fetch().await,
            AnySource::Elastic(source) => source.fetch().await,
            AnySource::File(source) => source.fetch().await,
        }
    }
}

impl From<HttpLogSource> for AnySource {
    fn from(source: HttpLogSource) -> Self {
        AnySource::Http(source)
    }
}

impl From<ElasticSource> for AnySource {
    fn from(source: ElasticSource) -> Self {
        AnySource::Elastic(source)
    }
}

impl From<FileSource> for AnySource {
    fn from(source: FileSource) -> Self {
        AnySource::File(source)
    }
}
