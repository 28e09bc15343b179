//! Elasticsearch source — `POST {url}/{index}/_search` with a `match_all`
//! query, records taken from `hits.hits[]._source`.
//!
//! This is the query the backend proxy runs on the dashboard's behalf; going
//! direct skips the proxy when it is not deployed.

use crate::decode::decode_search_hits;
use crate::transport::{join, parse_endpoint, Transport};
use burrow_core::{FetchError, LogSource, RawLogRecord};
use bytes::Bytes;
use http_body_util::Full;
use hyper::{header, Method, Request, Uri};
use serde_json::json;

pub const DEFAULT_INDEX: &str = "attacker_logs";
pub const DEFAULT_SIZE: usize = 100;

#[derive(Clone)]
pub struct ElasticSource {
    uri: Uri,
    index: String,
    size: usize,
    transport: Transport,
}

impl ElasticSource {
    pub fn new(url: &str, index: &str, size: usize) -> Result<Self, FetchError> {
        let uri = parse_endpoint(&join(url, &format!("{index}/_search")))?;
        Ok(Self {
            uri,
            index: index.to_string(),
            size,
            transport: Transport::new(),
        })
    }

    pub fn index(&self) -> &str {
        &self.index
    }

    fn query_body(&self) -> Bytes {
        let query = json!({
            "size": self.size,
            "query": { "match_all": {} },
        });
        Bytes::from(query.to_string())
    }
}

impl LogSource for ElasticSource {
    fn describe(&self) -> String {
        format!("elasticsearch {} (index {})", self.uri, self.index)
    }

    async fn fetch(&self) -> Result<Vec<RawLogRecord>, FetchError> {
        let request = Request::builder()
            .method(Method::POST)
            .uri(self.uri.clone())
            .header(header::ACCEPT, "application/json")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Full::new(self.query_body()))
            .map_err(|e| FetchError::InvalidEndpoint {
                endpoint: self.uri.to_string(),
                reason: e.to_string(),
            })?;

        let body = self.transport.execute(request).await?;
        let records = decode_search_hits(&body)?;
        tracing::debug!(index = %self.index, records = records.len(), "elastic: fetched");
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::Value;

    #[test]
    fn search_uri_includes_index() {
        let source = ElasticSource::new("http://localhost:9200", DEFAULT_INDEX, DEFAULT_SIZE).unwrap();
        assert_eq!(source.uri.path(), "/attacker_logs/_search");
    }

    #[test]
    fn query_is_sized_match_all() {
        let source = ElasticSource::new("http://localhost:9200", "honeypot", 25).unwrap();
        let body: Value = serde_json::from_slice(&source.query_body()).unwrap();
        assert_eq!(body["size"], 25);
        assert!(body["query"]["match_all"].is_object());
    }
}
