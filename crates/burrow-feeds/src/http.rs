//! Backend proxy source — `GET {base_url}{logs_path}` returning
//! `{ "message": [ ... ] }`.

use crate::decode::decode_envelope;
use crate::transport::{join, parse_endpoint, Transport};
use burrow_core::{FetchError, LogSource, RawLogRecord};
use bytes::Bytes;
use http_body_util::Full;
use hyper::{header, Method, Request, Uri};

#[derive(Clone)]
pub struct HttpLogSource {
    uri: Uri,
    transport: Transport,
}

impl HttpLogSource {
    /// Build a source for `base_url` + `logs_path`. Fails only when the two
    /// do not form a valid `http://` URI.
    pub fn new(base_url: &str, logs_path: &str) -> Result<Self, FetchError> {
        let uri = parse_endpoint(&join(base_url, logs_path))?;
        Ok(Self {
            uri,
            transport: Transport::new(),
        })
    }

    pub fn uri(&self) -> &Uri {
        &self.uri
    }
}

impl LogSource for HttpLogSource {
    fn describe(&self) -> String {
        self.uri.to_string()
    }

    async fn fetch(&self) -> Result<Vec<RawLogRecord>, FetchError> {
        let request = Request::builder()
            .method(Method::GET)
            .uri(self.uri.clone())
            .header(header::ACCEPT, "application/json")
            .body(Full::new(Bytes::new()))
            .map_err(|e| FetchError::InvalidEndpoint {
                endpoint: self.uri.to_string(),
                reason: e.to_string(),
            })?;

        let body = self.transport.execute(request).await?;
        let records = decode_envelope(&body)?;
        tracing::debug!(uri = %self.uri, records = records.len(), "http: fetched");
        Ok(records)
    }
}
