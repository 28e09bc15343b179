//! Shared HTTP plumbing for the network sources.
//!
//! One pooled `hyper-util` client per source. Plain `http://` only; the
//! dashboard talks to a local proxy or an in-cluster Elasticsearch.

use burrow_core::FetchError;
use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::{Request, Uri};
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;

#[derive(Clone)]
pub(crate) struct Transport {
    client: Client<HttpConnector, Full<Bytes>>,
}

impl Transport {
    pub(crate) fn new() -> Self {
        Self {
            client: Client::builder(TokioExecutor::new()).build_http(),
        }
    }

    /// Send `request` and return the body of a 2xx response.
    pub(crate) async fn execute(&self, request: Request<Full<Bytes>>) -> Result<Bytes, FetchError> {
        let uri = request.uri().clone();
        let response = self
            .client
            .request(request)
            .await
            .map_err(|e| FetchError::Transport(format!("{uri}: {e}")))?;

        let status = response.status();
        tracing::debug!(%uri, %status, "http: response");
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let body = response
            .into_body()
            .collect()
            .await
            .map_err(|e| FetchError::Transport(format!("{uri}: reading body: {e}")))?;
        Ok(body.to_bytes())
    }
}

/// Parse `endpoint` into an absolute `http://` URI.
pub(crate) fn parse_endpoint(endpoint: &str) -> Result<Uri, FetchError> {
    let invalid = |reason: String| FetchError::InvalidEndpoint {
        endpoint: endpoint.to_string(),
        reason,
    };
    let uri = endpoint
        .parse::<Uri>()
        .map_err(|e| invalid(e.to_string()))?;
    match uri.scheme_str() {
        Some("http") => {}
        Some(other) => return Err(invalid(format!("unsupported scheme {other:?}, use http://"))),
        None => return Err(invalid("missing scheme, expected http://host[:port]".to_string())),
    }
    if uri.host().is_none() {
        return Err(invalid("missing host".to_string()));
    }
    Ok(uri)
}

/// Join a base URL and a path with exactly one `/` between them.
pub(crate) fn join(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}
