//! Fake log backend for integration tests.
//!
//! Spins up a minimal `axum` HTTP server on a random TCP port bound to
//! 127.0.0.1. Serves:
//! - `GET /api/requestlogs` — the proxy envelope, or whatever body and
//!   status the test configured
//! - `POST /{index}/_search` — an Elasticsearch-style hits response
//!
//! Every request is counted, and the last search body is kept so tests can
//! check what the client sent.
//!
//! # Example
//!
//! ```rust,no_run
//! let api = FakeLogApi::start().await.unwrap();
//! api.respond(200, envelope(&sequential_builders(3)).to_string()).await;
//! let source = HttpLogSource::new(&api.base_url(), "/api/requestlogs").unwrap();
//! ```

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

struct ApiState {
    status: u16,
    body: String,
    delay: Duration,
    requests: usize,
    last_search: Option<(String, serde_json::Value)>,
}

impl Default for ApiState {
    fn default() -> Self {
        Self {
            status: 200,
            body: r#"{"message": []}"#.to_string(),
            delay: Duration::ZERO,
            requests: 0,
            last_search: None,
        }
    }
}

/// Handle to the running fake backend.
pub struct FakeLogApi {
    addr: SocketAddr,
    state: Arc<Mutex<ApiState>>,
}

impl FakeLogApi {
    /// Start the server on a random port. Returns once it is listening.
    pub async fn start() -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let state = Arc::new(Mutex::new(ApiState::default()));

        let app = Router::new()
            .route("/api/requestlogs", get(request_logs))
            .route("/{index}/_search", post(search))
            .with_state(state.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Ok(Self { addr, state })
    }

    /// Base URL for the API (e.g. `http://127.0.0.1:PORT`).
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Serve `body` with `status` from now on.
    pub async fn respond(&self, status: u16, body: impl Into<String>) {
        let mut state = self.state.lock().await;
        state.status = status;
        state.body = body.into();
    }

    /// Hold every response for `delay` before answering.
    pub async fn delay(&self, delay: Duration) {
        self.state.lock().await.delay = delay;
    }

    pub async fn requests(&self) -> usize {
        self.state.lock().await.requests
    }

    /// Index and JSON body of the most recent `_search` request.
    pub async fn last_search(&self) -> Option<(String, serde_json::Value)> {
        self.state.lock().await.last_search.clone()
    }
}

async fn reply(state: &Mutex<ApiState>) -> impl IntoResponse {
    let (status, body, delay) = {
        let mut state = state.lock().await;
        state.requests += 1;
        (state.status, state.body.clone(), state.delay)
    };
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, [("content-type", "application/json")], body)
}

async fn request_logs(State(state): State<Arc<Mutex<ApiState>>>) -> impl IntoResponse {
    reply(&state).await
}

async fn search(
    State(state): State<Arc<Mutex<ApiState>>>,
    Path(index): Path<String>,
    body: Bytes,
) -> impl IntoResponse {
    let parsed = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    state.lock().await.last_search = Some((index, parsed));
    reply(&state).await
}
