//! Stub player API for end-to-end scenario tests
//!
//! Every request gets the same canned status and body; requests are
//! recorded so tests can check what the scenarios sent.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::Router;
use player_api_tests::config::{TestConfig, APP_URL_KEY, THREAD_COUNT_KEY};
use player_api_tests::http::HttpClient;
use player_api_tests::models::{Scenario, TestResult};
use player_api_tests::scenarios::{self, ScenarioContext};
use tokio::task::JoinHandle;

pub const FULL_PLAYER: &str = r#"{"age":1,"gender":"m","id":1,"role":"user","screenName":"x"}"#;

/// A request as seen by the stub
#[derive(Clone, Debug)]
pub struct RecordedRequest {
    pub method: String,
    pub path_and_query: String,
    pub content_type: Option<String>,
    pub body: String,
}

#[derive(Clone)]
struct StubState {
    status: StatusCode,
    body: String,
    delay: Duration,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

async fn respond(
    State(state): State<StubState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> impl IntoResponse {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    state.requests.lock().unwrap().push(RecordedRequest {
        method: method.to_string(),
        path_and_query: uri
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_else(|| uri.path().to_string()),
        content_type,
        body,
    });

    if !state.delay.is_zero() {
        tokio::time::sleep(state.delay).await;
    }

    (
        state.status,
        [(header::CONTENT_TYPE, "application/json")],
        state.body.clone(),
    )
}

/// Stub server bound to an ephemeral port
pub struct StubServer {
    pub addr: SocketAddr,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    _handle: JoinHandle<()>,
}

impl StubServer {
    /// Start a stub answering every request with `status` and `body`
    pub async fn start(status: u16, body: impl Into<String>) -> Self {
        Self::start_delayed(status, body, Duration::ZERO).await
    }

    /// Like [`StubServer::start`], holding every response for `delay`
    pub async fn start_delayed(status: u16, body: impl Into<String>, delay: Duration) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));

        let state = StubState {
            status: StatusCode::from_u16(status).unwrap(),
            body: body.into(),
            delay,
            requests: requests.clone(),
        };
        let app = Router::new().fallback(respond).with_state(state);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            requests,
            _handle: handle,
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Configuration pointing at this stub
    pub fn config(&self, threads: u32) -> Arc<TestConfig> {
        Arc::new(
            TestConfig::new()
                .with_override(APP_URL_KEY, self.url())
                .with_override(THREAD_COUNT_KEY, threads.to_string()),
        )
    }

    /// Run one scenario against this stub as worker 1
    pub async fn run(&self, scenario: Scenario) -> TestResult {
        let ctx = ScenarioContext::new(HttpClient::new(self.url()).unwrap(), 1);
        scenarios::run_scenario(scenario, &ctx).await
    }
}

/// URL on which nothing is listening
pub fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}
