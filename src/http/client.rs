//! HTTP client for player API testing
//!
//! Sends one request per call and hands back the status code and body text.
//! Transport failures come back as typed [`HttpError`] values so scenarios
//! can report them instead of swallowing them.

use reqwest::{header::CONTENT_TYPE, Client, Method};
use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use std::time::Instant;
use thiserror::Error;
use tracing::debug;

/// Content type used for every request body
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// HTTP client errors
#[derive(Error, Debug)]
pub enum HttpError {
    #[error("Failed to create HTTP client: {0}")]
    Client(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Timed out waiting for {0}")]
    Timeout(String),

    #[error("Failed to connect to {url}: {reason}")]
    Connect { url: String, reason: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid HTTP method: {0}")]
    InvalidMethod(String),

    #[error("Failed to read response body: {0}")]
    Body(String),

    #[error("Failed to serialize request body: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// HTTP client bound to the base URL of the application under test
#[derive(Clone, Debug)]
pub struct HttpClient {
    client: Client,
    base_url: String,
}

impl HttpClient {
    /// Create a new HTTP client.
    ///
    /// No request timeout is set; the transport defaults apply.
    pub fn new(base_url: impl Into<String>) -> Result<Self, HttpError> {
        let client = Client::builder()
            .build()
            .map_err(|e| HttpError::Client(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build full URL
    pub fn build_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}{}", self.base_url.trim_end_matches('/'), path)
        }
    }

    /// Send HTTP request.
    ///
    /// The body, when present, is written in full before the response is read.
    pub async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, HttpError> {
        let url = self.build_url(&request.path);
        debug!("Sending {} request to {}", request.method, url);

        let method = Method::from_bytes(request.method.as_bytes())
            .map_err(|_| HttpError::InvalidMethod(request.method.clone()))?;
        let parsed_url =
            reqwest::Url::parse(&url).map_err(|e| HttpError::InvalidUrl(format!("{url}: {e}")))?;

        let mut req_builder = self.client.request(method, parsed_url);

        if let Some(body) = &request.body {
            req_builder = req_builder
                .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
                .body(body.clone());
        }

        let start = Instant::now();

        let response = req_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                HttpError::Timeout(url.clone())
            } else if e.is_connect() {
                HttpError::Connect {
                    url: url.clone(),
                    reason: underlying_cause(&e),
                }
            } else {
                HttpError::RequestFailed(e.to_string())
            }
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| HttpError::Body(e.to_string()))?;
        let duration_ms = start.elapsed().as_millis() as u64;

        debug!(
            "Response: {} {} in {}ms",
            status.as_u16(),
            status.canonical_reason().unwrap_or(""),
            duration_ms
        );

        Ok(HttpResponse {
            status_code: status.as_u16(),
            body,
            duration_ms,
        })
    }
}

/// Causes beneath a reqwest error (refused, DNS lookup, TLS), outermost first
fn underlying_cause(err: &reqwest::Error) -> String {
    let mut causes = Vec::new();
    let mut source = StdError::source(err);
    while let Some(cause) = source {
        causes.push(cause.to_string());
        source = StdError::source(cause);
    }

    if causes.is_empty() {
        err.to_string()
    } else {
        causes.join(": ")
    }
}

/// Request descriptor: method, path relative to the base URL, optional JSON body
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: String,
    pub path: String,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new("GET", path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new("POST", path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new("PATCH", path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new("DELETE", path)
    }

    /// Attach a JSON body serialized from `payload`
    pub fn json<T: Serialize>(mut self, payload: &T) -> Result<Self, HttpError> {
        self.body = Some(serde_json::to_string(payload)?);
        Ok(self)
    }
}

/// HTTP response
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HttpResponse {
    pub status_code: u16,
    pub body: String,
    pub duration_ms: u64,
}
