//! HTTP exchange module
//!
//! Provides the request/response plumbing used by every scenario.

mod client;

pub use client::{HttpClient, HttpError, HttpRequest, HttpResponse, JSON_CONTENT_TYPE};
