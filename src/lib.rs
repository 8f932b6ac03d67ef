//! Player API test suite
//!
//! Exercises the CRUD endpoints of the player management API: create, read,
//! update, delete and list. Each scenario sends one request, judges one
//! response, logs the outcome and reports an explicit pass, fail or error.

pub mod assertions;
pub mod cli;
pub mod config;
pub mod executor;
pub mod http;
pub mod models;
pub mod output;
pub mod scenarios;
pub mod utils;

pub use config::TestConfig;
pub use executor::{ParallelExecutor, TestRunner};
pub use models::{Scenario, TestResult, TestRunSummary, TestStatus};
