//! Data models for player API testing
//!
//! This module contains all data structures used throughout the application.

mod player;
mod test_result;

pub use player::{Editor, PlayerPayload, PLAYER_FIELDS};
pub use test_result::{Scenario, TestResult, TestRunSummary, TestStatus};
