//! Test result models for player API testing
//!
//! Defines the scenario catalogue, results, and status types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// All 10 scenarios exercised against the player API
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    // Create (1-2)
    CreateValidPlayer,
    CreateInvalidPlayer,

    // Read (3-6)
    GetAllPlayers,
    GetAllPlayersInvalidMethod,
    GetPlayerById,
    GetPlayerInvalidId,

    // Delete (7-8)
    DeletePlayer,
    DeletePlayerInvalidId,

    // Update (9-10)
    UpdatePlayer,
    UpdatePlayerInvalidId,
}

impl Scenario {
    /// Get scenario number (1-10)
    pub fn number(&self) -> u8 {
        match self {
            Scenario::CreateValidPlayer => 1,
            Scenario::CreateInvalidPlayer => 2,
            Scenario::GetAllPlayers => 3,
            Scenario::GetAllPlayersInvalidMethod => 4,
            Scenario::GetPlayerById => 5,
            Scenario::GetPlayerInvalidId => 6,
            Scenario::DeletePlayer => 7,
            Scenario::DeletePlayerInvalidId => 8,
            Scenario::UpdatePlayer => 9,
            Scenario::UpdatePlayerInvalidId => 10,
        }
    }

    /// Get scenario name
    pub fn name(&self) -> &'static str {
        match self {
            Scenario::CreateValidPlayer => "Create Valid Player",
            Scenario::CreateInvalidPlayer => "Create Invalid Player",
            Scenario::GetAllPlayers => "Get All Players",
            Scenario::GetAllPlayersInvalidMethod => "Get All (Wrong Method)",
            Scenario::GetPlayerById => "Get Player By Id",
            Scenario::GetPlayerInvalidId => "Get Player Invalid Id",
            Scenario::DeletePlayer => "Delete Player",
            Scenario::DeletePlayerInvalidId => "Delete Player Invalid Id",
            Scenario::UpdatePlayer => "Update Player",
            Scenario::UpdatePlayerInvalidId => "Update Player Invalid Id",
        }
    }

    /// Get scenario category
    pub fn category(&self) -> &'static str {
        match self {
            Scenario::CreateValidPlayer | Scenario::CreateInvalidPlayer => "Create",
            Scenario::DeletePlayer | Scenario::DeletePlayerInvalidId => "Delete",
            Scenario::UpdatePlayer | Scenario::UpdatePlayerInvalidId => "Update",
            _ => "Read",
        }
    }

    /// Get all scenarios
    pub fn all() -> Vec<Scenario> {
        vec![
            Scenario::CreateValidPlayer,
            Scenario::CreateInvalidPlayer,
            Scenario::GetAllPlayers,
            Scenario::GetAllPlayersInvalidMethod,
            Scenario::GetPlayerById,
            Scenario::GetPlayerInvalidId,
            Scenario::DeletePlayer,
            Scenario::DeletePlayerInvalidId,
            Scenario::UpdatePlayer,
            Scenario::UpdatePlayerInvalidId,
        ]
    }

    /// Parse from scenario number
    pub fn from_number(n: u8) -> Option<Scenario> {
        Self::all().into_iter().find(|s| s.number() == n)
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Scenario {}: {}", self.number(), self.name())
    }
}

/// Scenario execution status
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    Pass,
    Fail,
    Skip,
    Error,
}

impl TestStatus {
    pub fn symbol(&self) -> &'static str {
        match self {
            TestStatus::Pass => "✓",
            TestStatus::Fail => "✗",
            TestStatus::Skip => "○",
            TestStatus::Error => "!",
        }
    }

    /// Whether this status counts against the run
    pub fn is_failure(&self) -> bool {
        matches!(self, TestStatus::Fail | TestStatus::Error)
    }
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestStatus::Pass => write!(f, "PASS"),
            TestStatus::Fail => write!(f, "FAIL"),
            TestStatus::Skip => write!(f, "SKIP"),
            TestStatus::Error => write!(f, "ERROR"),
        }
    }
}

/// Result of a single scenario execution
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TestResult {
    pub scenario: Scenario,
    pub status: TestStatus,
    pub duration_ms: u64,
    /// Cosmetic worker slot the scenario ran on
    pub worker: u32,
    pub message: Option<String>,
}

impl TestResult {
    pub fn pass(scenario: Scenario, duration_ms: u64) -> Self {
        Self {
            scenario,
            status: TestStatus::Pass,
            duration_ms,
            worker: 0,
            message: None,
        }
    }

    pub fn fail(scenario: Scenario, duration_ms: u64, message: impl Into<String>) -> Self {
        Self {
            scenario,
            status: TestStatus::Fail,
            duration_ms,
            worker: 0,
            message: Some(message.into()),
        }
    }

    pub fn skip(scenario: Scenario, reason: impl Into<String>) -> Self {
        Self {
            scenario,
            status: TestStatus::Skip,
            duration_ms: 0,
            worker: 0,
            message: Some(reason.into()),
        }
    }

    pub fn error(scenario: Scenario, duration_ms: u64, error: impl Into<String>) -> Self {
        Self {
            scenario,
            status: TestStatus::Error,
            duration_ms,
            worker: 0,
            message: Some(error.into()),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn on_worker(mut self, worker: u32) -> Self {
        self.worker = worker;
        self
    }
}

impl fmt::Display for TestResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} [{}ms]",
            self.status.symbol(),
            self.scenario,
            self.duration_ms
        )?;
        if let Some(msg) = &self.message {
            write!(f, " - {msg}")?;
        }
        Ok(())
    }
}

/// Summary of one run over a set of scenarios
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TestRunSummary {
    pub started_at: DateTime<Utc>,
    pub base_url: String,
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub errors: usize,
    pub total_duration_ms: u64,
    pub results: Vec<TestResult>,
}

impl TestRunSummary {
    pub fn new(
        started_at: DateTime<Utc>,
        base_url: impl Into<String>,
        results: Vec<TestResult>,
    ) -> Self {
        let count = |status: TestStatus| results.iter().filter(|r| r.status == status).count();

        Self {
            started_at,
            base_url: base_url.into(),
            total: results.len(),
            passed: count(TestStatus::Pass),
            failed: count(TestStatus::Fail),
            skipped: count(TestStatus::Skip),
            errors: count(TestStatus::Error),
            total_duration_ms: results.iter().map(|r| r.duration_ms).sum(),
            results,
        }
    }

    pub fn pass_rate(&self) -> f64 {
        let executed = self.total - self.skipped;
        if executed == 0 {
            0.0
        } else {
            (self.passed as f64 / executed as f64) * 100.0
        }
    }

    /// No scenario failed or errored
    pub fn is_success(&self) -> bool {
        self.failed == 0 && self.errors == 0
    }
}

impl fmt::Display for TestRunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Player API - {}", self.base_url)?;
        writeln!(f, "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━")?;
        for result in &self.results {
            writeln!(f, "  {result}")?;
        }
        writeln!(f, "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━")?;
        writeln!(
            f,
            "Total: {} | Pass: {} | Fail: {} | Skip: {} | Error: {}",
            self.total, self.passed, self.failed, self.skipped, self.errors
        )?;
        writeln!(
            f,
            "Pass Rate: {:.1}% | Duration: {}ms",
            self.pass_rate(),
            self.total_duration_ms
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenario_numbers() {
        assert_eq!(Scenario::CreateValidPlayer.number(), 1);
        assert_eq!(Scenario::UpdatePlayerInvalidId.number(), 10);
    }

    #[test]
    fn test_scenario_from_number() {
        assert_eq!(Scenario::from_number(3), Some(Scenario::GetAllPlayers));
        assert_eq!(Scenario::from_number(10), Some(Scenario::UpdatePlayerInvalidId));
        assert_eq!(Scenario::from_number(0), None);
        assert_eq!(Scenario::from_number(11), None);
    }

    #[test]
    fn test_all_scenarios_numbered_in_order() {
        let numbers: Vec<u8> = Scenario::all().iter().map(Scenario::number).collect();
        assert_eq!(numbers, (1..=10).collect::<Vec<u8>>());
    }

    #[test]
    fn test_categories() {
        assert_eq!(Scenario::CreateInvalidPlayer.category(), "Create");
        assert_eq!(Scenario::GetAllPlayersInvalidMethod.category(), "Read");
        assert_eq!(Scenario::DeletePlayerInvalidId.category(), "Delete");
        assert_eq!(Scenario::UpdatePlayer.category(), "Update");
    }

    #[test]
    fn test_run_summary() {
        let results = vec![
            TestResult::pass(Scenario::CreateValidPlayer, 100),
            TestResult::fail(Scenario::GetAllPlayers, 50, "Missing field 'id'"),
            TestResult::skip(Scenario::DeletePlayer, "Skipped by configuration"),
            TestResult::error(Scenario::UpdatePlayer, 5, "Connection refused"),
        ];

        let summary = TestRunSummary::new(Utc::now(), "http://localhost:8080", results);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.passed, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.errors, 1);
        assert_eq!(summary.total_duration_ms, 155);
        assert!(!summary.is_success());
    }

    #[test]
    fn test_skips_do_not_fail_run() {
        let results = vec![
            TestResult::pass(Scenario::CreateValidPlayer, 10),
            TestResult::skip(Scenario::DeletePlayer, "skipped"),
        ];

        let summary = TestRunSummary::new(Utc::now(), "http://stub", results);
        assert!(summary.is_success());
        assert_eq!(summary.pass_rate(), 100.0);
    }
}
