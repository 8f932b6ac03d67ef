//! Sequential scenario runner
//!
//! Runs scenarios one after another on a single worker.

use anyhow::{Context, Result};
use chrono::Utc;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

use crate::config::TestConfig;
use crate::http::HttpClient;
use crate::models::{Scenario, TestResult, TestRunSummary};
use crate::scenarios::{self, ScenarioContext};

/// Test runner for the player API scenarios
pub struct TestRunner {
    config: Arc<TestConfig>,
    client: HttpClient,
    skip: Vec<u8>,
}

impl TestRunner {
    /// Create a new test runner
    pub fn new(config: Arc<TestConfig>) -> Result<Self> {
        let client = HttpClient::new(config.app_url()).context("Failed to create HTTP client")?;
        Ok(Self {
            config,
            client,
            skip: Vec::new(),
        })
    }

    /// Scenario numbers to report as skipped
    pub fn with_skipped(mut self, skip: Vec<u8>) -> Self {
        self.skip = skip;
        self
    }

    pub fn config(&self) -> &TestConfig {
        &self.config
    }

    /// Run a single scenario as worker `worker_index`
    pub async fn run_scenario(&self, scenario: Scenario, worker_index: u64) -> TestResult {
        let worker = self.config.worker_slot(worker_index);

        if self.skip.contains(&scenario.number()) {
            info!(worker, "Skipping {}", scenario);
            return TestResult::skip(scenario, "Skipped by configuration").on_worker(worker);
        }

        let ctx = ScenarioContext::new(self.client.clone(), worker);
        scenarios::run_scenario(scenario, &ctx).await
    }

    /// Run all scenarios sequentially
    pub async fn run_all(&self) -> TestRunSummary {
        self.run_selected(&Scenario::all()).await
    }

    /// Run specific scenarios sequentially
    pub async fn run_selected(&self, selected: &[Scenario]) -> TestRunSummary {
        info!(
            "Running {} scenarios against {}",
            selected.len(),
            self.client.base_url()
        );

        let started_at = Utc::now();
        let start = Instant::now();
        let mut results = Vec::with_capacity(selected.len());

        for &scenario in selected {
            let result = self.run_scenario(scenario, 0).await;
            info!("  {}", result);
            results.push(result);
        }

        let summary = TestRunSummary::new(started_at, self.client.base_url(), results);

        info!(
            "Run completed in {}ms - Pass: {}/{} ({:.1}%)",
            start.elapsed().as_millis(),
            summary.passed,
            summary.total,
            summary.pass_rate()
        );

        summary
    }
}
