//! Parallel scenario execution
//!
//! Spawns one task per scenario, capped at the configured thread count.
//! A running task holds a semaphore permit and one worker slot from a pool
//! of `thread.count` ids, so scenarios running at the same time always log
//! different slots.

use anyhow::{Context, Result};
use chrono::Utc;
use futures::future::join_all;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;
use tokio::sync::Semaphore;
use tracing::{debug, error, info};

use crate::config::TestConfig;
use crate::http::HttpClient;
use crate::models::{Scenario, TestResult, TestRunSummary};
use crate::scenarios::{self, ScenarioContext};

/// Pool of worker ids `1..=count`
struct WorkerSlots {
    free: Mutex<Vec<u32>>,
}

impl WorkerSlots {
    fn new(count: u32) -> Self {
        Self {
            free: Mutex::new((1..=count).rev().collect()),
        }
    }

    /// Take the lowest free id; it goes back to the pool when the slot drops
    fn take(self: &Arc<Self>) -> Option<WorkerSlot> {
        let id = self.lock().pop()?;
        Some(WorkerSlot {
            id,
            pool: Arc::clone(self),
        })
    }

    fn lock(&self) -> MutexGuard<'_, Vec<u32>> {
        self.free.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

struct WorkerSlot {
    id: u32,
    pool: Arc<WorkerSlots>,
}

impl Drop for WorkerSlot {
    fn drop(&mut self) {
        let mut free = self.pool.lock();
        free.push(self.id);
        free.sort_unstable_by(|a, b| b.cmp(a));
    }
}

/// Parallel scenario executor
pub struct ParallelExecutor {
    config: Arc<TestConfig>,
    client: HttpClient,
    max_concurrent: usize,
    skip: Vec<u8>,
}

impl ParallelExecutor {
    /// Executor capped at `thread.count` concurrent scenarios
    pub fn new(config: Arc<TestConfig>) -> Result<Self> {
        let client = HttpClient::new(config.app_url()).context("Failed to create HTTP client")?;
        let max_concurrent = config.thread_count() as usize;
        Ok(Self {
            config,
            client,
            max_concurrent,
            skip: Vec::new(),
        })
    }

    /// Scenario numbers to report as skipped
    pub fn with_skipped(mut self, skip: Vec<u8>) -> Self {
        self.skip = skip;
        self
    }

    pub fn max_concurrent(&self) -> usize {
        self.max_concurrent
    }

    /// Run scenarios in parallel; results come back ordered by scenario number
    pub async fn run_parallel(&self, selected: Vec<Scenario>) -> TestRunSummary {
        info!(
            "Running {} scenarios in parallel (max {} concurrent) against {}",
            selected.len(),
            self.max_concurrent,
            self.client.base_url()
        );

        let started_at = Utc::now();
        let start = Instant::now();
        let semaphore = Arc::new(Semaphore::new(self.max_concurrent));
        let slots = Arc::new(WorkerSlots::new(self.config.thread_count()));
        let mut handles = Vec::with_capacity(selected.len());

        for (index, &scenario) in selected.iter().enumerate() {
            let fallback_worker = self.config.worker_slot(index as u64);
            let semaphore = semaphore.clone();
            let slots = slots.clone();
            let client = self.client.clone();
            let skipped = self.skip.contains(&scenario.number());

            let handle = tokio::spawn(async move {
                if skipped {
                    return TestResult::skip(scenario, "Skipped by configuration")
                        .on_worker(fallback_worker);
                }

                let _permit = match semaphore.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(e) => {
                        return TestResult::error(scenario, 0, e.to_string())
                            .on_worker(fallback_worker)
                    }
                };
                // Declared after the permit so the id is returned first
                let slot = slots.take();
                let worker = slot.as_ref().map_or(fallback_worker, |s| s.id);

                debug!(worker, "Starting parallel execution of {}", scenario);
                let ctx = ScenarioContext::new(client, worker);
                scenarios::run_scenario(scenario, &ctx).await
            });

            handles.push(handle);
        }

        let mut results: Vec<TestResult> = join_all(handles)
            .await
            .into_iter()
            .zip(selected)
            .map(|(joined, scenario)| {
                joined.unwrap_or_else(|e| {
                    error!("{} task failed: {}", scenario, e);
                    TestResult::error(scenario, 0, e.to_string())
                })
            })
            .collect();

        results.sort_by_key(|r| r.scenario.number());

        let summary = TestRunSummary::new(started_at, self.client.base_url(), results);

        info!(
            "Parallel execution completed in {}ms - Pass: {}/{} ({:.1}%)",
            start.elapsed().as_millis(),
            summary.passed,
            summary.total,
            summary.pass_rate()
        );

        summary
    }

    /// Run all scenarios in parallel
    pub async fn run_all_parallel(&self) -> TestRunSummary {
        self.run_parallel(Scenario::all()).await
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use crate::config::{APP_URL_KEY, THREAD_COUNT_KEY};
    use crate::models::TestStatus;

    #[test]
    fn test_parallel_executor_uses_thread_count() {
        let config = Arc::new(TestConfig::new().with_override(THREAD_COUNT_KEY, "8"));
        let executor = ParallelExecutor::new(config).unwrap();
        assert_eq!(executor.max_concurrent(), 8);
    }

    #[test]
    fn test_worker_slots_are_exclusive() {
        let slots = Arc::new(WorkerSlots::new(3));

        let first = slots.take().unwrap();
        let second = slots.take().unwrap();
        let third = slots.take().unwrap();
        assert_eq!((first.id, second.id, third.id), (1, 2, 3));
        assert!(slots.take().is_none());

        drop(second);
        let reused = slots.take().unwrap();
        assert_eq!(reused.id, 2);

        drop(first);
        drop(third);
        drop(reused);
        assert_eq!(slots.take().unwrap().id, 1);
    }

    #[tokio::test]
    async fn test_skipped_results_are_ordered() {
        let config = Arc::new(
            TestConfig::new()
                .with_override(APP_URL_KEY, "http://invalid.invalid")
                .with_override(THREAD_COUNT_KEY, "2"),
        );
        let executor = ParallelExecutor::new(config)
            .unwrap()
            .with_skipped((1..=10).collect());

        let summary = executor.run_all_parallel().await;

        assert_eq!(summary.total, 10);
        assert!(summary.results.iter().all(|r| r.status == TestStatus::Skip));
        let numbers: Vec<u8> = summary.results.iter().map(|r| r.scenario.number()).collect();
        assert_eq!(numbers, (1..=10).collect::<Vec<u8>>());
        assert!(summary.results.iter().all(|r| (1..=2).contains(&r.worker)));
    }
}
