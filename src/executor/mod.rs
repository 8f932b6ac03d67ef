//! Scenario execution engine
//!
//! Provides sequential and parallel execution capabilities.

mod parallel;
mod runner;

pub use parallel::ParallelExecutor;
pub use runner::TestRunner;
