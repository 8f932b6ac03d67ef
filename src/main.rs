//! Player API Tests - CRUD scenario runner for the player management API
//!
//! ## Features
//!
//! - 10 scenarios covering create, read, update, delete and list
//! - Sequential or parallel execution, capped at `thread.count` workers
//! - Multiple output formats (Table, JSON, CSV, Summary)
//! - Append-only log file for per-scenario traces
//!
//! ## Usage
//!
//! ```bash
//! # Run all scenarios against the configured URL
//! player-api-tests run
//!
//! # Run selected scenarios against another host
//! player-api-tests run --url http://10.0.0.5:8080 -s 3 -s 5
//!
//! # Run in parallel with 4 workers
//! player-api-tests run --parallel --threads 4
//!
//! # List available scenarios
//! player-api-tests list --detailed
//! ```

use anyhow::Result;
use clap::Parser;
use std::io::IsTerminal;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use player_api_tests::cli::{self, Args};
use player_api_tests::config::{
    self, EnvConfig, TestConfig, APP_URL_KEY, LOG_FILE_KEY, THREAD_COUNT_KEY,
};
use player_api_tests::executor::{ParallelExecutor, TestRunner};
use player_api_tests::models::Scenario;
use player_api_tests::output::{OutputFormat, ResultFormatter};
use player_api_tests::scenarios;
use player_api_tests::utils::{init_logger, LogLevel};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let env = EnvConfig::load();

    let config_path = args.config.clone().or_else(|| env.config_file.clone());
    let config = TestConfig::load_or_default(config_path.as_deref().map(Path::new)).with_env(&env);

    match args.command {
        cli::Command::Run(run_args) => {
            let passed = run_scenarios(run_args, config, args.verbose).await?;
            if !passed {
                std::process::exit(1);
            }
        }
        cli::Command::List(list_args) => {
            list_scenarios(list_args);
        }
        cli::Command::Config(config_args) => {
            manage_config(config_args, &config, &env)?;
        }
    }

    Ok(())
}

/// Run the selected scenarios; returns whether every executed scenario passed
async fn run_scenarios(args: cli::RunArgs, config: TestConfig, verbose: bool) -> Result<bool> {
    let mut config = config;
    if let Some(url) = &args.url {
        config = config.with_override(APP_URL_KEY, url.as_str());
    }
    if let Some(threads) = args.threads {
        config = config.with_override(THREAD_COUNT_KEY, threads.to_string());
    }
    if let Some(log_file) = &args.log_file {
        config = config.with_override(LOG_FILE_KEY, log_file.as_str());
    }

    let level = if verbose {
        LogLevel::Debug
    } else {
        LogLevel::from_str(&config.log_level()).unwrap_or(LogLevel::Info)
    };
    init_logger(level, &config.log_file())?;

    let selected = if args.scenarios.is_empty() {
        Scenario::all()
    } else {
        args.scenarios
            .iter()
            .map(|&n| {
                Scenario::from_number(n)
                    .ok_or_else(|| anyhow::anyhow!("Invalid scenario number: {n}"))
            })
            .collect::<Result<Vec<_>>>()?
    };

    let skip = match &args.skip {
        Some(raw) => cli::parse_number_list(raw).map_err(anyhow::Error::msg)?,
        None => Vec::new(),
    };

    let mut formatter =
        ResultFormatter::new(OutputFormat::from_str(&args.format).unwrap_or(OutputFormat::Table));
    if !std::io::stdout().is_terminal() {
        formatter = formatter.no_color();
    }

    let config = Arc::new(config);
    info!(
        "Testing player API at {} ({} workers)",
        config.app_url(),
        config.thread_count()
    );

    let summary = if args.parallel {
        ParallelExecutor::new(config)?
            .with_skipped(skip)
            .run_parallel(selected)
            .await
    } else {
        TestRunner::new(config)?
            .with_skipped(skip)
            .run_selected(&selected)
            .await
    };

    println!("{}", formatter.format_summary(&summary));

    Ok(summary.is_success())
}

fn list_scenarios(args: cli::ListArgs) {
    println!("\nPlayer API Scenarios (10 total)");

    let formatter = ResultFormatter::new(OutputFormat::Table);
    let catalogue = formatter.format_catalogue(args.detailed, |scenario| {
        match scenarios::build_request(scenario) {
            Ok(request) => format!("{} {}", request.method, request.path),
            Err(e) => format!("<{e}>"),
        }
    });

    println!("{catalogue}");
}

fn manage_config(args: cli::ConfigArgs, config: &TestConfig, env: &EnvConfig) -> Result<()> {
    match args.action {
        cli::ConfigAction::Show { env: env_only } => {
            if env_only {
                env.print_summary();
            } else {
                println!("Effective Configuration:");
                for (key, value) in config.entries() {
                    println!("  {key:14} = {value}");
                }
            }
        }
        cli::ConfigAction::EnvHelp => {
            config::print_env_help();
        }
    }

    Ok(())
}
