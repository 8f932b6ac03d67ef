//! CLI argument parsing
//!
//! Defines command-line interface using clap.

use clap::{Parser, Subcommand};

/// Player API CRUD Test Suite
#[derive(Parser, Debug)]
#[command(name = "player-api-tests")]
#[command(version = "0.1.0")]
#[command(about = "Run CRUD scenarios against the player management API")]
#[command(long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to configuration file (properties, yaml or json)
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run player API scenarios
    Run(RunArgs),

    /// List available scenarios
    List(ListArgs),

    /// Inspect configuration
    Config(ConfigArgs),
}

/// Arguments for run command
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Scenario number to run (1-10); repeat to select several
    #[arg(short, long = "scenario")]
    pub scenarios: Vec<u8>,

    /// Base URL of the player API (overrides test.app.url)
    #[arg(short, long)]
    pub url: Option<String>,

    /// Run scenarios in parallel
    #[arg(short, long)]
    pub parallel: bool,

    /// Worker count (overrides thread.count)
    #[arg(short, long)]
    pub threads: Option<u32>,

    /// Output format (table, json, json-pretty, csv, summary)
    #[arg(short, long, default_value = "table")]
    pub format: String,

    /// Skip specific scenarios (comma-separated numbers)
    #[arg(long)]
    pub skip: Option<String>,

    /// Log file path (overrides log.file)
    #[arg(long)]
    pub log_file: Option<String>,
}

/// Arguments for list command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Show method and path of each scenario
    #[arg(short, long)]
    pub detailed: bool,
}

/// Arguments for config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show effective configuration
    Show {
        /// Show environment overrides only
        #[arg(long)]
        env: bool,
    },

    /// Describe supported environment variables
    EnvHelp,
}

/// Parse a comma-separated list of scenario numbers, ignoring blanks
pub fn parse_number_list(raw: &str) -> Result<Vec<u8>, String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<u8>()
                .map_err(|_| format!("Invalid scenario number: {s}"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parsing() {
        let args = Args::parse_from(["player-api-tests", "list", "--detailed"]);
        match args.command {
            Command::List(list_args) => {
                assert!(list_args.detailed);
            }
            _ => panic!("Expected List command"),
        }
    }

    #[test]
    fn test_run_args() {
        let args = Args::parse_from([
            "player-api-tests",
            "run",
            "--scenario",
            "3",
            "-s",
            "5",
            "--url",
            "http://10.0.0.1:8080",
            "--parallel",
            "--threads",
            "4",
            "--config",
            "alt.properties",
        ]);
        assert_eq!(args.config.as_deref(), Some("alt.properties"));
        match args.command {
            Command::Run(run_args) => {
                assert_eq!(run_args.scenarios, vec![3, 5]);
                assert_eq!(run_args.url.as_deref(), Some("http://10.0.0.1:8080"));
                assert!(run_args.parallel);
                assert_eq!(run_args.threads, Some(4));
                assert_eq!(run_args.format, "table");
            }
            _ => panic!("Expected Run command"),
        }
    }

    #[test]
    fn test_config_show() {
        let args = Args::parse_from(["player-api-tests", "config", "show", "--env"]);
        match args.command {
            Command::Config(ConfigArgs {
                action: ConfigAction::Show { env },
            }) => assert!(env),
            _ => panic!("Expected Config Show command"),
        }
    }

    #[test]
    fn test_parse_number_list() {
        assert_eq!(parse_number_list("1, 2,,10"), Ok(vec![1, 2, 10]));
        assert!(parse_number_list("1,x").is_err());
    }
}
