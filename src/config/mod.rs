//! Configuration module
//!
//! Loads the key/value settings once at start-up and exposes them read-only.
//! Precedence, lowest first: built-in defaults, config file, environment,
//! explicit overrides from the command line.

mod env;
mod file;

pub use env::{print_env_help, EnvConfig};
pub use file::{find as find_config_file, parse_properties, ConfigError, FileFormat};

use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Default configuration file name
pub const CONFIG_FILE: &str = "config.properties";

pub const APP_URL_KEY: &str = "test.app.url";
pub const THREAD_COUNT_KEY: &str = "thread.count";
pub const LOG_FILE_KEY: &str = "log.file";
pub const LOG_LEVEL_KEY: &str = "log.level";

pub const DEFAULT_APP_URL: &str = "http://localhost:8080";
pub const DEFAULT_THREAD_COUNT: u32 = 3;
pub const DEFAULT_LOG_FILE: &str = "logs/testLog";
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Immutable test-run configuration
#[derive(Clone, Debug, Default, Serialize)]
pub struct TestConfig {
    properties: BTreeMap<String, String>,
}

impl TestConfig {
    /// Configuration with built-in defaults only
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from an already parsed key/value map
    pub fn from_properties(properties: BTreeMap<String, String>) -> Self {
        Self { properties }
    }

    /// Load configuration from file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        file::read(path).map(Self::from_properties)
    }

    /// Load configuration, falling back to defaults on any failure.
    ///
    /// Without an explicit path the standard locations are searched. The
    /// warning goes to stderr because the log sink is configured from the
    /// result of this call.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let path = match path.map(Path::to_path_buf).or_else(file::find) {
            Some(path) => path,
            None => {
                eprintln!("Unable to find {CONFIG_FILE}, using default configuration");
                return Self::default();
            }
        };

        match Self::load(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("{e}; using default configuration");
                Self::default()
            }
        }
    }

    /// Apply environment overrides
    pub fn with_env(self, env: &EnvConfig) -> Self {
        env.overrides()
            .into_iter()
            .fold(self, |config, (key, value)| config.with_override(key, value))
    }

    /// Override a single key
    pub fn with_override(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Value for `key`, or `default` when the key is absent
    pub fn get(&self, key: &str, default: &str) -> String {
        self.properties
            .get(key)
            .cloned()
            .unwrap_or_else(|| default.to_string())
    }

    /// Base URL of the application under test
    pub fn app_url(&self) -> String {
        self.get(APP_URL_KEY, DEFAULT_APP_URL)
    }

    /// Nominal worker count; malformed or non-positive values yield the default
    pub fn thread_count(&self) -> u32 {
        self.properties
            .get(THREAD_COUNT_KEY)
            .and_then(|v| v.trim().parse::<u32>().ok())
            .filter(|&n| n > 0)
            .unwrap_or(DEFAULT_THREAD_COUNT)
    }

    /// Path of the append-only log file
    pub fn log_file(&self) -> PathBuf {
        PathBuf::from(self.get(LOG_FILE_KEY, DEFAULT_LOG_FILE))
    }

    /// Configured log level name
    pub fn log_level(&self) -> String {
        self.get(LOG_LEVEL_KEY, DEFAULT_LOG_LEVEL)
    }

    /// Cosmetic worker slot in `[1, thread_count]` for log correlation.
    ///
    /// `worker_index` is assigned by the executor; it carries no meaning
    /// beyond telling concurrent workers apart in the log.
    pub fn worker_slot(&self, worker_index: u64) -> u32 {
        let count = u64::from(self.thread_count());
        // remainder is below thread_count, so it fits in u32
        (worker_index % count) as u32 + 1
    }

    /// Effective values of every recognized key
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            (APP_URL_KEY, self.app_url()),
            (THREAD_COUNT_KEY, self.thread_count().to_string()),
            (LOG_FILE_KEY, self.log_file().display().to_string()),
            (LOG_LEVEL_KEY, self.log_level()),
        ]
    }
}
