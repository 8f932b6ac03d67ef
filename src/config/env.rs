//! Environment variable configuration
//!
//! Provides environment variable overrides for configuration.

use std::env;

use super::{APP_URL_KEY, LOG_FILE_KEY, LOG_LEVEL_KEY, THREAD_COUNT_KEY};

/// Environment variable prefix
const ENV_PREFIX: &str = "PLAYER_API";

/// Configuration overrides read from environment variables
#[derive(Clone, Debug, Default)]
pub struct EnvConfig {
    /// Base URL from PLAYER_API_URL
    pub app_url: Option<String>,
    /// Thread count from PLAYER_API_THREAD_COUNT (kept raw, parsed later)
    pub thread_count: Option<String>,
    /// Log file from PLAYER_API_LOG_FILE
    pub log_file: Option<String>,
    /// Log level from PLAYER_API_LOG_LEVEL
    pub log_level: Option<String>,
    /// Config file from PLAYER_API_CONFIG
    pub config_file: Option<String>,
}

impl EnvConfig {
    /// Load configuration from environment variables
    pub fn load() -> Self {
        Self {
            app_url: get_env("URL"),
            thread_count: get_env("THREAD_COUNT"),
            log_file: get_env("LOG_FILE"),
            log_level: get_env("LOG_LEVEL"),
            config_file: get_env("CONFIG"),
        }
    }

    /// Check if any environment variables are set
    pub fn has_any(&self) -> bool {
        self.app_url.is_some()
            || self.thread_count.is_some()
            || self.log_file.is_some()
            || self.log_level.is_some()
            || self.config_file.is_some()
    }

    /// Overrides as (config key, value) pairs
    pub fn overrides(&self) -> Vec<(&'static str, String)> {
        [
            (APP_URL_KEY, &self.app_url),
            (THREAD_COUNT_KEY, &self.thread_count),
            (LOG_FILE_KEY, &self.log_file),
            (LOG_LEVEL_KEY, &self.log_level),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.clone().map(|v| (key, v)))
        .collect()
    }

    /// Print current environment configuration
    pub fn print_summary(&self) {
        println!("Environment Configuration:");
        println!("  {}_URL:           {:?}", ENV_PREFIX, self.app_url);
        println!("  {}_THREAD_COUNT:  {:?}", ENV_PREFIX, self.thread_count);
        println!("  {}_LOG_FILE:      {:?}", ENV_PREFIX, self.log_file);
        println!("  {}_LOG_LEVEL:     {:?}", ENV_PREFIX, self.log_level);
        println!("  {}_CONFIG:        {:?}", ENV_PREFIX, self.config_file);
    }
}

/// Get environment variable with prefix
fn get_env(name: &str) -> Option<String> {
    env::var(format!("{ENV_PREFIX}_{name}"))
        .ok()
        .filter(|v| !v.trim().is_empty())
}

/// Print all PLAYER_API environment variables
pub fn print_env_help() {
    println!("Environment Variables:");
    println!();
    println!("  {ENV_PREFIX}_URL            Base URL of the player API ({APP_URL_KEY})");
    println!("  {ENV_PREFIX}_THREAD_COUNT   Worker count for parallel runs ({THREAD_COUNT_KEY})");
    println!("  {ENV_PREFIX}_LOG_FILE       Path of the append-only log file ({LOG_FILE_KEY})");
    println!("  {ENV_PREFIX}_LOG_LEVEL      trace, debug, info, warn or error ({LOG_LEVEL_KEY})");
    println!("  {ENV_PREFIX}_CONFIG         Path to configuration file");
    println!();
    println!("Example:");
    println!("  export {ENV_PREFIX}_URL=http://10.0.0.100:8080");
    println!("  export {ENV_PREFIX}_THREAD_COUNT=4");
    println!("  player-api-tests run --parallel");
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Sets environment variables for the duration of a test
    struct EnvBuilder {
        vars: Vec<(String, String)>,
    }

    impl EnvBuilder {
        /// Create a new environment builder
        fn new() -> Self {
            Self { vars: Vec::new() }
        }

        /// Set base URL
        fn app_url(mut self, url: impl Into<String>) -> Self {
            self.vars.push((format!("{ENV_PREFIX}_URL"), url.into()));
            self
        }

        /// Set thread count
        fn thread_count(mut self, count: impl Into<String>) -> Self {
            self.vars
                .push((format!("{ENV_PREFIX}_THREAD_COUNT"), count.into()));
            self
        }

        /// Apply environment variables
        fn apply(self) {
            for (key, value) in self.vars {
                env::set_var(key, value);
            }
        }

        /// Apply and return guard that restores on drop
        fn apply_scoped(self) -> EnvGuard {
            let previous: Vec<_> = self
                .vars
                .iter()
                .map(|(k, _)| (k.clone(), env::var(k).ok()))
                .collect();

            self.apply();

            EnvGuard { previous }
        }
    }

    /// Guard that restores environment variables on drop
    struct EnvGuard {
        previous: Vec<(String, Option<String>)>,
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for (key, value) in &self.previous {
                match value {
                    Some(v) => env::set_var(key, v),
                    None => env::remove_var(key),
                }
            }
        }
    }

    #[test]
    fn test_env_config_default() {
        let config = EnvConfig::default();
        assert!(config.app_url.is_none());
        assert!(!config.has_any());
        assert!(config.overrides().is_empty());
    }

    #[test]
    fn test_env_builder() {
        let _guard = EnvBuilder::new()
            .app_url("http://10.0.0.1:8080")
            .thread_count("6")
            .apply_scoped();

        let config = EnvConfig::load();
        assert_eq!(config.app_url.as_deref(), Some("http://10.0.0.1:8080"));
        assert_eq!(config.thread_count.as_deref(), Some("6"));
        assert!(config.has_any());
    }

    #[test]
    fn test_overrides_map_to_config_keys() {
        let config = EnvConfig {
            app_url: Some("http://stub".to_string()),
            log_level: Some("debug".to_string()),
            ..Default::default()
        };

        let overrides = config.overrides();
        assert_eq!(
            overrides,
            vec![
                (APP_URL_KEY, "http://stub".to_string()),
                (LOG_LEVEL_KEY, "debug".to_string()),
            ]
        );
    }
}
