//! Demo configuration management.
//!
//! Handles loading of the blotter demo configuration from TOML files with
//! environment variable override support. Generator options live in the
//! `[generator]` table and are validated together with the host options.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use trade_generator::config::GeneratorConfig;

/// Default configuration file location, relative to the workspace root
pub const DEFAULT_CONFIG_PATH: &str = "demo/blotter/config/blotter.toml";

const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Demo configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemoConfig {
    /// Log level used when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Seconds between blotter summaries while running
    #[serde(default = "default_summary_interval_secs")]
    pub summary_interval_secs: u64,

    /// Trade generator options
    #[serde(default)]
    pub generator: GeneratorConfig,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_summary_interval_secs() -> u64 {
    10
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            summary_interval_secs: default_summary_interval_secs(),
            generator: GeneratorConfig::default(),
        }
    }
}

impl DemoConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load configuration from the default path or return the default config
    pub fn load_or_default() -> Self {
        Self::load(&PathBuf::from(DEFAULT_CONFIG_PATH)).unwrap_or_default()
    }

    /// Apply environment variable overrides
    pub fn with_env_override(mut self) -> Self {
        if let Ok(log_level) = std::env::var("BLOTTER_LOG_LEVEL") {
            self.log_level = log_level;
        }

        if let Some(count) = env_parse("BLOTTER_INITIAL_TRADES") {
            self.generator.initial_trades_number = count;
        }

        if let Some(start) = env_parse("BLOTTER_COUNTER_START") {
            self.generator.trade_counter_start = start;
        }

        if let Some(secs) = env_parse("BLOTTER_PRICE_INTERVAL_SECS") {
            self.generator.market_price_variation_interval_in_seconds = secs;
        }

        if let Some(secs) = env_parse("BLOTTER_TRADE_INTERVAL_SECS") {
            self.generator.trade_generation_interval_in_seconds = secs;
        }

        if let Some(secs) = env_parse("BLOTTER_SUMMARY_INTERVAL_SECS") {
            self.summary_interval_secs = secs;
        }

        self
    }

    /// Period between blotter summaries
    pub fn summary_interval(&self) -> Duration {
        Duration::from_secs(self.summary_interval_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if !VALID_LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            errors.push(format!(
                "Invalid log_level '{}'. Valid values: {:?}",
                self.log_level, VALID_LOG_LEVELS
            ));
        }

        if self.summary_interval_secs == 0 {
            errors.push("summary_interval_secs must be greater than 0".to_string());
        }

        if let Err(e) = self.generator.validate() {
            errors.extend(e.messages().iter().map(|m| format!("generator.{}", m)));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Load configuration from file and validate
    pub fn load_and_validate(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::load(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from file with environment overrides and validate
    pub fn load_with_env_and_validate(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::load(path)?.with_env_override();
        config.validate()?;
        Ok(config)
    }

    /// Configuration for the CLI: `path` when it exists, otherwise the
    /// default file or built-in defaults, with env overrides and validation
    pub fn resolve(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            return Self::load_with_env_and_validate(path);
        }
        let config = Self::load_or_default().with_env_override();
        config.validate()?;
        Ok(config)
    }
}

// Unparseable values are ignored rather than reset
fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

/// Configuration error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// IO error reading config file
    #[error("IO error: {0}")]
    Io(String),
    /// Parse error in config file
    #[error("Parse error: {0}")]
    Parse(String),
    /// Validation error
    #[error("Validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Mutex, PoisonError};

    // serializes tests that set or read BLOTTER_* variables
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn env_lock() -> std::sync::MutexGuard<'static, ()> {
        ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn validation_errors(config: &DemoConfig) -> Vec<String> {
        match config.validate() {
            Err(ConfigError::Validation(errors)) => errors,
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_default_config_validates() {
        let config = DemoConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.summary_interval(), Duration::from_secs(10));
        assert_eq!(config.generator.initial_trades_number, 400);
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "log_level = \"debug\"\n\n[generator]\ninitial_trades_number = 25"
        )
        .unwrap();

        let config = DemoConfig::load(file.path()).unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.summary_interval_secs, 10);
        assert_eq!(config.generator.initial_trades_number, 25);
        assert_eq!(config.generator.trade_counter_start, 11234);
    }

    #[test]
    fn test_resolve_existing_file() {
        let _env = env_lock();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "summary_interval_secs = 3").unwrap();

        let config = DemoConfig::resolve(file.path()).unwrap();
        assert_eq!(config.summary_interval_secs, 3);

        let mut bad = tempfile::NamedTempFile::new().unwrap();
        writeln!(bad, "log_level = \"loud\"").unwrap();
        assert!(matches!(
            DemoConfig::resolve(bad.path()),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_resolve_missing_file_falls_back() {
        let _env = env_lock();
        // the bundled sample spells out the defaults
        let config = DemoConfig::resolve(Path::new("does/not/exist.toml")).unwrap();
        assert_eq!(config.generator, GeneratorConfig::default());
        assert_eq!(DemoConfig::load_or_default().generator, GeneratorConfig::default());
    }

    #[test]
    fn test_load_missing_file() {
        let result = DemoConfig::load(Path::new("does/not/exist.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "summary_interval_secs = \"soon\"").unwrap();

        let result = DemoConfig::load(file.path());
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_env_override() {
        let _env = env_lock();
        std::env::set_var("BLOTTER_INITIAL_TRADES", "12");
        std::env::set_var("BLOTTER_SUMMARY_INTERVAL_SECS", "not-a-number");
        let config = DemoConfig::default().with_env_override();
        std::env::remove_var("BLOTTER_INITIAL_TRADES");
        std::env::remove_var("BLOTTER_SUMMARY_INTERVAL_SECS");

        assert_eq!(config.generator.initial_trades_number, 12);
        assert_eq!(config.summary_interval_secs, 10);
    }

    #[test]
    fn test_validate_invalid_log_level() {
        let mut config = DemoConfig::default();
        config.log_level = "loud".to_string();

        let errors = validation_errors(&config);
        assert!(errors.iter().any(|e| e.contains("log_level")));
    }

    #[test]
    fn test_validate_valid_log_levels() {
        for level in &["trace", "debug", "info", "warn", "error", "INFO", "DEBUG"] {
            let mut config = DemoConfig::default();
            config.log_level = level.to_string();
            assert!(config.validate().is_ok(), "Log level '{}' should be valid", level);
        }
    }

    #[test]
    fn test_validate_includes_generator_errors() {
        let mut config = DemoConfig::default();
        config.summary_interval_secs = 0;
        config.generator.force_market_price_percentage_variation_sequence = 0;
        config.generator.max_market_price_percentage_variation = 100;

        let errors = validation_errors(&config);
        assert_eq!(errors.len(), 3);
        assert!(errors.iter().any(|e| e.contains("summary_interval_secs")));
        assert!(errors
            .iter()
            .any(|e| e.starts_with("generator.force_market_price_percentage_variation_sequence")));
        assert!(errors
            .iter()
            .any(|e| e.starts_with("generator.max_market_price_percentage_variation")));
    }

    #[test]
    fn test_config_error_display() {
        let error = ConfigError::Validation(vec!["Error 1".to_string(), "Error 2".to_string()]);
        let display = error.to_string();
        assert!(display.contains("Error 1"));
        assert!(display.contains("Error 2"));
    }
}
