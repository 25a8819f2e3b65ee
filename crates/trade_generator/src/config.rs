//! Generator configuration.
//!
//! Every option has a default, so an empty TOML table (or
//! `GeneratorConfig::default()`) yields the standard blotter behaviour:
//! 400 initial trades, a price move every second and a new trade every
//! minute.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Upper bound on the initial batch size
pub const MAX_INITIAL_TRADES: usize = 1_000_000;

/// Highest accepted counter start; leaves room for a full initial batch
pub const MAX_TRADE_COUNTER_START: u64 = u64::MAX - MAX_INITIAL_TRADES as u64;

/// Options for [`crate::generator::TradeGenerator`] and the scheduler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Number of trades generated at startup
    pub initial_trades_number: usize,

    /// Trade id counter start value (first trade gets start + 1)
    pub trade_counter_start: u64,

    /// Maximum deviation of a trade's unit price from the market price, in percent
    pub max_unit_price_percentage_deviation: u32,

    /// Whether market prices drift on a timer
    pub enable_market_price_variation: bool,

    /// Maximum drift per price move, in percent
    pub max_market_price_percentage_variation: u32,

    /// Size of a forced (significant) price move, in percent
    pub forced_market_price_percentage_variation: u32,

    /// A price move is forced whenever the trade counter is a multiple of this
    pub force_market_price_percentage_variation_sequence: u64,

    /// Cadence of the price variation cycle
    pub market_price_variation_interval_in_seconds: u64,

    /// Whether new trades are appended on a timer
    pub enable_continuous_trade_generation: bool,

    /// Cadence of new trade generation
    pub trade_generation_interval_in_seconds: u64,

    /// Delay before the first continuously generated trade
    pub first_trade_delay_in_seconds: u64,

    /// Minimum days between trade date and settlement date
    pub settlement_days_min: u32,

    /// Maximum days between trade date and settlement date
    pub settlement_days_max: u32,

    /// Oldest random trade date, in days before today
    pub trade_date_max_days_ago: u32,

    /// One-in-N chance that an unsettled trade is rejected
    pub rejected_odds: u32,

    /// Lower bound of the fill percentage for trades that are not completed
    pub fill_min: u32,

    /// Upper bound of the fill percentage for trades that are not completed
    pub fill_max: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            initial_trades_number: 400,
            trade_counter_start: 11234,
            max_unit_price_percentage_deviation: 10,
            enable_market_price_variation: true,
            max_market_price_percentage_variation: 5,
            forced_market_price_percentage_variation: 10,
            force_market_price_percentage_variation_sequence: 100,
            market_price_variation_interval_in_seconds: 1,
            enable_continuous_trade_generation: true,
            trade_generation_interval_in_seconds: 60,
            first_trade_delay_in_seconds: 5,
            settlement_days_min: 25,
            settlement_days_max: 40,
            trade_date_max_days_ago: 50,
            rejected_odds: 7,
            fill_min: 8,
            fill_max: 95,
        }
    }
}

impl GeneratorConfig {
    /// Set the initial batch size
    pub fn with_initial_trades(mut self, count: usize) -> Self {
        self.initial_trades_number = count;
        self
    }

    /// Set the trade counter start value
    pub fn with_counter_start(mut self, start: u64) -> Self {
        self.trade_counter_start = start;
        self
    }

    /// Enable or disable timer-driven price variation
    pub fn with_market_price_variation(mut self, enabled: bool) -> Self {
        self.enable_market_price_variation = enabled;
        self
    }

    /// Enable or disable timer-driven trade generation
    pub fn with_continuous_trade_generation(mut self, enabled: bool) -> Self {
        self.enable_continuous_trade_generation = enabled;
        self
    }

    /// Set the forced price move size and how often it is injected
    pub fn with_forced_variation(mut self, percentage: u32, sequence: u64) -> Self {
        self.forced_market_price_percentage_variation = percentage;
        self.force_market_price_percentage_variation_sequence = sequence;
        self
    }

    /// Set both timer cadences, in seconds
    pub fn with_intervals(mut self, price_secs: u64, trade_secs: u64) -> Self {
        self.market_price_variation_interval_in_seconds = price_secs;
        self.trade_generation_interval_in_seconds = trade_secs;
        self
    }

    /// Period of the price variation cycle
    pub fn market_price_variation_interval(&self) -> Duration {
        Duration::from_secs(self.market_price_variation_interval_in_seconds)
    }

    /// Period of the trade generation cycle
    pub fn trade_generation_interval(&self) -> Duration {
        Duration::from_secs(self.trade_generation_interval_in_seconds)
    }

    /// Delay before the first continuously generated trade
    pub fn first_trade_delay(&self) -> Duration {
        Duration::from_secs(self.first_trade_delay_in_seconds)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.initial_trades_number > MAX_INITIAL_TRADES {
            errors.push(format!(
                "initial_trades_number {} exceeds maximum allowed ({})",
                self.initial_trades_number, MAX_INITIAL_TRADES
            ));
        }

        if self.trade_counter_start > MAX_TRADE_COUNTER_START {
            errors.push(format!(
                "trade_counter_start {} exceeds maximum allowed ({})",
                self.trade_counter_start, MAX_TRADE_COUNTER_START
            ));
        }

        // Percentages stay below 100 so that no single move reaches zero
        for (name, value) in [
            (
                "max_unit_price_percentage_deviation",
                self.max_unit_price_percentage_deviation,
            ),
            (
                "max_market_price_percentage_variation",
                self.max_market_price_percentage_variation,
            ),
            (
                "forced_market_price_percentage_variation",
                self.forced_market_price_percentage_variation,
            ),
        ] {
            if !(1..=99).contains(&value) {
                errors.push(format!("{} must be between 1 and 99, got {}", name, value));
            }
        }

        if self.force_market_price_percentage_variation_sequence == 0 {
            errors.push(
                "force_market_price_percentage_variation_sequence must be greater than 0"
                    .to_string(),
            );
        }

        if self.enable_market_price_variation && self.market_price_variation_interval_in_seconds == 0
        {
            errors.push("market_price_variation_interval_in_seconds must be greater than 0".to_string());
        }

        if self.enable_continuous_trade_generation && self.trade_generation_interval_in_seconds == 0 {
            errors.push("trade_generation_interval_in_seconds must be greater than 0".to_string());
        }

        if self.settlement_days_min == 0 {
            errors.push("settlement_days_min must be greater than 0".to_string());
        }
        if self.settlement_days_min > self.settlement_days_max {
            errors.push(format!(
                "settlement_days_min {} is greater than settlement_days_max {}",
                self.settlement_days_min, self.settlement_days_max
            ));
        }
        if self.settlement_days_max > 365 {
            errors.push(format!(
                "settlement_days_max {} exceeds maximum allowed (365)",
                self.settlement_days_max
            ));
        }

        if self.trade_date_max_days_ago == 0 {
            errors.push("trade_date_max_days_ago must be greater than 0".to_string());
        }

        if self.rejected_odds < 2 {
            errors.push(format!("rejected_odds must be at least 2, got {}", self.rejected_odds));
        }

        if self.fill_min > self.fill_max {
            errors.push(format!(
                "fill_min {} is greater than fill_max {}",
                self.fill_min, self.fill_max
            ));
        }
        if self.fill_max >= 100 {
            errors.push(format!("fill_max must be below 100, got {}", self.fill_max));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

/// Configuration error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// One or more options are out of range
    #[error("Validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}

impl ConfigError {
    /// The individual validation messages
    pub fn messages(&self) -> &[String] {
        match self {
            Self::Validation(errors) => errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validation_errors(config: &GeneratorConfig) -> Vec<String> {
        match config.validate() {
            Err(err) => err.messages().to_vec(),
            Ok(()) => panic!("Expected validation error"),
        }
    }

    #[test]
    fn test_default_config_validates() {
        let config = GeneratorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.initial_trades_number, 400);
        assert_eq!(config.trade_counter_start, 11234);
        assert_eq!(config.market_price_variation_interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_partial_document_uses_defaults() {
        let config: GeneratorConfig = serde_json::from_str(
            r#"{"initial_trades_number": 5, "enable_market_price_variation": false}"#,
        )
        .unwrap();
        assert_eq!(config.initial_trades_number, 5);
        assert!(!config.enable_market_price_variation);
        assert_eq!(config.max_unit_price_percentage_deviation, 10);
    }

    #[test]
    fn test_zero_sequence_rejected() {
        let config = GeneratorConfig::default().with_forced_variation(10, 0);
        let errors = validation_errors(&config);
        assert!(errors
            .iter()
            .any(|e| e.contains("force_market_price_percentage_variation_sequence")));
    }

    #[test]
    fn test_zero_interval_rejected_only_when_enabled() {
        let config = GeneratorConfig::default().with_intervals(0, 0);
        assert_eq!(validation_errors(&config).len(), 2);

        let config = GeneratorConfig::default()
            .with_intervals(0, 0)
            .with_market_price_variation(false)
            .with_continuous_trade_generation(false);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_percentages_out_of_range() {
        let mut config = GeneratorConfig::default();
        config.max_unit_price_percentage_deviation = 0;
        config.max_market_price_percentage_variation = 100;
        config.forced_market_price_percentage_variation = 150;

        let errors = validation_errors(&config);
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_settlement_and_fill_ranges() {
        let mut config = GeneratorConfig::default();
        config.settlement_days_min = 41;
        config.fill_min = 96;
        config.fill_max = 100;

        let errors = validation_errors(&config);
        assert!(errors.iter().any(|e| e.contains("settlement_days_min")));
        assert!(errors.iter().any(|e| e.contains("fill_min")));
        assert!(errors.iter().any(|e| e.contains("fill_max must be below 100")));
    }

    #[test]
    fn test_counter_start_leaves_headroom() {
        let config = GeneratorConfig::default().with_counter_start(u64::MAX);
        let errors = validation_errors(&config);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("trade_counter_start"));

        let config = GeneratorConfig::default().with_counter_start(MAX_TRADE_COUNTER_START);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejected_odds_minimum() {
        let mut config = GeneratorConfig::default();
        config.rejected_odds = 1;
        assert!(validation_errors(&config)[0].contains("rejected_odds"));
    }

    #[test]
    fn test_config_error_display() {
        let error = ConfigError::Validation(vec!["Error 1".to_string(), "Error 2".to_string()]);
        let display = format!("{}", error);
        assert!(display.contains("Error 1"));
        assert!(display.contains("Error 2"));
    }
}
