//! Error types for trade generation.

use crate::config::ConfigError;
use thiserror::Error;

/// Generator error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeneratorError {
    /// Invalid generator options, rejected at construction
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Lookup of a key that is not present in the reference tables
    #[error("{kind} not found: {key}")]
    NotFound {
        /// What was looked up (e.g. "Instrument")
        kind: &'static str,
        /// The key that was missing
        key: String,
    },

    /// The trade counter cannot advance without repeating an id
    #[error("Trade counter exhausted at {counter}")]
    CounterExhausted {
        /// Last counter value handed out
        counter: u64,
    },
}

impl GeneratorError {
    /// Create a not-found error for an unknown ticker
    pub fn instrument_not_found(ticker: impl Into<String>) -> Self {
        Self::NotFound {
            kind: "Instrument",
            key: ticker.into(),
        }
    }

    /// Whether this error is a not-found lookup
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GeneratorError::instrument_not_found("TSLA");
        assert_eq!(err.to_string(), "Instrument not found: TSLA");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_config_error_conversion() {
        let err: GeneratorError = ConfigError::Validation(vec!["bad".to_string()]).into();
        assert!(!err.is_not_found());
        assert!(err.to_string().contains("bad"));
    }
}
