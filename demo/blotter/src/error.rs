//! Error types for the blotter demo.

use thiserror::Error;
use trade_generator::error::GeneratorError;

/// Demo error type
#[derive(Debug, Error)]
pub enum DemoError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Trade generator error
    #[error("Generator error: {0}")]
    Generator(#[from] GeneratorError),

    /// Output serialisation error
    #[error("Serialisation error: {0}")]
    Serialisation(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid command-line argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl DemoError {
    /// Create an invalid argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Whether this error reports an unknown ticker or counterparty
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Generator(e) if e.is_not_found())
    }
}
