//! # Blotter Demo Host
//!
//! Host application for the `trade_generator` crate. It owns the
//! configuration file, the tracing setup and an in-memory blotter that the
//! generator timers feed, and exposes them through the `blotter-demo` CLI:
//!
//! - `run`: live blotter with periodic summaries and price alerts
//! - `snapshot`: one batch of trades as JSON
//! - `tickers`: the instrument catalog
//! - `bump`: one ad hoc market price move

pub mod commands;
pub mod config;
pub mod error;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::commands::bump::BumpReport;
    pub use crate::commands::run::RunSummary;
    pub use crate::config::{ConfigError, DemoConfig, DEFAULT_CONFIG_PATH};
    pub use crate::error::DemoError;
}
