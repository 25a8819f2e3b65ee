//! CLI command implementations
//!
//! Each submodule implements one `blotter-demo` subcommand. Commands return
//! their output as a string (or a summary value) so `main` does the printing.

pub mod bump;
pub mod run;
pub mod snapshot;
pub mod tickers;

use crate::config::DemoConfig;
use crate::error::DemoError;
use trade_generator::generator::TradeGenerator;

/// Build a generator from the demo configuration
pub fn build_generator(config: &DemoConfig) -> Result<TradeGenerator, DemoError> {
    Ok(TradeGenerator::new(config.generator.clone())?)
}

fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<String, DemoError> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}
