//! # Trade Generator
//!
//! Synthetic trade blotter data for demonstration front-ends.
//!
//! The crate produces plausible, internally consistent trade records drawn
//! from fixed reference data, and drives a random walk on instrument market
//! prices. Whatever holds the trades (a grid or a test fixture) is
//! reached only through the narrow [`blotter::TradeStore`] contract.
//!
//! ## Modules
//!
//! - [`config`]: Generator options, defaults and validation
//! - [`error`]: Error taxonomy (configuration errors, not-found lookups)
//! - [`reference_data`]: Fixed instrument, trader, book, counterparty tables
//! - [`catalog`]: The authoritative instrument catalog (ticker → price)
//! - [`random`]: Injectable random source and clock
//! - [`trade`]: Trade record and its enumerations
//! - [`generator`]: Trade generation and market price variation
//! - [`blotter`]: Store contract, price resync adapter, in-memory blotter
//! - [`scheduler`]: Timer-driven generation and price variation tasks
//!
//! ## Price consistency
//!
//! A [`trade::Trade`] carries a point-in-time copy of its instrument's market
//! price. The [`catalog::InstrumentCatalog`] owned by the generator is the
//! authoritative source. After every price move the store holding the trades
//! must be resynced with [`blotter::resync_market_price`]; the scheduler does
//! this for the stores it drives.

pub mod blotter;
pub mod catalog;
pub mod config;
pub mod error;
pub mod generator;
pub mod random;
pub mod reference_data;
pub mod scheduler;
pub mod trade;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::blotter::{resync_market_price, InMemoryBlotter, TradeStore};
    pub use crate::catalog::{Instrument, InstrumentCatalog};
    pub use crate::config::{ConfigError, GeneratorConfig};
    pub use crate::error::GeneratorError;
    pub use crate::generator::{
        GenerateTradeOptions, MarketPriceUpdateOptions, PriceMove, TradeGenerator,
    };
    pub use crate::random::{Clock, FixedClock, RandomSource, SystemClock};
    pub use crate::scheduler::{initialize, GeneratorHandle, PriceAlert};
    pub use crate::trade::{Currency, Trade, TradeDirection, TradeStatus};
}
