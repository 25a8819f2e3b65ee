//! `bump` command: one ad hoc market price move.

use super::{build_generator, to_json};
use crate::config::DemoConfig;
use crate::error::DemoError;
use serde::Serialize;
use trade_generator::generator::{MarketPriceUpdateOptions, PriceMove};

/// Outcome of an ad hoc price move
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BumpReport {
    /// Moved instrument
    pub ticker: String,
    /// Price before the move
    pub previous_price: f64,
    /// Price after the move
    pub new_price: f64,
    /// Size of the move, in percent
    pub variation_percentage: u32,
    /// Whether the configured significant move was applied
    pub forced: bool,
}

impl From<PriceMove> for BumpReport {
    fn from(price_move: PriceMove) -> Self {
        Self {
            new_price: price_move.new_price(),
            ticker: price_move.instrument.ticker,
            previous_price: price_move.previous_price,
            variation_percentage: price_move.variation_percentage,
            forced: price_move.forced,
        }
    }
}

/// Move the price of `ticker` (or of a random instrument)
pub fn apply(
    config: &DemoConfig,
    ticker: Option<&str>,
    force: bool,
) -> Result<BumpReport, DemoError> {
    let generator = build_generator(config)?;
    let price_move = match ticker {
        Some(ticker) => generator.update_market_price(
            ticker,
            MarketPriceUpdateOptions {
                force_market_price_variation: force,
            },
        )?,
        None => generator.apply_market_price_variation(force),
    };
    Ok(price_move.into())
}

/// Apply a price move and render it as pretty JSON
pub fn run(config: &DemoConfig, ticker: Option<&str>, force: bool) -> Result<String, DemoError> {
    let report = apply(config, ticker, force)?;
    to_json(&report, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_forced_bump_on_ticker() {
        let report = apply(&DemoConfig::default(), Some("AAPL"), true).unwrap();
        assert_eq!(report.ticker, "AAPL");
        assert_eq!(report.variation_percentage, 10);
        assert_relative_eq!(
            (report.new_price - report.previous_price).abs(),
            report.previous_price * 0.10,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_unknown_ticker() {
        let err = apply(&DemoConfig::default(), Some("TSLA"), false).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_random_bump_is_bounded() {
        let config = DemoConfig::default();
        let report = apply(&config, None, false).unwrap();
        let max = f64::from(config.generator.max_market_price_percentage_variation);
        assert!(report.variation_percentage >= 1);
        assert!(f64::from(report.variation_percentage) <= max);
    }
}
