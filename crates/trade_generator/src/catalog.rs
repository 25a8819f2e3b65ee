//! Instrument catalog.
//!
//! The catalog is the authoritative store of current market prices, keyed
//! by ticker. It is owned by the [`crate::generator::TradeGenerator`] and
//! mutated in place by the price variation cycle; readers receive clones.

use crate::reference_data::INSTRUMENTS;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Instrument with its current market price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instrument {
    /// Ticker symbol (unique key)
    pub ticker: String,
    /// Display name
    #[serde(rename = "instrument")]
    pub name: String,
    /// CUSIP identifier
    pub cusip: String,
    /// Current market price
    pub market_price: f64,
}

impl Instrument {
    /// Create a new instrument
    pub fn new(
        ticker: impl Into<String>,
        name: impl Into<String>,
        cusip: impl Into<String>,
        market_price: f64,
    ) -> Self {
        Self {
            ticker: ticker.into(),
            name: name.into(),
            cusip: cusip.into(),
            market_price,
        }
    }
}

/// Ticker-keyed instrument table, kept sorted by ticker
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InstrumentCatalog {
    instruments: Vec<Instrument>,
}

impl InstrumentCatalog {
    /// Catalog with the standard reference instruments at their startup prices
    pub fn standard() -> Self {
        Self::from_instruments(INSTRUMENTS.iter().map(|spec| {
            Instrument::new(spec.ticker, spec.name, spec.cusip, spec.initial_price)
        }))
    }

    /// Catalog from arbitrary instruments; a repeated ticker keeps the last entry
    pub fn from_instruments(instruments: impl IntoIterator<Item = Instrument>) -> Self {
        let by_ticker: BTreeMap<String, Instrument> = instruments
            .into_iter()
            .map(|i| (i.ticker.clone(), i))
            .collect();

        Self {
            instruments: by_ticker.into_values().collect(),
        }
    }

    /// Number of instruments
    pub fn len(&self) -> usize {
        self.instruments.len()
    }

    /// Whether the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.instruments.is_empty()
    }

    fn position(&self, ticker: &str) -> Option<usize> {
        self.instruments
            .binary_search_by(|i| i.ticker.as_str().cmp(ticker))
            .ok()
    }

    /// Look up an instrument by ticker
    pub fn get(&self, ticker: &str) -> Option<&Instrument> {
        self.position(ticker).map(|idx| &self.instruments[idx])
    }

    /// Whether a ticker is present
    pub fn contains(&self, ticker: &str) -> bool {
        self.position(ticker).is_some()
    }

    /// Instruments in ticker order
    pub fn as_slice(&self) -> &[Instrument] {
        &self.instruments
    }

    /// Tickers in sorted order
    pub fn tickers(&self) -> Vec<String> {
        self.instruments.iter().map(|i| i.ticker.clone()).collect()
    }

    /// Iterate over instruments in ticker order
    pub fn iter(&self) -> impl Iterator<Item = &Instrument> {
        self.instruments.iter()
    }

    /// Overwrite the market price of a ticker, returning the previous price
    pub fn set_market_price(&mut self, ticker: &str, price: f64) -> Option<f64> {
        let idx = self.position(ticker)?;
        let instrument = &mut self.instruments[idx];
        let previous = instrument.market_price;
        instrument.market_price = price;
        Some(previous)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_standard_catalog() {
        let catalog = InstrumentCatalog::standard();
        assert_eq!(catalog.len(), 14);
        assert_relative_eq!(catalog.get("AAPL").unwrap().market_price, 145.30);
        assert_eq!(catalog.get("MSFT").unwrap().name, "Microsoft");
        assert!(catalog.get("TSLA").is_none());
    }

    #[test]
    fn test_tickers_sorted() {
        let tickers = InstrumentCatalog::standard().tickers();
        let mut sorted = tickers.clone();
        sorted.sort();
        assert_eq!(tickers, sorted);
        assert_eq!(tickers.first().map(String::as_str), Some("AAPL"));
    }

    #[test]
    fn test_set_market_price() {
        let mut catalog = InstrumentCatalog::standard();
        let previous = catalog.set_market_price("BA", 150.0);
        assert_eq!(previous, Some(132.20));
        assert_relative_eq!(catalog.get("BA").unwrap().market_price, 150.0);
        assert_eq!(catalog.set_market_price("XYZ", 1.0), None);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut catalog = InstrumentCatalog::standard();
        let snapshot = catalog.clone();
        catalog.set_market_price("AAPL", 1.0);
        assert_relative_eq!(snapshot.get("AAPL").unwrap().market_price, 145.30);
    }
}
