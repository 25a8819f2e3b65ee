//! Trade records shown on the blotter.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Buy or sell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TradeDirection {
    /// Buy
    Buy,
    /// Sell
    Sell,
}

impl TradeDirection {
    /// Single-letter code used in trade ids
    pub fn code(&self) -> char {
        match self {
            Self::Buy => 'B',
            Self::Sell => 'S',
        }
    }
}

impl fmt::Display for TradeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buy => write!(f, "Buy"),
            Self::Sell => write!(f, "Sell"),
        }
    }
}

/// Trade lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TradeStatus {
    /// Not yet settled
    #[serde(rename = "In Progress")]
    InProgress,
    /// Settled
    Completed,
    /// Rejected by the counterparty or middle office
    Rejected,
}

impl TradeStatus {
    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for TradeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Settlement currency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    /// Euro
    EUR,
    /// United States Dollar
    USD,
    /// British Pound Sterling
    GBP,
}

impl Currency {
    /// ISO 4217 code
    pub fn code(&self) -> &'static str {
        match self {
            Currency::EUR => "EUR",
            Currency::USD => "USD",
            Currency::GBP => "GBP",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "EUR" => Ok(Currency::EUR),
            "USD" => Ok(Currency::USD),
            "GBP" => Ok(Currency::GBP),
            _ => Err(format!("Unknown currency: {}", s)),
        }
    }
}

/// A single blotter row.
///
/// `market_price` is a copy of the instrument price taken when the trade was
/// generated or last resynced; the catalog holds the current value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    /// Unique id, `{counter}-{ticker}-{B|S}`
    pub trade_id: String,
    /// Owning trader
    pub user: String,
    /// Trading book
    pub book: String,
    /// Counterparty name
    pub client_name: String,
    /// Counterparty contact
    pub client_contact: String,
    /// Counterparty contact email
    pub client_email: String,
    /// Trade date
    pub trade_date: NaiveDate,
    /// Settlement date
    pub settlement_date: NaiveDate,
    /// Buy or sell
    pub direction: TradeDirection,
    /// Lifecycle status
    pub status: TradeStatus,
    /// Instrument ticker
    pub ticker: String,
    /// Instrument CUSIP
    pub cusip: String,
    /// Instrument display name
    pub instrument: String,
    /// Settlement currency
    pub currency: Currency,
    /// Quantity
    pub quantity: u32,
    /// Execution price
    pub unit_price: f64,
    /// Commission
    pub commission: f64,
    /// Fees
    pub fees: f64,
    /// Moody's rating
    pub rating: String,
    /// Instrument market price at last sync
    pub market_price: f64,
    /// Fill percentage
    pub fill: u32,
}

impl Trade {
    /// Build the trade id for a counter value, ticker and direction
    pub fn make_id(counter: u64, ticker: &str, direction: TradeDirection) -> String {
        format!("{}-{}-{}", counter, ticker, direction.code())
    }

    /// Counter value embedded in the trade id
    pub fn counter(&self) -> Option<u64> {
        self.trade_id.split('-').next()?.parse().ok()
    }

    /// Percentage deviation of the unit price from the given market price
    pub fn unit_price_deviation_pct(&self, market_price: f64) -> f64 {
        (self.unit_price - market_price).abs() / market_price * 100.0
    }
}
