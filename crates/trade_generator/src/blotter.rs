//! Trade store contract.
//!
//! The generator never holds the trades it produces. Whatever displays them
//! implements [`TradeStore`]; [`resync_market_price`] is the adapter that
//! propagates a catalog price move to the stored rows.

use crate::catalog::Instrument;
use crate::error::GeneratorError;
use crate::generator::TradeGenerator;
use crate::trade::{Trade, TradeStatus};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Row-level operations the generator and scheduler need from a trade store
pub trait TradeStore: Send + Sync {
    /// Replace every row
    fn replace_all(&self, trades: Vec<Trade>);

    /// Insert rows at a position (0 = top); positions past the end append
    fn insert_at(&self, index: usize, trades: Vec<Trade>);

    /// Rows accepted by a predicate, in store order
    fn trades_matching(&self, predicate: &dyn Fn(&Trade) -> bool) -> Vec<Trade>;

    /// Overwrite rows by `trade_id`; unknown ids are ignored
    fn update_trades(&self, trades: Vec<Trade>);

    /// Set `market_price` on every row for `ticker` in one atomic step,
    /// leaving every other field as it is; returns the updated rows
    fn set_market_price(&self, ticker: &str, market_price: f64) -> Vec<Trade>;
}

/// Copy an instrument's new market price into every stored trade on that ticker.
///
/// Returns the updated rows.
pub fn resync_market_price(store: &dyn TradeStore, instrument: &Instrument) -> Vec<Trade> {
    store.set_market_price(&instrument.ticker, instrument.market_price)
}

/// In-memory blotter, newest rows first when fed by the scheduler
#[derive(Debug, Default)]
pub struct InMemoryBlotter {
    rows: RwLock<Vec<Trade>>,
}

impl InMemoryBlotter {
    /// Create an empty blotter
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<Trade>> {
        self.rows.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Trade>> {
        self.rows.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Whether the blotter is empty
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Copy of all rows
    pub fn snapshot(&self) -> Vec<Trade> {
        self.read().clone()
    }

    /// Row by trade id
    pub fn trade(&self, trade_id: &str) -> Option<Trade> {
        self.read().iter().find(|t| t.trade_id == trade_id).cloned()
    }

    /// Change the status of a row (user action); returns false for an unknown id
    pub fn set_status(&self, trade_id: &str, status: TradeStatus) -> bool {
        match self.write().iter_mut().find(|t| t.trade_id == trade_id) {
            Some(trade) => {
                trade.status = status;
                true
            }
            None => false,
        }
    }

    /// Row counts per status
    pub fn status_counts(&self) -> HashMap<TradeStatus, usize> {
        let mut counts = HashMap::new();
        for trade in self.read().iter() {
            *counts.entry(trade.status).or_insert(0) += 1;
        }
        counts
    }

    /// Rows for an inbound ticker reference.
    ///
    /// A ticker the generator does not know is reported as `NotFound`; a known
    /// ticker without rows yields an empty list.
    pub fn filter_by_ticker(
        &self,
        generator: &TradeGenerator,
        ticker: &str,
    ) -> Result<Vec<Trade>, GeneratorError> {
        if !generator.has_instrument(ticker) {
            return Err(GeneratorError::instrument_not_found(ticker));
        }
        Ok(self.trades_matching(&|trade| trade.ticker == ticker))
    }
}

impl TradeStore for InMemoryBlotter {
    fn replace_all(&self, trades: Vec<Trade>) {
        *self.write() = trades;
    }

    fn insert_at(&self, index: usize, trades: Vec<Trade>) {
        let mut rows = self.write();
        let index = index.min(rows.len());
        rows.splice(index..index, trades);
    }

    fn trades_matching(&self, predicate: &dyn Fn(&Trade) -> bool) -> Vec<Trade> {
        self.read().iter().filter(|t| predicate(t)).cloned().collect()
    }

    fn update_trades(&self, trades: Vec<Trade>) {
        let mut by_id: HashMap<String, Trade> =
            trades.into_iter().map(|t| (t.trade_id.clone(), t)).collect();

        for row in self.write().iter_mut() {
            if let Some(updated) = by_id.remove(&row.trade_id) {
                *row = updated;
            }
        }
    }

    fn set_market_price(&self, ticker: &str, market_price: f64) -> Vec<Trade> {
        let mut rows = self.write();
        rows.iter_mut()
            .filter(|row| row.ticker == ticker)
            .map(|row| {
                row.market_price = market_price;
                row.clone()
            })
            .collect()
    }
}
