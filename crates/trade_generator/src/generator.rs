//! Synthetic trade generation and market price variation.
//!
//! [`TradeGenerator`] owns the trade counter, the instrument catalog and the
//! random source behind a single mutex. Every operation that reads and then
//! writes shared state (allocating a trade id, moving a price) runs as one
//! critical section, so the generator can be shared through an `Arc` by the
//! host and by the scheduler tasks at the same time.

use crate::catalog::{Instrument, InstrumentCatalog};
use crate::config::{ConfigError, GeneratorConfig};
use crate::error::GeneratorError;
use crate::random::{self, meaningful_double_in_range, pick, Clock, RandomSource, SystemClock};
use crate::reference_data::{
    contacts_for, BOOKS, COUNTERPARTIES, CURRENCIES, MOODYS_RATINGS, TRADERS,
};
use crate::trade::{Trade, TradeDirection, TradeStatus};
use chrono::{Days, NaiveDate};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

/// Lowest market price a move can produce
pub const MIN_MARKET_PRICE: f64 = 0.01;

const QUANTITY_RANGE: (i64, i64) = (2, 5);
const COMMISSION_RANGE: (f64, f64) = (0.1, 0.35);
const FEES_RANGE: (f64, f64) = (5.0, 30.0);

/// Options for [`TradeGenerator::generate_trade`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerateTradeOptions {
    /// Date the trade today instead of a random past date
    pub trade_date_today: bool,
}

impl GenerateTradeOptions {
    /// Options for a trade booked today
    pub fn today() -> Self {
        Self {
            trade_date_today: true,
        }
    }
}

/// Options for [`TradeGenerator::update_market_price_on_random_instrument`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarketPriceUpdateOptions {
    /// Apply the configured significant move instead of a small random one
    pub force_market_price_variation: bool,
}

impl MarketPriceUpdateOptions {
    /// Options for a forced, significant move
    pub fn forced() -> Self {
        Self {
            force_market_price_variation: true,
        }
    }
}

/// Outcome of a single market price move
#[derive(Debug, Clone, PartialEq)]
pub struct PriceMove {
    /// Instrument snapshot carrying the new price
    pub instrument: Instrument,
    /// Price before the move
    pub previous_price: f64,
    /// Size of the move, in percent
    pub variation_percentage: u32,
    /// Whether the move was forced
    pub forced: bool,
}

impl PriceMove {
    /// New market price
    pub fn new_price(&self) -> f64 {
        self.instrument.market_price
    }

    /// Signed change relative to the previous price, in percent
    pub fn change_pct(&self) -> f64 {
        (self.new_price() - self.previous_price) / self.previous_price * 100.0
    }
}

struct GeneratorState {
    counter: u64,
    catalog: InstrumentCatalog,
    rng: Box<dyn RandomSource>,
}

/// Builder for [`TradeGenerator`]
pub struct TradeGeneratorBuilder {
    config: GeneratorConfig,
    catalog: InstrumentCatalog,
    rng: Option<Box<dyn RandomSource>>,
    clock: Arc<dyn Clock>,
}

impl TradeGeneratorBuilder {
    /// Set the generator options
    pub fn config(mut self, config: GeneratorConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the standard instrument catalog
    pub fn catalog(mut self, catalog: InstrumentCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Replace the entropy-seeded random source
    pub fn random_source(mut self, rng: Box<dyn RandomSource>) -> Self {
        self.rng = Some(rng);
        self
    }

    /// Replace the system clock
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Validate the options and build the generator
    pub fn build(self) -> Result<TradeGenerator, GeneratorError> {
        self.config.validate()?;
        if self.catalog.is_empty() {
            return Err(ConfigError::Validation(vec![
                "instrument catalog must not be empty".to_string(),
            ])
            .into());
        }

        Ok(TradeGenerator {
            state: Mutex::new(GeneratorState {
                counter: self.config.trade_counter_start,
                catalog: self.catalog,
                rng: self.rng.unwrap_or_else(random::entropy),
            }),
            config: self.config,
            clock: self.clock,
            publish: Mutex::new(()),
        })
    }
}

/// Synthetic trade generator
pub struct TradeGenerator {
    config: GeneratorConfig,
    clock: Arc<dyn Clock>,
    state: Mutex<GeneratorState>,
    // held across generate-and-store and move-and-resync
    publish: Mutex<()>,
}

impl TradeGenerator {
    /// Start building a generator with default options
    pub fn builder() -> TradeGeneratorBuilder {
        TradeGeneratorBuilder {
            config: GeneratorConfig::default(),
            catalog: InstrumentCatalog::standard(),
            rng: None,
            clock: Arc::new(SystemClock),
        }
    }

    /// Generator with the standard catalog, entropy and the system clock
    pub fn new(config: GeneratorConfig) -> Result<Self, GeneratorError> {
        Self::builder().config(config).build()
    }

    fn state(&self) -> MutexGuard<'_, GeneratorState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Serializes store publication so a trade generated before a price move
    /// cannot reach the store after that move's resync
    pub(crate) fn publish_guard(&self) -> MutexGuard<'_, ()> {
        self.publish.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Generator options
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Today's date according to the generator clock
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Last counter value handed out (or the start value)
    pub fn current_trade_counter(&self) -> u64 {
        self.state().counter
    }

    /// Whether the next timed price move should be forced
    pub fn should_force_market_price_variation(&self) -> bool {
        self.current_trade_counter() % self.config.force_market_price_percentage_variation_sequence
            == 0
    }

    /// Generate a single trade.
    ///
    /// The counter only advances once the trade is fully built. Fails with
    /// `CounterExhausted` once the counter has reached `u64::MAX`.
    pub fn generate_trade(&self, options: GenerateTradeOptions) -> Result<Trade, GeneratorError> {
        let today = self.clock.today();
        let config = &self.config;

        let mut guard = self.state();
        let state = &mut *guard;
        let counter = state
            .counter
            .checked_add(1)
            .ok_or(GeneratorError::CounterExhausted {
                counter: state.counter,
            })?;
        let rng = state.rng.as_mut();

        let instrument = pick(rng, state.catalog.as_slice()).clone();

        let trade_date = if options.trade_date_today {
            today
        } else {
            let days_ago = rng.int_in_range(1, i64::from(config.trade_date_max_days_ago));
            today - Days::new(days_ago as u64)
        };
        let settlement_days = rng.int_in_range(
            i64::from(config.settlement_days_min),
            i64::from(config.settlement_days_max),
        );
        let settlement_date = trade_date + Days::new(settlement_days as u64);

        let direction = if rng.coin() {
            TradeDirection::Buy
        } else {
            TradeDirection::Sell
        };

        let market_price = instrument.market_price;
        let deviation_pct =
            rng.int_in_range(1, i64::from(config.max_unit_price_percentage_deviation));
        let unit_price_delta = market_price * deviation_pct as f64 / 100.0;
        let unit_price = if rng.coin() {
            market_price - unit_price_delta
        } else {
            market_price + unit_price_delta
        };

        let status = if options.trade_date_today {
            TradeStatus::InProgress
        } else if settlement_date <= today {
            TradeStatus::Completed
        } else if rng.int_in_range(1, i64::from(config.rejected_odds)) == 1 {
            TradeStatus::Rejected
        } else {
            TradeStatus::InProgress
        };

        let client_name = *pick(rng, COUNTERPARTIES);
        let (client_contact, client_email) = match contacts_for(client_name) {
            Some(contacts) => {
                let contact = *pick(rng, &contacts);
                (contact.contact, contact.email)
            }
            None => ("", ""),
        };

        let fill = if status == TradeStatus::Completed {
            100
        } else {
            rng.int_in_range(i64::from(config.fill_min), i64::from(config.fill_max)) as u32
        };

        let trade = Trade {
            trade_id: Trade::make_id(counter, &instrument.ticker, direction),
            user: pick(rng, TRADERS).to_string(),
            book: pick(rng, BOOKS).to_string(),
            client_name: client_name.to_string(),
            client_contact: client_contact.to_string(),
            client_email: client_email.to_string(),
            trade_date,
            settlement_date,
            direction,
            status,
            ticker: instrument.ticker,
            cusip: instrument.cusip,
            instrument: instrument.name,
            currency: *pick(rng, CURRENCIES),
            quantity: rng.int_in_range(QUANTITY_RANGE.0, QUANTITY_RANGE.1) as u32,
            unit_price,
            commission: meaningful_double_in_range(rng, COMMISSION_RANGE.0, COMMISSION_RANGE.1),
            fees: meaningful_double_in_range(rng, FEES_RANGE.0, FEES_RANGE.1),
            rating: pick(rng, MOODYS_RATINGS).to_string(),
            market_price,
            fill,
        };

        state.counter = counter;
        debug!("Generated trade {} ({})", trade.trade_id, trade.status);

        Ok(trade)
    }

    /// Generate `count` past-dated trades, newest counter first
    pub fn generate_trades(&self, count: usize) -> Result<Vec<Trade>, GeneratorError> {
        let mut trades = (0..count)
            .map(|_| self.generate_trade(GenerateTradeOptions::default()))
            .collect::<Result<Vec<Trade>, GeneratorError>>()?;
        trades.reverse();
        Ok(trades)
    }

    /// Move the market price of a random instrument and return its new snapshot.
    ///
    /// The catalog is updated in place. Trades already handed out keep their
    /// old `market_price` until the holder resyncs them with
    /// [`crate::blotter::resync_market_price`].
    pub fn update_market_price_on_random_instrument(
        &self,
        options: MarketPriceUpdateOptions,
    ) -> Instrument {
        self.apply_market_price_variation(options.force_market_price_variation)
            .instrument
    }

    /// Move the market price of a random instrument, reporting the old price too
    pub fn apply_market_price_variation(&self, forced: bool) -> PriceMove {
        let mut guard = self.state();
        let state = &mut *guard;
        let instrument = pick(state.rng.as_mut(), state.catalog.as_slice()).clone();
        self.move_price(state, instrument, forced)
    }

    /// Move the market price of a given instrument
    pub fn update_market_price(
        &self,
        ticker: &str,
        options: MarketPriceUpdateOptions,
    ) -> Result<PriceMove, GeneratorError> {
        let mut guard = self.state();
        let instrument = guard
            .catalog
            .get(ticker)
            .cloned()
            .ok_or_else(|| GeneratorError::instrument_not_found(ticker))?;
        Ok(self.move_price(&mut guard, instrument, options.force_market_price_variation))
    }

    fn move_price(&self, state: &mut GeneratorState, instrument: Instrument, forced: bool) -> PriceMove {
        let rng = state.rng.as_mut();

        let variation_percentage = if forced {
            self.config.forced_market_price_percentage_variation
        } else {
            rng.int_in_range(
                1,
                i64::from(self.config.max_market_price_percentage_variation),
            ) as u32
        };

        let previous_price = instrument.market_price;
        let delta = previous_price * f64::from(variation_percentage) / 100.0;
        let new_price = if rng.coin() {
            previous_price - delta
        } else {
            previous_price + delta
        };
        let new_price = new_price.max(MIN_MARKET_PRICE);

        state.catalog.set_market_price(&instrument.ticker, new_price);
        debug!(
            "Market price for {} moved {}% from {} to {}{}",
            instrument.ticker,
            variation_percentage,
            previous_price,
            new_price,
            if forced { " (forced)" } else { "" }
        );

        PriceMove {
            instrument: Instrument {
                market_price: new_price,
                ..instrument
            },
            previous_price,
            variation_percentage,
            forced,
        }
    }

    /// Tickers in the catalog, sorted
    pub fn available_tickers(&self) -> Vec<String> {
        self.state().catalog.tickers()
    }

    /// Whether the catalog knows a ticker
    pub fn has_instrument(&self, ticker: &str) -> bool {
        self.state().catalog.contains(ticker)
    }

    /// Current snapshot of an instrument, `None` for an unknown ticker
    pub fn instrument(&self, ticker: &str) -> Option<Instrument> {
        self.state().catalog.get(ticker).cloned()
    }

    /// Current snapshot of an instrument, failing for an unknown ticker
    pub fn require_instrument(&self, ticker: &str) -> Result<Instrument, GeneratorError> {
        self.instrument(ticker)
            .ok_or_else(|| GeneratorError::instrument_not_found(ticker))
    }

    /// Batch lookup; unknown tickers yield `None` in their slot
    pub fn instruments<S: AsRef<str>>(&self, tickers: &[S]) -> Vec<Option<Instrument>> {
        let state = self.state();
        tickers
            .iter()
            .map(|t| state.catalog.get(t.as_ref()).cloned())
            .collect()
    }

    /// Deep copy of the catalog
    pub fn catalog_snapshot(&self) -> InstrumentCatalog {
        self.state().catalog.clone()
    }
}
