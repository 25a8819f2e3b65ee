//! Timer-driven trade generation and price variation.
//!
//! [`initialize`] loads the initial batch into a store and arms up to three
//! tokio tasks:
//!
//! - a one-shot early trade after `first_trade_delay_in_seconds`
//! - a new today-dated trade every `trade_generation_interval_in_seconds`,
//!   inserted at the top of the store
//! - a market price move every `market_price_variation_interval_in_seconds`,
//!   resynced into the store; forced whenever the trade counter is a multiple
//!   of `force_market_price_percentage_variation_sequence`
//!
//! The tasks run independently. Shared state is only touched through the
//! generator, whose mutex serializes every read-modify-write. Publishing a
//! trade and publishing a price move also exclude each other, so a trade
//! built at the old price is never inserted after the move's resync.

use crate::blotter::{resync_market_price, TradeStore};
use crate::error::GeneratorError;
use crate::generator::{GenerateTradeOptions, PriceMove, TradeGenerator};
use crate::trade::Trade;
use async_channel::Sender;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, sleep, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Significant market price change that hit at least one stored trade
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceAlert {
    /// Instrument ticker
    pub ticker: String,
    /// Price before the move
    pub previous_price: f64,
    /// Price after the move
    pub new_price: f64,
    /// Size of the move, in percent
    pub variation_percentage: u32,
    /// Number of stored trades resynced to the new price
    pub affected_trades: usize,
}

impl PriceAlert {
    /// Alert headline
    pub fn title(&self) -> String {
        format!("{} - Significant Market Price Change!", self.ticker)
    }

    /// Alert body
    pub fn message(&self) -> String {
        format!(
            "Market Price for {} has a {}% change, from {} to {}",
            self.ticker, self.variation_percentage, self.previous_price, self.new_price
        )
    }
}

/// Result of one price variation step applied to a store
#[derive(Debug, Clone)]
pub struct PriceTick {
    /// The catalog move
    pub price_move: PriceMove,
    /// Rows resynced to the new price
    pub updated_trades: Vec<Trade>,
    /// Raised for forced moves that touched at least one row
    pub alert: Option<PriceAlert>,
}

/// Generate one today-dated trade and insert it at the top of the store
pub fn publish_new_trade(
    generator: &TradeGenerator,
    store: &dyn TradeStore,
) -> Result<Trade, GeneratorError> {
    let _publishing = generator.publish_guard();
    let trade = generator.generate_trade(GenerateTradeOptions::today())?;
    store.insert_at(0, vec![trade.clone()]);
    debug!("Inserted new trade {}", trade.trade_id);
    Ok(trade)
}

/// Move a random instrument price and resync the store rows that reference it
pub fn publish_price_move(
    generator: &TradeGenerator,
    store: &dyn TradeStore,
    forced: bool,
) -> PriceTick {
    let _publishing = generator.publish_guard();
    let price_move = generator.apply_market_price_variation(forced);
    let updated_trades = resync_market_price(store, &price_move.instrument);

    let alert = (price_move.forced && !updated_trades.is_empty()).then(|| PriceAlert {
        ticker: price_move.instrument.ticker.clone(),
        previous_price: price_move.previous_price,
        new_price: price_move.new_price(),
        variation_percentage: price_move.variation_percentage,
        affected_trades: updated_trades.len(),
    });

    PriceTick {
        price_move,
        updated_trades,
        alert,
    }
}

/// Running generator: the shared generator plus its timer tasks
pub struct GeneratorHandle {
    generator: Arc<TradeGenerator>,
    running: Arc<AtomicBool>,
    tasks: Vec<JoinHandle<()>>,
}

impl GeneratorHandle {
    /// The shared generator, for ad hoc trades and price moves
    pub fn generator(&self) -> &Arc<TradeGenerator> {
        &self.generator
    }

    /// Whether the timers are still armed
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Number of timer tasks armed at start-up
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Stop every timer task
    pub fn stop(&self) {
        if self.running.swap(false, Ordering::SeqCst) {
            for task in &self.tasks {
                task.abort();
            }
            info!("Trade generator stopped");
        }
    }
}

impl Drop for GeneratorHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Load the initial batch into `store` and arm the timers.
///
/// Must be called from within a tokio runtime. Alerts are delivered with
/// `try_send`, so a slow or absent consumer never stalls the price cycle.
pub fn initialize(
    generator: Arc<TradeGenerator>,
    store: Arc<dyn TradeStore>,
    alerts: Option<Sender<PriceAlert>>,
) -> GeneratorHandle {
    let config = generator.config().clone();
    let running = Arc::new(AtomicBool::new(true));
    let mut tasks = Vec::new();

    if config.initial_trades_number > 0 {
        match generator.generate_trades(config.initial_trades_number) {
            Ok(trades) => {
                store.replace_all(trades);
                info!("Loaded {} initial trades", config.initial_trades_number);
            }
            Err(e) => warn!("Initial trades not loaded: {}", e),
        }
    }

    if config.enable_continuous_trade_generation {
        let (gen, store_ref, flag) = (generator.clone(), store.clone(), running.clone());
        let delay = config.first_trade_delay();
        tasks.push(tokio::spawn(async move {
            sleep(delay).await;
            if flag.load(Ordering::SeqCst) {
                if let Err(e) = publish_new_trade(&gen, store_ref.as_ref()) {
                    warn!("New trade not published: {}", e);
                }
            }
        }));

        let (gen, store_ref, flag) = (generator.clone(), store.clone(), running.clone());
        let period = config.trade_generation_interval();
        tasks.push(tokio::spawn(async move {
            run_every(period, flag, move || {
                if let Err(e) = publish_new_trade(&gen, store_ref.as_ref()) {
                    warn!("New trade not published: {}", e);
                }
            })
            .await;
        }));
    }

    if config.enable_market_price_variation {
        let (gen, store_ref, flag) = (generator.clone(), store.clone(), running.clone());
        let period = config.market_price_variation_interval();
        tasks.push(tokio::spawn(async move {
            run_every(period, flag, move || {
                let forced = gen.should_force_market_price_variation();
                let tick = publish_price_move(&gen, store_ref.as_ref(), forced);
                if let Some(alert) = tick.alert {
                    warn!("{}: {}", alert.title(), alert.message());
                    if let Some(tx) = &alerts {
                        if let Err(e) = tx.try_send(alert) {
                            debug!("Price alert dropped: {}", e);
                        }
                    }
                }
            })
            .await;
        }));
    }

    info!(
        "Trade generator started with {} timer task(s), counter at {}",
        tasks.len(),
        generator.current_trade_counter()
    );

    GeneratorHandle {
        generator,
        running,
        tasks,
    }
}

/// Call `step` every `period` (first call after one period) while `running` holds
async fn run_every(period: Duration, running: Arc<AtomicBool>, mut step: impl FnMut()) {
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        if !running.load(Ordering::SeqCst) {
            break;
        }
        step();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blotter::InMemoryBlotter;
    use crate::catalog::{Instrument, InstrumentCatalog};
    use crate::config::GeneratorConfig;
    use crate::random;

    #[test]
    fn test_alert_text() {
        let alert = PriceAlert {
            ticker: "AAPL".to_string(),
            previous_price: 145.3,
            new_price: 159.83,
            variation_percentage: 10,
            affected_trades: 3,
        };
        assert_eq!(alert.title(), "AAPL - Significant Market Price Change!");
        assert!(alert.message().contains("from 145.3 to 159.83"));
    }

    #[test]
    fn test_forced_move_without_rows_raises_no_alert() {
        let gen = TradeGenerator::builder()
            .random_source(random::seeded(3))
            .build()
            .unwrap();
        let store = InMemoryBlotter::new();

        let tick = publish_price_move(&gen, &store, true);
        assert!(tick.updated_trades.is_empty());
        assert!(tick.alert.is_none());
    }

    #[test]
    fn test_forced_move_with_rows_raises_alert() {
        let gen = TradeGenerator::builder()
            .config(GeneratorConfig::default())
            .catalog(InstrumentCatalog::from_instruments([Instrument::new(
                "AAPL", "Apple Inc.", "37833100", 145.30,
            )]))
            .random_source(random::seeded(3))
            .build()
            .unwrap();
        let store = InMemoryBlotter::new();
        store.replace_all(gen.generate_trades(4).unwrap());

        let tick = publish_price_move(&gen, &store, true);
        let alert = tick.alert.unwrap();
        assert_eq!(alert.affected_trades, 4);
        assert_eq!(alert.variation_percentage, 10);
        assert!(store
            .snapshot()
            .iter()
            .all(|t| t.market_price == alert.new_price));
    }

    #[test]
    fn test_publish_new_trade_goes_on_top() {
        let gen = TradeGenerator::builder()
            .random_source(random::seeded(4))
            .build()
            .unwrap();
        let store = InMemoryBlotter::new();
        store.replace_all(gen.generate_trades(2).unwrap());

        let trade = publish_new_trade(&gen, &store).unwrap();
        assert_eq!(store.snapshot()[0].trade_id, trade.trade_id);
    }

    #[test]
    fn test_concurrent_publishing_keeps_store_in_sync() {
        let gen = TradeGenerator::builder()
            .catalog(InstrumentCatalog::from_instruments([Instrument::new(
                "AAPL", "Apple Inc.", "37833100", 145.30,
            )]))
            .random_source(random::seeded(5))
            .build()
            .unwrap();
        let store = InMemoryBlotter::new();

        std::thread::scope(|scope| {
            for worker in 0..4 {
                let (gen, store) = (&gen, &store);
                scope.spawn(move || {
                    for _ in 0..200 {
                        if worker % 2 == 0 {
                            publish_new_trade(gen, store).unwrap();
                        } else {
                            publish_price_move(gen, store, false);
                        }
                    }
                });
            }
        });

        let price = gen.instrument("AAPL").unwrap().market_price;
        assert_eq!(store.len(), 400);
        assert!(store.snapshot().iter().all(|t| t.market_price == price));
    }
}
