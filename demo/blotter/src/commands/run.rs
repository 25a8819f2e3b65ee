//! `run` command: drive the generator against an in-memory blotter.
//!
//! Loads the initial batch, arms the generator timers and then logs a
//! periodic blotter summary and every significant price alert until the
//! shutdown future resolves.

use super::build_generator;
use crate::config::DemoConfig;
use crate::error::DemoError;
use serde::Serialize;
use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{info, warn};
use trade_generator::blotter::InMemoryBlotter;
use trade_generator::generator::TradeGenerator;
use trade_generator::scheduler::{initialize, PriceAlert};

const ALERT_BUFFER: usize = 64;

/// State of the blotter when the run ended
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    /// Rows in the blotter
    pub rows: usize,
    /// Last trade counter value handed out
    pub trade_counter: u64,
    /// Rows per status name
    pub status_counts: BTreeMap<String, usize>,
    /// Alerts received, oldest first
    pub alerts: Vec<PriceAlert>,
}

/// Run until `duration` elapses, or until Ctrl-C when no duration is given
pub async fn run(config: &DemoConfig, duration: Option<Duration>) -> Result<RunSummary, DemoError> {
    match duration {
        Some(duration) => run_until(config, tokio::time::sleep(duration)).await,
        None => {
            run_until(config, async {
                if let Err(e) = tokio::signal::ctrl_c().await {
                    warn!("Failed to listen for Ctrl-C: {}", e);
                }
            })
            .await
        }
    }
}

/// Run until `shutdown` resolves
pub async fn run_until(
    config: &DemoConfig,
    shutdown: impl Future<Output = ()>,
) -> Result<RunSummary, DemoError> {
    let generator = Arc::new(build_generator(config)?);
    let store = Arc::new(InMemoryBlotter::new());
    let (tx, rx) = async_channel::bounded(ALERT_BUFFER);

    let handle = initialize(generator.clone(), store.clone(), Some(tx));

    let period = config.summary_interval();
    let mut summary_timer = interval_at(Instant::now() + period, period);
    summary_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut alerts = Vec::new();
    // the sender is dropped right away when price variation is disabled
    let mut alerts_open = true;

    tokio::pin!(shutdown);
    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            _ = summary_timer.tick() => {
                let summary = summarize(&generator, &store);
                info!(
                    "Blotter: {} rows, counter {}, {:?}",
                    summary.rows, summary.trade_counter, summary.status_counts
                );
            }
            received = rx.recv(), if alerts_open => match received {
                Ok(alert) => {
                    println!("{}", alert.title());
                    println!("  {}", alert.message());
                    alerts.push(alert);
                }
                Err(_) => alerts_open = false,
            },
        }
    }

    handle.stop();

    let mut summary = summarize(&generator, &store);
    summary.alerts = alerts;
    info!(
        "Run finished: {} rows, {} alert(s)",
        summary.rows,
        summary.alerts.len()
    );
    Ok(summary)
}

fn summarize(generator: &TradeGenerator, store: &InMemoryBlotter) -> RunSummary {
    let status_counts = store
        .status_counts()
        .into_iter()
        .map(|(status, count)| (status.name().to_string(), count))
        .collect();

    RunSummary {
        rows: store.len(),
        trade_counter: generator.current_trade_counter(),
        status_counts,
        alerts: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_run_without_timers() {
        let mut config = DemoConfig::default();
        config.generator = config
            .generator
            .with_initial_trades(10)
            .with_counter_start(0)
            .with_market_price_variation(false)
            .with_continuous_trade_generation(false);

        let summary = run(&config, Some(Duration::from_secs(30))).await.unwrap();
        assert_eq!(summary.rows, 10);
        assert_eq!(summary.trade_counter, 10);
        assert!(summary.alerts.is_empty());
        assert_eq!(summary.status_counts.values().sum::<usize>(), 10);
    }
}
