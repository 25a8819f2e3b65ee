//! `snapshot` command: a one-off batch of trades as JSON.

use super::{build_generator, to_json};
use crate::config::DemoConfig;
use crate::error::DemoError;

/// Generate `count` past-dated trades, newest first, and render them as JSON
pub fn run(config: &DemoConfig, count: usize, pretty: bool) -> Result<String, DemoError> {
    if count == 0 {
        return Err(DemoError::invalid_argument("count must be greater than 0"));
    }

    let generator = build_generator(config)?;
    let trades = generator.generate_trades(count)?;
    tracing::info!(
        "Generated {} trades, counter now {}",
        trades.len(),
        generator.current_trade_counter()
    );

    to_json(&trades, pretty)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_json() {
        let config = DemoConfig::default();
        let json = run(&config, 3, false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        let rows = value.as_array().unwrap();
        assert_eq!(rows.len(), 3);
        let first_id = rows[0]["tradeId"].as_str().unwrap();
        assert!(first_id.starts_with("11237-"));
    }

    #[test]
    fn test_snapshot_zero_count() {
        let err = run(&DemoConfig::default(), 0, false).unwrap_err();
        assert!(matches!(err, DemoError::InvalidArgument(_)));
    }
}
