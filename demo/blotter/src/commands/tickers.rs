//! `tickers` command: the instrument catalog at startup prices.

use super::build_generator;
use crate::config::DemoConfig;
use crate::error::DemoError;
use trade_generator::catalog::InstrumentCatalog;

/// Render the available tickers with their current market prices as a table
pub fn run(config: &DemoConfig) -> Result<String, DemoError> {
    let generator = build_generator(config)?;
    Ok(render_table(&generator.catalog_snapshot()))
}

/// One header line, a rule, then one line per instrument
pub fn render_table(catalog: &InstrumentCatalog) -> String {
    let header = format!(
        "{:<8} {:<32} {:<10} {:>10}\n",
        "Ticker", "Instrument", "CUSIP", "Price"
    );
    let mut out = header;
    out.push_str(&"-".repeat(63));
    out.push('\n');

    for instrument in catalog.iter() {
        out.push_str(&format!(
            "{:<8} {:<32} {:<10} {:>10.2}\n",
            instrument.ticker, instrument.name, instrument.cusip, instrument.market_price
        ));
    }
    out
}
