//! Fixed reference data for synthetic trades.
//!
//! All tables are non-empty and live for the whole process. Draws are
//! uniform over each slice, so duplicated entries (book `B2`) weight the
//! draw on purpose.

use crate::trade::Currency;

/// Static description of a listed instrument
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InstrumentSpec {
    /// Ticker symbol
    pub ticker: &'static str,
    /// Display name
    pub name: &'static str,
    /// CUSIP identifier
    pub cusip: &'static str,
    /// Market price at startup
    pub initial_price: f64,
}

/// Contact at a counterparty
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterpartyContact {
    /// Counterparty name
    pub counterparty: &'static str,
    /// Contact name
    pub contact: &'static str,
    /// Contact email
    pub email: &'static str,
}

/// The user running the blotter; always part of the trader list
pub const CURRENT_USER: &str = "Finsemble Demo User";

/// Instruments available at startup
pub const INSTRUMENTS: &[InstrumentSpec] = &[
    InstrumentSpec { ticker: "AAPL", name: "Apple Inc.", cusip: "37833100", initial_price: 145.30 },
    InstrumentSpec { ticker: "ABBV", name: "AbbVie Inc.", cusip: "00287Y109", initial_price: 140.29 },
    InstrumentSpec { ticker: "ACN", name: "Accenture plc", cusip: "G1151C101", initial_price: 269.70 },
    InstrumentSpec { ticker: "AMZN", name: "Amazon.com", cusip: "23135106", initial_price: 120.30 },
    InstrumentSpec { ticker: "BA", name: "Boeing Co.", cusip: "97023105", initial_price: 132.20 },
    InstrumentSpec { ticker: "BAC", name: "Bank of America Corp", cusip: "60505104", initial_price: 31.46 },
    InstrumentSpec { ticker: "CSCO", name: "Cisco Systems", cusip: "17275R102", initial_price: 41.52 },
    InstrumentSpec { ticker: "FB", name: "Facebook", cusip: "30303M102", initial_price: 139.07 },
    InstrumentSpec { ticker: "GM", name: "General Motors", cusip: "37045V100", initial_price: 34.63 },
    InstrumentSpec { ticker: "GOOG", name: "Alphabet Inc", cusip: "02079K107", initial_price: 102.24 },
    InstrumentSpec { ticker: "INTC", name: "Intel Corporation", cusip: "458140100", initial_price: 27.80 },
    InstrumentSpec { ticker: "MSFT", name: "Microsoft", cusip: "594918104", initial_price: 246.79 },
    InstrumentSpec { ticker: "NKE", name: "Nike", cusip: "654106103", initial_price: 90.17 },
    InstrumentSpec { ticker: "ORCL", name: "Oracle Corporation", cusip: "68389X105", initial_price: 65.30 },
];

/// Traders owning the generated trades
pub const TRADERS: &[&str] = &[
    CURRENT_USER,
    "Stacee Dreiling",
    "Cecil Staab",
    "Gertrude Dowdy",
    "Loralee Stalker",
    "Sanjuana Kimsey",
    "Shante Hey",
    "Magen Willison",
    "Casimira Tabler",
    "Germanine Rybicki",
];

/// Trading books
pub const BOOKS: &[&str] = &["A1", "A2", "A3", "B1", "B2", "B2", "B3"];

/// Counterparty names
pub const COUNTERPARTIES: &[&str] = &[
    "Goldman Sachs",
    "Soc Gen",
    "Barclays",
    "BAML",
    "Citi",
    "JP Morgan",
    "Morgan Stanley",
    "UBS",
];

/// Contacts per counterparty; every entry of [`COUNTERPARTIES`] has at least one
pub const COUNTERPARTY_CONTACTS: &[CounterpartyContact] = &[
    CounterpartyContact { counterparty: "Goldman Sachs", contact: "GS1", email: "gs1@gs.com" },
    CounterpartyContact { counterparty: "Goldman Sachs", contact: "GS2", email: "gs2@gs.com" },
    CounterpartyContact { counterparty: "Goldman Sachs", contact: "GS3", email: "gs3@gs.com" },
    CounterpartyContact { counterparty: "Soc Gen", contact: "Soc1", email: "soc1@socgen.com" },
    CounterpartyContact { counterparty: "Soc Gen", contact: "Soc2", email: "soc2@socgen.com" },
    CounterpartyContact { counterparty: "Soc Gen", contact: "Soc3", email: "soc3@socgen.com" },
    CounterpartyContact { counterparty: "BAML", contact: "BAML1", email: "baml1@bankofamerica.com" },
    CounterpartyContact { counterparty: "BAML", contact: "BAML2", email: "baml2@bankofamerica.com" },
    CounterpartyContact { counterparty: "BAML", contact: "BAML3", email: "baml3@bankofamerica.com" },
    CounterpartyContact { counterparty: "Barclays", contact: "Barc1", email: "barc1@barcap.com" },
    CounterpartyContact { counterparty: "Barclays", contact: "Barc2", email: "barc2@barcap.com" },
    CounterpartyContact { counterparty: "Citi", contact: "Citi1", email: "citi1@citi.com" },
    CounterpartyContact { counterparty: "Citi", contact: "Citi2", email: "citi2@citi.com" },
    CounterpartyContact { counterparty: "JP Morgan", contact: "JP1", email: "jp1@jpmorgan.com" },
    CounterpartyContact { counterparty: "JP Morgan", contact: "JP2", email: "jp2@jpmorgan.com" },
    CounterpartyContact { counterparty: "JP Morgan", contact: "JP3", email: "jp3@jpmorgan.com" },
    CounterpartyContact { counterparty: "Morgan Stanley", contact: "MS1", email: "ms1@morganstanley.com" },
    CounterpartyContact { counterparty: "Morgan Stanley", contact: "MS2", email: "ms2@morganstanley.com" },
    CounterpartyContact { counterparty: "Morgan Stanley", contact: "MS3", email: "ms3@morganstanley.com" },
    CounterpartyContact { counterparty: "UBS", contact: "UBS1", email: "ubs1@ubs.com" },
    CounterpartyContact { counterparty: "UBS", contact: "UBS2", email: "ubs2@ubs.com" },
];

/// Settlement currencies
pub const CURRENCIES: &[Currency] = &[Currency::EUR, Currency::USD, Currency::GBP];

/// Moody's long-term ratings
pub const MOODYS_RATINGS: &[&str] = &[
    "Aaa", "Aa1", "Aa2", "Aa3", "A1", "A2", "A3", "Baa1", "Baa2", "Baa3", "Ba1", "Ba2", "Ba3",
    "B1", "B2", "B3", "Caa", "Ca", "C", "WR", "NR",
];

/// Contacts of a counterparty, `None` for an unknown name
pub fn contacts_for(counterparty: &str) -> Option<Vec<&'static CounterpartyContact>> {
    let contacts: Vec<_> = COUNTERPARTY_CONTACTS
        .iter()
        .filter(|c| c.counterparty == counterparty)
        .collect();

    if contacts.is_empty() {
        None
    } else {
        Some(contacts)
    }
}
