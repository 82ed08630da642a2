//! Shared fixtures for the strategist behavior tests.

use std::sync::Arc;

pub use strategist_core::{Catalog, MarketSnapshot, PortfolioEngine, Symbol};

/// Unit prices of the builtin catalog assets, in quote currency.
pub const REFERENCE_PRICES: [(&str, f64); 6] = [
    ("VOO", 520.0),
    ("SPY", 580.0),
    ("AAPL", 230.0),
    ("MSFT", 425.0),
    ("JNJ", 155.0),
    ("KO", 62.0),
];

pub const REFERENCE_FX_RATE: f64 = 1540.0;

pub fn symbol(raw: &str) -> Symbol {
    Symbol::parse(raw).expect("valid symbol")
}

/// Engine over the builtin catalog.
pub fn builtin_engine() -> PortfolioEngine {
    PortfolioEngine::new(Arc::new(Catalog::builtin()))
}

/// Snapshot holding every reference price at the reference rate.
pub fn reference_market() -> MarketSnapshot {
    REFERENCE_PRICES
        .into_iter()
        .fold(MarketSnapshot::new(REFERENCE_FX_RATE), |market, (ticker, price)| {
            market.with_price(symbol(ticker), price)
        })
}
