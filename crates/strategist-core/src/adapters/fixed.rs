use std::collections::BTreeMap;

use crate::data_source::{FxSource, QuoteSource, SourceFuture};
use crate::{ProviderId, Symbol};

pub const DEFAULT_FALLBACK_PRICE: f64 = 100.0;
pub const DEFAULT_FALLBACK_FX_RATE: f64 = 1540.0;

/// Constant price and rate table.
///
/// Serves offline runs directly and backs the resolver when a live source
/// fails. Lookups never fail: unlisted symbols get the default price.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedMarketData {
    prices: BTreeMap<Symbol, f64>,
    default_price: f64,
    fx_rate: f64,
}

impl FixedMarketData {
    pub fn new(fx_rate: f64, default_price: f64) -> Self {
        Self {
            prices: BTreeMap::new(),
            default_price,
            fx_rate,
        }
    }

    /// Reference values for the builtin catalog symbols.
    pub fn builtin() -> Self {
        [
            ("VOO", 520.0),
            ("SPY", 580.0),
            ("AAPL", 230.0),
            ("MSFT", 425.0),
            ("JNJ", 155.0),
            ("KO", 62.0),
        ]
        .into_iter()
        .fold(
            Self::new(DEFAULT_FALLBACK_FX_RATE, DEFAULT_FALLBACK_PRICE),
            |table, (ticker, price)| table.with_price(Symbol::from_static(ticker), price),
        )
    }

    pub fn with_price(mut self, symbol: Symbol, price: f64) -> Self {
        self.prices.insert(symbol, price);
        self
    }

    pub fn with_fx_rate(mut self, fx_rate: f64) -> Self {
        self.fx_rate = fx_rate;
        self
    }

    pub fn price_of(&self, symbol: &Symbol) -> f64 {
        self.prices
            .get(symbol)
            .copied()
            .unwrap_or(self.default_price)
    }

    pub const fn rate(&self) -> f64 {
        self.fx_rate
    }
}

impl Default for FixedMarketData {
    fn default() -> Self {
        Self::builtin()
    }
}

impl QuoteSource for FixedMarketData {
    fn id(&self) -> ProviderId {
        ProviderId::Fixed
    }

    fn price<'a>(&'a self, symbol: &'a Symbol) -> SourceFuture<'a, f64> {
        let price = self.price_of(symbol);
        Box::pin(async move { Ok(price) })
    }
}

impl FxSource for FixedMarketData {
    fn id(&self) -> ProviderId {
        ProviderId::Fixed
    }

    fn fx_rate<'a>(&'a self) -> SourceFuture<'a, f64> {
        let rate = self.fx_rate;
        Box::pin(async move { Ok(rate) })
    }
}
