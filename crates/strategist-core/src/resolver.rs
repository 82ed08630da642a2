//! Live-first market-data resolution with constant-table fallback.
//!
//! Every value the resolver returns is usable by the engine: when a live
//! source fails (after retries) the [`FixedMarketData`] table substitutes
//! and a human-readable warning is recorded for the response envelope.

use std::sync::Arc;
use std::time::Instant;

use tokio::task::JoinSet;

use crate::adapters::{ExchangeRateAdapter, FinnhubAdapter, FixedMarketData};
use crate::config::MarketDataConfig;
use crate::data_source::{FxSource, QuoteSource};
use crate::http_client::HttpClient;
use crate::retry::RetryPolicy;
use crate::{CurrencyProfile, EnvelopeError, MarketSnapshot, ProviderId, SourceError, Symbol};

/// One resolved value and where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved<T> {
    pub value: T,
    pub source: ProviderId,
    /// Present when the fallback table substituted for a failed live source.
    pub warning: Option<String>,
    /// The live-source failure behind `warning`.
    pub error: Option<EnvelopeError>,
}

impl<T> Resolved<T> {
    fn live(value: T, source: ProviderId) -> Self {
        Self {
            value,
            source,
            warning: None,
            error: None,
        }
    }

    fn fixed(value: T) -> Self {
        Self::live(value, ProviderId::Fixed)
    }
}

/// Market snapshot ready for the engine, plus provenance for the envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedMarket {
    pub snapshot: MarketSnapshot,
    /// Providers that supplied at least one value, in first-use order.
    pub source_chain: Vec<ProviderId>,
    pub warnings: Vec<String>,
    /// One entry per fallback substitution, tagged with the failed provider.
    pub errors: Vec<EnvelopeError>,
    pub latency_ms: u64,
}

#[derive(Clone)]
pub struct MarketDataResolver {
    quotes: Option<Arc<dyn QuoteSource>>,
    fx: Option<Arc<dyn FxSource>>,
    fallback: Arc<FixedMarketData>,
    retry: RetryPolicy,
}

impl MarketDataResolver {
    pub fn new(quotes: Arc<dyn QuoteSource>, fx: Arc<dyn FxSource>) -> Self {
        Self {
            quotes: Some(quotes),
            fx: Some(fx),
            fallback: Arc::new(FixedMarketData::builtin()),
            retry: RetryPolicy::default(),
        }
    }

    /// Serves everything from the constant table without warnings.
    pub fn offline(fallback: FixedMarketData) -> Self {
        Self {
            quotes: None,
            fx: None,
            fallback: Arc::new(fallback),
            retry: RetryPolicy::no_retry(),
        }
    }

    /// Finnhub prices and exchangerate-api rates for `currency`.
    pub fn from_config(
        config: &MarketDataConfig,
        currency: &CurrencyProfile,
        http_client: Arc<dyn HttpClient>,
    ) -> Self {
        let quotes = FinnhubAdapter::new(Arc::clone(&http_client), config.finnhub_api_key.clone())
            .with_base_url(config.finnhub_base_url.as_str())
            .with_timeout_ms(config.timeout_ms);
        let fx = ExchangeRateAdapter::new(
            http_client,
            currency.quote_currency.as_str(),
            currency.local_currency.as_str(),
        )
        .with_base_url(config.fx_base_url.as_str())
        .with_timeout_ms(config.timeout_ms);

        Self::new(Arc::new(quotes), Arc::new(fx)).with_retry(config.retry)
    }

    pub fn with_fallback(mut self, fallback: FixedMarketData) -> Self {
        self.fallback = Arc::new(fallback);
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn is_offline(&self) -> bool {
        self.quotes.is_none() && self.fx.is_none()
    }

    pub async fn price(&self, symbol: &Symbol) -> Resolved<f64> {
        let Some(source) = &self.quotes else {
            return Resolved::fixed(self.fallback.price_of(symbol));
        };

        let provider = source.id();
        let result = self.retry.run("price", || source.price(symbol)).await;
        match accept_positive(result, provider, "price") {
            Ok(price) => Resolved::live(price, provider),
            Err(error) => {
                let value = self.fallback.price_of(symbol);
                tracing::warn!(
                    %symbol,
                    %provider,
                    code = error.code(),
                    error = error.message(),
                    fallback = value,
                    "price unavailable, using fallback"
                );
                Resolved {
                    value,
                    source: ProviderId::Fixed,
                    warning: Some(format!(
                        "price for {symbol} unavailable from {provider} ({}); \
                         using fallback {value:.2}",
                        error.code()
                    )),
                    error: Some(EnvelopeError::from(&error).with_source(provider)),
                }
            }
        }
    }

    pub async fn fx_rate(&self) -> Resolved<f64> {
        let Some(source) = &self.fx else {
            return Resolved::fixed(self.fallback.rate());
        };

        let provider = source.id();
        let result = self.retry.run("fx_rate", || source.fx_rate()).await;
        match accept_positive(result, provider, "fx rate") {
            Ok(rate) => Resolved::live(rate, provider),
            Err(error) => {
                let value = self.fallback.rate();
                tracing::warn!(
                    %provider,
                    code = error.code(),
                    error = error.message(),
                    fallback = value,
                    "fx rate unavailable, using fallback"
                );
                Resolved {
                    value,
                    source: ProviderId::Fixed,
                    warning: Some(format!(
                        "fx rate unavailable from {provider} ({}); using fallback {value:.2}",
                        error.code()
                    )),
                    error: Some(EnvelopeError::from(&error).with_source(provider)),
                }
            }
        }
    }

    /// Fetches the rate and every price concurrently.
    pub async fn resolve(&self, symbols: &[Symbol]) -> ResolvedMarket {
        let started = Instant::now();
        let (fx, prices) = tokio::join!(self.fx_rate(), self.prices(symbols));

        let mut provenance = Provenance::default();
        let mut snapshot = MarketSnapshot::new(fx.value);
        provenance.record(fx.source, fx.warning, fx.error);

        for (symbol, resolved) in prices {
            provenance.record(resolved.source, resolved.warning, resolved.error);
            snapshot.prices.insert(symbol, resolved.value);
        }

        let Provenance {
            mut source_chain,
            warnings,
            errors,
        } = provenance;

        if source_chain.is_empty() {
            source_chain.push(ProviderId::Fixed);
        }

        let latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        tracing::info!(
            symbols = symbols.len(),
            sources = ?source_chain,
            warnings = warnings.len(),
            latency_ms,
            "resolved market data"
        );

        ResolvedMarket {
            snapshot,
            source_chain,
            warnings,
            errors,
            latency_ms,
        }
    }

    async fn prices(&self, symbols: &[Symbol]) -> Vec<(Symbol, Resolved<f64>)> {
        let mut tasks = JoinSet::new();
        for (index, symbol) in symbols.iter().cloned().enumerate() {
            let resolver = self.clone();
            tasks.spawn(async move { (index, resolver.price(&symbol).await) });
        }

        let mut slots: Vec<Option<Resolved<f64>>> = vec![None; symbols.len()];
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, resolved)) => slots[index] = Some(resolved),
                Err(error) => tracing::error!(%error, "price task failed"),
            }
        }

        symbols
            .iter()
            .zip(slots)
            .map(|(symbol, slot)| {
                let resolved = slot.unwrap_or_else(|| {
                    let error = SourceError::internal(format!("price lookup for {symbol} aborted"));
                    Resolved {
                        value: self.fallback.price_of(symbol),
                        source: ProviderId::Fixed,
                        warning: Some(format!("{}; using fallback", error.message())),
                        error: Some(EnvelopeError::from(&error)),
                    }
                });
                (symbol.clone(), resolved)
            })
            .collect()
    }
}

impl Default for MarketDataResolver {
    fn default() -> Self {
        Self::offline(FixedMarketData::builtin())
    }
}

fn accept_positive(
    result: Result<f64, SourceError>,
    provider: ProviderId,
    what: &str,
) -> Result<f64, SourceError> {
    let value = result?;
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(SourceError::invalid_response(format!(
            "{provider} returned non-positive {what}: {value}"
        )))
    }
}

#[derive(Default)]
struct Provenance {
    source_chain: Vec<ProviderId>,
    warnings: Vec<String>,
    errors: Vec<EnvelopeError>,
}

impl Provenance {
    fn record(
        &mut self,
        source: ProviderId,
        warning: Option<String>,
        error: Option<EnvelopeError>,
    ) {
        if !self.source_chain.contains(&source) {
            self.source_chain.push(source);
        }
        self.warnings.extend(warning);
        self.errors.extend(error);
    }
}
