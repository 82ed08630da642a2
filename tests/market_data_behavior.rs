//! Behavior tests for market-data resolution.
//!
//! These tests verify how live quotes and exchange rates are fetched, how
//! failures degrade to the fallback table, and which warnings surface.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use strategist_core::{
    adapters::DEFAULT_FALLBACK_FX_RATE, BuildRequest, CurrencyProfile, ExchangeRateAdapter,
    FinnhubAdapter, FixedMarketData, HttpClient, HttpError, HttpResponse, MarketDataConfig,
    MarketDataResolver, ProviderId, QuoteSource, RetryPolicy, SourceError, SourceFuture,
    StaticHttpClient, Symbol, TimeHorizon,
};
use strategist_tests::{builtin_engine, symbol};

const FINNHUB: &str = "https://finnhub.test/api/v1";
const FX: &str = "https://fx.test/v4";

fn medium_symbols() -> Vec<Symbol> {
    vec![symbol("SPY"), symbol("AAPL"), symbol("KO")]
}

fn quote_url(ticker: &str) -> String {
    format!("{FINNHUB}/quote?symbol={ticker}&token=")
}

fn fx_url() -> String {
    format!("{FX}/latest/USD")
}

fn healthy_http() -> StaticHttpClient {
    StaticHttpClient::new()
        .respond(quote_url("SPY"), HttpResponse::ok_json(r#"{"c": 581.234, "pc": 579.1}"#))
        .respond(quote_url("AAPL"), HttpResponse::ok_json(r#"{"c": 231.5}"#))
        .respond(quote_url("KO"), HttpResponse::ok_json(r#"{"c": 61.98}"#))
        .respond(
            fx_url(),
            HttpResponse::ok_json(r#"{"base": "USD", "rates": {"NGN": 1525.5, "EUR": 0.92}}"#),
        )
}

fn resolver_over(http: Arc<StaticHttpClient>, api_key: Option<&str>) -> MarketDataResolver {
    let http: Arc<dyn HttpClient> = http;
    let quotes = FinnhubAdapter::new(Arc::clone(&http), api_key.map(str::to_owned))
        .with_base_url(FINNHUB);
    let fx = ExchangeRateAdapter::new(http, "USD", "NGN").with_base_url(FX);
    MarketDataResolver::new(Arc::new(quotes), Arc::new(fx))
        .with_retry(RetryPolicy::fixed(Duration::ZERO, 1))
}

fn requests_to(http: &StaticHttpClient, prefix: &str) -> usize {
    http.requests()
        .iter()
        .filter(|request| request.url.starts_with(prefix))
        .count()
}

// =============================================================================
// Market Data: Healthy Sources
// =============================================================================

#[tokio::test]
async fn when_sources_are_healthy_snapshot_uses_live_values() {
    // Given: live quote and rate endpoints
    let http = Arc::new(healthy_http());
    let resolver = resolver_over(Arc::clone(&http), Some("demo-key"));

    // When: the medium symbols are resolved
    let market = resolver.resolve(&medium_symbols()).await;

    // Then: every value is live, rounded to cents, without warnings
    assert_eq!(market.snapshot.fx_rate, 1525.5);
    assert_eq!(market.snapshot.price(&symbol("SPY")), Some(581.23));
    assert_eq!(market.snapshot.price(&symbol("AAPL")), Some(231.5));
    assert_eq!(market.snapshot.price(&symbol("KO")), Some(61.98));
    assert_eq!(
        market.source_chain,
        vec![ProviderId::ExchangeRateApi, ProviderId::Finnhub]
    );
    assert!(market.warnings.is_empty(), "warnings: {:?}", market.warnings);

    // And: each endpoint was called exactly once
    assert_eq!(http.requests().len(), 4);
}

#[tokio::test]
async fn when_quote_is_requested_api_key_and_timeout_are_sent() {
    // Given: a Finnhub adapter with a key and a short timeout
    let http = Arc::new(healthy_http());
    let adapter = FinnhubAdapter::new(http.clone(), Some(String::from("k&y")))
        .with_base_url(format!("{FINNHUB}/"))
        .with_timeout_ms(750);

    // When: a price is requested
    let price = adapter.price(&symbol("spy")).await.expect("price");

    // Then: the request carries the encoded key, timeout and JSON accept header
    assert_eq!(price, 581.23);
    let requests = http.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url, format!("{FINNHUB}/quote?symbol=SPY&token=k%26y"));
    assert_eq!(requests[0].timeout_ms, 750);
    assert_eq!(
        requests[0].headers.get("accept").map(String::as_str),
        Some("application/json")
    );
}

#[tokio::test]
async fn when_resolved_market_feeds_engine_report_uses_live_rate() {
    // Given: live data for the medium template
    let resolver = resolver_over(Arc::new(healthy_http()), Some("demo-key"));
    let engine = builtin_engine();
    let request = BuildRequest::new(50_000.0, "medium", TimeHorizon::one_year());
    let symbols = engine
        .catalog()
        .template(strategist_core::RiskTier::Medium)
        .symbols();

    // When: the market is resolved and the portfolio built
    let market = resolver.resolve(&symbols).await;
    let report = engine.build(&request, &market.snapshot).expect("build");

    // Then: the report reflects the live rate and prices
    assert_eq!(report.fx_rate, 1525.5);
    assert_eq!(report.positions[0].unit_price, 581.23);
    assert_eq!(report.buying_power_quote, 32.78);
}

// =============================================================================
// Market Data: Degradation to Fallback
// =============================================================================

#[tokio::test]
async fn when_one_quote_fails_only_that_symbol_falls_back() {
    // Given: AAPL answers with a server error
    let http = Arc::new(
        StaticHttpClient::new()
            .respond(quote_url("AAPL"), HttpResponse::with_status(503, "busy"))
            .respond(quote_url("SPY"), HttpResponse::ok_json(r#"{"c": 580.5}"#))
            .respond(quote_url("KO"), HttpResponse::ok_json(r#"{"c": 62.5}"#))
            .respond(fx_url(), HttpResponse::ok_json(r#"{"rates": {"NGN": 1530}}"#)),
    );
    let resolver = resolver_over(Arc::clone(&http), Some("demo-key"));

    // When: the medium symbols are resolved
    let market = resolver.resolve(&medium_symbols()).await;

    // Then: AAPL uses the fallback price and is the only warning
    assert_eq!(market.snapshot.price(&symbol("AAPL")), Some(230.0));
    assert_eq!(market.snapshot.price(&symbol("SPY")), Some(580.5));
    assert_eq!(market.warnings.len(), 1);
    assert!(market.warnings[0].contains("AAPL"));
    assert!(market.warnings[0].contains("source.unavailable"));
    assert_eq!(
        market.source_chain,
        vec![ProviderId::ExchangeRateApi, ProviderId::Finnhub, ProviderId::Fixed]
    );

    // And: the failure is reported with its stable code and provider
    assert_eq!(market.errors.len(), 1);
    assert_eq!(market.errors[0].code, "source.unavailable");
    assert_eq!(market.errors[0].source, Some(ProviderId::Finnhub));

    // And: the retryable failure was attempted twice
    assert_eq!(requests_to(&http, &quote_url("AAPL")), 2);
}

#[tokio::test]
async fn when_provider_rate_limits_system_retries_then_falls_back() {
    // Given: every quote call is rate limited
    let http = Arc::new(
        StaticHttpClient::new()
            .respond(format!("{FINNHUB}/quote"), HttpResponse::with_status(429, ""))
            .respond(fx_url(), HttpResponse::ok_json(r#"{"rates": {"NGN": 1540.25}}"#)),
    );
    let resolver = resolver_over(Arc::clone(&http), Some("demo-key"))
        .with_retry(RetryPolicy::fixed(Duration::ZERO, 2));

    // When: a single price is resolved
    let resolved = resolver.price(&symbol("KO")).await;

    // Then: the fallback value is used with a rate-limit warning
    assert_eq!(resolved.value, 62.0);
    assert_eq!(resolved.source, ProviderId::Fixed);
    let warning = resolved.warning.expect("warning");
    assert!(warning.contains("source.rate_limited"), "{warning}");
    assert!(warning.contains("62.00"), "{warning}");

    // And: the initial call plus two retries were made
    assert_eq!(requests_to(&http, &format!("{FINNHUB}/quote")), 3);
}

#[tokio::test]
async fn when_api_key_is_missing_no_quote_request_is_sent() {
    // Given: no Finnhub key
    let http = Arc::new(healthy_http());
    let resolver = resolver_over(Arc::clone(&http), None);

    // When: the medium symbols are resolved
    let market = resolver.resolve(&medium_symbols()).await;

    // Then: prices come from the fallback table without touching the network
    assert_eq!(requests_to(&http, FINNHUB), 0);
    assert_eq!(market.snapshot.price(&symbol("SPY")), Some(580.0));
    assert_eq!(market.warnings.len(), 3);
    assert!(market
        .warnings
        .iter()
        .all(|warning| warning.contains("source.not_configured")));

    // And: the live rate is still used
    assert_eq!(market.snapshot.fx_rate, 1525.5);
}

#[tokio::test]
async fn when_rate_payload_lacks_local_currency_fallback_rate_is_used() {
    // Given: the rate payload has no NGN entry
    let http = Arc::new(
        StaticHttpClient::new()
            .respond(fx_url(), HttpResponse::ok_json(r#"{"rates": {"EUR": 0.92}}"#)),
    );
    let resolver = resolver_over(Arc::clone(&http), Some("demo-key"));

    // When: the rate is resolved
    let resolved = resolver.fx_rate().await;

    // Then: the fallback rate substitutes, without retrying a bad payload
    assert_eq!(resolved.value, DEFAULT_FALLBACK_FX_RATE);
    assert_eq!(resolved.source, ProviderId::Fixed);
    assert!(resolved
        .warning
        .expect("warning")
        .contains("source.invalid_response"));
    assert_eq!(requests_to(&http, FX), 1);
}

#[tokio::test]
async fn when_transport_fails_custom_fallback_table_is_used() {
    // Given: a failing transport and a custom fallback table
    let http = Arc::new(
        StaticHttpClient::new().fail(FINNHUB, HttpError::non_retryable("connection refused")),
    );
    let fallback = FixedMarketData::new(1600.0, 50.0).with_price(symbol("SPY"), 600.0);
    let resolver = resolver_over(http, Some("demo-key")).with_fallback(fallback);

    // When: the market is resolved
    let market = resolver.resolve(&[symbol("SPY"), symbol("NVDA")]).await;

    // Then: known symbols use the table and unknown ones its default price
    assert_eq!(market.snapshot.fx_rate, 1600.0);
    assert_eq!(market.snapshot.price(&symbol("SPY")), Some(600.0));
    assert_eq!(market.snapshot.price(&symbol("NVDA")), Some(50.0));
    assert_eq!(market.warnings.len(), 3);
    assert_eq!(market.source_chain, vec![ProviderId::Fixed]);
}

// =============================================================================
// Market Data: Retry Recovery
// =============================================================================

struct FlakyQuotes {
    failures_left: AtomicU32,
    calls: AtomicU32,
}

impl FlakyQuotes {
    fn failing(times: u32) -> Self {
        Self {
            failures_left: AtomicU32::new(times),
            calls: AtomicU32::new(0),
        }
    }
}

impl QuoteSource for FlakyQuotes {
    fn id(&self) -> ProviderId {
        ProviderId::Finnhub
    }

    fn price<'a>(&'a self, _symbol: &'a Symbol) -> SourceFuture<'a, f64> {
        Box::pin(async move {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let remaining = self.failures_left.load(Ordering::SeqCst);
            if remaining > 0 {
                self.failures_left.store(remaining - 1, Ordering::SeqCst);
                return Err(SourceError::unavailable("timeout"));
            }
            Ok(101.5)
        })
    }
}

#[tokio::test]
async fn when_transient_failure_clears_retry_returns_live_value() {
    // Given: a quote source that times out twice before answering
    let quotes = Arc::new(FlakyQuotes::failing(2));
    let fx = ExchangeRateAdapter::new(Arc::new(healthy_http()), "USD", "NGN").with_base_url(FX);
    let resolver = MarketDataResolver::new(quotes.clone(), Arc::new(fx))
        .with_retry(RetryPolicy::fixed(Duration::ZERO, 2));

    // When: a price is resolved
    let resolved = resolver.price(&symbol("AAPL")).await;

    // Then: the third attempt succeeds without a warning
    assert_eq!(resolved.value, 101.5);
    assert_eq!(resolved.source, ProviderId::Finnhub);
    assert_eq!(resolved.warning, None);
    assert_eq!(quotes.calls.load(Ordering::SeqCst), 3);
}

// =============================================================================
// Market Data: Offline Mode and Configuration
// =============================================================================

#[tokio::test]
async fn when_offline_fixed_values_are_used_without_warnings() {
    // Given: an offline resolver
    let resolver = MarketDataResolver::offline(FixedMarketData::builtin());

    // When: the medium symbols are resolved
    let market = resolver.resolve(&medium_symbols()).await;

    // Then: the constant table answers silently
    assert!(resolver.is_offline());
    assert_eq!(market.snapshot.fx_rate, 1540.0);
    assert_eq!(market.snapshot.price(&symbol("KO")), Some(62.0));
    assert!(market.warnings.is_empty());
    assert_eq!(market.source_chain, vec![ProviderId::Fixed]);
}

#[tokio::test]
async fn when_built_from_config_resolver_uses_configured_endpoints() {
    // Given: configuration pointing at test endpoints
    let config = MarketDataConfig::from_lookup(|name| match name {
        "STRATEGIST_FINNHUB_API_KEY" => Some(String::from("cfg-key")),
        "STRATEGIST_FINNHUB_BASE_URL" => Some(String::from(FINNHUB)),
        "STRATEGIST_FX_BASE_URL" => Some(String::from(FX)),
        "STRATEGIST_TIMEOUT_MS" => Some(String::from("1200")),
        "STRATEGIST_MAX_RETRIES" => Some(String::from("0")),
        _ => None,
    })
    .expect("valid config");
    let http = Arc::new(healthy_http());
    let currency = CurrencyProfile {
        local_currency: String::from("NGN"),
        quote_currency: String::from("USD"),
        drift: -0.04,
        volatility: 0.10,
    };

    // When: the resolver is built and used
    let resolver = MarketDataResolver::from_config(&config, &currency, http.clone());
    let market = resolver.resolve(&[symbol("SPY")]).await;

    // Then: the configured endpoints, key and timeout are used
    assert!(market.warnings.is_empty(), "warnings: {:?}", market.warnings);
    let requests = http.requests();
    assert!(requests
        .iter()
        .any(|request| request.url == format!("{FINNHUB}/quote?symbol=SPY&token=cfg-key")));
    assert!(requests.iter().all(|request| request.timeout_ms == 1200));
}
