//! # Strategist Core
//!
//! Portfolio construction and projection for a small, non-USD budget invested
//! in fractional US-listed shares.
//!
//! ## Overview
//!
//! - **Reference catalog** of asset profiles, currency risk and per-tier
//!   allocation templates
//! - **Pure engine** that converts a local-currency budget, sizes fractional
//!   positions and projects 25th/50th/75th percentile outcomes
//! - **Market-data boundary** with live adapters, retry and constant-table
//!   fallback
//! - **Response envelope** with provenance metadata and warnings
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | Finnhub, exchangerate-api and fixed-table sources |
//! | [`catalog`] | Immutable reference tables |
//! | [`config`] | Environment-driven configuration |
//! | [`data_source`] | Quote and FX source traits, source errors |
//! | [`domain`] | Value types (Symbol, RiskTier, TimeHorizon, ...) |
//! | [`engine`] | Allocation, sizing, statistics, projection |
//! | [`envelope`] | Response envelope with metadata |
//! | [`error`] | Validation, engine and config errors |
//! | [`http_client`] | HTTP transport abstraction |
//! | [`resolver`] | Live-first market data with fallback |
//! | [`retry`] | Backoff and retry policy |
//! | [`source`] | Provider identifiers |
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  CLI / caller   │
//! └───┬─────────┬───┘
//!     │         │ symbols
//!     │         ▼
//!     │  ┌─────────────────────┐     ┌──────────────────┐
//!     │  │ MarketDataResolver  │────▶│ Quote/Fx sources │
//!     │  │ (retry + fallback)  │     │ (HTTP client)    │
//!     │  └──────────┬──────────┘     └──────────────────┘
//!     │             │ MarketSnapshot
//!     ▼             ▼
//! ┌─────────────────────────┐     ┌──────────────────┐
//! │ PortfolioEngine (sync)  │────▶│ Catalog (Arc)    │
//! └────────────┬────────────┘     └──────────────────┘
//!              ▼
//!       PortfolioReport
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use strategist_core::{
//!     BuildRequest, Catalog, MarketDataResolver, PortfolioEngine, TimeHorizon,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let engine = PortfolioEngine::new(Arc::new(Catalog::builtin()));
//!     let request = BuildRequest::new(50_000.0, "medium", TimeHorizon::one_year());
//!
//!     let symbols = engine.catalog().template(strategist_core::RiskTier::Medium).symbols();
//!     let market = MarketDataResolver::default().resolve(&symbols).await;
//!
//!     let report = engine.build(&request, &market.snapshot)?;
//!     println!("expected value: {:.0}", report.projection.scenarios.expected.value_local);
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod catalog;
pub mod config;
pub mod data_source;
pub mod domain;
pub mod engine;
pub mod envelope;
pub mod error;
pub mod http_client;
pub mod resolver;
pub mod retry;
pub mod source;

// Adapters
pub use adapters::{ExchangeRateAdapter, FinnhubAdapter, FixedMarketData};

// Catalog
pub use catalog::{Catalog, CatalogFile, DEFAULT_EXPECTED_RETURN, DEFAULT_VOLATILITY};

// Configuration
pub use config::MarketDataConfig;

// Source traits
pub use data_source::{FxSource, QuoteSource, SourceError, SourceErrorKind, SourceFuture};

// Domain models
pub use domain::{
    validate_currency_code, AllocationTemplate, AssetProfile, AssetType, CurrencyProfile, FxState,
    HorizonOption, PortfolioStatistics, PositionEntry, RiskTier, Symbol, TemplateEntry,
    TimeHorizon, WeightedSymbol, MAX_HORIZON_MONTHS,
};

// Engine
pub use engine::{
    combined_volatility, Allocation, AllocationTemplateSelector, BuildRequest, CurrencyConverter,
    MarketSnapshot, PortfolioEngine, PortfolioReport, PortfolioStatisticsAggregator,
    ProjectionAssumptions, ProjectionModel, ProjectionRequest, ProjectionResult,
    RiskNarrativeAssembler, Scenario, Scenarios, ShareSizer, DISCLAIMER,
};

// Envelope types
pub use envelope::{Envelope, EnvelopeError, EnvelopeMeta, SCHEMA_VERSION};

// Error types
pub use error::{ConfigError, EngineError, ValidationError};

// HTTP client types
pub use http_client::{
    HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient, StaticHttpClient,
};

// Resolution and retry
pub use resolver::{MarketDataResolver, Resolved, ResolvedMarket};
pub use retry::{Backoff, RetryPolicy};

// Source identifiers
pub use source::ProviderId;
