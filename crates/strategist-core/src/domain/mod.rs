//! # Domain Models
//!
//! Value types shared by the engine and the market-data boundary.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Symbol`] | Validated ticker |
//! | [`AssetProfile`] | Annualized return/volatility of a catalog asset |
//! | [`CurrencyProfile`] | Drift and volatility of the local currency |
//! | [`AllocationTemplate`] | Ordered symbol/percent slots for a tier |
//! | [`PositionEntry`] | Sized position produced by a build |
//! | [`FxState`] | Exchange rate with its drift and volatility |
//! | [`PortfolioStatistics`] | Aggregated expected return and volatility |
//! | [`RiskTier`] | `low`, `medium`, `high` |
//! | [`TimeHorizon`] | Labeled or month-count horizon |
//!
//! Construction validates invariants; once built, every value is immutable.

mod horizon;
mod models;
mod risk_tier;
mod symbol;

pub use horizon::{HorizonOption, TimeHorizon, MAX_HORIZON_MONTHS};
pub use models::{
    validate_currency_code, AllocationTemplate, AssetProfile, AssetType, CurrencyProfile,
    FxState, PortfolioStatistics, PositionEntry, TemplateEntry, WeightedSymbol,
};
pub(crate) use models::{validate_finite, validate_non_negative};
pub use risk_tier::RiskTier;
pub use symbol::Symbol;
