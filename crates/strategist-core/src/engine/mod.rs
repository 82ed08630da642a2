//! Portfolio construction and projection.
//!
//! Every component here is synchronous and pure. Prices and the exchange
//! rate must be resolved by the caller (see [`crate::resolver`]) and handed
//! in through a [`MarketSnapshot`].

mod allocation;
mod currency;
mod projection;
mod risk_notes;
mod sizing;
mod statistics;

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

pub use allocation::AllocationTemplateSelector;
pub use currency::{Allocation, CurrencyConverter};
pub use projection::{
    combined_volatility, ProjectionAssumptions, ProjectionModel, ProjectionResult, Scenario,
    Scenarios, ASSET_FX_CORRELATION, QUARTILE_Z,
};
pub use risk_notes::RiskNarrativeAssembler;
pub use sizing::ShareSizer;
pub use statistics::PortfolioStatisticsAggregator;

use crate::{
    Catalog, EngineError, FxState, PositionEntry, RiskTier, Symbol, TimeHorizon, WeightedSymbol,
};

pub const DISCLAIMER: &str =
    "This is an educational simulation and not financial advice. Returns are not guaranteed.";

/// Prices and exchange rate captured before a build.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MarketSnapshot {
    /// Local currency per unit of quote currency.
    pub fx_rate: f64,
    /// Unit prices in quote currency.
    pub prices: BTreeMap<Symbol, f64>,
}

impl MarketSnapshot {
    pub fn new(fx_rate: f64) -> Self {
        Self {
            fx_rate,
            prices: BTreeMap::new(),
        }
    }

    pub fn with_price(mut self, symbol: Symbol, price: f64) -> Self {
        self.prices.insert(symbol, price);
        self
    }

    pub fn price(&self, symbol: &Symbol) -> Option<f64> {
        self.prices.get(symbol).copied()
    }
}

/// Inputs of a portfolio build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildRequest {
    pub budget_local: f64,
    pub risk_tier: String,
    #[serde(default)]
    pub horizon: TimeHorizon,
}

impl BuildRequest {
    pub fn new(budget_local: f64, risk_tier: impl Into<String>, horizon: TimeHorizon) -> Self {
        Self {
            budget_local,
            risk_tier: risk_tier.into(),
            horizon,
        }
    }

    /// Checks the budget without touching market data.
    pub fn validate(&self) -> Result<(), EngineError> {
        check_budget(self.budget_local).map(|_| ())
    }
}

/// Inputs of a stand-alone projection.
///
/// Without an allocation the tier's fallback statistics are projected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionRequest {
    pub budget_local: f64,
    pub risk_tier: String,
    #[serde(default)]
    pub horizon: TimeHorizon,
    #[serde(default)]
    pub allocation: Vec<WeightedSymbol>,
}

impl ProjectionRequest {
    pub fn new(budget_local: f64, risk_tier: impl Into<String>, horizon: TimeHorizon) -> Self {
        Self {
            budget_local,
            risk_tier: risk_tier.into(),
            horizon,
            allocation: Vec::new(),
        }
    }

    pub fn with_allocation(mut self, allocation: Vec<WeightedSymbol>) -> Self {
        self.allocation = allocation;
        self
    }

    /// Checks the budget and every allocation weight.
    pub fn validate(&self) -> Result<(), EngineError> {
        check_budget(self.budget_local)?;
        check_allocation(&self.allocation)
    }

    /// Sum of the given allocation percentages.
    pub fn allocation_total(&self) -> f64 {
        self.allocation
            .iter()
            .map(|slot| slot.allocation_percent)
            .sum()
    }
}

/// Complete, immutable result of a portfolio build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioReport {
    pub budget_local: f64,
    pub local_currency: String,
    pub quote_currency: String,
    pub fx_rate: f64,
    pub buying_power_quote: f64,
    pub risk_tier: RiskTier,
    pub horizon: TimeHorizon,
    pub positions: Vec<PositionEntry>,
    /// Template symbols left out because no price was available.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped_symbols: Vec<Symbol>,
    pub projection: ProjectionResult,
    pub disclaimer: String,
}

/// Entry point tying the catalog to the engine components.
#[derive(Debug, Clone)]
pub struct PortfolioEngine {
    catalog: Arc<Catalog>,
}

impl PortfolioEngine {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Exchange-rate state combining `rate` with the catalog's currency risk.
    pub fn fx_state(&self, rate: f64) -> Result<FxState, EngineError> {
        if !rate.is_finite() || rate <= 0.0 {
            return Err(EngineError::InvalidRate { rate });
        }
        let currency = self.catalog.currency();
        Ok(FxState {
            rate,
            drift: currency.drift,
            volatility: currency.volatility,
        })
    }

    pub fn build(
        &self,
        request: &BuildRequest,
        market: &MarketSnapshot,
    ) -> Result<PortfolioReport, EngineError> {
        let budget = check_budget(request.budget_local)?;
        let tier = RiskTier::resolve(&request.risk_tier);
        let template = AllocationTemplateSelector::new(&self.catalog).select_tier(tier);
        let fx = self.fx_state(market.fx_rate)?;
        let buying_power_quote = CurrencyConverter::buying_power(budget, fx.rate)?;

        let mut positions = Vec::with_capacity(template.entries().len());
        let mut skipped_symbols = Vec::new();
        for entry in template.entries() {
            let Some(unit_price) = market.price(&entry.symbol) else {
                tracing::warn!(symbol = %entry.symbol, "no price available, skipping position");
                skipped_symbols.push(entry.symbol.clone());
                continue;
            };

            let allocation = CurrencyConverter::allocate(budget, entry.percent, fx.rate)?;
            let fractional_units = ShareSizer::size(allocation.amount_quote, unit_price)?;

            positions.push(PositionEntry {
                symbol: entry.symbol.clone(),
                asset_type: entry.asset_type,
                allocation_percent: entry.percent,
                unit_price,
                amount_local: allocation.amount_local,
                amount_quote: allocation.amount_quote,
                fractional_units,
            });
        }

        let weights = positions.iter().map(WeightedSymbol::from).collect::<Vec<_>>();
        let projection = self.project_weights(budget, tier, &weights, fx, request.horizon)?;

        tracing::info!(
            tier = %tier,
            horizon = %request.horizon,
            positions = positions.len(),
            skipped = skipped_symbols.len(),
            "built portfolio"
        );

        let currency = self.catalog.currency();
        Ok(PortfolioReport {
            budget_local: budget,
            local_currency: currency.local_currency.clone(),
            quote_currency: currency.quote_currency.clone(),
            fx_rate: fx.rate,
            buying_power_quote,
            risk_tier: tier,
            horizon: request.horizon,
            positions,
            skipped_symbols,
            projection,
            disclaimer: String::from(DISCLAIMER),
        })
    }

    pub fn project(
        &self,
        request: &ProjectionRequest,
        fx_rate: f64,
    ) -> Result<ProjectionResult, EngineError> {
        let budget = check_budget(request.budget_local)?;
        check_allocation(&request.allocation)?;
        let tier = RiskTier::resolve(&request.risk_tier);
        let fx = self.fx_state(fx_rate)?;
        self.project_weights(budget, tier, &request.allocation, fx, request.horizon)
    }

    fn project_weights(
        &self,
        budget: f64,
        tier: RiskTier,
        weights: &[WeightedSymbol],
        fx: FxState,
        horizon: TimeHorizon,
    ) -> Result<ProjectionResult, EngineError> {
        let stats = if weights.is_empty() {
            tracing::debug!(tier = %tier, "no allocation given, using tier fallback statistics");
            self.catalog.fallback_statistics(tier)
        } else {
            PortfolioStatisticsAggregator::new(&self.catalog).aggregate(weights)
        };

        ProjectionModel::new(&self.catalog.currency().local_currency).project(
            budget,
            stats,
            fx,
            horizon.years(),
            horizon.display_label(),
        )
    }
}

fn check_budget(budget: f64) -> Result<f64, EngineError> {
    if !budget.is_finite() || budget <= 0.0 {
        return Err(EngineError::InvalidBudget { budget });
    }
    Ok(budget)
}

fn check_allocation(allocation: &[WeightedSymbol]) -> Result<(), EngineError> {
    for slot in allocation {
        slot.validate()?;
    }
    Ok(())
}

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).round() / factor
}
