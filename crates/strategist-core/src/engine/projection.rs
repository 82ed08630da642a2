use serde::{Deserialize, Serialize};

use crate::{EngineError, FxState, PortfolioStatistics};

use super::risk_notes::RiskNarrativeAssembler;

/// Assumed correlation between asset returns and currency moves.
pub const ASSET_FX_CORRELATION: f64 = 0.3;

/// Standard-normal quantile used for the 25th/75th percentile scenarios.
pub const QUARTILE_Z: f64 = 0.674;

/// One quantile outcome.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub multiplier: f64,
    pub value_local: f64,
    pub return_percent: f64,
}

impl Scenario {
    fn at(budget_local: f64, multiplier: f64) -> Self {
        Self {
            multiplier,
            value_local: budget_local * multiplier,
            return_percent: (multiplier - 1.0) * 100.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scenarios {
    /// 25th percentile.
    pub pessimistic: Scenario,
    /// Median.
    pub expected: Scenario,
    /// 75th percentile.
    pub optimistic: Scenario,
}

/// Inputs that produced the projection, annualized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionAssumptions {
    pub asset_return: f64,
    pub fx_impact: f64,
    pub total_return: f64,
    pub total_volatility: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    pub horizon_years: f64,
    pub horizon_label: String,
    pub scenarios: Scenarios,
    pub assumptions: ProjectionAssumptions,
    pub risk_factors: Vec<String>,
}

/// Closed-form lognormal projection blending asset and currency risk.
#[derive(Debug, Clone, Copy)]
pub struct ProjectionModel<'a> {
    local_currency: &'a str,
}

impl<'a> ProjectionModel<'a> {
    pub fn new(local_currency: &'a str) -> Self {
        Self { local_currency }
    }

    pub fn project(
        &self,
        budget_local: f64,
        stats: PortfolioStatistics,
        fx: FxState,
        horizon_years: f64,
        horizon_label: impl Into<String>,
    ) -> Result<ProjectionResult, EngineError> {
        if !horizon_years.is_finite() || horizon_years < 0.0 {
            return Err(EngineError::InvalidHorizon {
                years: horizon_years,
            });
        }

        // Local depreciation (negative drift) raises the local value of foreign assets.
        let total_return = stats.expected_return - fx.drift;
        let total_volatility = combined_volatility(stats.volatility, fx.volatility);

        let drift = (total_return - 0.5 * total_volatility.powi(2)) * horizon_years;
        let diffusion = total_volatility * horizon_years.sqrt();

        let quantile = |z: f64| (drift + z * diffusion).exp();
        let scenarios = Scenarios {
            pessimistic: Scenario::at(budget_local, quantile(-QUARTILE_Z)),
            expected: Scenario::at(budget_local, quantile(0.0)),
            optimistic: Scenario::at(budget_local, quantile(QUARTILE_Z)),
        };

        tracing::debug!(
            total_return,
            total_volatility,
            horizon_years,
            expected_multiplier = scenarios.expected.multiplier,
            "projected lognormal scenarios"
        );

        Ok(ProjectionResult {
            horizon_years,
            horizon_label: horizon_label.into(),
            scenarios,
            assumptions: ProjectionAssumptions {
                asset_return: stats.expected_return,
                fx_impact: -fx.drift,
                total_return,
                total_volatility,
            },
            risk_factors: RiskNarrativeAssembler::new(self.local_currency)
                .assemble(horizon_years, total_volatility),
        })
    }
}

/// `sqrt(σa² + σf² + 2ρ·σa·σf)`, clamped at zero before the root.
pub fn combined_volatility(asset_volatility: f64, fx_volatility: f64) -> f64 {
    let variance = asset_volatility.powi(2)
        + fx_volatility.powi(2)
        + 2.0 * ASSET_FX_CORRELATION * asset_volatility * fx_volatility;
    variance.max(0.0).sqrt()
}
