use serde::Serialize;
use strategist_core::{
    ProjectionRequest, ProjectionResult, RiskTier, WeightedSymbol, DISCLAIMER,
};

use crate::cli::ProjectArgs;
use crate::error::CliError;
use crate::output;

use super::{tier_warning, CommandContext, CommandResult};

const ALLOCATION_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Serialize)]
struct ProjectionResponseData<'a> {
    budget_local: f64,
    local_currency: &'a str,
    risk_tier: RiskTier,
    #[serde(skip_serializing_if = "<[WeightedSymbol]>::is_empty")]
    allocation: &'a [WeightedSymbol],
    projection: &'a ProjectionResult,
    disclaimer: &'static str,
}

pub async fn run(args: &ProjectArgs, context: &CommandContext) -> Result<CommandResult, CliError> {
    let request = ProjectionRequest::new(args.budget, args.risk.as_str(), args.horizon)
        .with_allocation(args.positions.clone());
    request.validate()?;

    let fx = context.resolver.fx_rate().await;
    let projection = context.engine.project(&request, fx.value)?;

    let local_currency = context.engine.catalog().currency().local_currency.as_str();
    let data = serde_json::to_value(ProjectionResponseData {
        budget_local: request.budget_local,
        local_currency,
        risk_tier: RiskTier::parse(&request.risk_tier).unwrap_or(RiskTier::Medium),
        allocation: &request.allocation,
        projection: &projection,
        disclaimer: DISCLAIMER,
    })?;

    let mut table = output::projection_lines(&projection, local_currency);
    table.push(String::new());
    table.push(String::from(DISCLAIMER));

    let mut result = CommandResult::ok(data, vec![fx.source]).with_table(table);
    result = result
        .with_warnings(fx.warning.into_iter().collect())
        .with_errors(fx.error);
    if request.allocation.is_empty() {
        if let Some(warning) = tier_warning(&args.risk) {
            result = result.with_warning(warning);
        }
    } else {
        let total = request.allocation_total();
        if (total - 100.0).abs() > ALLOCATION_TOLERANCE {
            result = result.with_warning(format!(
                "allocation percentages sum to {total}, expected 100"
            ));
        }
    }
    Ok(result)
}
