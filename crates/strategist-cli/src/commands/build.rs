use strategist_core::{BuildRequest, RiskTier};

use crate::cli::BuildArgs;
use crate::error::CliError;
use crate::output;

use super::{tier_warning, CommandContext, CommandResult};

pub async fn run(args: &BuildArgs, context: &CommandContext) -> Result<CommandResult, CliError> {
    let request = BuildRequest::new(args.budget, args.risk.as_str(), args.horizon);
    request.validate()?;

    let tier = RiskTier::parse(&request.risk_tier).unwrap_or(RiskTier::Medium);
    let symbols = context.engine.catalog().template(tier).symbols();
    let market = context.resolver.resolve(&symbols).await;

    let report = context.engine.build(&request, &market.snapshot)?;
    let table = output::report_lines(&report);
    let data = serde_json::to_value(&report)?;

    let mut result = CommandResult::ok(data, market.source_chain)
        .with_warnings(market.warnings)
        .with_errors(market.errors)
        .with_latency(market.latency_ms)
        .with_table(table);
    if let Some(warning) = tier_warning(&args.risk) {
        result = result.with_warning(warning);
    }
    Ok(result)
}
