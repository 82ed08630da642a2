use serde::Serialize;
use strategist_core::{
    AssetProfile, HorizonOption, PortfolioStatistics, RiskTier, TemplateEntry, TimeHorizon,
};

use crate::error::CliError;
use crate::output::percent;

use super::{CommandContext, CommandResult};

#[derive(Debug, Serialize)]
struct AssetsResponseData<'a> {
    assets: &'a [AssetProfile],
}

#[derive(Debug, Serialize)]
struct TierDescription<'a> {
    value: RiskTier,
    label: &'static str,
    description: &'static str,
    volatility: &'static str,
    allocation: &'a [TemplateEntry],
    fallback_statistics: PortfolioStatistics,
}

#[derive(Debug, Serialize)]
struct TiersResponseData<'a> {
    tiers: Vec<TierDescription<'a>>,
}

#[derive(Debug, Serialize)]
struct HorizonsResponseData {
    horizons: Vec<HorizonOption>,
}

pub fn assets(context: &CommandContext) -> Result<CommandResult, CliError> {
    let assets = context.engine.catalog().assets();
    let table = assets
        .iter()
        .map(|asset| {
            format!(
                "{:<6} {:<6} {:<18} return {:>6}  volatility {:>6}",
                asset.symbol.as_str(),
                asset.asset_type.as_str(),
                asset.asset_class,
                percent(asset.expected_return),
                percent(asset.volatility)
            )
        })
        .collect();

    let data = serde_json::to_value(AssetsResponseData { assets })?;
    Ok(CommandResult::ok(data, Vec::new()).with_table(table))
}

pub fn tiers(context: &CommandContext) -> Result<CommandResult, CliError> {
    let catalog = context.engine.catalog();
    let tiers = RiskTier::ALL
        .into_iter()
        .map(|tier| TierDescription {
            value: tier,
            label: tier.label(),
            description: tier.description(),
            volatility: tier.volatility_band(),
            allocation: catalog.template(tier).entries(),
            fallback_statistics: catalog.fallback_statistics(tier),
        })
        .collect::<Vec<_>>();

    let mut table = Vec::new();
    for tier in &tiers {
        table.push(format!("{} - {} ({})", tier.value, tier.label, tier.volatility));
        table.push(format!("  {}", tier.description));
        let slots = tier
            .allocation
            .iter()
            .map(|slot| format!("{} {}%", slot.symbol, slot.percent))
            .collect::<Vec<_>>();
        table.push(format!("  {}", slots.join(", ")));
    }

    let data = serde_json::to_value(TiersResponseData { tiers })?;
    Ok(CommandResult::ok(data, Vec::new()).with_table(table))
}

pub fn horizons() -> Result<CommandResult, CliError> {
    let horizons = TimeHorizon::offered();
    let table = horizons
        .iter()
        .map(|option| {
            let tiers = option
                .recommended_risk
                .iter()
                .map(|tier| tier.as_str())
                .collect::<Vec<_>>();
            format!("{:<10} {:<9} {}", option.value, option.label, tiers.join(", "))
        })
        .collect();

    let data = serde_json::to_value(HorizonsResponseData { horizons })?;
    Ok(CommandResult::ok(data, Vec::new()).with_table(table))
}
