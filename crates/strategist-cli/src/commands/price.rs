use std::time::Instant;

use serde::Serialize;
use strategist_core::{ProviderId, Symbol};

use crate::cli::PriceArgs;
use crate::error::CliError;
use crate::output::group_thousands;

use super::{CommandContext, CommandResult};

#[derive(Debug, Serialize)]
struct PriceResponseData<'a> {
    symbol: &'a Symbol,
    price: f64,
    currency: &'a str,
    source: ProviderId,
}

pub async fn run(args: &PriceArgs, context: &CommandContext) -> Result<CommandResult, CliError> {
    let symbol = Symbol::parse(&args.symbol)?;

    let started = Instant::now();
    let resolved = context.resolver.price(&symbol).await;
    let latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

    let currency = context.engine.catalog().currency().quote_currency.as_str();
    let data = serde_json::to_value(PriceResponseData {
        symbol: &symbol,
        price: resolved.value,
        currency,
        source: resolved.source,
    })?;
    let table = vec![format!(
        "{symbol}: {currency} {} ({})",
        group_thousands(resolved.value, 2),
        resolved.source
    )];

    Ok(CommandResult::ok(data, vec![resolved.source])
        .with_warnings(resolved.warning.into_iter().collect())
        .with_errors(resolved.error)
        .with_latency(latency_ms)
        .with_table(table))
}
