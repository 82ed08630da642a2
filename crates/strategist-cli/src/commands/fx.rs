use std::time::Instant;

use serde::Serialize;
use strategist_core::ProviderId;

use crate::error::CliError;
use crate::output::group_thousands;

use super::{CommandContext, CommandResult};

#[derive(Debug, Serialize)]
struct FxResponseData<'a> {
    base: &'a str,
    quote: &'a str,
    rate: f64,
    source: ProviderId,
}

pub async fn run(context: &CommandContext) -> Result<CommandResult, CliError> {
    let started = Instant::now();
    let resolved = context.resolver.fx_rate().await;
    let latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

    let currency = context.engine.catalog().currency();
    let data = serde_json::to_value(FxResponseData {
        base: &currency.quote_currency,
        quote: &currency.local_currency,
        rate: resolved.value,
        source: resolved.source,
    })?;
    let table = vec![format!(
        "1 {} = {} {} ({})",
        currency.quote_currency,
        group_thousands(resolved.value, 2),
        currency.local_currency,
        resolved.source
    )];

    Ok(CommandResult::ok(data, vec![resolved.source])
        .with_warnings(resolved.warning.into_iter().collect())
        .with_errors(resolved.error)
        .with_latency(latency_ms)
        .with_table(table))
}
