mod build;
mod fx;
mod price;
mod project;
mod reference;

use std::sync::Arc;

use serde_json::Value;
use strategist_core::{
    Catalog, Envelope, EnvelopeError, FixedMarketData, MarketDataConfig, MarketDataResolver,
    PortfolioEngine, ProviderId, ReqwestHttpClient,
};

use crate::cli::{Cli, Command};
use crate::error::CliError;
use crate::metadata;

/// Shared state for one invocation.
pub struct CommandContext {
    pub engine: PortfolioEngine,
    pub resolver: MarketDataResolver,
}

impl CommandContext {
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let mut config = MarketDataConfig::from_env()?;
        if let Some(timeout_ms) = cli.timeout_ms {
            config = config.with_timeout_ms(timeout_ms);
        }
        if let Some(path) = &cli.catalog {
            config = config.with_catalog_path(path);
        }

        let catalog = match &config.catalog_path {
            Some(path) => Catalog::from_json_file(path)?,
            None => Catalog::builtin(),
        };
        let engine = PortfolioEngine::new(Arc::new(catalog));

        let resolver = if cli.offline {
            MarketDataResolver::offline(FixedMarketData::builtin())
        } else {
            MarketDataResolver::from_config(
                &config,
                engine.catalog().currency(),
                Arc::new(ReqwestHttpClient::new()),
            )
        };
        tracing::debug!(
            offline = cli.offline,
            catalog = ?config.catalog_path,
            timeout_ms = config.timeout_ms,
            "prepared command context"
        );

        Ok(Self { engine, resolver })
    }
}

pub struct CommandResult {
    pub data: Value,
    /// Human-readable lines for `--format table`.
    pub table: Vec<String>,
    pub warnings: Vec<String>,
    /// Live-source failures covered by fallback data.
    pub errors: Vec<EnvelopeError>,
    pub latency_ms: u64,
    pub source_chain: Vec<ProviderId>,
}

impl CommandResult {
    pub fn ok(data: Value, source_chain: Vec<ProviderId>) -> Self {
        Self {
            data,
            table: Vec::new(),
            warnings: Vec::new(),
            errors: Vec::new(),
            latency_ms: 0,
            source_chain,
        }
    }

    pub fn with_table(mut self, table: Vec<String>) -> Self {
        self.table = table;
        self
    }

    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings.extend(warnings);
        self
    }

    pub fn with_errors(mut self, errors: impl IntoIterator<Item = EnvelopeError>) -> Self {
        self.errors.extend(errors);
        self
    }

    pub fn with_latency(mut self, latency_ms: u64) -> Self {
        self.latency_ms = latency_ms;
        self
    }
}

/// Envelope plus the table view of its data.
pub struct Rendered {
    pub envelope: Envelope<Value>,
    pub table: Vec<String>,
}

pub async fn run(cli: &Cli) -> Result<Rendered, CliError> {
    let context = CommandContext::from_cli(cli)?;

    let command_result = match &cli.command {
        Command::Build(args) => build::run(args, &context).await?,
        Command::Project(args) => project::run(args, &context).await?,
        Command::Price(args) => price::run(args, &context).await?,
        Command::Fx => fx::run(&context).await?,
        Command::Assets => reference::assets(&context)?,
        Command::Tiers => reference::tiers(&context)?,
        Command::Horizons => reference::horizons()?,
    };

    let CommandResult {
        data,
        table,
        warnings,
        errors,
        latency_ms,
        source_chain,
    } = command_result;

    let meta = metadata::envelope_meta(source_chain, latency_ms, warnings)?;
    let mut envelope = Envelope::success(meta, data);
    for error in errors {
        envelope.push_error(error)?;
    }
    Ok(Rendered { envelope, table })
}

/// Fails when `--strict` is set and the envelope carries warnings.
pub fn enforce_strict(strict: bool, rendered: &Rendered) -> Result<(), CliError> {
    let warning_count = rendered.envelope.meta.warnings.len();
    if strict && warning_count > 0 {
        return Err(CliError::StrictModeViolation { warning_count });
    }
    Ok(())
}

/// Warning for a risk tier that fell back to medium, if any.
fn tier_warning(requested: &str) -> Option<String> {
    strategist_core::RiskTier::parse(requested)
        .is_none()
        .then(|| format!("unrecognized risk tier '{requested}', using medium"))
}
