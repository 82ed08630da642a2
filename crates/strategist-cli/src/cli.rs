//! CLI argument definitions for strategist.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `build` | Build a portfolio for a budget, risk tier and horizon |
//! | `project` | Project outcomes for an explicit allocation or a tier |
//! | `price` | Look up one unit price |
//! | `fx` | Look up the exchange rate |
//! | `assets` | List catalog assets |
//! | `tiers` | Describe risk tiers |
//! | `horizons` | List offered horizons |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `json` | Output format (json, table) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--strict` | `false` | Treat warnings as failures (exit code 5) |
//! | `--offline` | `false` | Use the fixed price/rate table only |
//! | `--timeout-ms` | env or `5000` | Per-request HTTP timeout |
//! | `--catalog` | env or builtin | JSON catalog file |

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use strategist_core::{TimeHorizon, WeightedSymbol};

/// Portfolio construction and projection for small local-currency budgets.
#[derive(Debug, Parser)]
#[command(
    name = "strategist",
    author,
    version,
    about = "Build fractional-share portfolios and project their outcomes",
    long_about = "Strategist converts a local-currency budget into a fractional-share \
portfolio of US-listed assets, then projects pessimistic, expected and optimistic \
outcomes over the chosen horizon, accounting for currency risk.\n\
\n\
Educational simulation only, not financial advice."
)]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Treat warnings (e.g. fallback prices) as failures (exit code 5).
    #[arg(long, global = true, default_value_t = false)]
    pub strict: bool,

    /// Skip live market data and use the built-in price/rate table.
    #[arg(long, global = true, default_value_t = false)]
    pub offline: bool,

    /// Per-request HTTP timeout in milliseconds (overrides STRATEGIST_TIMEOUT_MS).
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    /// JSON catalog file (overrides STRATEGIST_CATALOG).
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary.
    Table,
    /// Single JSON envelope.
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Build a portfolio and its projection.
    ///
    /// # Examples
    ///
    ///   strategist build 50000
    ///   strategist build 50000 --risk high --horizon 3_years --format table
    ///   strategist build 20000 --risk low --horizon 18
    Build(BuildArgs),

    /// Project outcomes without sizing positions.
    ///
    /// # Examples
    ///
    ///   strategist project 50000 --risk medium
    ///   strategist project 50000 --position SPY=60 --position KO=40 --horizon 2_years
    Project(ProjectArgs),

    /// Look up the current unit price of a symbol.
    Price(PriceArgs),

    /// Look up the current local/quote exchange rate.
    Fx,

    /// List the approved assets of the catalog.
    Assets,

    /// Describe the risk tiers and their allocations.
    Tiers,

    /// List the offered investment horizons.
    Horizons,
}

#[derive(Debug, Args)]
pub struct BuildArgs {
    /// Budget in local currency.
    pub budget: f64,

    /// Risk tier: low, medium or high. Unknown values use medium.
    #[arg(long, default_value = "medium")]
    pub risk: String,

    /// Horizon label (6_months, 1_year, 3_years, ...) or month count (1-120).
    #[arg(long, default_value = "1_year")]
    pub horizon: TimeHorizon,
}

#[derive(Debug, Args)]
pub struct ProjectArgs {
    /// Budget in local currency.
    pub budget: f64,

    /// Risk tier whose fallback statistics apply when no position is given.
    #[arg(long, default_value = "medium")]
    pub risk: String,

    #[arg(long, default_value = "1_year")]
    pub horizon: TimeHorizon,

    /// Allocation slot as SYMBOL=PERCENT; repeatable.
    #[arg(long = "position", value_name = "SYMBOL=PERCENT")]
    pub positions: Vec<WeightedSymbol>,
}

#[derive(Debug, Args)]
pub struct PriceArgs {
    pub symbol: String,
}
