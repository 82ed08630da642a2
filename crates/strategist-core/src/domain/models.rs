use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Symbol, ValidationError};

/// Kind of instrument held in a template slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetType {
    #[serde(rename = "ETF", alias = "etf")]
    Etf,
    #[serde(rename = "Stock", alias = "stock")]
    Stock,
}

impl AssetType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Etf => "ETF",
            Self::Stock => "Stock",
        }
    }
}

impl Display for AssetType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetType {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "etf" => Ok(Self::Etf),
            "stock" => Ok(Self::Stock),
            _ => Err(ValidationError::InvalidAssetType {
                value: value.to_owned(),
            }),
        }
    }
}

/// Annualized return and risk characteristics of one catalog asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetProfile {
    pub symbol: Symbol,
    pub asset_type: AssetType,
    /// Annualized expected return, `0.10` is 10%.
    pub expected_return: f64,
    /// Annualized standard deviation of return.
    pub volatility: f64,
    pub asset_class: String,
}

impl AssetProfile {
    pub fn new(
        symbol: Symbol,
        asset_type: AssetType,
        expected_return: f64,
        volatility: f64,
        asset_class: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        validate_finite("expected_return", expected_return)?;
        validate_non_negative("volatility", volatility)?;

        Ok(Self {
            symbol,
            asset_type,
            expected_return,
            volatility,
            asset_class: asset_class.into(),
        })
    }

    pub(crate) fn validate(&self) -> Result<(), ValidationError> {
        validate_finite("expected_return", self.expected_return)?;
        validate_non_negative("volatility", self.volatility)
    }
}

/// Risk profile of the investor's local currency against the quote currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyProfile {
    pub local_currency: String,
    pub quote_currency: String,
    /// Expected annual change of the local currency; negative is depreciation.
    pub drift: f64,
    pub volatility: f64,
}

impl CurrencyProfile {
    pub fn new(
        local_currency: &str,
        quote_currency: &str,
        drift: f64,
        volatility: f64,
    ) -> Result<Self, ValidationError> {
        let profile = Self {
            local_currency: validate_currency_code(local_currency)?,
            quote_currency: validate_currency_code(quote_currency)?,
            drift,
            volatility,
        };
        profile.validate()?;
        Ok(profile)
    }

    pub(crate) fn validate(&self) -> Result<(), ValidationError> {
        validate_currency_code(&self.local_currency)?;
        validate_currency_code(&self.quote_currency)?;
        validate_finite("drift", self.drift)?;
        validate_non_negative("fx_volatility", self.volatility)
    }
}

/// One slot of an allocation template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateEntry {
    pub symbol: Symbol,
    pub asset_type: AssetType,
    pub percent: f64,
}

/// Ordered symbol/percent slots for a risk tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AllocationTemplate {
    entries: Vec<TemplateEntry>,
}

impl AllocationTemplate {
    pub fn new(entries: Vec<TemplateEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[TemplateEntry] {
        &self.entries
    }

    pub fn total_percent(&self) -> f64 {
        self.entries.iter().map(|entry| entry.percent).sum()
    }

    pub fn symbols(&self) -> Vec<Symbol> {
        self.entries.iter().map(|entry| entry.symbol.clone()).collect()
    }
}

/// Exchange-rate state for one request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FxState {
    /// Local currency per one unit of quote currency.
    pub rate: f64,
    pub drift: f64,
    pub volatility: f64,
}

/// Portfolio-level expected return and volatility.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PortfolioStatistics {
    pub expected_return: f64,
    pub volatility: f64,
}

/// Sized position produced by a portfolio build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionEntry {
    pub symbol: Symbol,
    pub asset_type: AssetType,
    pub allocation_percent: f64,
    /// Unit price in quote currency.
    pub unit_price: f64,
    pub amount_local: f64,
    pub amount_quote: f64,
    pub fractional_units: f64,
}

/// Symbol and weight pair consumed by the statistics aggregator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedSymbol {
    pub symbol: Symbol,
    pub allocation_percent: f64,
}

impl WeightedSymbol {
    pub fn new(symbol: Symbol, allocation_percent: f64) -> Self {
        Self {
            symbol,
            allocation_percent,
        }
    }

    /// Weights must be finite and non-negative.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_non_negative("allocation_percent", self.allocation_percent)
    }
}

impl From<&PositionEntry> for WeightedSymbol {
    fn from(position: &PositionEntry) -> Self {
        Self::new(position.symbol.clone(), position.allocation_percent)
    }
}

impl FromStr for WeightedSymbol {
    type Err = ValidationError;

    /// Parses `SYMBOL=PERCENT`, e.g. `SPY=50`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidAllocationEntry {
            value: value.to_owned(),
        };
        let (symbol, percent) = value.split_once('=').ok_or_else(invalid)?;
        let percent = percent.trim().parse::<f64>().map_err(|_| invalid())?;
        validate_non_negative("allocation_percent", percent)?;

        Ok(Self::new(Symbol::parse(symbol)?, percent))
    }
}

/// Validate and normalize currency to an uppercase 3-letter code.
pub fn validate_currency_code(input: &str) -> Result<String, ValidationError> {
    let normalized = input.trim().to_ascii_uppercase();
    let is_valid = normalized.len() == 3 && normalized.chars().all(|ch| ch.is_ascii_alphabetic());

    if !is_valid {
        return Err(ValidationError::InvalidCurrency {
            value: input.to_owned(),
        });
    }

    Ok(normalized)
}

pub(crate) fn validate_finite(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    Ok(())
}

pub(crate) fn validate_non_negative(
    field: &'static str,
    value: f64,
) -> Result<(), ValidationError> {
    validate_finite(field, value)?;
    if value < 0.0 {
        return Err(ValidationError::NegativeValue { field });
    }
    Ok(())
}
