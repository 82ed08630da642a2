//! Immutable reference tables: asset profiles, the local currency profile,
//! per-tier allocation templates, and per-tier fallback statistics.
//!
//! A [`Catalog`] is built once at startup (either [`Catalog::builtin`] or a
//! JSON file) and shared behind an `Arc`. Construction validates every
//! template so a malformed table never reaches the engine.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::{validate_finite, validate_non_negative};
use crate::{
    AllocationTemplate, AssetProfile, AssetType, ConfigError, CurrencyProfile,
    PortfolioStatistics, RiskTier, Symbol, TemplateEntry, ValidationError,
};

/// Profile applied to symbols missing from the catalog.
pub const DEFAULT_EXPECTED_RETURN: f64 = 0.10;
pub const DEFAULT_VOLATILITY: f64 = 0.18;

const TEMPLATE_SUM_TOLERANCE: f64 = 1e-6;

/// Process-wide reference data for the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    assets: Vec<AssetProfile>,
    index: HashMap<Symbol, usize>,
    currency: CurrencyProfile,
    templates: BTreeMap<RiskTier, AllocationTemplate>,
    fallback_statistics: BTreeMap<RiskTier, PortfolioStatistics>,
}

/// On-disk catalog layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogFile {
    pub assets: Vec<AssetProfile>,
    pub currency: CurrencyProfile,
    pub templates: BTreeMap<RiskTier, AllocationTemplate>,
    #[serde(default = "builtin_fallback_statistics")]
    pub fallback_statistics: BTreeMap<RiskTier, PortfolioStatistics>,
}

impl Catalog {
    /// Validates and indexes the given tables.
    pub fn new(file: CatalogFile) -> Result<Self, ValidationError> {
        let CatalogFile {
            assets,
            currency,
            templates,
            fallback_statistics,
        } = file;

        currency.validate()?;

        let mut index = HashMap::with_capacity(assets.len());
        for (position, asset) in assets.iter().enumerate() {
            asset.validate()?;
            if index.insert(asset.symbol.clone(), position).is_some() {
                return Err(ValidationError::DuplicateAsset {
                    symbol: asset.symbol.to_string(),
                });
            }
        }

        for tier in RiskTier::ALL {
            let template = templates
                .get(&tier)
                .ok_or(ValidationError::MissingTemplate {
                    tier: tier.as_str(),
                })?;
            validate_template(tier, template)?;
        }

        let mut fallback_statistics = fallback_statistics;
        for tier in RiskTier::ALL {
            let stats = fallback_statistics
                .entry(tier)
                .or_insert_with(|| builtin_fallback_for(tier));
            validate_finite("fallback_expected_return", stats.expected_return)?;
            validate_non_negative("fallback_volatility", stats.volatility)?;
        }

        Ok(Self {
            assets,
            index,
            currency,
            templates,
            fallback_statistics,
        })
    }

    /// Reference tables shipped with the binary.
    pub fn builtin() -> Self {
        use AssetType::{Etf, Stock};

        let asset = |symbol, asset_type, expected_return, volatility, asset_class: &str| {
            AssetProfile {
                symbol: Symbol::from_static(symbol),
                asset_type,
                expected_return,
                volatility,
                asset_class: asset_class.to_owned(),
            }
        };
        let assets = vec![
            asset("VOO", Etf, 0.10, 0.18, "Broad Market ETF"),
            asset("SPY", Etf, 0.10, 0.18, "Broad Market ETF"),
            asset("AAPL", Stock, 0.15, 0.25, "Large-Cap Tech"),
            asset("MSFT", Stock, 0.15, 0.25, "Large-Cap Tech"),
            asset("JNJ", Stock, 0.07, 0.15, "Defensive"),
            asset("KO", Stock, 0.07, 0.15, "Defensive"),
        ];
        let index = assets
            .iter()
            .enumerate()
            .map(|(position, asset)| (asset.symbol.clone(), position))
            .collect();

        let slot = |symbol, asset_type, percent| TemplateEntry {
            symbol: Symbol::from_static(symbol),
            asset_type,
            percent,
        };
        let templates = BTreeMap::from([
            (
                RiskTier::Low,
                AllocationTemplate::new(vec![slot("VOO", Etf, 70.0), slot("JNJ", Stock, 30.0)]),
            ),
            (
                RiskTier::Medium,
                AllocationTemplate::new(vec![
                    slot("SPY", Etf, 50.0),
                    slot("AAPL", Stock, 30.0),
                    slot("KO", Stock, 20.0),
                ]),
            ),
            (
                RiskTier::High,
                AllocationTemplate::new(vec![
                    slot("VOO", Etf, 40.0),
                    slot("AAPL", Stock, 35.0),
                    slot("MSFT", Stock, 25.0),
                ]),
            ),
        ]);

        Self {
            assets,
            index,
            currency: CurrencyProfile {
                local_currency: String::from("NGN"),
                quote_currency: String::from("USD"),
                drift: -0.04,
                volatility: 0.10,
            },
            templates,
            fallback_statistics: builtin_fallback_statistics(),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Ok(Self::new(file)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let catalog = Self::from_json_str(&json)?;
        tracing::info!(
            path = %path.display(),
            assets = catalog.assets.len(),
            "loaded catalog file"
        );
        Ok(catalog)
    }

    /// Serializable snapshot, the inverse of [`Catalog::new`].
    pub fn to_file(&self) -> CatalogFile {
        CatalogFile {
            assets: self.assets.clone(),
            currency: self.currency.clone(),
            templates: self.templates.clone(),
            fallback_statistics: self.fallback_statistics.clone(),
        }
    }

    pub fn assets(&self) -> &[AssetProfile] {
        &self.assets
    }

    pub fn asset(&self, symbol: &Symbol) -> Option<&AssetProfile> {
        self.index.get(symbol).map(|position| &self.assets[*position])
    }

    /// Expected return and volatility for `symbol`, or the generic default.
    pub fn return_and_volatility(&self, symbol: &Symbol) -> (f64, f64) {
        match self.asset(symbol) {
            Some(profile) => (profile.expected_return, profile.volatility),
            None => {
                tracing::debug!(%symbol, "symbol not in catalog, using default profile");
                (DEFAULT_EXPECTED_RETURN, DEFAULT_VOLATILITY)
            }
        }
    }

    pub fn currency(&self) -> &CurrencyProfile {
        &self.currency
    }

    pub fn template(&self, tier: RiskTier) -> &AllocationTemplate {
        // Every tier is present after validation; builtin() fills all three.
        &self.templates[&tier]
    }

    pub fn fallback_statistics(&self, tier: RiskTier) -> PortfolioStatistics {
        self.fallback_statistics
            .get(&tier)
            .copied()
            .unwrap_or_else(|| builtin_fallback_for(tier))
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn validate_template(tier: RiskTier, template: &AllocationTemplate) -> Result<(), ValidationError> {
    if template.entries().is_empty() {
        return Err(ValidationError::EmptyTemplate {
            tier: tier.as_str(),
        });
    }

    for entry in template.entries() {
        validate_non_negative("percent", entry.percent)?;
    }

    let total = template.total_percent();
    if (total - 100.0).abs() > TEMPLATE_SUM_TOLERANCE {
        return Err(ValidationError::TemplateSum {
            tier: tier.as_str(),
            total,
        });
    }

    Ok(())
}

fn builtin_fallback_for(tier: RiskTier) -> PortfolioStatistics {
    let (expected_return, volatility) = match tier {
        RiskTier::Low => (0.08, 0.15),
        RiskTier::Medium => (0.10, 0.18),
        RiskTier::High => (0.13, 0.22),
    };
    PortfolioStatistics {
        expected_return,
        volatility,
    }
}

fn builtin_fallback_statistics() -> BTreeMap<RiskTier, PortfolioStatistics> {
    RiskTier::ALL
        .into_iter()
        .map(|tier| (tier, builtin_fallback_for(tier)))
        .collect()
}
