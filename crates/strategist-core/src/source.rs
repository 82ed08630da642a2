use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Canonical market-data provider identifiers used in metadata and envelopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderId {
    Finnhub,
    ExchangeRateApi,
    /// Built-in constant table used offline and as the fallback.
    Fixed,
}

impl ProviderId {
    pub const ALL: [Self; 3] = [Self::Finnhub, Self::ExchangeRateApi, Self::Fixed];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Finnhub => "finnhub",
            Self::ExchangeRateApi => "exchange_rate_api",
            Self::Fixed => "fixed",
        }
    }
}

impl Display for ProviderId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderId {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "finnhub" => Ok(Self::Finnhub),
            "exchange_rate_api" | "exchangerate" => Ok(Self::ExchangeRateApi),
            "fixed" => Ok(Self::Fixed),
            other => Err(ValidationError::InvalidSource {
                value: other.to_owned(),
            }),
        }
    }
}
