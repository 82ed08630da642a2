//! Environment-driven configuration for the market-data boundary.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `STRATEGIST_FINNHUB_API_KEY` (or `FINNHUB_API_KEY`) | unset, prices fall back |
//! | `STRATEGIST_FINNHUB_BASE_URL` | `https://finnhub.io/api/v1` |
//! | `STRATEGIST_FX_BASE_URL` | `https://api.exchangerate-api.com/v4` |
//! | `STRATEGIST_TIMEOUT_MS` | `5000` |
//! | `STRATEGIST_MAX_RETRIES` | `2` |
//! | `STRATEGIST_CATALOG` | unset, builtin catalog |

use std::path::PathBuf;

use crate::adapters::{EXCHANGE_RATE_BASE_URL, FINNHUB_BASE_URL};
use crate::http_client::DEFAULT_TIMEOUT_MS;
use crate::retry::RetryPolicy;
use crate::ConfigError;

pub const ENV_FINNHUB_API_KEY: &str = "STRATEGIST_FINNHUB_API_KEY";
pub const ENV_FINNHUB_API_KEY_FALLBACK: &str = "FINNHUB_API_KEY";
pub const ENV_FINNHUB_BASE_URL: &str = "STRATEGIST_FINNHUB_BASE_URL";
pub const ENV_FX_BASE_URL: &str = "STRATEGIST_FX_BASE_URL";
pub const ENV_TIMEOUT_MS: &str = "STRATEGIST_TIMEOUT_MS";
pub const ENV_MAX_RETRIES: &str = "STRATEGIST_MAX_RETRIES";
pub const ENV_CATALOG: &str = "STRATEGIST_CATALOG";

#[derive(Debug, Clone, PartialEq)]
pub struct MarketDataConfig {
    pub finnhub_api_key: Option<String>,
    pub finnhub_base_url: String,
    pub fx_base_url: String,
    pub timeout_ms: u64,
    pub retry: RetryPolicy,
    pub catalog_path: Option<PathBuf>,
}

impl Default for MarketDataConfig {
    fn default() -> Self {
        Self {
            finnhub_api_key: None,
            finnhub_base_url: String::from(FINNHUB_BASE_URL),
            fx_base_url: String::from(EXCHANGE_RATE_BASE_URL),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            retry: RetryPolicy::default(),
            catalog_path: None,
        }
    }
}

impl MarketDataConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from an arbitrary variable lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        let timeout_ms = match get(ENV_TIMEOUT_MS) {
            Some(raw) => parse_positive(ENV_TIMEOUT_MS, &raw)?,
            None => defaults.timeout_ms,
        };
        let retry = match get(ENV_MAX_RETRIES) {
            Some(raw) => {
                let max_retries = raw.trim().parse::<u32>().map_err(|_| ConfigError::InvalidEnv {
                    name: ENV_MAX_RETRIES,
                    value: raw.clone(),
                })?;
                RetryPolicy::exponential(max_retries)
            }
            None => defaults.retry,
        };

        Ok(Self {
            finnhub_api_key: get(ENV_FINNHUB_API_KEY).or_else(|| get(ENV_FINNHUB_API_KEY_FALLBACK)),
            finnhub_base_url: get(ENV_FINNHUB_BASE_URL).unwrap_or(defaults.finnhub_base_url),
            fx_base_url: get(ENV_FX_BASE_URL).unwrap_or(defaults.fx_base_url),
            timeout_ms,
            retry,
            catalog_path: get(ENV_CATALOG).map(PathBuf::from),
        })
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn with_catalog_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.catalog_path = Some(path.into());
        self
    }
}

fn parse_positive(name: &'static str, raw: &str) -> Result<u64, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(ConfigError::InvalidEnv {
            name,
            value: raw.to_owned(),
        }),
    }
}
