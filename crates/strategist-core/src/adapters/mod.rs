//! Market-data adapters.
//!
//! | Adapter | Provides | Notes |
//! |---------|----------|-------|
//! | [`FinnhubAdapter`] | prices | requires an API key |
//! | [`ExchangeRateAdapter`] | FX rate | keyless |
//! | [`FixedMarketData`] | prices, FX rate | constant table, never fails |

mod exchange_rate;
mod finnhub;
mod fixed;

pub use exchange_rate::{ExchangeRateAdapter, DEFAULT_BASE_URL as EXCHANGE_RATE_BASE_URL};
pub use finnhub::{FinnhubAdapter, DEFAULT_BASE_URL as FINNHUB_BASE_URL};
pub use fixed::{FixedMarketData, DEFAULT_FALLBACK_FX_RATE, DEFAULT_FALLBACK_PRICE};

use serde::de::DeserializeOwned;

use crate::http_client::{HttpClient, HttpRequest};
use crate::{ProviderId, SourceError};

/// Executes `request` and decodes a successful JSON body.
///
/// HTTP 429 maps to `RateLimited`, any other non-2xx status to `Unavailable`.
async fn fetch_json<T: DeserializeOwned>(
    http_client: &dyn HttpClient,
    provider: ProviderId,
    request: HttpRequest,
) -> Result<T, SourceError> {
    let response = http_client
        .execute(request.with_header("accept", "application/json"))
        .await
        .map_err(|error| {
            if error.retryable() {
                SourceError::unavailable(format!("{provider} transport error: {}", error.message()))
            } else {
                SourceError::internal(format!("{provider} transport error: {}", error.message()))
            }
        })?;

    if response.status == 429 {
        return Err(SourceError::rate_limited(format!(
            "{provider} returned status 429"
        )));
    }
    if !response.is_success() {
        return Err(SourceError::unavailable(format!(
            "{provider} returned status {}",
            response.status
        )));
    }

    serde_json::from_str(&response.body).map_err(|error| {
        SourceError::invalid_response(format!("failed to parse {provider} response: {error}"))
    })
}

/// Accepts finite positive values, rounded to cents.
fn positive_amount(
    provider: ProviderId,
    what: &str,
    value: Option<f64>,
) -> Result<f64, SourceError> {
    match value {
        Some(value) if value.is_finite() && value > 0.0 => Ok(crate::engine::round_to(value, 2)),
        Some(value) => Err(SourceError::invalid_response(format!(
            "{provider} returned non-positive {what}: {value}"
        ))),
        None => Err(SourceError::invalid_response(format!(
            "{provider} response has no {what}"
        ))),
    }
}
