use std::collections::HashMap;
use std::sync::Arc;

use serde::Deserialize;

use crate::data_source::{FxSource, SourceFuture};
use crate::http_client::{HttpClient, HttpRequest, DEFAULT_TIMEOUT_MS};
use crate::ProviderId;

use super::{fetch_json, positive_amount};

pub const DEFAULT_BASE_URL: &str = "https://api.exchangerate-api.com/v4";

/// Keyless FX adapter for `GET {base}/latest/{QUOTE}`.
#[derive(Clone)]
pub struct ExchangeRateAdapter {
    http_client: Arc<dyn HttpClient>,
    base_url: String,
    quote_currency: String,
    local_currency: String,
    timeout_ms: u64,
}

impl ExchangeRateAdapter {
    /// Rate of `local_currency` per one unit of `quote_currency`.
    pub fn new(
        http_client: Arc<dyn HttpClient>,
        quote_currency: impl Into<String>,
        local_currency: impl Into<String>,
    ) -> Self {
        Self {
            http_client,
            base_url: String::from(DEFAULT_BASE_URL),
            quote_currency: quote_currency.into(),
            local_currency: local_currency.into(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }
}

impl FxSource for ExchangeRateAdapter {
    fn id(&self) -> ProviderId {
        ProviderId::ExchangeRateApi
    }

    fn fx_rate<'a>(&'a self) -> SourceFuture<'a, f64> {
        Box::pin(async move {
            let url = format!(
                "{}/latest/{}",
                self.base_url,
                urlencoding::encode(&self.quote_currency)
            );
            let request = HttpRequest::get(url).with_timeout_ms(self.timeout_ms);
            let payload: LatestRatesPayload =
                fetch_json(self.http_client.as_ref(), ProviderId::ExchangeRateApi, request)
                    .await?;

            let rate = positive_amount(
                ProviderId::ExchangeRateApi,
                &format!("{} rate", self.local_currency),
                payload.rates.get(&self.local_currency).copied(),
            )?;
            tracing::debug!(
                quote = %self.quote_currency,
                local = %self.local_currency,
                rate,
                "fetched exchange rate"
            );
            Ok(rate)
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
struct LatestRatesPayload {
    #[serde(default)]
    rates: HashMap<String, f64>,
}
