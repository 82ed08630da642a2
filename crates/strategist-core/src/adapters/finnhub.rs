use std::sync::Arc;

use serde::Deserialize;

use crate::data_source::{QuoteSource, SourceFuture};
use crate::http_client::{HttpClient, HttpRequest, DEFAULT_TIMEOUT_MS};
use crate::{ProviderId, SourceError, Symbol};

use super::{fetch_json, positive_amount};

pub const DEFAULT_BASE_URL: &str = "https://finnhub.io/api/v1";

/// Latest-price adapter for the Finnhub `/quote` endpoint.
#[derive(Clone)]
pub struct FinnhubAdapter {
    http_client: Arc<dyn HttpClient>,
    api_key: Option<String>,
    base_url: String,
    timeout_ms: u64,
}

impl FinnhubAdapter {
    pub fn new(http_client: Arc<dyn HttpClient>, api_key: Option<String>) -> Self {
        Self {
            http_client,
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            base_url: String::from(DEFAULT_BASE_URL),
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

    fn quote_url(&self, symbol: &Symbol, api_key: &str) -> String {
        format!(
            "{}/quote?symbol={}&token={}",
            self.base_url,
            urlencoding::encode(symbol.as_str()),
            urlencoding::encode(api_key)
        )
    }
}

impl QuoteSource for FinnhubAdapter {
    fn id(&self) -> ProviderId {
        ProviderId::Finnhub
    }

    fn price<'a>(&'a self, symbol: &'a Symbol) -> SourceFuture<'a, f64> {
        Box::pin(async move {
            let Some(api_key) = self.api_key.as_deref() else {
                return Err(SourceError::not_configured(ProviderId::Finnhub, "an api key"));
            };

            let request =
                HttpRequest::get(self.quote_url(symbol, api_key)).with_timeout_ms(self.timeout_ms);
            let payload: FinnhubQuotePayload =
                fetch_json(self.http_client.as_ref(), ProviderId::Finnhub, request).await?;

            let price = positive_amount(ProviderId::Finnhub, "price", payload.current)?;
            tracing::debug!(%symbol, price, "fetched finnhub quote");
            Ok(price)
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
struct FinnhubQuotePayload {
    /// Current price; unknown symbols come back as `0`.
    #[serde(rename = "c", default)]
    current: Option<f64>,
}
