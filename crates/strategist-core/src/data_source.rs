//! Market-data source contracts.
//!
//! The engine never talks to the network. A caller resolves prices and the
//! exchange rate through these traits first (usually via
//! [`MarketDataResolver`](crate::MarketDataResolver)) and hands the result
//! to the engine as a [`MarketSnapshot`](crate::MarketSnapshot).
//!
//! | Trait | Method | Output |
//! |-------|--------|--------|
//! | [`QuoteSource`] | `price(&Symbol)` | unit price in quote currency |
//! | [`FxSource`] | `fx_rate()` | local currency per unit of quote currency |

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use crate::{ProviderId, Symbol};

pub type SourceFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, SourceError>> + Send + 'a>>;

/// Adapter-level error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceErrorKind {
    Unavailable,
    RateLimited,
    InvalidRequest,
    InvalidResponse,
    NotConfigured,
    Internal,
}

/// Structured source error; retryable errors are retried before fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceError {
    kind: SourceErrorKind,
    message: String,
    retryable: bool,
}

impl SourceError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Unavailable,
            message: message.into(),
            retryable: true,
        }
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::RateLimited,
            message: message.into(),
            retryable: true,
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::InvalidRequest,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::InvalidResponse,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn not_configured(provider: ProviderId, setting: &str) -> Self {
        Self {
            kind: SourceErrorKind::NotConfigured,
            message: format!("source '{provider}' is missing {setting}"),
            retryable: false,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Internal,
            message: message.into(),
            retryable: false,
        }
    }

    pub const fn kind(&self) -> SourceErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn retryable(&self) -> bool {
        self.retryable
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            SourceErrorKind::Unavailable => "source.unavailable",
            SourceErrorKind::RateLimited => "source.rate_limited",
            SourceErrorKind::InvalidRequest => "source.invalid_request",
            SourceErrorKind::InvalidResponse => "source.invalid_response",
            SourceErrorKind::NotConfigured => "source.not_configured",
            SourceErrorKind::Internal => "source.internal",
        }
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for SourceError {}

/// Provider of current unit prices.
///
/// Implementations must be `Send + Sync`; the resolver fetches several
/// symbols concurrently from one shared instance.
pub trait QuoteSource: Send + Sync {
    fn id(&self) -> ProviderId;

    /// Latest unit price of `symbol` in quote currency. Always positive on success.
    fn price<'a>(&'a self, symbol: &'a Symbol) -> SourceFuture<'a, f64>;
}

/// Provider of the local/quote exchange rate.
pub trait FxSource: Send + Sync {
    fn id(&self) -> ProviderId;

    /// Units of local currency per one unit of quote currency. Always positive on success.
    fn fx_rate<'a>(&'a self) -> SourceFuture<'a, f64>;
}
