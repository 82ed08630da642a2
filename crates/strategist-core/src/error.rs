use thiserror::Error;

/// Validation and contract errors exposed by `strategist-core`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,
    #[error("symbol length {len} exceeds max {max}")]
    SymbolTooLong { len: usize, max: usize },
    #[error("symbol must start with an ASCII letter: '{ch}'")]
    SymbolInvalidStart { ch: char },
    #[error("symbol contains invalid character '{ch}' at index {index}")]
    SymbolInvalidChar { ch: char, index: usize },

    #[error(
        "invalid horizon '{value}', expected a label such as 6_months, 1_year, 3_years \
         or a month count between 1 and {max_months}"
    )]
    InvalidHorizon { value: String, max_months: u32 },

    #[error("invalid asset type '{value}', expected ETF or Stock")]
    InvalidAssetType { value: String },

    #[error("currency must be a 3-letter ISO code: '{value}'")]
    InvalidCurrency { value: String },

    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },
    #[error("field '{field}' must be non-negative")]
    NegativeValue { field: &'static str },

    #[error("asset '{symbol}' is listed more than once in the catalog")]
    DuplicateAsset { symbol: String },
    #[error("catalog has no allocation template for risk tier '{tier}'")]
    MissingTemplate { tier: &'static str },
    #[error("allocation template '{tier}' is empty")]
    EmptyTemplate { tier: &'static str },
    #[error("allocation template '{tier}' percentages sum to {total}, expected 100")]
    TemplateSum { tier: &'static str, total: f64 },

    #[error("allocation entry must look like SYMBOL=PERCENT: '{value}'")]
    InvalidAllocationEntry { value: String },

    #[error("unknown market-data source '{value}'")]
    InvalidSource { value: String },

    #[error("schema_version must match vMAJOR.MINOR.PATCH: '{value}'")]
    InvalidSchemaVersion { value: String },
    #[error("request_id must be at least 8 characters")]
    InvalidRequestId,
    #[error("envelope error code cannot be empty")]
    EmptyErrorCode,
}

/// Precondition violations raised by the portfolio engine.
///
/// These are never retried: the same invalid number fails the same way.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    #[error("exchange rate must be positive and finite, got {rate}")]
    InvalidRate { rate: f64 },

    #[error("unit price must be positive and finite, got {price}")]
    InvalidPrice { price: f64 },

    #[error("budget must be positive and finite, got {budget}")]
    InvalidBudget { budget: f64 },

    #[error("horizon in years must be non-negative and finite, got {years}")]
    InvalidHorizon { years: f64 },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl EngineError {
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidRate { .. } => "engine.invalid_rate",
            Self::InvalidPrice { .. } => "engine.invalid_price",
            Self::InvalidBudget { .. } => "engine.invalid_budget",
            Self::InvalidHorizon { .. } => "engine.invalid_horizon",
            Self::Validation(_) => "engine.validation",
        }
    }
}

/// Failures while loading configuration or a catalog file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read catalog file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("environment variable {name} has invalid value '{value}'")]
    InvalidEnv { name: &'static str, value: String },
}
