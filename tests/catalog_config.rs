//! Behavior tests for catalog files and environment configuration.

use std::io::Write;
use std::sync::Arc;

use strategist_core::{
    BuildRequest, Catalog, ConfigError, MarketDataConfig, MarketSnapshot, PortfolioEngine,
    RetryPolicy, RiskTier, TimeHorizon, ValidationError,
};
use strategist_tests::symbol;
use tempfile::NamedTempFile;

const EAST_AFRICA_CATALOG: &str = r#"{
  "assets": [
    {"symbol": "VTI", "asset_type": "ETF", "expected_return": 0.09, "volatility": 0.17, "asset_class": "Total Market ETF"},
    {"symbol": "NVDA", "asset_type": "Stock", "expected_return": 0.20, "volatility": 0.40, "asset_class": "Semiconductors"}
  ],
  "currency": {"local_currency": "KES", "quote_currency": "USD", "drift": -0.06, "volatility": 0.08},
  "templates": {
    "low": [{"symbol": "VTI", "asset_type": "ETF", "percent": 100}],
    "medium": [
      {"symbol": "VTI", "asset_type": "ETF", "percent": 80},
      {"symbol": "NVDA", "asset_type": "Stock", "percent": 20}
    ],
    "high": [
      {"symbol": "VTI", "asset_type": "etf", "percent": 50},
      {"symbol": "NVDA", "asset_type": "stock", "percent": 50}
    ]
  }
}"#;

fn write_temp(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write catalog");
    file
}

// =============================================================================
// Catalog: Loading
// =============================================================================

#[test]
fn when_builtin_catalog_is_saved_and_loaded_it_is_unchanged() {
    // Given: the builtin catalog written to disk
    let builtin = Catalog::builtin();
    let json = serde_json::to_string_pretty(&builtin.to_file()).expect("serialize");
    let file = write_temp(&json);

    // When: the file is loaded
    let loaded = Catalog::from_json_file(file.path()).expect("load catalog");

    // Then: the tables match
    assert_eq!(loaded, builtin);
}

#[test]
fn when_custom_catalog_is_loaded_engine_uses_its_tables() {
    // Given: a catalog for a different local currency and asset list
    let file = write_temp(EAST_AFRICA_CATALOG);
    let catalog = Catalog::from_json_file(file.path()).expect("load catalog");
    let engine = PortfolioEngine::new(Arc::new(catalog));
    let market = MarketSnapshot::new(129.0)
        .with_price(symbol("VTI"), 280.0)
        .with_price(symbol("NVDA"), 120.0);

    // When: a medium portfolio is built
    let request = BuildRequest::new(100_000.0, "medium", TimeHorizon::one_year());
    let report = engine.build(&request, &market).expect("build");

    // Then: the custom template, currency and asset profiles apply
    assert_eq!(report.local_currency, "KES");
    assert_eq!(report.positions.len(), 2);
    assert_eq!(report.positions[0].amount_local, 80_000.0);
    let assumptions = report.projection.assumptions;
    assert!((assumptions.asset_return - (0.8 * 0.09 + 0.2 * 0.20)).abs() < 1e-12);
    assert!((assumptions.fx_impact - 0.06).abs() < 1e-12);
    assert!(report.projection.risk_factors[2].contains("KES depreciation"));
}

#[test]
fn when_fallback_statistics_are_omitted_builtin_values_apply() {
    let catalog = Catalog::from_json_str(EAST_AFRICA_CATALOG).expect("parse catalog");

    let high = catalog.fallback_statistics(RiskTier::High);
    assert_eq!(high.expected_return, 0.13);
    assert_eq!(high.volatility, 0.22);
}

// =============================================================================
// Catalog: Rejection
// =============================================================================

#[test]
fn when_template_does_not_sum_to_one_hundred_catalog_is_rejected() {
    // Given: a low template totalling 90%
    let broken = EAST_AFRICA_CATALOG.replace(
        r#""low": [{"symbol": "VTI", "asset_type": "ETF", "percent": 100}]"#,
        r#""low": [{"symbol": "VTI", "asset_type": "ETF", "percent": 90}]"#,
    );
    assert_ne!(broken, EAST_AFRICA_CATALOG);

    // When: the catalog is parsed
    let error = Catalog::from_json_str(&broken).expect_err("must fail");

    // Then: the validation error names the tier and total
    let ConfigError::Validation(ValidationError::TemplateSum { tier, total }) = error else {
        panic!("expected a template sum error, got {error:?}");
    };
    assert_eq!((tier, total), ("low", 90.0));
}

#[test]
fn when_catalog_file_is_missing_read_error_names_path() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("missing.json");

    let error = Catalog::from_json_file(&path).expect_err("must fail");

    assert!(matches!(error, ConfigError::Read { .. }));
    assert!(error.to_string().contains("missing.json"));
}

#[test]
fn when_catalog_is_malformed_parse_error_is_returned() {
    let file = write_temp("{\"assets\": [");

    let error = Catalog::from_json_file(file.path()).expect_err("must fail");

    assert!(matches!(error, ConfigError::Parse(_)));
}

#[test]
fn when_catalog_has_bad_currency_code_it_is_rejected() {
    let broken = EAST_AFRICA_CATALOG.replace("\"KES\"", "\"KENYA\"");

    let error = Catalog::from_json_str(&broken).expect_err("must fail");

    assert!(matches!(
        error,
        ConfigError::Validation(ValidationError::InvalidCurrency { .. })
    ));
}

// =============================================================================
// Configuration: Environment
// =============================================================================

#[test]
fn when_environment_is_empty_defaults_apply() {
    let config = MarketDataConfig::from_lookup(|_| None).expect("config");

    assert_eq!(config, MarketDataConfig::default());
    assert_eq!(config.finnhub_api_key, None);
    assert_eq!(config.timeout_ms, 5_000);
    assert_eq!(config.retry, RetryPolicy::default());
}

#[test]
fn when_environment_overrides_values_config_reflects_them() {
    let catalog = write_temp(EAST_AFRICA_CATALOG);
    let catalog_path = catalog.path().to_string_lossy().into_owned();

    let config = MarketDataConfig::from_lookup(|name| match name {
        "FINNHUB_API_KEY" => Some(String::from("legacy-key")),
        "STRATEGIST_TIMEOUT_MS" => Some(String::from(" 2500 ")),
        "STRATEGIST_MAX_RETRIES" => Some(String::from("4")),
        "STRATEGIST_CATALOG" => Some(catalog_path.clone()),
        _ => None,
    })
    .expect("config");

    assert_eq!(config.finnhub_api_key.as_deref(), Some("legacy-key"));
    assert_eq!(config.timeout_ms, 2_500);
    assert_eq!(config.retry, RetryPolicy::exponential(4));

    let path = config.catalog_path.expect("catalog path");
    let loaded = Catalog::from_json_file(path).expect("load catalog");
    assert_eq!(loaded.currency().local_currency, "KES");
}

#[test]
fn when_environment_value_is_invalid_config_names_variable() {
    let error = MarketDataConfig::from_lookup(|name| {
        (name == "STRATEGIST_TIMEOUT_MS").then(|| String::from("soon"))
    })
    .expect_err("must fail");

    assert!(matches!(
        error,
        ConfigError::InvalidEnv {
            name: "STRATEGIST_TIMEOUT_MS",
            ..
        }
    ));
    assert!(error.to_string().contains("soon"));
}
