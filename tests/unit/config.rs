//! Unit tests for environment configuration

use std::collections::HashMap;
use std::time::Duration;

use gapscreen::config::{AppConfig, ConfigError, DEFAULT_BENCHMARK_SYMBOL, DEFAULT_IDX_TICKERS};

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn test_defaults_when_unset() {
    let config = AppConfig::from_lookup(lookup(&[])).unwrap();
    assert_eq!(config.port, 8080);
    assert_eq!(config.benchmark_symbol, DEFAULT_BENCHMARK_SYMBOL);
    assert_eq!(config.fetch_timeout, Duration::from_secs(15));
    assert!(config.screen_workers >= 1);
    assert!(!config.is_production());
}

#[test]
fn test_overrides() {
    let config = AppConfig::from_lookup(lookup(&[
        ("APP_ENV", "production"),
        ("PORT", "9090"),
        ("BENCHMARK_SYMBOL", " ^jkse "),
        ("MARKET_DATA_URL", "http://localhost:1234/chart"),
        ("FETCH_TIMEOUT_SECONDS", "3"),
        ("SCREEN_WORKERS", "2"),
    ]))
    .unwrap();

    assert!(config.is_production());
    assert_eq!(config.port, 9090);
    assert_eq!(config.benchmark_symbol, "^JKSE");
    assert_eq!(config.market_data_url, "http://localhost:1234/chart");
    assert_eq!(config.fetch_timeout, Duration::from_secs(3));
    assert_eq!(config.screen_workers, 2);
}

#[test]
fn test_invalid_port() {
    let err = AppConfig::from_lookup(lookup(&[("PORT", "eighty")])).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { name: "PORT", .. }));
}

#[test]
fn test_zero_timeout_rejected() {
    let err = AppConfig::from_lookup(lookup(&[("FETCH_TIMEOUT_SECONDS", "0")])).unwrap_err();
    assert_eq!(err, ConfigError::NotPositive("FETCH_TIMEOUT_SECONDS"));
}

#[test]
fn test_zero_workers_rejected() {
    let err = AppConfig::from_lookup(lookup(&[("SCREEN_WORKERS", "0")])).unwrap_err();
    assert_eq!(err, ConfigError::NotPositive("SCREEN_WORKERS"));
}

#[test]
fn test_invalid_market_data_url() {
    let err = AppConfig::from_lookup(lookup(&[("MARKET_DATA_URL", "not a url")])).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::InvalidValue {
            name: "MARKET_DATA_URL",
            ..
        }
    ));
}

#[test]
fn test_default_universe_is_idx() {
    assert!(!DEFAULT_IDX_TICKERS.is_empty());
    assert!(DEFAULT_IDX_TICKERS.iter().all(|t| t.ends_with(".JK")));
}

#[test]
fn test_production_aliases() {
    let prod = AppConfig::from_lookup(lookup(&[("APP_ENV", "prod")])).unwrap();
    assert!(prod.is_production());

    let staging = AppConfig::from_lookup(lookup(&[("APP_ENV", "staging")])).unwrap();
    assert!(!staging.is_production());
    assert_eq!(AppConfig::default().environment, "sandbox");
}
