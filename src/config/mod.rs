//! Process configuration read from the environment.
//!
//! Values are read once at startup and handed to the components that need
//! them; nothing in here is mutated after construction.

use std::env;
use std::time::Duration;

use thiserror::Error;

/// Benchmark index used for macro context (Jakarta Composite).
pub const DEFAULT_BENCHMARK_SYMBOL: &str = "^JKSE";

pub const DEFAULT_MARKET_DATA_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

pub const DEFAULT_PORT: u16 = 8080;

pub const DEFAULT_FETCH_TIMEOUT_SECONDS: u64 = 15;

/// Starting universe offered to users who have not typed their own list.
pub const DEFAULT_IDX_TICKERS: &[&str] = &[
    "BBCA.JK", "TLKM.JK", "ASII.JK", "ACES.JK", "UNVR.JK", "GOTO.JK", "ADRO.JK", "BUMI.JK",
    "ANTM.JK", "MDKA.JK", "BRIS.JK", "ARTO.JK", "BMRI.JK", "BBNI.JK", "BBRI.JK", "UNTR.JK",
    "ITMG.JK", "INDF.JK", "ICBP.JK", "SRIL.JK", "CPIN.JK", "EXCL.JK", "FREN.JK", "HMSP.JK",
    "INCO.JK", "KLBF.JK", "PGAS.JK", "PTBA.JK", "SMGR.JK", "TINS.JK", "SMMA.JK", "TPIA.JK",
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be a valid {expected}, got '{value}'")]
    InvalidValue {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
    #[error("{0} must be greater than zero")]
    NotPositive(&'static str),
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: String,
    pub port: u16,
    pub benchmark_symbol: String,
    pub market_data_url: String,
    pub fetch_timeout: Duration,
    pub screen_workers: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: "sandbox".to_string(),
            port: DEFAULT_PORT,
            benchmark_symbol: DEFAULT_BENCHMARK_SYMBOL.to_string(),
            market_data_url: DEFAULT_MARKET_DATA_URL.to_string(),
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECONDS),
            screen_workers: default_workers(),
        }
    }
}

impl AppConfig {
    /// Build the configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = match lookup("PORT") {
            Some(raw) => parse_number::<u16>("PORT", "port number", &raw)?,
            None => defaults.port,
        };

        let fetch_timeout_secs = match lookup("FETCH_TIMEOUT_SECONDS") {
            Some(raw) => parse_number::<u64>("FETCH_TIMEOUT_SECONDS", "integer", &raw)?,
            None => DEFAULT_FETCH_TIMEOUT_SECONDS,
        };
        if fetch_timeout_secs == 0 {
            return Err(ConfigError::NotPositive("FETCH_TIMEOUT_SECONDS"));
        }

        let screen_workers = match lookup("SCREEN_WORKERS") {
            Some(raw) => parse_number::<usize>("SCREEN_WORKERS", "integer", &raw)?,
            None => defaults.screen_workers,
        };
        if screen_workers == 0 {
            return Err(ConfigError::NotPositive("SCREEN_WORKERS"));
        }

        let market_data_url = lookup("MARKET_DATA_URL").unwrap_or(defaults.market_data_url);
        if url::Url::parse(&market_data_url).is_err() {
            return Err(ConfigError::InvalidValue {
                name: "MARKET_DATA_URL",
                expected: "URL",
                value: market_data_url,
            });
        }

        Ok(Self {
            environment: lookup("APP_ENV").unwrap_or(defaults.environment),
            port,
            benchmark_symbol: lookup("BENCHMARK_SYMBOL")
                .map(|s| s.trim().to_uppercase())
                .filter(|s| !s.is_empty())
                .unwrap_or(defaults.benchmark_symbol),
            market_data_url,
            fetch_timeout: Duration::from_secs(fetch_timeout_secs),
            screen_workers,
        })
    }

    pub fn is_production(&self) -> bool {
        matches!(self.environment.as_str(), "production" | "prod")
    }
}

fn parse_number<T: std::str::FromStr>(
    name: &'static str,
    expected: &'static str,
    raw: &str,
) -> Result<T, ConfigError> {
    raw.trim().parse::<T>().map_err(|_| ConfigError::InvalidValue {
        name,
        expected,
        value: raw.to_string(),
    })
}

fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
}
