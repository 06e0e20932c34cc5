use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::common::format::{format_fixed, format_signed_pct};
use crate::errors::ScreenError;

/// Lookback window requested from the market-data provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Period {
    #[serde(rename = "3mo")]
    ThreeMonths,
    #[default]
    #[serde(rename = "6mo")]
    SixMonths,
    #[serde(rename = "1y")]
    OneYear,
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::ThreeMonths => "3mo",
            Period::SixMonths => "6mo",
            Period::OneYear => "1y",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = ScreenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "3mo" => Ok(Period::ThreeMonths),
            "6mo" => Ok(Period::SixMonths),
            "1y" => Ok(Period::OneYear),
            other => Err(ScreenError::InvalidInput(format!(
                "unsupported period '{}', expected one of 3mo, 6mo, 1y",
                other
            ))),
        }
    }
}

/// Hard filter thresholds applied to each ticker's latest bar.
///
/// Fields missing from a serialized form take their default.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreeningCriteria {
    /// Today's open must exceed this multiple of yesterday's close.
    pub min_open_ratio: f64,
    /// Today's close must be at least this price.
    pub min_price: f64,
    /// Today's volume must exceed this many shares.
    pub min_volume_shares: u64,
}

impl Default for ScreeningCriteria {
    fn default() -> Self {
        Self {
            min_open_ratio: 1.015,
            min_price: 50.0,
            min_volume_shares: 5_000_000,
        }
    }
}

impl ScreeningCriteria {
    pub fn validate(&self) -> Result<(), ScreenError> {
        if !(self.min_open_ratio.is_finite() && self.min_open_ratio > 0.0) {
            return Err(ScreenError::InvalidInput(
                "min_open_ratio must be greater than zero".to_string(),
            ));
        }
        if !(self.min_price.is_finite() && self.min_price >= 0.0) {
            return Err(ScreenError::InvalidInput(
                "min_price must be zero or greater".to_string(),
            ));
        }
        Ok(())
    }
}

/// One ticker that passed every hard filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreeningResult {
    pub symbol: String,
    pub close: f64,
    pub trailing_return_pct: Option<f64>,
    pub open_ratio: f64,
    pub open: f64,
    pub previous_close: f64,
    pub volume: u64,
    pub avg_volume: Option<f64>,
    pub rsi: Option<f64>,
}

impl ScreeningResult {
    pub fn display(&self) -> ResultRow {
        ResultRow {
            symbol: self.symbol.clone(),
            trailing_return: self
                .trailing_return_pct
                .map(|r| format!("{:.2}%", r))
                .unwrap_or_else(|| "N/A".to_string()),
            last_price: format_fixed(self.close, 2),
            open_ratio: format!("{:.3}x", self.open_ratio),
            open_today: format_fixed(self.open, 2),
            previous_close: format_fixed(self.previous_close, 2),
            volume_today: format_fixed(self.volume as f64, 0),
            avg_volume: self
                .avg_volume
                .map(|v| format_fixed(v, 0))
                .unwrap_or_else(|| "N/A".to_string()),
            rsi: self
                .rsi
                .map(|v| format!("{:.2}", v))
                .unwrap_or_else(|| "N/A".to_string()),
        }
    }
}

/// Table-ready strings for a [`ScreeningResult`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultRow {
    pub symbol: String,
    pub trailing_return: String,
    pub last_price: String,
    pub open_ratio: String,
    pub open_today: String,
    pub previous_close: String,
    pub volume_today: String,
    pub avg_volume: String,
    pub rsi: String,
}

/// Latest benchmark close and its change against the prior session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkStatus {
    pub symbol: String,
    /// `None` when the benchmark series was empty or missing.
    pub latest_close: Option<f64>,
    pub change_pct: f64,
}

impl BenchmarkStatus {
    pub fn not_available(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            latest_close: None,
            change_pct: 0.0,
        }
    }

    pub fn is_available(&self) -> bool {
        self.latest_close.is_some()
    }

    /// "7,123.45 (+0.52%)" or "N/A".
    pub fn label(&self) -> String {
        match self.latest_close {
            Some(close) => format!(
                "{} ({})",
                format_fixed(close, 2),
                format_signed_pct(self.change_pct)
            ),
            None => "N/A".to_string(),
        }
    }
}
