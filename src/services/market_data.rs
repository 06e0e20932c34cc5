//! Market data provider interface and the raw table it returns.

use async_trait::async_trait;
use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::screening::Period;

#[derive(Debug, Error)]
pub enum MarketDataError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid market data URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("provider rejected {symbol}: {message}")]
    Api { symbol: String, message: String },

    #[error("malformed response for {symbol}: {message}")]
    Decode { symbol: String, message: String },
}

/// One provider row. Prices may be missing when the provider has a gap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawBarRow {
    pub date: NaiveDate,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
    pub volume: Option<u64>,
}

/// Provider response before normalization.
///
/// `Flat` carries a single instrument's columns; `Keyed` groups columns per
/// symbol. Providers in this crate always answer `Keyed`; `Flat` exists for
/// collaborators that collapse single-symbol downloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RawBarTable {
    Empty,
    Flat { symbol: String, rows: Vec<RawBarRow> },
    Keyed(IndexMap<String, Vec<RawBarRow>>),
}

impl RawBarTable {
    pub fn empty() -> Self {
        RawBarTable::Empty
    }

    /// True when no symbol carries any row.
    pub fn is_empty(&self) -> bool {
        match self {
            RawBarTable::Empty => true,
            RawBarTable::Flat { rows, .. } => rows.is_empty(),
            RawBarTable::Keyed(columns) => columns.values().all(|rows| rows.is_empty()),
        }
    }

    pub fn symbols(&self) -> Vec<&str> {
        match self {
            RawBarTable::Empty => Vec::new(),
            RawBarTable::Flat { symbol, .. } => vec![symbol.as_str()],
            RawBarTable::Keyed(columns) => columns.keys().map(String::as_str).collect(),
        }
    }
}

#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Fetch daily bars for every symbol in one batched call.
    ///
    /// Symbols the provider has no data for are omitted, not reported as errors.
    async fn fetch(&self, symbols: &[String], period: Period) -> Result<RawBarTable, MarketDataError>;
}

/// Serves a fixed table. Used by tests and offline runs.
#[derive(Debug, Clone)]
pub struct StaticMarketDataProvider {
    table: RawBarTable,
}

impl StaticMarketDataProvider {
    pub fn new(table: RawBarTable) -> Self {
        Self { table }
    }
}

#[async_trait]
impl MarketDataProvider for StaticMarketDataProvider {
    async fn fetch(&self, symbols: &[String], _period: Period) -> Result<RawBarTable, MarketDataError> {
        Ok(match &self.table {
            RawBarTable::Keyed(columns) => RawBarTable::Keyed(
                columns
                    .iter()
                    .filter(|(symbol, _)| symbols.contains(*symbol))
                    .map(|(symbol, rows)| (symbol.clone(), rows.clone()))
                    .collect(),
            ),
            other => other.clone(),
        })
    }
}
