//! Turns a provider table into one clean series per ticker plus the benchmark.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use tracing::debug;

use crate::errors::ScreenError;
use crate::models::bar::{Bar, Series};
use crate::services::market_data::{RawBarRow, RawBarTable};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedBars {
    /// Requested tickers that had data, in request order.
    pub tickers: IndexMap<String, Series>,
    pub benchmark: Option<Series>,
}

impl NormalizedBars {
    pub fn is_empty(&self) -> bool {
        self.tickers.is_empty() && self.benchmark.is_none()
    }
}

/// Split `raw` into per-ticker series and the benchmark series.
///
/// Tickers missing from the response are dropped silently. Fails with
/// [`ScreenError::DataUnavailable`] only when nothing usable came back.
pub fn normalize(
    raw: RawBarTable,
    tickers: &[String],
    benchmark_symbol: &str,
) -> Result<NormalizedBars, ScreenError> {
    if raw.is_empty() {
        return Err(ScreenError::DataUnavailable(
            "market data response was empty".to_string(),
        ));
    }

    let mut normalized = NormalizedBars::default();

    match raw {
        RawBarTable::Empty => {}
        RawBarTable::Flat { symbol, rows } => {
            let series = rows_to_series(&symbol, rows);
            if symbol == benchmark_symbol {
                normalized.benchmark = series;
            } else if let Some(series) = series {
                normalized.tickers.insert(symbol, series);
            }
        }
        RawBarTable::Keyed(mut columns) => {
            normalized.benchmark = columns
                .shift_remove(benchmark_symbol)
                .and_then(|rows| rows_to_series(benchmark_symbol, rows));

            for ticker in tickers.iter().filter(|t| t.as_str() != benchmark_symbol) {
                match columns.shift_remove(ticker) {
                    Some(rows) => {
                        if let Some(series) = rows_to_series(ticker, rows) {
                            normalized.tickers.insert(ticker.clone(), series);
                        }
                    }
                    None => {
                        debug!(symbol = %ticker, "BarStore: no bars returned for {}", ticker);
                    }
                }
            }
        }
    }

    if normalized.is_empty() {
        return Err(ScreenError::DataUnavailable(
            "market data response contained no usable bars".to_string(),
        ));
    }

    Ok(normalized)
}

/// Drop gap rows, order by date and keep the last row for a repeated date.
fn rows_to_series(symbol: &str, rows: Vec<RawBarRow>) -> Option<Series> {
    let total = rows.len();
    let mut by_date: BTreeMap<_, Bar> = BTreeMap::new();

    for row in rows {
        if let (Some(open), Some(high), Some(low), Some(close)) =
            (row.open, row.high, row.low, row.close)
        {
            let bar = Bar::new(row.date, open, high, low, close, row.volume.unwrap_or(0));
            by_date.insert(row.date, bar);
        }
    }

    if by_date.len() < total {
        debug!(
            symbol = %symbol,
            kept = by_date.len(),
            total = total,
            "BarStore: dropped {} gap or duplicate rows for {}",
            total - by_date.len(),
            symbol
        );
    }

    if by_date.is_empty() {
        return None;
    }

    Some(Series::new(symbol, by_date.into_values().collect()))
}
