use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::indicators::AugmentedSeries;

/// Columnar view of an augmented series, handed verbatim to chart renderers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub symbol: String,
    pub sma_short_period: u32,
    pub sma_long_period: u32,
    pub rsi_period: u32,
    pub dates: Vec<NaiveDate>,
    pub open: Vec<f64>,
    pub high: Vec<f64>,
    pub low: Vec<f64>,
    pub close: Vec<f64>,
    pub volume: Vec<u64>,
    pub sma_short: Vec<Option<f64>>,
    pub sma_long: Vec<Option<f64>>,
    pub rsi: Vec<Option<f64>>,
    pub avg_volume: Vec<Option<f64>>,
    pub trailing_return: Vec<Option<f64>>,
}

impl From<AugmentedSeries> for ChartSeries {
    fn from(augmented: AugmentedSeries) -> Self {
        let AugmentedSeries {
            series,
            indicators,
            config,
        } = augmented;
        let bars = &series.bars;

        Self {
            sma_short_period: config.sma_short,
            sma_long_period: config.sma_long,
            rsi_period: config.rsi_period,
            dates: bars.iter().map(|b| b.date).collect(),
            open: bars.iter().map(|b| b.open).collect(),
            high: bars.iter().map(|b| b.high).collect(),
            low: bars.iter().map(|b| b.low).collect(),
            close: bars.iter().map(|b| b.close).collect(),
            volume: bars.iter().map(|b| b.volume).collect(),
            sma_short: indicators.sma_short,
            sma_long: indicators.sma_long,
            rsi: indicators.rsi,
            avg_volume: indicators.avg_volume,
            trailing_return: indicators.trailing_return,
            symbol: series.symbol,
        }
    }
}
