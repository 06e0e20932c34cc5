use serde::{Deserialize, Serialize};

use crate::errors::ScreenError;
use crate::models::bar::Series;

/// Window lengths for the indicator engine, in bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorConfig {
    pub sma_short: u32,
    pub sma_long: u32,
    pub rsi_period: u32,
    pub volume_avg_period: u32,
    pub return_lookback_days: u32,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            sma_short: 20,
            sma_long: 60,
            rsi_period: 14,
            volume_avg_period: 20,
            return_lookback_days: 30,
        }
    }
}

impl IndicatorConfig {
    /// All windows must be positive. `sma_short < sma_long` is not checked.
    pub fn validate(&self) -> Result<(), ScreenError> {
        let fields = [
            ("sma_short", self.sma_short),
            ("sma_long", self.sma_long),
            ("rsi_period", self.rsi_period),
            ("volume_avg_period", self.volume_avg_period),
            ("return_lookback_days", self.return_lookback_days),
        ];
        for (name, value) in fields {
            if value == 0 {
                return Err(ScreenError::InvalidInput(format!(
                    "{} must be a positive number of days",
                    name
                )));
            }
        }
        Ok(())
    }
}

/// Derived columns aligned index-for-index with a [`Series`].
///
/// `None` marks positions without enough history for the window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSet {
    pub sma_short: Vec<Option<f64>>,
    pub sma_long: Vec<Option<f64>>,
    pub rsi: Vec<Option<f64>>,
    pub avg_volume: Vec<Option<f64>>,
    pub trailing_return: Vec<Option<f64>>,
}

impl IndicatorSet {
    pub fn len(&self) -> usize {
        self.sma_short.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sma_short.is_empty()
    }

    /// Values at the last index.
    pub fn latest(&self) -> LatestIndicators {
        fn last(column: &[Option<f64>]) -> Option<f64> {
            column.last().copied().flatten()
        }

        LatestIndicators {
            sma_short: last(&self.sma_short),
            sma_long: last(&self.sma_long),
            rsi: last(&self.rsi),
            avg_volume: last(&self.avg_volume),
            trailing_return: last(&self.trailing_return),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LatestIndicators {
    pub sma_short: Option<f64>,
    pub sma_long: Option<f64>,
    pub rsi: Option<f64>,
    pub avg_volume: Option<f64>,
    pub trailing_return: Option<f64>,
}

/// A series together with the indicators computed from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AugmentedSeries {
    pub series: Series,
    pub indicators: IndicatorSet,
    pub config: IndicatorConfig,
}
