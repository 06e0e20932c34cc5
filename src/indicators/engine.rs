//! Computes every configured indicator for one series.

use crate::indicators::momentum::{calculate_rsi_series, calculate_trailing_return_series};
use crate::indicators::trend::calculate_sma_series;
use crate::indicators::volume::calculate_avg_volume_series;
use crate::models::bar::Series;
use crate::models::indicators::{AugmentedSeries, IndicatorConfig, IndicatorSet};

/// Build the [`IndicatorSet`] for `series` without consuming it.
pub fn calculate_indicator_set(series: &Series, config: &IndicatorConfig) -> IndicatorSet {
    let bars = &series.bars;
    IndicatorSet {
        sma_short: calculate_sma_series(bars, config.sma_short),
        sma_long: calculate_sma_series(bars, config.sma_long),
        rsi: calculate_rsi_series(bars, config.rsi_period),
        avg_volume: calculate_avg_volume_series(bars, config.volume_avg_period),
        trailing_return: calculate_trailing_return_series(bars, config.return_lookback_days),
    }
}

/// Attach indicators to `series`. Pure: identical inputs give identical output.
pub fn compute_indicators(series: Series, config: &IndicatorConfig) -> AugmentedSeries {
    let indicators = calculate_indicator_set(&series, config);
    AugmentedSeries {
        series,
        indicators,
        config: *config,
    }
}
