//! SMA (Simple Moving Average) indicator

use crate::common::math;
use crate::models::bar::Bar;

/// Mean of the trailing `period` closes at every bar, current bar included.
pub fn calculate_sma_series(bars: &[Bar], period: u32) -> Vec<Option<f64>> {
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    math::rolling_mean(&closes, period as usize)
}

/// Calculate SMA for the latest bar
pub fn calculate_sma(bars: &[Bar], period: u32) -> Option<f64> {
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    math::sma(&closes, period as usize)
}

