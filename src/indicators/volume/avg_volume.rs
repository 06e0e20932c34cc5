//! Rolling average volume

use crate::common::math;
use crate::models::bar::Bar;

/// Mean share volume over the trailing `period` bars at every bar.
pub fn calculate_avg_volume_series(bars: &[Bar], period: u32) -> Vec<Option<f64>> {
    let volumes: Vec<f64> = bars.iter().map(|b| b.volume as f64).collect();
    math::rolling_mean(&volumes, period as usize)
}

