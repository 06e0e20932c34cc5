//! Trailing percentage return

use crate::common::math;
use crate::models::bar::Bar;

/// `(close_t / close_{t-N} - 1) * 100` at every bar; `None` for the first `N` bars.
pub fn calculate_trailing_return_series(bars: &[Bar], lookback_days: u32) -> Vec<Option<f64>> {
    let n = lookback_days as usize;
    (0..bars.len())
        .map(|i| {
            if n == 0 || i < n {
                None
            } else {
                Some(math::pct_change(bars[i].close, bars[i - n].close))
            }
        })
        .collect()
}

pub fn calculate_trailing_return(bars: &[Bar], lookback_days: u32) -> Option<f64> {
    let n = lookback_days as usize;
    if n == 0 || bars.len() < n + 1 {
        return None;
    }
    let latest = bars.last()?;
    let base = bars.get(bars.len() - 1 - n)?;
    Some(math::pct_change(latest.close, base.close))
}
