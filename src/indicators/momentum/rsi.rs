//! RSI (Relative Strength Index) indicator

use crate::common::math;
use crate::models::bar::Bar;

/// Calculate RSI at every bar.
///
/// RSI = 100 - (100 / (1 + RS))
/// RS = Average Gain / Average Loss over the last `period` close-to-close changes
///
/// Needs `period + 1` bars, so the first `period` positions are `None`.
/// A window with gains but no losses saturates at 100. A window with no
/// movement at all has no defined RSI and stays `None`.
pub fn calculate_rsi_series(bars: &[Bar], period: u32) -> Vec<Option<f64>> {
    let period = period as usize;
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    let changes = math::deltas(&closes);

    let gains: Vec<f64> = changes
        .iter()
        .map(|c| c.map_or(0.0, |v| v.max(0.0)))
        .collect();
    let losses: Vec<f64> = changes
        .iter()
        .map(|c| c.map_or(0.0, |v| (-v).max(0.0)))
        .collect();

    (0..bars.len())
        .map(|i| {
            if period == 0 || i < period {
                return None;
            }
            let avg_gain = math::mean(&gains[i + 1 - period..=i])?;
            let avg_loss = math::mean(&losses[i + 1 - period..=i])?;
            rsi_value(avg_gain, avg_loss)
        })
        .collect()
}

/// Calculate RSI for the latest bar only
pub fn calculate_rsi(bars: &[Bar], period: u32) -> Option<f64> {
    calculate_rsi_series(bars, period).last().copied().flatten()
}

fn rsi_value(avg_gain: f64, avg_loss: f64) -> Option<f64> {
    if avg_loss == 0.0 {
        if avg_gain == 0.0 {
            return None;
        }
        return Some(100.0);
    }

    let rs = avg_gain / avg_loss;
    Some(100.0 - (100.0 / (1.0 + rs)))
}
