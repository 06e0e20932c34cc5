//! Numeric helpers shared by the indicator implementations.

/// Arithmetic mean, `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Simple moving average of the last `period` values.
pub fn sma(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.len() < period {
        return None;
    }
    mean(&values[values.len() - period..])
}

/// Trailing mean at every index, inclusive of the current value.
///
/// The first `period - 1` positions are `None`. Each window is summed
/// directly so long series do not accumulate floating-point drift.
pub fn rolling_mean(values: &[f64], period: usize) -> Vec<Option<f64>> {
    if period == 0 {
        return vec![None; values.len()];
    }
    (0..values.len())
        .map(|i| {
            if i + 1 < period {
                None
            } else {
                mean(&values[i + 1 - period..=i])
            }
        })
        .collect()
}

/// Close-to-close change at every index; index 0 has no predecessor.
pub fn deltas(values: &[f64]) -> Vec<Option<f64>> {
    let mut out = Vec::with_capacity(values.len());
    out.push(None);
    out.extend(values.windows(2).map(|w| Some(w[1] - w[0])));
    out.truncate(values.len());
    out
}

/// Percentage change from `base` to `value`.
pub fn pct_change(value: f64, base: f64) -> f64 {
    (value / base - 1.0) * 100.0
}

