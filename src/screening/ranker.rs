//! Orders screening results by trailing return.

use crate::models::screening::ScreeningResult;

/// Sort descending by trailing return, dropping results without one.
///
/// The sort is stable, so equal returns keep their screening order.
pub fn rank(results: Vec<ScreeningResult>) -> Vec<ScreeningResult> {
    let mut ranked: Vec<(f64, ScreeningResult)> = results
        .into_iter()
        .filter_map(|r| match r.trailing_return_pct {
            Some(ret) if ret.is_finite() => Some((ret, r)),
            _ => None,
        })
        .collect();

    ranked.sort_by(|(a, _), (b, _)| b.total_cmp(a));
    ranked.into_iter().map(|(_, r)| r).collect()
}
