//! Benchmark (index) daily change.

use tracing::warn;

use crate::common::math;
use crate::models::bar::Series;
use crate::models::screening::BenchmarkStatus;
use crate::screening::engine::validate_series;

/// Latest close and change vs the prior close; 0% when only one bar exists.
///
/// A series that fails the same checks as ticker data reports N/A.
pub fn benchmark_status(series: Option<&Series>, symbol: &str) -> BenchmarkStatus {
    let Some(series) = series else {
        return BenchmarkStatus::not_available(symbol);
    };
    if let Err(fault) = validate_series(series) {
        if !series.is_empty() {
            warn!(symbol, fault = %fault, "Benchmark: series rejected");
        }
        return BenchmarkStatus::not_available(symbol);
    }
    let (Some(latest), Some(previous)) = (series.latest(), series.previous()) else {
        return BenchmarkStatus::not_available(symbol);
    };

    BenchmarkStatus {
        symbol: symbol.to_string(),
        latest_close: Some(latest.close),
        change_pct: math::pct_change(latest.close, previous.close),
    }
}
