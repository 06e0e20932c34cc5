//! Per-ticker screening loop.

use indexmap::IndexMap;
use rayon::prelude::*;
use rayon::ThreadPool;
use tracing::{debug, warn};

use crate::errors::TickerFault;
use crate::indicators::compute_indicators;
use crate::models::bar::Series;
use crate::models::indicators::{AugmentedSeries, IndicatorConfig};
use crate::models::screening::{BenchmarkStatus, ScreeningCriteria, ScreeningResult};
use crate::screening::benchmark::benchmark_status;
use crate::screening::filters::{evaluate_filters, FilterOutcome};

/// What happened to one ticker during a screening run.
#[derive(Debug, Clone)]
pub enum TickerOutcome {
    Passed {
        result: ScreeningResult,
        chart: AugmentedSeries,
    },
    Filtered {
        symbol: String,
        filters: FilterOutcome,
    },
    Fault {
        symbol: String,
        fault: TickerFault,
    },
}

/// Unsorted output of a screening run.
#[derive(Debug, Clone)]
pub struct ScreenReport {
    /// Passing tickers in screening (request) order.
    pub results: Vec<ScreeningResult>,
    pub charts: IndexMap<String, AugmentedSeries>,
    pub benchmark: BenchmarkStatus,
    pub screened: usize,
    pub filtered: usize,
    pub faults: usize,
}

/// Runs per-ticker screening, optionally on a bounded worker pool.
pub struct ScreeningEngine {
    pool: Option<ThreadPool>,
}

impl ScreeningEngine {
    /// Sequential engine.
    pub fn new() -> Self {
        Self { pool: None }
    }

    /// Engine backed by `workers` threads; falls back to sequential if the pool cannot start.
    pub fn with_workers(workers: usize) -> Self {
        if workers <= 1 {
            return Self::new();
        }
        match rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("screen-worker-{}", i))
            .build()
        {
            Ok(pool) => Self { pool: Some(pool) },
            Err(e) => {
                warn!(error = %e, workers = workers, "ScreeningEngine: worker pool unavailable, screening sequentially");
                Self::new()
            }
        }
    }

    pub fn screen(
        &self,
        tickers: IndexMap<String, Series>,
        benchmark: Option<&Series>,
        benchmark_symbol: &str,
        criteria: &ScreeningCriteria,
        config: &IndicatorConfig,
    ) -> ScreenReport {
        let entries: Vec<Series> = tickers.into_values().collect();
        let screened = entries.len();

        let outcomes: Vec<TickerOutcome> = match &self.pool {
            Some(pool) => pool.install(|| {
                entries
                    .into_par_iter()
                    .map(|series| screen_ticker(series, criteria, config))
                    .collect()
            }),
            None => entries
                .into_iter()
                .map(|series| screen_ticker(series, criteria, config))
                .collect(),
        };

        let mut report = ScreenReport {
            results: Vec::new(),
            charts: IndexMap::new(),
            benchmark: benchmark_status(benchmark, benchmark_symbol),
            screened,
            filtered: 0,
            faults: 0,
        };

        for outcome in outcomes {
            match outcome {
                TickerOutcome::Passed { result, chart } => {
                    report.charts.insert(result.symbol.clone(), chart);
                    report.results.push(result);
                }
                TickerOutcome::Filtered { .. } => report.filtered += 1,
                TickerOutcome::Fault { .. } => report.faults += 1,
            }
        }

        debug!(
            screened = report.screened,
            passed = report.results.len(),
            filtered = report.filtered,
            faults = report.faults,
            "ScreeningEngine: {} of {} tickers passed",
            report.results.len(),
            report.screened
        );

        report
    }
}

impl Default for ScreeningEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Screen one ticker. Never panics on malformed data; faults come back as an outcome.
pub fn screen_ticker(
    series: Series,
    criteria: &ScreeningCriteria,
    config: &IndicatorConfig,
) -> TickerOutcome {
    let symbol = series.symbol.clone();

    if let Err(fault) = validate_series(&series) {
        warn!(symbol = %symbol, error = %fault, "Screening: skipping {}: {}", symbol, fault);
        return TickerOutcome::Fault { symbol, fault };
    }

    let augmented = compute_indicators(series, config);
    let (latest, previous) = match (augmented.series.latest(), augmented.series.previous()) {
        (Some(latest), Some(previous)) => (*latest, *previous),
        _ => {
            return TickerOutcome::Fault {
                symbol,
                fault: TickerFault::EmptySeries,
            }
        }
    };

    let filters = evaluate_filters(&latest, &previous, criteria);
    if !filters.passed() {
        debug!(symbol = %symbol, filters = ?filters, "Screening: {} filtered out", symbol);
        return TickerOutcome::Filtered { symbol, filters };
    }

    let latest_indicators = augmented.indicators.latest();
    let result = ScreeningResult {
        symbol,
        close: latest.close,
        trailing_return_pct: latest_indicators.trailing_return,
        open_ratio: latest.open / previous.close,
        open: latest.open,
        previous_close: previous.close,
        volume: latest.volume,
        avg_volume: latest_indicators.avg_volume,
        rsi: latest_indicators.rsi,
    };

    TickerOutcome::Passed {
        result,
        chart: augmented,
    }
}

/// Reject series the indicator maths cannot be trusted on.
pub fn validate_series(series: &Series) -> Result<(), TickerFault> {
    if series.is_empty() {
        return Err(TickerFault::EmptySeries);
    }
    for (index, bar) in series.bars.iter().enumerate() {
        if !bar.has_valid_prices() {
            return Err(TickerFault::InvalidPrice { index });
        }
        if index > 0 && bar.date <= series.bars[index - 1].date {
            return Err(TickerFault::UnorderedDates { index });
        }
    }
    Ok(())
}
