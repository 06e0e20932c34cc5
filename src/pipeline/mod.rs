//! Screening pipeline: fetch, normalize, screen, rank.

pub mod request;

pub use request::{clean_tickers, parse_ticker_list, ScreenDiagnostics, ScreenOutcome, ScreenRequest};

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::config::{AppConfig, DEFAULT_BENCHMARK_SYMBOL, DEFAULT_FETCH_TIMEOUT_SECONDS};
use crate::errors::ScreenError;
use crate::metrics::Metrics;
use crate::models::chart::ChartSeries;
use crate::screening::{rank, ScreeningEngine};
use crate::services::bar_store::normalize;
use crate::services::market_data::MarketDataProvider;

/// Wires the market data provider, screening engine and ranker together.
///
/// Holds no per-run state; concurrent runs share nothing but the provider.
pub struct ScreenPipeline {
    provider: Arc<dyn MarketDataProvider>,
    engine: Arc<ScreeningEngine>,
    benchmark_symbol: String,
    fetch_timeout: Duration,
    metrics: Option<Arc<Metrics>>,
}

impl ScreenPipeline {
    pub fn new(provider: Arc<dyn MarketDataProvider>) -> Self {
        Self {
            provider,
            engine: Arc::new(ScreeningEngine::new()),
            benchmark_symbol: DEFAULT_BENCHMARK_SYMBOL.to_string(),
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECONDS),
            metrics: None,
        }
    }

    pub fn from_config(config: &AppConfig, provider: Arc<dyn MarketDataProvider>) -> Self {
        Self::new(provider)
            .with_benchmark_symbol(config.benchmark_symbol.clone())
            .with_fetch_timeout(config.fetch_timeout)
            .with_workers(config.screen_workers)
    }

    pub fn with_benchmark_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.benchmark_symbol = symbol.into();
        self
    }

    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.engine = Arc::new(ScreeningEngine::with_workers(workers));
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn benchmark_symbol(&self) -> &str {
        &self.benchmark_symbol
    }

    /// Run one screen end to end.
    pub async fn run_screen(&self, request: ScreenRequest) -> Result<ScreenOutcome, ScreenError> {
        let start = Instant::now();
        if let Some(ref metrics) = self.metrics {
            metrics.screen_runs_total.inc();
        }

        let outcome = self.run(request).await;

        if let Some(ref metrics) = self.metrics {
            metrics
                .screen_duration_seconds
                .observe(start.elapsed().as_secs_f64());
            match &outcome {
                Ok(o) => metrics
                    .screen_ticker_faults_total
                    .inc_by(o.diagnostics.faults as f64),
                Err(e) => metrics
                    .screen_failures_total
                    .with_label_values(&[e.kind()])
                    .inc(),
            }
        }

        if let Err(ref e) = outcome {
            warn!(kind = e.kind(), error = %e, "ScreenPipeline: run failed");
        }

        outcome
    }

    async fn run(&self, request: ScreenRequest) -> Result<ScreenOutcome, ScreenError> {
        let tickers = clean_tickers(&request.tickers);
        if tickers.is_empty() {
            return Err(ScreenError::InvalidInput(
                "Enter at least one ticker symbol (for example BBCA.JK) to screen.".to_string(),
            ));
        }
        request.criteria.validate()?;
        request.indicators.validate()?;

        let mut fetch_symbols = tickers.clone();
        if !fetch_symbols.contains(&self.benchmark_symbol) {
            fetch_symbols.push(self.benchmark_symbol.clone());
        }

        info!(
            tickers = tickers.len(),
            period = %request.period,
            "ScreenPipeline: fetching {} symbols",
            fetch_symbols.len()
        );

        let raw = tokio::time::timeout(
            self.fetch_timeout,
            self.provider.fetch(&fetch_symbols, request.period),
        )
        .await
        .map_err(|_| {
            ScreenError::DataUnavailable(format!(
                "market data request timed out after {}s",
                self.fetch_timeout.as_secs_f64()
            ))
        })??;

        let normalized = normalize(raw, &tickers, &self.benchmark_symbol)?;
        let with_data = normalized.tickers.len();

        let engine = self.engine.clone();
        let benchmark_symbol = self.benchmark_symbol.clone();
        let (criteria, indicators) = (request.criteria, request.indicators);
        let report = tokio::task::spawn_blocking(move || {
            engine.screen(
                normalized.tickers,
                normalized.benchmark.as_ref(),
                &benchmark_symbol,
                &criteria,
                &indicators,
            )
        })
        .await
        .map_err(|e| match e.try_into_panic() {
            Ok(panic) => std::panic::resume_unwind(panic),
            Err(_) => ScreenError::DataUnavailable("screening task was cancelled".to_string()),
        })?;

        let passed = report.results.len();
        let results = rank(report.results);
        let mut charts_by_symbol = report.charts;

        let diagnostics = ScreenDiagnostics {
            requested: tickers.len(),
            with_data,
            filtered: report.filtered,
            faults: report.faults,
            undefined_return: passed - results.len(),
        };

        info!(
            requested = diagnostics.requested,
            with_data = diagnostics.with_data,
            ranked = results.len(),
            faults = diagnostics.faults,
            benchmark = %report.benchmark.label(),
            "ScreenPipeline: {} tickers ranked",
            results.len()
        );

        if results.is_empty() {
            return Err(ScreenError::NoResults);
        }

        let charts = results
            .iter()
            .filter_map(|r| {
                charts_by_symbol
                    .shift_remove(&r.symbol)
                    .map(|chart| (r.symbol.clone(), ChartSeries::from(chart)))
            })
            .collect();

        Ok(ScreenOutcome {
            results,
            charts,
            benchmark: report.benchmark,
            diagnostics,
        })
    }
}
