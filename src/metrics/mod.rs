//! Prometheus metrics for the HTTP layer and screening runs

use prometheus::{
    Counter, Encoder, Gauge, Histogram, HistogramOpts, IntCounterVec, Opts, Registry, TextEncoder,
};

pub struct Metrics {
    registry: Registry,
    pub http_requests_total: Counter,
    pub http_request_duration_seconds: Histogram,
    pub http_requests_in_flight: Gauge,
    pub screen_runs_total: Counter,
    pub screen_failures_total: IntCounterVec,
    pub screen_ticker_faults_total: Counter,
    pub screen_duration_seconds: Histogram,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let http_requests_total =
            Counter::with_opts(Opts::new("http_requests_total", "Total HTTP requests"))?;
        let http_request_duration_seconds = Histogram::with_opts(HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request duration in seconds",
        ))?;
        let http_requests_in_flight = Gauge::with_opts(Opts::new(
            "http_requests_in_flight",
            "HTTP requests currently being served",
        ))?;
        let screen_runs_total =
            Counter::with_opts(Opts::new("screen_runs_total", "Screening runs started"))?;
        let screen_failures_total = IntCounterVec::new(
            Opts::new("screen_failures_total", "Screening runs that ended in an error"),
            &["kind"],
        )?;
        let screen_ticker_faults_total = Counter::with_opts(Opts::new(
            "screen_ticker_faults_total",
            "Tickers skipped because their data was malformed",
        ))?;
        let screen_duration_seconds = Histogram::with_opts(
            HistogramOpts::new(
                "screen_duration_seconds",
                "End-to-end screening run duration in seconds",
            )
            .buckets(vec![0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        )?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(http_requests_in_flight.clone()))?;
        registry.register(Box::new(screen_runs_total.clone()))?;
        registry.register(Box::new(screen_failures_total.clone()))?;
        registry.register(Box::new(screen_ticker_faults_total.clone()))?;
        registry.register(Box::new(screen_duration_seconds.clone()))?;

        Ok(Self {
            registry,
            http_requests_total,
            http_request_duration_seconds,
            http_requests_in_flight,
            screen_runs_total,
            screen_failures_total,
            screen_ticker_faults_total,
            screen_duration_seconds,
        })
    }

    /// Render all metrics in the Prometheus text exposition format.
    pub fn export(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
