//! HTTP endpoint server using Axum

use axum::{
    extract::{rejection::JsonRejection, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{Json, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{info, Level};

use crate::config::{AppConfig, DEFAULT_IDX_TICKERS};
use crate::errors::ScreenError;
use crate::metrics::Metrics;
use crate::models::indicators::IndicatorConfig;
use crate::models::screening::{Period, ScreeningCriteria};
use crate::pipeline::{parse_ticker_list, ScreenOutcome, ScreenPipeline, ScreenRequest};
use crate::services::yahoo::YahooChartProvider;

#[derive(Clone)]
pub struct AppState {
    pub health: Arc<RwLock<HealthStatus>>,
    pub metrics: Arc<Metrics>,
    pub start_time: Arc<Instant>,
    pub pipeline: Arc<ScreenPipeline>,
}

#[derive(Clone, Debug)]
pub struct HealthStatus {
    pub status: String,
}

impl Default for HealthStatus {
    fn default() -> Self {
        Self {
            status: "healthy".to_string(),
        }
    }
}

pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    let health = state.health.read().await;
    let uptime_seconds = state.start_time.elapsed().as_secs();
    Ok(Json(json!({
        "status": health.status,
        "uptime_seconds": uptime_seconds,
        "service": "gapscreen"
    })))
}

pub async fn metrics_handler(State(state): State<AppState>) -> Result<String, StatusCode> {
    state
        .metrics
        .export()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Middleware to track HTTP request metrics
async fn metrics_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    state.metrics.http_requests_in_flight.inc();

    let response = next.run(request).await;
    let status = response.status();
    let duration = start.elapsed();

    state.metrics.http_requests_in_flight.dec();

    state.metrics.http_requests_total.inc();
    state
        .metrics
        .http_request_duration_seconds
        .observe(duration.as_secs_f64());

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            path = %path,
            status = %status,
            duration_ms = duration.as_millis(),
            "HTTP request error"
        );
    }

    response
}

/// Tickers arrive either as a JSON list or as the free text of a form field.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TickerInput {
    List(Vec<String>),
    Text(String),
}

#[derive(Debug, Deserialize)]
struct ScreenBody {
    tickers: TickerInput,
    period: Option<String>,
    criteria: Option<ScreeningCriteria>,
    indicators: Option<IndicatorConfig>,
}

impl ScreenBody {
    fn into_request(self) -> Result<ScreenRequest, ScreenError> {
        let tickers = match self.tickers {
            TickerInput::List(list) => list,
            TickerInput::Text(text) => parse_ticker_list(&text),
        };
        let period = match self.period {
            Some(raw) => Period::from_str(&raw)?,
            None => Period::default(),
        };

        Ok(ScreenRequest::new(tickers)
            .with_period(period)
            .with_criteria(self.criteria.unwrap_or_default())
            .with_indicators(self.indicators.unwrap_or_default()))
    }
}

fn error_status(error: &ScreenError) -> StatusCode {
    match error {
        ScreenError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        ScreenError::DataUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        ScreenError::NoResults => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

fn error_body(error: &ScreenError) -> (StatusCode, Json<Value>) {
    (
        error_status(error),
        Json(json!({
            "error": error.kind(),
            "message": error.user_message(),
        })),
    )
}

fn outcome_body(outcome: ScreenOutcome) -> Value {
    let rows: Vec<_> = outcome.results.iter().map(|r| r.display()).collect();
    json!({
        "benchmark": {
            "symbol": outcome.benchmark.symbol,
            "latest_close": outcome.benchmark.latest_close,
            "change_pct": outcome.benchmark.change_pct,
            "label": outcome.benchmark.label(),
        },
        "results": outcome.results,
        "rows": rows,
        "charts": outcome.charts,
        "diagnostics": outcome.diagnostics,
    })
}

/// Run the screener for the submitted universe and criteria
async fn run_screen(
    State(state): State<AppState>,
    body: Result<Json<ScreenBody>, JsonRejection>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let Json(body) = body.map_err(|rejection| {
        error_body(&ScreenError::InvalidInput(format!(
            "Request body could not be read: {}",
            rejection.body_text()
        )))
    })?;
    let request = body.into_request().map_err(|e| error_body(&e))?;
    let outcome = state
        .pipeline
        .run_screen(request)
        .await
        .map_err(|e| error_body(&e))?;
    Ok(Json(outcome_body(outcome)))
}

/// Default form values
async fn screen_defaults(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "tickers": DEFAULT_IDX_TICKERS,
        "benchmark": state.pipeline.benchmark_symbol(),
        "period": Period::default(),
        "criteria": ScreeningCriteria::default(),
        "indicators": IndicatorConfig::default(),
    }))
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route("/api/defaults", get(screen_defaults))
        .route("/api/screen", post(run_screen))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                        .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
                )
                .layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    metrics_middleware,
                ))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn start_server(config: AppConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let metrics = Arc::new(Metrics::new()?);
    let provider = Arc::new(YahooChartProvider::new(&config.market_data_url)?);
    let pipeline = ScreenPipeline::from_config(&config, provider).with_metrics(metrics.clone());

    let state = AppState {
        health: Arc::new(RwLock::new(HealthStatus::default())),
        metrics,
        start_time: Arc::new(Instant::now()),
        pipeline: Arc::new(pipeline),
    };
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;

    info!(port = config.port, "HTTP server listening on port {}", config.port);
    info!(
        "Metrics endpoint available at http://0.0.0.0:{}/metrics",
        config.port
    );
    axum::serve(listener, app).await?;

    Ok(())
}
