//! Gapscreen API Server
//!
//! HTTP API serving the screener, health check and metrics endpoints.
//! Holds no state between requests and can be horizontally scaled.

use dotenvy::dotenv;
use gapscreen::config::AppConfig;
use gapscreen::core::http::start_server;
use gapscreen::logging;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env if present
    dotenv().ok();

    let config = AppConfig::from_env()?;
    logging::init_logging(&config);

    info!("Starting Gapscreen API Server");
    info!(environment = %config.environment, "Environment");
    info!(port = config.port, "HTTP Server: http://0.0.0.0:{}", config.port);
    info!(
        benchmark = %config.benchmark_symbol,
        market_data_url = %config.market_data_url,
        timeout_secs = config.fetch_timeout.as_secs(),
        "Market data source"
    );

    let server_handle = tokio::spawn(async move {
        if let Err(e) = start_server(config).await {
            error!(error = %e, "HTTP server error");
        }
    });

    info!("API server started, waiting for shutdown signal...");
    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Shutting down API server...");
            info!("API server stopped");
        }
        _ = server_handle => {
            error!("HTTP server stopped");
        }
    }

    Ok(())
}
