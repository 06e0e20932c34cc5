//! One-shot screen from the command line.
//!
//! Usage: `screen [OPTIONS] [TICKER]...`; see `screen --help`. Market data
//! source and benchmark come from the environment, as for the API server.

use std::sync::Arc;

use clap::Parser;
use dotenvy::dotenv;
use gapscreen::cli::ScreenArgs;
use gapscreen::config::AppConfig;
use gapscreen::logging;
use gapscreen::pipeline::ScreenPipeline;
use gapscreen::services::yahoo::YahooChartProvider;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = ScreenArgs::parse();
    dotenv().ok();

    let config = AppConfig::from_env()?;
    logging::init_logging(&config);

    let request = args.into_request();
    let provider = Arc::new(YahooChartProvider::new(&config.market_data_url)?);
    let pipeline = ScreenPipeline::from_config(&config, provider);

    let outcome = match pipeline.run_screen(request).await {
        Ok(outcome) => outcome,
        Err(e) => {
            error!(kind = e.kind(), "{}", e.user_message());
            std::process::exit(1);
        }
    };

    info!(
        benchmark = %outcome.benchmark.symbol,
        "Benchmark: {}",
        outcome.benchmark.label()
    );
    for (rank, result) in outcome.results.iter().enumerate() {
        let row = result.display();
        info!(
            rank = rank + 1,
            symbol = %row.symbol,
            trailing_return = %row.trailing_return,
            last_price = %row.last_price,
            open_ratio = %row.open_ratio,
            volume = %row.volume_today,
            rsi = %row.rsi,
            "Ranked"
        );
    }
    info!(
        requested = outcome.diagnostics.requested,
        with_data = outcome.diagnostics.with_data,
        filtered = outcome.diagnostics.filtered,
        faults = outcome.diagnostics.faults,
        "Screen complete: {} tickers passed",
        outcome.results.len()
    );

    Ok(())
}
