//! Command-line arguments for the one-shot `screen` binary.

use clap::Parser;

use crate::config::DEFAULT_IDX_TICKERS;
use crate::models::indicators::IndicatorConfig;
use crate::models::screening::{Period, ScreeningCriteria};
use crate::pipeline::{parse_ticker_list, ScreenRequest};

#[derive(Parser, Debug, Clone, PartialEq)]
#[command(
    name = "screen",
    version,
    about = "Screen tickers for opening gaps and rank them by trailing return"
)]
pub struct ScreenArgs {
    /// Ticker symbols, space or comma separated (e.g. BBCA.JK TLKM.JK).
    /// Screens the default IDX universe when omitted.
    #[arg(value_name = "TICKER")]
    pub tickers: Vec<String>,

    /// Lookback window to download: 3mo, 6mo or 1y
    #[arg(long, default_value = "6mo", value_parser = parse_period)]
    pub period: Period,

    /// Today's open must exceed this multiple of yesterday's close
    #[arg(long, default_value_t = 1.015)]
    pub min_open_ratio: f64,

    /// Minimum closing price
    #[arg(long, default_value_t = 50.0)]
    pub min_price: f64,

    /// Today's volume must exceed this many shares
    #[arg(long, default_value_t = 5_000_000)]
    pub min_volume: u64,

    #[arg(long, default_value_t = 20)]
    pub sma_short: u32,

    #[arg(long, default_value_t = 60)]
    pub sma_long: u32,

    #[arg(long, default_value_t = 14)]
    pub rsi_period: u32,

    #[arg(long, default_value_t = 20)]
    pub volume_avg_period: u32,

    /// Sessions used for the trailing return ranking
    #[arg(long, default_value_t = 30)]
    pub return_lookback: u32,
}

fn parse_period(raw: &str) -> Result<Period, String> {
    raw.parse::<Period>().map_err(|e| e.user_message())
}

impl ScreenArgs {
    pub fn into_request(self) -> ScreenRequest {
        let tickers = if self.tickers.is_empty() {
            DEFAULT_IDX_TICKERS.iter().map(|t| t.to_string()).collect()
        } else {
            parse_ticker_list(&self.tickers.join(" "))
        };

        ScreenRequest::new(tickers)
            .with_period(self.period)
            .with_criteria(ScreeningCriteria {
                min_open_ratio: self.min_open_ratio,
                min_price: self.min_price,
                min_volume_shares: self.min_volume,
            })
            .with_indicators(IndicatorConfig {
                sma_short: self.sma_short,
                sma_long: self.sma_long,
                rsi_period: self.rsi_period,
                volume_avg_period: self.volume_avg_period,
                return_lookback_days: self.return_lookback,
            })
    }
}
