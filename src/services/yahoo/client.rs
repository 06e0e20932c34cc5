//! HTTP client for the Yahoo Finance v8 chart endpoint.

use chrono::DateTime;
use reqwest::StatusCode;
use url::Url;

use super::response::{ChartData, ChartResponse};
use crate::models::screening::Period;
use crate::services::market_data::{MarketDataError, RawBarRow};

pub struct YahooChartClient {
    base_url: Url,
    client: reqwest::Client,
}

impl YahooChartClient {
    pub fn new(base_url: &str) -> Result<Self, MarketDataError> {
        Self::with_client(base_url, reqwest::Client::new())
    }

    /// Use a caller-supplied `reqwest::Client` (tests point this at a mock server).
    pub fn with_client(base_url: &str, client: reqwest::Client) -> Result<Self, MarketDataError> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(url::ParseError::RelativeUrlWithCannotBeABaseBase.into());
        }
        Ok(Self { base_url, client })
    }

    pub(crate) fn chart_url(&self, symbol: &str, period: Period) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(symbol);
        }
        url.query_pairs_mut()
            .append_pair("range", period.as_str())
            .append_pair("interval", "1d");
        url
    }

    /// Daily rows for `symbol`, or `None` when the provider does not know it.
    pub async fn get_daily_bars(
        &self,
        symbol: &str,
        period: Period,
    ) -> Result<Option<Vec<RawBarRow>>, MarketDataError> {
        let response = self
            .client
            .get(self.chart_url(symbol, period))
            .header("User-Agent", "Mozilla/5.0")
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(MarketDataError::Api {
                symbol: symbol.to_string(),
                message: format!("HTTP {}", response.status()),
            });
        }

        let body: ChartResponse = response.json().await?;

        if let Some(error) = body.chart.error {
            if error.code.eq_ignore_ascii_case("Not Found") {
                return Ok(None);
            }
            return Err(MarketDataError::Api {
                symbol: symbol.to_string(),
                message: format!("{} - {}", error.code, error.description),
            });
        }

        let data = body
            .chart
            .result
            .and_then(|results| results.into_iter().next());

        Ok(data.map(chart_rows))
    }
}

fn chart_rows(data: ChartData) -> Vec<RawBarRow> {
    let quote = data.indicators.quote.into_iter().next().unwrap_or_default();
    let offset = data.meta.gmtoffset;

    data.timestamp
        .iter()
        .enumerate()
        .filter_map(|(i, &ts)| {
            let date = DateTime::from_timestamp(ts + offset, 0)?.date_naive();
            Some(RawBarRow {
                date,
                open: quote.open.get(i).copied().flatten(),
                high: quote.high.get(i).copied().flatten(),
                low: quote.low.get(i).copied().flatten(),
                close: quote.close.get(i).copied().flatten(),
                volume: quote.volume.get(i).copied().flatten(),
            })
        })
        .collect()
}
