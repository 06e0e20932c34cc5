//! Yahoo Finance market data provider implementation

use async_trait::async_trait;
use futures_util::stream::{self, StreamExt};
use indexmap::IndexMap;
use tracing::{debug, warn};

use super::client::YahooChartClient;
use crate::models::screening::Period;
use crate::services::market_data::{MarketDataError, MarketDataProvider, RawBarTable};

/// Chart requests allowed in flight at once for a single fetch.
pub const DEFAULT_MAX_CONCURRENT_REQUESTS: usize = 8;

/// Batches one chart request per symbol and always answers with a keyed table.
pub struct YahooChartProvider {
    client: YahooChartClient,
    max_concurrent: usize,
}

impl YahooChartProvider {
    pub fn new(base_url: &str) -> Result<Self, MarketDataError> {
        Ok(Self::with_client(YahooChartClient::new(base_url)?))
    }

    pub fn with_client(client: YahooChartClient) -> Self {
        Self {
            client,
            max_concurrent: DEFAULT_MAX_CONCURRENT_REQUESTS,
        }
    }

    /// Cap on in-flight chart requests; zero is treated as one.
    pub fn with_concurrency(mut self, max_concurrent: usize) -> Self {
        self.max_concurrent = max_concurrent.max(1);
        self
    }
}

#[async_trait]
impl MarketDataProvider for YahooChartProvider {
    async fn fetch(&self, symbols: &[String], period: Period) -> Result<RawBarTable, MarketDataError> {
        // `buffered` yields in submission order, so responses line up with `symbols`.
        let requests: Vec<_> = symbols
            .iter()
            .map(|symbol| self.client.get_daily_bars(symbol, period))
            .collect();
        let responses: Vec<_> = stream::iter(requests)
            .buffered(self.max_concurrent)
            .collect()
            .await;

        let mut columns = IndexMap::new();
        let mut last_error = None;

        for (symbol, response) in symbols.iter().zip(responses) {
            match response {
                Ok(Some(rows)) => {
                    debug!(symbol = %symbol, rows = rows.len(), "YahooChartProvider: received {} rows for {}", rows.len(), symbol);
                    columns.insert(symbol.clone(), rows);
                }
                Ok(None) => {
                    debug!(symbol = %symbol, "YahooChartProvider: no data for {}", symbol);
                }
                Err(e) => {
                    warn!(symbol = %symbol, error = %e, "YahooChartProvider: request failed for {}", symbol);
                    last_error = Some(e);
                }
            }
        }

        // Surface the transport error when it cost us every symbol.
        if columns.is_empty() {
            if let Some(e) = last_error {
                return Err(e);
            }
        }

        Ok(RawBarTable::Keyed(columns))
    }
}
