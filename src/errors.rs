//! Error types crossing the pipeline boundary.

use thiserror::Error;

use crate::services::market_data::MarketDataError;

/// Run-level failure returned by [`crate::pipeline::ScreenPipeline::run_screen`].
///
/// Every variant is user-facing; none of them indicates a crash.
#[derive(Debug, Error)]
pub enum ScreenError {
    /// Empty ticker list or out-of-range parameters. Fix the request and resubmit.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The market-data collaborator returned nothing or timed out. Retryable.
    #[error("market data unavailable: {0}")]
    DataUnavailable(String),

    /// Data was available but no ticker passed every filter.
    #[error("no tickers passed the screening criteria")]
    NoResults,
}

impl ScreenError {
    /// Short stable label used for metrics and API payloads.
    pub fn kind(&self) -> &'static str {
        match self {
            ScreenError::InvalidInput(_) => "invalid_input",
            ScreenError::DataUnavailable(_) => "data_unavailable",
            ScreenError::NoResults => "no_results",
        }
    }

    /// Message suitable for showing to the person who submitted the screen.
    pub fn user_message(&self) -> String {
        match self {
            ScreenError::InvalidInput(reason) => reason.clone(),
            ScreenError::DataUnavailable(_) => {
                "Market data could not be loaded. Check the ticker list and try again.".to_string()
            }
            ScreenError::NoResults => {
                "No stocks passed the screening criteria you specified.".to_string()
            }
        }
    }
}

impl From<MarketDataError> for ScreenError {
    fn from(err: MarketDataError) -> Self {
        ScreenError::DataUnavailable(err.to_string())
    }
}

/// Problem with one ticker's data. Recovered locally by skipping the ticker.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TickerFault {
    #[error("series is empty")]
    EmptySeries,

    #[error("bar {index} has a non-positive or non-finite price")]
    InvalidPrice { index: usize },

    #[error("bar {index} is not strictly after the previous bar")]
    UnorderedDates { index: usize },
}
