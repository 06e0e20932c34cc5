//! Market data access and normalization

pub mod bar_store;
pub mod market_data;
pub mod yahoo;

pub use bar_store::{normalize, NormalizedBars};
pub use market_data::{
    MarketDataError, MarketDataProvider, RawBarRow, RawBarTable, StaticMarketDataProvider,
};
pub use yahoo::{YahooChartClient, YahooChartProvider};
