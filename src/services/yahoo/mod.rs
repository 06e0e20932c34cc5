//! Yahoo Finance chart API integration

mod client;
mod provider;
mod response;

pub use client::YahooChartClient;
pub use provider::{YahooChartProvider, DEFAULT_MAX_CONCURRENT_REQUESTS};
