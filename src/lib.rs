//! gapscreen: daily-bar equity screener.
//!
//! Fetches historical bars for a ticker universe, derives indicators, applies
//! hard price/volume filters and ranks the survivors by trailing return.

pub mod cli;
pub mod common;
pub mod config;
pub mod core;
pub mod errors;
pub mod indicators;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod pipeline;
pub mod screening;
pub mod services;

pub use errors::{ScreenError, TickerFault};
pub use pipeline::{ScreenOutcome, ScreenPipeline, ScreenRequest};
