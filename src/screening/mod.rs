//! Hard-filter screening, benchmark status and ranking.

pub mod benchmark;
pub mod engine;
pub mod filters;
pub mod ranker;

pub use benchmark::benchmark_status;
pub use engine::{screen_ticker, validate_series, ScreenReport, ScreeningEngine, TickerOutcome};
pub use filters::{evaluate_filters, FilterOutcome};
pub use ranker::rank;
