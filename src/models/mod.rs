//! Shared data models spanning the pipeline stages.

pub mod bar;
pub mod chart;
pub mod indicators;
pub mod screening;

pub use bar::{Bar, Series};
pub use chart::ChartSeries;
pub use indicators::{AugmentedSeries, IndicatorConfig, IndicatorSet, LatestIndicators};
pub use screening::{BenchmarkStatus, Period, ResultRow, ScreeningCriteria, ScreeningResult};
