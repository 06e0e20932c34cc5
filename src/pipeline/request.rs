//! Inputs and outputs of a screening run.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::models::chart::ChartSeries;
use crate::models::indicators::IndicatorConfig;
use crate::models::screening::{BenchmarkStatus, Period, ScreeningCriteria, ScreeningResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenRequest {
    pub tickers: Vec<String>,
    #[serde(default)]
    pub period: Period,
    #[serde(default)]
    pub criteria: ScreeningCriteria,
    #[serde(default)]
    pub indicators: IndicatorConfig,
}

impl ScreenRequest {
    pub fn new(tickers: Vec<String>) -> Self {
        Self {
            tickers,
            period: Period::default(),
            criteria: ScreeningCriteria::default(),
            indicators: IndicatorConfig::default(),
        }
    }

    pub fn with_period(mut self, period: Period) -> Self {
        self.period = period;
        self
    }

    pub fn with_criteria(mut self, criteria: ScreeningCriteria) -> Self {
        self.criteria = criteria;
        self
    }

    pub fn with_indicators(mut self, indicators: IndicatorConfig) -> Self {
        self.indicators = indicators;
        self
    }
}

/// Counts explaining how the ticker universe shrank to the ranked list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenDiagnostics {
    pub requested: usize,
    pub with_data: usize,
    pub filtered: usize,
    pub faults: usize,
    pub undefined_return: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenOutcome {
    /// Descending by trailing return.
    pub results: Vec<ScreeningResult>,
    /// Chart input for every ranked ticker, in ranked order.
    pub charts: IndexMap<String, ChartSeries>,
    pub benchmark: BenchmarkStatus,
    pub diagnostics: ScreenDiagnostics,
}

/// Split free-form ticker input on commas and whitespace.
///
/// Symbols are trimmed and uppercased; blanks and repeats are dropped, first
/// occurrence wins.
pub fn parse_ticker_list(input: &str) -> Vec<String> {
    clean_tickers(input.split(|c: char| c == ',' || c.is_whitespace()))
}

/// Trim, uppercase and de-duplicate an already split ticker list.
pub fn clean_tickers<I, S>(tickers: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = Vec::new();
    for ticker in tickers {
        let ticker = ticker.as_ref().trim().to_uppercase();
        if !ticker.is_empty() && !seen.contains(&ticker) {
            seen.push(ticker);
        }
    }
    seen
}
