use crate::correlation::CorrelationResults;
use crate::levels::LevelSet;
use core_types::Signal;
use serde::{Deserialize, Serialize};

/// Highest and lowest closing price. Both are `None` when no close parses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceExtremes {
    pub all_time_high: Option<f64>,
    pub all_time_low: Option<f64>,
}

/// Sample standard deviation of period returns.
///
/// `None` when fewer than two returns are available.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolatilityReport {
    pub volatility: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalReport {
    pub signals: Vec<Signal>,
}

/// Return statistics using the population standard deviation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceMetrics {
    pub average_return: f64,
    pub standard_deviation: f64,
    pub sharpe_ratio: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrelationReport {
    pub correlation_results: CorrelationResults,
}

/// Every single-series analytic for one instrument.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesReport {
    pub symbol: String,
    pub bars: usize,
    #[serde(flatten)]
    pub extremes: PriceExtremes,
    #[serde(flatten)]
    pub volatility: VolatilityReport,
    #[serde(flatten)]
    pub levels: LevelSet,
    #[serde(flatten)]
    pub signals: SignalReport,
    #[serde(flatten)]
    pub performance: PerformanceMetrics,
}
