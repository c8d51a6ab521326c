use crate::correlation::correlate;
use crate::error::AnalyticsError;
use crate::levels::{LevelSet, detect_levels};
use crate::report::{
    CorrelationReport, PerformanceMetrics, PriceExtremes, SeriesReport, SignalReport,
    VolatilityReport,
};
use crate::returns::simple_returns;
use crate::signals::SignalGenerator;
use crate::statistics::{average_return, population_std_dev, sample_std_dev, sharpe_ratio};
use configuration::AnalyticsParams;
use core_types::PriceSeries;

/// A stateless calculator exposing one method per analytic endpoint.
///
/// Parameters are validated once at construction; every analytic afterwards is an
/// infallible, pure transform of the series it is given.
#[derive(Debug, Clone)]
pub struct AnalyticsEngine {
    params: AnalyticsParams,
    signal_generator: SignalGenerator,
}

impl AnalyticsEngine {
    pub fn new(params: AnalyticsParams) -> Result<Self, AnalyticsError> {
        params.validate()?;
        let signal_generator = SignalGenerator::new(params.short_period, params.long_period)?;
        Ok(Self {
            params,
            signal_generator,
        })
    }

    /// Simple period returns of the closing prices under the configured policy.
    pub fn returns(&self, series: &PriceSeries) -> Vec<f64> {
        simple_returns(&series.closing_prices(), self.params.return_policy)
    }

    pub fn price_extremes(&self, series: &PriceSeries) -> PriceExtremes {
        series
            .closes()
            .into_iter()
            .fold(PriceExtremes::default(), |extremes, close| PriceExtremes {
                all_time_high: Some(extremes.all_time_high.map_or(close, |high| high.max(close))),
                all_time_low: Some(extremes.all_time_low.map_or(close, |low| low.min(close))),
            })
    }

    pub fn volatility(&self, series: &PriceSeries) -> VolatilityReport {
        let returns = self.returns(series);
        VolatilityReport {
            volatility: sample_std_dev(&returns),
        }
    }

    pub fn support_resistance(&self, series: &PriceSeries) -> LevelSet {
        detect_levels(series.points())
    }

    pub fn trading_signals(&self, series: &PriceSeries) -> SignalReport {
        let signals = self.signal_generator.generate(series);
        tracing::debug!(symbol = series.symbol(), count = signals.len(), "Trading signals generated");
        SignalReport { signals }
    }

    pub fn performance_metrics(&self, series: &PriceSeries) -> PerformanceMetrics {
        let returns = self.returns(series);
        let average_return = average_return(&returns);
        let standard_deviation = population_std_dev(&returns);
        PerformanceMetrics {
            average_return,
            standard_deviation,
            sharpe_ratio: sharpe_ratio(
                average_return,
                standard_deviation,
                self.params.risk_free_rate,
            ),
        }
    }

    pub fn correlation(
        &self,
        target: &PriceSeries,
        comparisons: &[(String, PriceSeries)],
    ) -> CorrelationReport {
        CorrelationReport {
            correlation_results: correlate(target, comparisons),
        }
    }

    /// Runs every single-series analytic.
    pub fn analyze(&self, series: &PriceSeries) -> SeriesReport {
        SeriesReport {
            symbol: series.symbol().to_string(),
            bars: series.len(),
            extremes: self.price_extremes(series),
            volatility: self.volatility(series),
            levels: self.support_resistance(series),
            signals: self.trading_signals(series),
            performance: self.performance_metrics(series),
        }
    }
}

impl Default for AnalyticsEngine {
    fn default() -> Self {
        Self {
            params: AnalyticsParams::default(),
            signal_generator: SignalGenerator::default(),
        }
    }
}
