use crate::ema::ExponentialMovingAverage;
use crate::error::AnalyticsError;
use core_types::{PriceSeries, Signal, SignalKind};

/// Detects crossovers between a fast and a slow EMA of the closing prices.
#[derive(Debug, Clone, Copy)]
pub struct SignalGenerator {
    short: ExponentialMovingAverage,
    long: ExponentialMovingAverage,
}

impl SignalGenerator {
    pub const DEFAULT_SHORT_PERIOD: usize = 10;
    pub const DEFAULT_LONG_PERIOD: usize = 20;

    /// Creates a generator. Both periods must be at least 1; their relative order is
    /// not checked, so `short_period >= long_period` runs the same crossover rule.
    pub fn new(short_period: usize, long_period: usize) -> Result<Self, AnalyticsError> {
        Ok(Self {
            short: ExponentialMovingAverage::new(short_period)?,
            long: ExponentialMovingAverage::new(long_period)?,
        })
    }

    /// Emits a BUY where the fast EMA moves strictly above the slow EMA and a SELL
    /// where it moves strictly below. Points whose close does not parse are skipped.
    pub fn generate(&self, series: &PriceSeries) -> Vec<Signal> {
        let (points, closes): (Vec<_>, Vec<f64>) = series.priced_points().unzip();

        let short = self.short.compute(&closes);
        let long = self.long.compute(&closes);
        tracing::debug!(
            symbol = series.symbol(),
            bars = closes.len(),
            short_period = self.short.period(),
            long_period = self.long.period(),
            "Computed EMAs for crossover detection"
        );

        (1..closes.len())
            .filter_map(|i| {
                crossover(short[i - 1], long[i - 1], short[i], long[i]).map(|kind| Signal {
                    timestamp: points[i].timestamp.clone(),
                    kind,
                })
            })
            .collect()
    }
}

impl Default for SignalGenerator {
    fn default() -> Self {
        Self {
            short: ExponentialMovingAverage {
                period: Self::DEFAULT_SHORT_PERIOD,
            },
            long: ExponentialMovingAverage {
                period: Self::DEFAULT_LONG_PERIOD,
            },
        }
    }
}

fn crossover(prev_short: f64, prev_long: f64, short: f64, long: f64) -> Option<SignalKind> {
    if short > long && prev_short <= prev_long {
        Some(SignalKind::Buy)
    } else if short < long && prev_short >= prev_long {
        Some(SignalKind::Sell)
    } else {
        None
    }
}
