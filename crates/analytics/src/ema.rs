use crate::error::AnalyticsError;

/// Exponential moving average with a growing-window warm-up.
///
/// For indices below `period - 1` the value is the plain mean of every price seen so
/// far. From `period - 1` onwards the usual recursion applies with multiplier
/// `2 / (period + 1)`. The output always has the same length as the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExponentialMovingAverage {
    pub(crate) period: usize,
}

impl ExponentialMovingAverage {
    pub fn new(period: usize) -> Result<Self, AnalyticsError> {
        if period == 0 {
            return Err(AnalyticsError::InvalidParameters(
                "EMA period must be at least 1".to_string(),
            ));
        }
        Ok(Self { period })
    }

    pub fn period(&self) -> usize {
        self.period
    }

    pub fn multiplier(&self) -> f64 {
        2.0 / (self.period as f64 + 1.0)
    }

    pub fn compute(&self, prices: &[f64]) -> Vec<f64> {
        let multiplier = self.multiplier();
        let mut ema = Vec::with_capacity(prices.len());
        let mut running_sum = 0.0;

        for (i, &price) in prices.iter().enumerate() {
            let value = if i + 1 < self.period {
                running_sum += price;
                running_sum / (i + 1) as f64
            } else {
                // Only period 1 reaches here at i == 0; seeding with the price keeps it a pass-through.
                let previous = ema.last().copied().unwrap_or(price);
                (price - previous) * multiplier + previous
            };
            ema.push(value);
        }

        ema
    }
}
