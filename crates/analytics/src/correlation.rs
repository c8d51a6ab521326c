use core_types::PriceSeries;
use rayon::prelude::*;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

/// Pearson coefficient of two series, or a marker for when it is undefined.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Correlation {
    /// A coefficient in `[-1, 1]`.
    Coefficient(f64),
    /// At least one series has zero variance (or there is no overlap), so the
    /// coefficient is undefined.
    Degenerate,
}

impl Correlation {
    pub const DEGENERATE_MARKER: &'static str = "DEGENERATE";

    pub fn coefficient(&self) -> Option<f64> {
        match self {
            Correlation::Coefficient(value) => Some(*value),
            Correlation::Degenerate => None,
        }
    }

    pub fn is_degenerate(&self) -> bool {
        matches!(self, Correlation::Degenerate)
    }
}

impl fmt::Display for Correlation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Correlation::Coefficient(value) => write!(f, "{:.6}", value),
            Correlation::Degenerate => f.write_str(Self::DEGENERATE_MARKER),
        }
    }
}

impl Serialize for Correlation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Correlation::Coefficient(value) => serializer.serialize_f64(*value),
            Correlation::Degenerate => serializer.serialize_str(Self::DEGENERATE_MARKER),
        }
    }
}

/// Correlation per comparison symbol, kept in the order the symbols were given.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CorrelationResults(Vec<(String, Correlation)>);

impl CorrelationResults {
    pub fn get(&self, symbol: &str) -> Option<Correlation> {
        self.0
            .iter()
            .find(|(candidate, _)| candidate == symbol)
            .map(|(_, correlation)| *correlation)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Correlation)> + '_ {
        self.0.iter().map(|(symbol, correlation)| (symbol.as_str(), *correlation))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, Correlation)> for CorrelationResults {
    fn from_iter<I: IntoIterator<Item = (String, Correlation)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for CorrelationResults {
    type Item = (String, Correlation);
    type IntoIter = std::vec::IntoIter<(String, Correlation)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl Serialize for CorrelationResults {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (symbol, correlation) in &self.0 {
            map.serialize_entry(symbol, correlation)?;
        }
        map.end()
    }
}

/// Correlates the target's closing prices with each comparison series.
///
/// Both series are truncated to their common length by position, not by timestamp;
/// callers that need date alignment must align the inputs first. Points whose close
/// does not parse are dropped before truncation.
pub fn correlate(target: &PriceSeries, comparisons: &[(String, PriceSeries)]) -> CorrelationResults {
    let target_closes = target.closes();

    let results: Vec<(String, Correlation)> = comparisons
        .par_iter()
        .map(|(symbol, series)| {
            let correlation = pearson(&target_closes, &series.closes());
            tracing::debug!(
                target = target.symbol(),
                comparison = %symbol,
                %correlation,
                "Correlation computed"
            );
            (symbol.clone(), correlation)
        })
        .collect();

    CorrelationResults(results)
}

/// Pearson coefficient over the leading `min(len)` elements of both slices.
///
/// Degenerate when the common prefix is empty, when either prefix has exactly zero
/// variance (every value equal), or when the quotient is not finite.
pub fn pearson(first: &[f64], second: &[f64]) -> Correlation {
    let common_length = first.len().min(second.len());
    if common_length == 0 {
        return Correlation::Degenerate;
    }
    let (first, second) = (&first[..common_length], &second[..common_length]);

    if is_constant(first) || is_constant(second) {
        return Correlation::Degenerate;
    }

    let mean_first = mean(first);
    let mean_second = mean(second);

    let mut dot = 0.0;
    let mut squares_first = 0.0;
    let mut squares_second = 0.0;
    for (x, y) in first.iter().zip(second) {
        let (dx, dy) = (x - mean_first, y - mean_second);
        dot += dx * dy;
        squares_first += dx * dx;
        squares_second += dy * dy;
    }

    let coefficient = dot / (squares_first * squares_second).sqrt();
    if !coefficient.is_finite() {
        return Correlation::Degenerate;
    }
    Correlation::Coefficient(coefficient.clamp(-1.0, 1.0))
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn is_constant(values: &[f64]) -> bool {
    values.windows(2).all(|pair| pair[0] == pair[1])
}
