use crate::enums::SignalKind;
use crate::error::CoreError;
use serde::{Deserialize, Serialize};

/// Opaque, lexicographically sortable key identifying a bar (e.g. `2024-01-05`).
pub type Timestamp = String;

/// A closing price as the store hands it over: a number, a numeric string, or nothing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PriceValue {
    Number(f64),
    Text(String),
    #[default]
    Missing,
}

impl PriceValue {
    /// Returns the numeric value, or `None` if it is missing, unparsable or NaN.
    pub fn as_f64(&self) -> Option<f64> {
        let value = match self {
            PriceValue::Number(v) => *v,
            PriceValue::Text(s) => s.trim().parse::<f64>().ok()?,
            PriceValue::Missing => return None,
        };
        (!value.is_nan()).then_some(value)
    }
}

impl From<f64> for PriceValue {
    fn from(value: f64) -> Self {
        PriceValue::Number(value)
    }
}

impl From<&str> for PriceValue {
    fn from(value: &str) -> Self {
        PriceValue::Text(value.to_string())
    }
}

/// Anything that may be read as a price.
pub trait ToPrice {
    fn to_price(&self) -> Option<f64>;
}

impl ToPrice for f64 {
    fn to_price(&self) -> Option<f64> {
        (!self.is_nan()).then_some(*self)
    }
}

impl ToPrice for PriceValue {
    fn to_price(&self) -> Option<f64> {
        self.as_f64()
    }
}

impl ToPrice for str {
    fn to_price(&self) -> Option<f64> {
        self.trim().parse::<f64>().ok().filter(|v| !v.is_nan())
    }
}

impl ToPrice for String {
    fn to_price(&self) -> Option<f64> {
        self.as_str().to_price()
    }
}

impl<T: ToPrice + ?Sized> ToPrice for &T {
    fn to_price(&self) -> Option<f64> {
        (**self).to_price()
    }
}

/// A single OHLC bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: Timestamp,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    #[serde(default)]
    pub close: PriceValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
}

/// An ordered price history for one instrument.
///
/// Points are strictly ascending by timestamp; construction fails otherwise.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSeries {
    symbol: String,
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Wraps points that are already in ascending timestamp order.
    pub fn new(symbol: impl Into<String>, points: Vec<PricePoint>) -> Result<Self, CoreError> {
        let symbol = symbol.into();
        for pair in points.windows(2) {
            let (previous, next) = (&pair[0].timestamp, &pair[1].timestamp);
            if previous == next {
                return Err(CoreError::DuplicateTimestamp {
                    symbol,
                    timestamp: next.clone(),
                });
            }
            if previous > next {
                return Err(CoreError::UnorderedSeries {
                    symbol,
                    previous: previous.clone(),
                    next: next.clone(),
                });
            }
        }
        Ok(Self { symbol, points })
    }

    /// Sorts rows by timestamp before validating them. Store scans come back unordered.
    pub fn from_unordered(
        symbol: impl Into<String>,
        mut points: Vec<PricePoint>,
    ) -> Result<Self, CoreError> {
        points.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
        Self::new(symbol, points)
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The raw closing prices, one per point, parsable or not.
    pub fn closing_prices(&self) -> Vec<&PriceValue> {
        self.points.iter().map(|p| &p.close).collect()
    }

    /// Points whose close parses, paired with the parsed value.
    pub fn priced_points(&self) -> impl Iterator<Item = (&PricePoint, f64)> + '_ {
        self.points
            .iter()
            .filter_map(|p| p.close.as_f64().map(|close| (p, close)))
    }

    /// The parsable closing prices in order. Unparsable closes are dropped.
    pub fn closes(&self) -> Vec<f64> {
        let closes: Vec<f64> = self.priced_points().map(|(_, close)| close).collect();
        let skipped = self.points.len() - closes.len();
        if skipped > 0 {
            tracing::warn!(symbol = %self.symbol, skipped, "Skipping points with unparsable close");
        }
        closes
    }
}

/// A crossover event tagged with the timestamp of the bar it fired on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signal {
    pub timestamp: Timestamp,
    pub kind: SignalKind,
}
