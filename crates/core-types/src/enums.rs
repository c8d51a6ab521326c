use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Direction of a moving-average crossover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignalKind {
    Buy,
    Sell,
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalKind::Buy => write!(f, "BUY"),
            SignalKind::Sell => write!(f, "SELL"),
        }
    }
}

/// What to do with an adjacent price pair that cannot produce a finite return.
///
/// This covers pairs where either price fails to parse as well as pairs whose
/// previous price is zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReturnPolicy {
    /// Leave the pair out of the output entirely.
    #[default]
    Skip,
    /// Emit the non-finite value (`NaN` for unparsable pairs, the raw IEEE
    /// quotient for a zero previous price).
    Propagate,
}

impl FromStr for ReturnPolicy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "skip" => Ok(ReturnPolicy::Skip),
            "propagate" => Ok(ReturnPolicy::Propagate),
            other => Err(CoreError::InvalidInput(
                "return_policy".to_string(),
                format!("expected 'skip' or 'propagate', got '{}'", other),
            )),
        }
    }
}

impl fmt::Display for ReturnPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReturnPolicy::Skip => write!(f, "skip"),
            ReturnPolicy::Propagate => write!(f, "propagate"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn return_policy_parses_case_insensitively() {
        assert_eq!("Skip".parse::<ReturnPolicy>().unwrap(), ReturnPolicy::Skip);
        assert_eq!(" PROPAGATE ".parse::<ReturnPolicy>().unwrap(), ReturnPolicy::Propagate);
        assert!("drop".parse::<ReturnPolicy>().is_err());
    }

    #[test]
    fn signal_kind_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&SignalKind::Buy).unwrap(), "\"BUY\"");
        assert_eq!(SignalKind::Sell.to_string(), "SELL");
    }
}
