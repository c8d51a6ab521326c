use core_types::PricePoint;
use serde::{Deserialize, Serialize};

/// Naive support and resistance prices, in the order they were found.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelSet {
    pub support_levels: Vec<f64>,
    pub resistance_levels: Vec<f64>,
}

/// Flags every low that undercuts the previous bar's low as support and every high
/// that exceeds the previous bar's high as resistance.
///
/// This compares each bar with its immediate predecessor only; it is not a windowed
/// peak/trough search. The first bar never contributes and a bar may land in both lists.
pub fn detect_levels(points: &[PricePoint]) -> LevelSet {
    let mut levels = LevelSet::default();

    for pair in points.windows(2) {
        let (previous, current) = (&pair[0], &pair[1]);
        if current.low < previous.low {
            levels.support_levels.push(current.low);
        }
        if current.high > previous.high {
            levels.resistance_levels.push(current.high);
        }
    }

    levels
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::PriceValue;

    fn bar(low: f64, high: f64) -> PricePoint {
        PricePoint {
            timestamp: String::new(),
            open: low,
            high,
            low,
            close: PriceValue::Number(high),
            volume: None,
        }
    }

    #[test]
    fn single_bar_contributes_nothing() {
        assert_eq!(detect_levels(&[bar(1.0, 2.0)]), LevelSet::default());
        assert_eq!(detect_levels(&[]), LevelSet::default());
    }

    #[test]
    fn outside_bar_counts_for_both_lists() {
        let levels = detect_levels(&[bar(10.0, 20.0), bar(9.0, 21.0)]);
        assert_eq!(levels.support_levels, vec![9.0]);
        assert_eq!(levels.resistance_levels, vec![21.0]);
    }

    #[test]
    fn repeated_levels_are_kept() {
        let levels = detect_levels(&[bar(10.0, 20.0), bar(8.0, 20.0), bar(10.0, 20.0), bar(8.0, 20.0)]);
        assert_eq!(levels.support_levels, vec![8.0, 8.0]);
        assert!(levels.resistance_levels.is_empty());
    }
}
