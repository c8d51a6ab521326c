use core_types::{ReturnPolicy, ToPrice};

/// Converts a price sequence into simple period returns.
///
/// `r_i = (p_i - p_{i-1}) / p_{i-1}` for every adjacent pair. Pairs that cannot
/// yield a finite return (either side unparsable, or a zero previous price) are
/// handled according to `policy`, so the output may be shorter than `n - 1`.
pub fn simple_returns<P: ToPrice>(prices: &[P], policy: ReturnPolicy) -> Vec<f64> {
    let mut returns = Vec::with_capacity(prices.len().saturating_sub(1));
    let mut skipped = 0usize;

    for pair in prices.windows(2) {
        let value = match (pair[0].to_price(), pair[1].to_price()) {
            (Some(previous), Some(current)) => (current - previous) / previous,
            _ => f64::NAN,
        };

        if value.is_finite() || policy == ReturnPolicy::Propagate {
            returns.push(value);
        } else {
            skipped += 1;
        }
    }

    if skipped > 0 {
        tracing::debug!(skipped, %policy, "Skipped price pairs without a finite return");
    }

    returns
}
