//! Dispersion and risk metrics over return series.
//!
//! Population and sample standard deviation are separate functions. The volatility
//! report uses the sample divisor and performance metrics use the population divisor.

/// Arithmetic mean, `0.0` for an empty slice.
pub fn average_return(returns: &[f64]) -> f64 {
    if returns.is_empty() {
        return 0.0;
    }
    returns.iter().sum::<f64>() / returns.len() as f64
}

fn sum_squared_deviations(returns: &[f64]) -> f64 {
    let mean = average_return(returns);
    returns.iter().map(|r| (r - mean).powi(2)).sum()
}

/// Standard deviation with divisor `n`, `0.0` for an empty slice.
pub fn population_std_dev(returns: &[f64]) -> f64 {
    if returns.is_empty() {
        return 0.0;
    }
    (sum_squared_deviations(returns) / returns.len() as f64).sqrt()
}

/// Standard deviation with divisor `n - 1`.
///
/// Undefined for fewer than two observations, which is reported as `None`.
pub fn sample_std_dev(returns: &[f64]) -> Option<f64> {
    if returns.len() < 2 {
        return None;
    }
    Some((sum_squared_deviations(returns) / (returns.len() - 1) as f64).sqrt())
}

/// Excess return per unit of dispersion. Returns `0.0` when `std_dev` is zero.
pub fn sharpe_ratio(mean_return: f64, std_dev: f64, risk_free_rate: f64) -> f64 {
    if std_dev == 0.0 {
        return 0.0;
    }
    (mean_return - risk_free_rate) / std_dev
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn empty_input_has_defined_defaults() {
        assert_eq!(average_return(&[]), 0.0);
        assert_eq!(population_std_dev(&[]), 0.0);
        assert_eq!(sample_std_dev(&[]), None);
        assert_eq!(sample_std_dev(&[0.3]), None);
    }

    #[test]
    fn divisors_differ() {
        let returns = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(average_return(&returns), 5.0);
        assert_relative_eq!(population_std_dev(&returns), 2.0);
        assert_relative_eq!(
            sample_std_dev(&returns).unwrap(),
            (32.0_f64 / 7.0).sqrt(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn sharpe_guards_zero_deviation() {
        assert_eq!(sharpe_ratio(0.01, 0.0, 0.0), 0.0);
        assert_relative_eq!(sharpe_ratio(0.03, 0.02, 0.01), 1.0);
    }
}
