use crate::error::ConfigError;
use core_types::ReturnPolicy;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
///
/// Every section is optional in the file; missing sections fall back to their defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub analytics: AnalyticsParams,
    pub store: StoreConfig,
    pub prediction: PredictionConfig,
    pub logging: LoggingConfig,
}

/// Parameters for the analytics engine.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnalyticsParams {
    /// Period of the fast EMA used for crossover signals.
    pub short_period: usize,
    /// Period of the slow EMA used for crossover signals.
    pub long_period: usize,
    /// Per-period risk-free rate subtracted in the Sharpe ratio.
    pub risk_free_rate: f64,
    /// How return calculation treats pairs that cannot yield a finite return.
    pub return_policy: ReturnPolicy,
}

impl Default for AnalyticsParams {
    fn default() -> Self {
        Self {
            short_period: 10,
            long_period: 20,
            risk_free_rate: 0.0,
            return_policy: ReturnPolicy::Skip,
        }
    }
}

/// Where price history is read from.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Directory holding one `<SYMBOL>.json` file per instrument.
    pub data_dir: PathBuf,
    /// Upper bound on a single series fetch.
    pub fetch_timeout_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            fetch_timeout_secs: 10,
        }
    }
}

/// Settings for the external forecasting scripts.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PredictionConfig {
    /// Program used to run the scripts.
    pub interpreter: String,
    /// Number of past bars the model looks at. Passed as the first script argument.
    pub lookback: u32,
    /// Number of bars to forecast. Passed as the second script argument.
    pub horizon: u32,
    pub timeout_secs: u64,
    /// Script path per symbol.
    pub scripts: HashMap<String, PathBuf>,
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            interpreter: "python3".to_string(),
            lookback: 30,
            horizon: 1,
            timeout_secs: 120,
            scripts: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive; `RUST_LOG` takes precedence when set.
    pub level: String,
    /// When set, logs are also written to a daily-rolling file in this directory.
    pub directory: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
        }
    }
}

impl Config {
    /// Checks cross-field constraints that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.analytics.validate()?;

        if self.store.fetch_timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "store.fetch_timeout_secs must be greater than 0".to_string(),
            ));
        }
        if self.prediction.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "prediction.timeout_secs must be greater than 0".to_string(),
            ));
        }
        if self.prediction.lookback == 0 || self.prediction.horizon == 0 {
            return Err(ConfigError::ValidationError(
                "prediction.lookback and prediction.horizon must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Applies command-line overrides and re-validates the result.
    pub fn with_overrides(mut self, overrides: &AnalyticsOverrides) -> Result<Self, ConfigError> {
        overrides.apply(&mut self.analytics);
        self.validate()?;
        Ok(self)
    }
}

impl AnalyticsParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.short_period == 0 || self.long_period == 0 {
            return Err(ConfigError::ValidationError(
                "EMA periods must be at least 1".to_string(),
            ));
        }
        if !self.risk_free_rate.is_finite() {
            return Err(ConfigError::ValidationError(
                "risk_free_rate must be a finite number".to_string(),
            ));
        }
        Ok(())
    }
}

/// Analytics settings that may be overridden on the command line.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "clap", derive(clap::Args))]
pub struct AnalyticsOverrides {
    /// Period of the fast EMA.
    #[cfg_attr(feature = "clap", arg(long, global = true))]
    pub short_period: Option<usize>,

    /// Period of the slow EMA.
    #[cfg_attr(feature = "clap", arg(long, global = true))]
    pub long_period: Option<usize>,

    /// Per-period risk-free rate for the Sharpe ratio.
    #[cfg_attr(feature = "clap", arg(long, global = true, allow_negative_numbers = true))]
    pub risk_free_rate: Option<f64>,

    /// `skip` or `propagate` for prices that cannot yield a finite return.
    #[cfg_attr(feature = "clap", arg(long, global = true))]
    pub return_policy: Option<ReturnPolicy>,
}

impl AnalyticsOverrides {
    pub fn apply(&self, params: &mut AnalyticsParams) {
        if let Some(period) = self.short_period {
            params.short_period = period;
        }
        if let Some(period) = self.long_period {
            params.long_period = period;
        }
        if let Some(rate) = self.risk_free_rate {
            params.risk_free_rate = rate;
        }
        if let Some(policy) = self.return_policy {
            params.return_policy = policy;
        }
    }
}
