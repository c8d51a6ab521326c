use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::init_tracing;
pub use settings::{
    AnalyticsOverrides, AnalyticsParams, Config, LoggingConfig, PredictionConfig, StoreConfig,
};

/// The configuration file looked up when no explicit path is given.
pub const DEFAULT_CONFIG_FILE: &str = "stockscope.toml";

/// Prefix for environment overrides, e.g. `STOCKSCOPE_ANALYTICS__SHORT_PERIOD=5`.
pub const ENV_PREFIX: &str = "STOCKSCOPE";

/// Loads the application configuration.
///
/// Layers, lowest precedence first: built-in defaults, the TOML file (optional when
/// no explicit path is given), then `STOCKSCOPE_*` environment variables. The result
/// is validated before it is returned.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let file = match path {
        Some(path) => config::File::from(path).required(true),
        None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
    };

    let builder = config::Config::builder()
        .add_source(file)
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    tracing::debug!(?config, "Configuration loaded");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::ReturnPolicy;
    use std::io::Write;

    #[test]
    fn loads_partial_file_over_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[analytics]
short_period = 5
return_policy = "propagate"

[prediction.scripts]
ABFRL = "pyfiles/abfrl.py"
"#
        )
        .unwrap();

        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.analytics.short_period, 5);
        assert_eq!(config.analytics.long_period, 20);
        assert_eq!(config.analytics.return_policy, ReturnPolicy::Propagate);
        assert_eq!(config.prediction.lookback, 30);
        let scripts: Vec<_> = config.prediction.scripts.values().collect();
        assert_eq!(scripts, [&std::path::PathBuf::from("pyfiles/abfrl.py")]);
    }

    #[test]
    fn rejects_invalid_periods_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[analytics]\nshort_period = 0\nlong_period = 20").unwrap();

        let err = load_config(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn accepts_fast_period_not_below_slow_period() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[analytics]\nshort_period = 30\nlong_period = 20").unwrap();

        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.analytics.short_period, 30);
        assert_eq!(config.analytics.long_period, 20);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = load_config(Some(Path::new("/nonexistent/stockscope.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::LoadError(_)));
    }
}
