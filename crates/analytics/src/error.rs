use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Analytics received invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("Invalid analytics configuration: {0}")]
    Configuration(#[from] configuration::error::ConfigError),
}
