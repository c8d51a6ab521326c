use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("No price history found for symbol '{0}'")]
    UnknownSymbol(String),

    #[error("Failed to read price history for '{symbol}': {source}")]
    Io {
        symbol: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed price history for '{symbol}': {source}")]
    Parse {
        symbol: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid price series: {0}")]
    InvalidSeries(#[from] core_types::CoreError),

    #[error("Timed out after {secs}s while {operation}")]
    Timeout { operation: String, secs: u64 },

    #[error("Prediction failed: {0}")]
    Prediction(String),

    #[error("Analytics error: {0}")]
    Analytics(#[from] analytics::AnalyticsError),
}
