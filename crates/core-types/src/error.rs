use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid input for {0}: {1}")]
    InvalidInput(String, String),

    #[error("Price series for '{symbol}' is not ascending: '{previous}' is followed by '{next}'")]
    UnorderedSeries {
        symbol: String,
        previous: String,
        next: String,
    },

    #[error("Price series for '{symbol}' contains duplicate timestamp '{timestamp}'")]
    DuplicateTimestamp { symbol: String, timestamp: String },
}
