use crate::error::ServiceError;
use async_trait::async_trait;
use core_types::{PricePoint, PriceSeries};
use std::io::ErrorKind;
use std::path::PathBuf;

/// Anything that can hand over the price history of a symbol.
///
/// The analytics engine never calls this itself; the service fetches a series and
/// passes it to the engine as plain data.
#[async_trait]
pub trait PriceSource: Send + Sync {
    async fn fetch_series(&self, symbol: &str) -> Result<PriceSeries, ServiceError>;
}

/// Reads `<data_dir>/<SYMBOL>.json`, a JSON array of price rows in any order.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    data_dir: PathBuf,
}

impl JsonFileSource {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    fn path_for(&self, symbol: &str) -> Result<PathBuf, ServiceError> {
        let is_plain_name = !symbol.is_empty()
            && !symbol.starts_with('.')
            && symbol
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '&'));
        if !is_plain_name {
            return Err(ServiceError::UnknownSymbol(symbol.to_string()));
        }
        Ok(self.data_dir.join(format!("{}.json", symbol)))
    }
}

#[async_trait]
impl PriceSource for JsonFileSource {
    async fn fetch_series(&self, symbol: &str) -> Result<PriceSeries, ServiceError> {
        let path = self.path_for(symbol)?;
        tracing::debug!(symbol, path = %path.display(), "Reading price history");

        let bytes = tokio::fs::read(&path).await.map_err(|source| match source.kind() {
            ErrorKind::NotFound => ServiceError::UnknownSymbol(symbol.to_string()),
            _ => ServiceError::Io {
                symbol: symbol.to_string(),
                source,
            },
        })?;

        let rows: Vec<PricePoint> =
            serde_json::from_slice(&bytes).map_err(|source| ServiceError::Parse {
                symbol: symbol.to_string(),
                source,
            })?;

        Ok(PriceSeries::from_unordered(symbol, rows)?)
    }
}
