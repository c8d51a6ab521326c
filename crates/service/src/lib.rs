//! # Stockscope Service Layer
//!
//! Connects the pure analytics engine to its collaborators: a `PriceSource` that
//! supplies price histories and a `PredictionProvider` that produces forecasts.
//! Both are owned, injected dependencies; nothing here is a process-wide global.
//!
//! Timeouts live here too. Every fetch is bounded by the configured store timeout,
//! and the script-backed prediction provider bounds its subprocess.

pub mod error;
pub mod prediction;
pub mod source;

pub use error::ServiceError;
pub use prediction::{Prediction, PredictionProvider, ScriptPredictionProvider};
pub use source::{JsonFileSource, PriceSource};

use analytics::{
    AnalyticsEngine, CorrelationReport, LevelSet, PerformanceMetrics, PriceExtremes,
    SeriesReport, SignalReport, VolatilityReport,
};
use configuration::{Config, StoreConfig};
use core_types::PriceSeries;
use futures::future::join_all;
use std::time::Duration;

/// Fetches series from a `PriceSource` and runs the requested analytic on them.
pub struct AnalyticsService<S> {
    source: S,
    engine: AnalyticsEngine,
    fetch_timeout: Duration,
}

impl<S: PriceSource> AnalyticsService<S> {
    pub fn new(source: S, engine: AnalyticsEngine, store: &StoreConfig) -> Self {
        Self {
            source,
            engine,
            fetch_timeout: Duration::from_secs(store.fetch_timeout_secs),
        }
    }

    /// Builds the engine from the analytics section of `config`.
    pub fn from_config(source: S, config: &Config) -> Result<Self, ServiceError> {
        let engine = AnalyticsEngine::new(config.analytics.clone())?;
        Ok(Self::new(source, engine, &config.store))
    }

    async fn fetch(&self, symbol: &str) -> Result<PriceSeries, ServiceError> {
        let series = tokio::time::timeout(self.fetch_timeout, self.source.fetch_series(symbol))
            .await
            .map_err(|_| ServiceError::Timeout {
                operation: format!("fetching price history for '{}'", symbol),
                secs: self.fetch_timeout.as_secs(),
            })??;

        tracing::debug!(symbol, bars = series.len(), "Price history fetched");
        Ok(series)
    }

    pub async fn extremes(&self, symbol: &str) -> Result<PriceExtremes, ServiceError> {
        tracing::info!(symbol, "Computing all-time high and low");
        let series = self.fetch(symbol).await?;
        Ok(self.engine.price_extremes(&series))
    }

    pub async fn volatility(&self, symbol: &str) -> Result<VolatilityReport, ServiceError> {
        tracing::info!(symbol, "Computing volatility");
        let series = self.fetch(symbol).await?;
        Ok(self.engine.volatility(&series))
    }

    pub async fn support_resistance(&self, symbol: &str) -> Result<LevelSet, ServiceError> {
        tracing::info!(symbol, "Detecting support and resistance levels");
        let series = self.fetch(symbol).await?;
        Ok(self.engine.support_resistance(&series))
    }

    pub async fn trading_signals(&self, symbol: &str) -> Result<SignalReport, ServiceError> {
        tracing::info!(symbol, "Generating trading signals");
        let series = self.fetch(symbol).await?;
        Ok(self.engine.trading_signals(&series))
    }

    pub async fn performance_metrics(
        &self,
        symbol: &str,
    ) -> Result<PerformanceMetrics, ServiceError> {
        tracing::info!(symbol, "Computing performance metrics");
        let series = self.fetch(symbol).await?;
        Ok(self.engine.performance_metrics(&series))
    }

    pub async fn report(&self, symbol: &str) -> Result<SeriesReport, ServiceError> {
        tracing::info!(symbol, "Computing full series report");
        let series = self.fetch(symbol).await?;
        Ok(self.engine.analyze(&series))
    }

    /// Correlates `symbol` with each comparison symbol.
    ///
    /// All series are fetched concurrently. The first fetch failure is returned;
    /// results keep the order of `comparison_symbols`.
    pub async fn correlation(
        &self,
        symbol: &str,
        comparison_symbols: &[String],
    ) -> Result<CorrelationReport, ServiceError> {
        tracing::info!(symbol, comparisons = ?comparison_symbols, "Computing correlations");

        let (target, fetched) = futures::join!(
            self.fetch(symbol),
            join_all(comparison_symbols.iter().map(|s| self.fetch(s)))
        );
        let target = target?;

        let comparisons = comparison_symbols
            .iter()
            .cloned()
            .zip(fetched)
            .map(|(s, series)| series.map(|series| (s, series)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(self.engine.correlation(&target, &comparisons))
    }
}
