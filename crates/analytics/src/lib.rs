//! # Stockscope Analytics Engine
//!
//! Pure analytics over in-memory price histories: simple returns, EMA crossover
//! signals, naive support/resistance levels, dispersion and Sharpe metrics, and
//! pairwise Pearson correlation.
//!
//! ## Architectural Principles
//!
//! - **Pure Logic:** This crate performs no I/O. It depends only on `core-types` and
//!   on `configuration` for its parameter struct. Fetching series and calling the
//!   forecasting collaborator belong to the `service` crate.
//! - **Best-Effort Results:** A bad data point never aborts a calculation. Unparsable
//!   prices are skipped, empty inputs produce defined defaults, and undefined
//!   quantities are expressed in the types (`Option`, `Correlation::Degenerate`).
//!
//! ## Public API
//!
//! - `AnalyticsEngine`: one method per analytic endpoint.
//! - The leaf calculators: `simple_returns`, `ExponentialMovingAverage`,
//!   `SignalGenerator`, `detect_levels`, the `statistics` functions and `correlate`.
//! - The serialisable report structs.

// Declare the modules that constitute this crate.
pub mod correlation;
pub mod ema;
pub mod engine;
pub mod error;
pub mod levels;
pub mod report;
pub mod returns;
pub mod signals;
pub mod statistics;

// Re-export the key components to create a clean, public-facing API.
pub use correlation::{Correlation, CorrelationResults, correlate, pearson};
pub use ema::ExponentialMovingAverage;
pub use engine::AnalyticsEngine;
pub use error::AnalyticsError;
pub use levels::{LevelSet, detect_levels};
pub use report::{
    CorrelationReport, PerformanceMetrics, PriceExtremes, SeriesReport, SignalReport,
    VolatilityReport,
};
pub use returns::simple_returns;
pub use signals::SignalGenerator;
pub use statistics::{average_return, population_std_dev, sample_std_dev, sharpe_ratio};
