use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use configuration::AnalyticsOverrides;
use serde::Serialize;
use service::{
    AnalyticsService, JsonFileSource, PredictionProvider, ScriptPredictionProvider,
};
use std::path::PathBuf;

mod output;

use output::Render;

/// The main entry point for the Stockscope analytics CLI.
#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine; it only carries optional overrides.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = configuration::load_config(cli.config.as_deref())
        .context("Failed to load configuration")?
        .with_overrides(&cli.overrides)
        .context("Invalid command-line overrides")?;
    let _log_guard = configuration::init_tracing(&config.logging)?;

    let data_dir = cli
        .data_dir
        .clone()
        .unwrap_or_else(|| config.store.data_dir.clone());
    tracing::debug!(data_dir = %data_dir.display(), "Using JSON price store");

    let service = AnalyticsService::from_config(JsonFileSource::new(data_dir), &config)?;
    let format = cli.format;

    match cli.command {
        Commands::Extremes(args) => emit(format, &service.extremes(&args.symbol).await?),
        Commands::Volatility(args) => emit(format, &service.volatility(&args.symbol).await?),
        Commands::Levels(args) => emit(format, &service.support_resistance(&args.symbol).await?),
        Commands::Signals(args) => emit(format, &service.trading_signals(&args.symbol).await?),
        Commands::Performance(args) => {
            emit(format, &service.performance_metrics(&args.symbol).await?)
        }
        Commands::Report(args) => emit(format, &service.report(&args.symbol).await?),
        Commands::Correlation(args) => emit(
            format,
            &service.correlation(&args.symbol, &args.compare).await?,
        ),
        Commands::Predict(args) => {
            let provider = ScriptPredictionProvider::new(config.prediction.clone());
            emit(format, &provider.predict(&args.symbol).await?)
        }
    }
}

fn emit<T: Serialize + Render>(format: OutputFormat, value: &T) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Table => println!("{}", value.render()),
    }
    Ok(())
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Price-history analytics: returns, EMA crossovers, levels, risk and correlation.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (defaults to ./stockscope.toml when present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory of <SYMBOL>.json price files, overriding `store.data_dir`.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    #[command(flatten)]
    overrides: AnalyticsOverrides,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Table,
}

#[derive(Subcommand)]
enum Commands {
    /// All-time high and low closing price.
    Extremes(SymbolArgs),
    /// Sample standard deviation of period returns.
    Volatility(SymbolArgs),
    /// Naive support and resistance levels.
    Levels(SymbolArgs),
    /// EMA crossover BUY/SELL signals.
    Signals(SymbolArgs),
    /// Average return, population standard deviation and Sharpe ratio.
    Performance(SymbolArgs),
    /// Every single-series analytic at once.
    Report(SymbolArgs),
    /// Pearson correlation of closing prices against other symbols.
    Correlation(CorrelationArgs),
    /// Run the configured forecasting script for a symbol.
    Predict(SymbolArgs),
}

#[derive(Parser)]
struct SymbolArgs {
    /// The symbol to analyse (e.g., "ADANIPORTS").
    #[arg(long)]
    symbol: String,
}

#[derive(Parser)]
struct CorrelationArgs {
    /// The target symbol.
    #[arg(long)]
    symbol: String,

    /// Comparison symbols, comma separated.
    #[arg(long, value_delimiter = ',', required = true)]
    compare: Vec<String>,
}
