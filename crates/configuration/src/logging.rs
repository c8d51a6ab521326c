use crate::error::ConfigError;
use crate::settings::LoggingConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

const LOG_FILE_PREFIX: &str = "stockscope.log";

/// Installs the global tracing subscriber.
///
/// Console output goes to stderr so command output on stdout stays machine-readable.
/// When `config.directory` is set, a daily-rolling file layer is added as well; the
/// returned guard must be held for as long as file logging should keep flushing.
pub fn init_tracing(config: &LoggingConfig) -> Result<Option<WorkerGuard>, ConfigError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| ConfigError::LoggingError(e.to_string()))?;

    let console_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    let (file_layer, guard) = match &config.directory {
        Some(directory) => {
            let appender = tracing_appender::rolling::daily(directory, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| ConfigError::LoggingError(e.to_string()))?;

    Ok(guard)
}
