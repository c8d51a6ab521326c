use crate::error::ServiceError;
use async_trait::async_trait;
use configuration::PredictionConfig;
use serde::Serialize;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// A forecast as reported by the prediction collaborator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub symbol: String,
    /// The collaborator's answer, verbatim.
    pub prediction: String,
    /// `prediction` parsed as a number, when it is one.
    pub value: Option<f64>,
}

/// A pluggable forecasting capability.
#[async_trait]
pub trait PredictionProvider: Send + Sync {
    async fn predict(&self, symbol: &str) -> Result<Prediction, ServiceError>;
}

/// Runs a per-symbol forecasting script and reads its answer from stdout.
///
/// The script is invoked as `<interpreter> <script> <lookback> <horizon>`; the last
/// non-empty line it prints is taken as the prediction.
#[derive(Debug, Clone)]
pub struct ScriptPredictionProvider {
    config: PredictionConfig,
}

impl ScriptPredictionProvider {
    pub fn new(config: PredictionConfig) -> Self {
        Self { config }
    }

    // Configuration keys may come back lowercased, so symbols match case-insensitively.
    fn script_for(&self, symbol: &str) -> Option<&PathBuf> {
        self.config
            .scripts
            .iter()
            .find(|(configured, _)| configured.eq_ignore_ascii_case(symbol))
            .map(|(_, script)| script)
    }
}

#[async_trait]
impl PredictionProvider for ScriptPredictionProvider {
    async fn predict(&self, symbol: &str) -> Result<Prediction, ServiceError> {
        let script = self.script_for(symbol).ok_or_else(|| {
            ServiceError::Prediction(format!("no forecasting script configured for '{}'", symbol))
        })?;

        tracing::info!(
            symbol,
            script = %script.display(),
            lookback = self.config.lookback,
            horizon = self.config.horizon,
            "Running forecasting script"
        );

        let run = Command::new(&self.config.interpreter)
            .arg(script)
            .arg(self.config.lookback.to_string())
            .arg(self.config.horizon.to_string())
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output();

        let output = tokio::time::timeout(Duration::from_secs(self.config.timeout_secs), run)
            .await
            .map_err(|_| ServiceError::Timeout {
                operation: format!("running the forecasting script for '{}'", symbol),
                secs: self.config.timeout_secs,
            })?
            .map_err(|e| {
                ServiceError::Prediction(format!(
                    "failed to start '{}': {}",
                    self.config.interpreter, e
                ))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ServiceError::Prediction(format!(
                "script exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let prediction = stdout
            .lines()
            .map(str::trim)
            .rev()
            .find(|line| !line.is_empty())
            .ok_or_else(|| ServiceError::Prediction("script produced no output".to_string()))?
            .to_string();

        tracing::debug!(symbol, %prediction, "Forecasting script finished");

        Ok(Prediction {
            symbol: symbol.to_string(),
            value: prediction.parse().ok(),
            prediction,
        })
    }
}
