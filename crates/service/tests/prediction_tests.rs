#![cfg(unix)]

use configuration::PredictionConfig;
use service::{PredictionProvider, ScriptPredictionProvider, ServiceError};
use std::collections::HashMap;
use std::path::Path;

fn provider_for(symbol: &str, script: &Path, timeout_secs: u64) -> ScriptPredictionProvider {
    ScriptPredictionProvider::new(PredictionConfig {
        interpreter: "sh".to_string(),
        lookback: 30,
        horizon: 1,
        timeout_secs,
        scripts: HashMap::from([(symbol.to_string(), script.to_path_buf())]),
    })
}

fn write_script(dir: &Path, body: &str) -> std::path::PathBuf {
    let path = dir.join("forecast.sh");
    std::fs::write(&path, body).unwrap();
    path
}

#[tokio::test]
async fn last_output_line_is_the_prediction() {
    let dir = tempfile::tempdir().unwrap();
    let script = write_script(dir.path(), "echo \"loading model\"\necho \"$1 $2\" >&2\necho 1234.5\necho\n");

    let prediction = provider_for("ABFRL", &script, 10).predict("ABFRL").await.unwrap();
    assert_eq!(prediction.symbol, "ABFRL");
    assert_eq!(prediction.prediction, "1234.5");
    assert_eq!(prediction.value, Some(1234.5));
}

#[tokio::test]
async fn script_arguments_are_lookback_and_horizon() {
    let dir = tempfile::tempdir().unwrap();
    let script = write_script(dir.path(), "echo \"$1/$2\"\n");

    let prediction = provider_for("X", &script, 10).predict("X").await.unwrap();
    assert_eq!(prediction.prediction, "30/1");
    assert_eq!(prediction.value, None);
}

#[tokio::test]
async fn failures_are_reported() {
    let dir = tempfile::tempdir().unwrap();
    let script = write_script(dir.path(), "echo boom >&2\nexit 3\n");
    let provider = provider_for("X", &script, 10);

    assert!(matches!(provider.predict("X").await, Err(ServiceError::Prediction(_))));
    assert!(matches!(provider.predict("UNKNOWN").await, Err(ServiceError::Prediction(_))));
}

#[tokio::test]
async fn silent_script_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let script = write_script(dir.path(), "true\n");

    let err = provider_for("X", &script, 10).predict("X").await.unwrap_err();
    assert!(matches!(err, ServiceError::Prediction(msg) if msg.contains("no output")));
}

#[tokio::test]
async fn slow_script_times_out() {
    let dir = tempfile::tempdir().unwrap();
    let script = write_script(dir.path(), "sleep 30\necho 1\n");

    let err = provider_for("X", &script, 1).predict("X").await.unwrap_err();
    assert!(matches!(err, ServiceError::Timeout { secs: 1, .. }));
}

#[tokio::test]
async fn symbols_match_configured_scripts_case_insensitively() {
    let dir = tempfile::tempdir().unwrap();
    let script = write_script(dir.path(), "echo 7\n");

    let prediction = provider_for("abfrl", &script, 10).predict("ABFRL").await.unwrap();
    assert_eq!(prediction.symbol, "ABFRL");
    assert_eq!(prediction.value, Some(7.0));
}
