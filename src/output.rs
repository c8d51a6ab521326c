use analytics::{
    CorrelationReport, LevelSet, PerformanceMetrics, PriceExtremes, SeriesReport, SignalReport,
    VolatilityReport,
};
use comfy_table::Table;
use service::Prediction;

/// Human-readable table form of a command result.
pub trait Render {
    fn render(&self) -> Table;
}

fn metric_table(rows: Vec<(&str, String)>) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Metric", "Value"]);
    for (name, value) in rows {
        table.add_row(vec![name.to_string(), value]);
    }
    table
}

fn number(value: f64) -> String {
    format!("{:.6}", value)
}

fn optional(value: Option<f64>) -> String {
    value.map_or_else(|| "undefined".to_string(), number)
}

fn list(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| format!("{:.2}", v))
        .collect::<Vec<_>>()
        .join(", ")
}

impl Render for PriceExtremes {
    fn render(&self) -> Table {
        metric_table(vec![
            ("All-time high", optional(self.all_time_high)),
            ("All-time low", optional(self.all_time_low)),
        ])
    }
}

impl Render for VolatilityReport {
    fn render(&self) -> Table {
        metric_table(vec![("Volatility", optional(self.volatility))])
    }
}

impl Render for LevelSet {
    fn render(&self) -> Table {
        metric_table(vec![
            ("Support levels", list(&self.support_levels)),
            ("Resistance levels", list(&self.resistance_levels)),
        ])
    }
}

impl Render for SignalReport {
    fn render(&self) -> Table {
        let mut table = Table::new();
        table.set_header(vec!["Timestamp", "Signal"]);
        for signal in &self.signals {
            table.add_row(vec![signal.timestamp.clone(), signal.kind.to_string()]);
        }
        table
    }
}

impl Render for PerformanceMetrics {
    fn render(&self) -> Table {
        metric_table(vec![
            ("Average return", number(self.average_return)),
            ("Standard deviation", number(self.standard_deviation)),
            ("Sharpe ratio", number(self.sharpe_ratio)),
        ])
    }
}

impl Render for CorrelationReport {
    fn render(&self) -> Table {
        let mut table = Table::new();
        table.set_header(vec!["Symbol", "Correlation"]);
        for (symbol, correlation) in self.correlation_results.iter() {
            table.add_row(vec![symbol.to_string(), correlation.to_string()]);
        }
        table
    }
}

impl Render for SeriesReport {
    fn render(&self) -> Table {
        let last_signal = self
            .signals
            .signals
            .last()
            .map_or_else(|| "none".to_string(), |s| format!("{} @ {}", s.kind, s.timestamp));

        metric_table(vec![
            ("Symbol", self.symbol.clone()),
            ("Bars", self.bars.to_string()),
            ("All-time high", optional(self.extremes.all_time_high)),
            ("All-time low", optional(self.extremes.all_time_low)),
            ("Volatility", optional(self.volatility.volatility)),
            ("Average return", number(self.performance.average_return)),
            ("Standard deviation", number(self.performance.standard_deviation)),
            ("Sharpe ratio", number(self.performance.sharpe_ratio)),
            ("Support levels", self.levels.support_levels.len().to_string()),
            ("Resistance levels", self.levels.resistance_levels.len().to_string()),
            ("Signals", self.signals.signals.len().to_string()),
            ("Last signal", last_signal),
        ])
    }
}

impl Render for Prediction {
    fn render(&self) -> Table {
        metric_table(vec![
            ("Symbol", self.symbol.clone()),
            ("Prediction", self.prediction.clone()),
        ])
    }
}
