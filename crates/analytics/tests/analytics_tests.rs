use analytics::{
    AnalyticsEngine, Correlation, ExponentialMovingAverage, SignalGenerator, detect_levels,
    population_std_dev, sample_std_dev, sharpe_ratio, simple_returns,
};
use approx::assert_relative_eq;
use configuration::AnalyticsParams;
use core_types::{PricePoint, PriceSeries, PriceValue, ReturnPolicy, SignalKind};

fn timestamp(i: usize) -> String {
    format!("2024-{:04}", i)
}

fn series_from_closes(symbol: &str, closes: &[f64]) -> PriceSeries {
    let points = closes
        .iter()
        .enumerate()
        .map(|(i, &close)| PricePoint {
            timestamp: timestamp(i),
            open: close,
            high: close,
            low: close,
            close: PriceValue::Number(close),
            volume: Some(1_000.0),
        })
        .collect();
    PriceSeries::new(symbol, points).unwrap()
}

fn ohlc_series(lows: &[f64], highs: &[f64]) -> PriceSeries {
    let points = lows
        .iter()
        .zip(highs)
        .enumerate()
        .map(|(i, (&low, &high))| PricePoint {
            timestamp: timestamp(i),
            open: low,
            high,
            low,
            close: PriceValue::Number((low + high) / 2.0),
            volume: None,
        })
        .collect();
    PriceSeries::new("OHLC", points).unwrap()
}

#[test]
fn returns_of_steady_growth() {
    assert!(simple_returns(&[100.0], ReturnPolicy::Skip).is_empty());

    let returns = simple_returns(&[100.0, 110.0, 121.0], ReturnPolicy::Skip);
    assert_eq!(returns.len(), 2);
    for r in returns {
        assert_relative_eq!(r, 0.10, epsilon = 1e-9);
    }
}

#[test]
fn ema_of_constant_prices_is_constant() {
    let ema = ExponentialMovingAverage::new(10).unwrap();
    let values = ema.compute(&[5.0; 11]);
    assert_eq!(values.len(), 11);
    assert!(values.iter().all(|&v| v == 5.0));
}

#[test]
fn one_up_cross_then_one_down_cross() {
    // Flat, step up, then step down well below the start.
    let mut closes = vec![100.0; 30];
    closes.extend(std::iter::repeat_n(120.0, 30));
    closes.extend(std::iter::repeat_n(80.0, 60));
    let series = series_from_closes("XOVER", &closes);

    let signals = SignalGenerator::default().generate(&series);

    assert_eq!(signals.len(), 2, "unexpected signals: {:?}", signals);
    assert_eq!(signals[0].kind, SignalKind::Buy);
    assert_eq!(signals[0].timestamp, timestamp(30));
    assert_eq!(signals[1].kind, SignalKind::Sell);
    assert_eq!(signals[1].timestamp, timestamp(60));
}

#[test]
fn inverted_periods_mirror_the_crossovers() {
    let mut closes = vec![100.0; 30];
    closes.extend(std::iter::repeat_n(120.0, 30));
    closes.extend(std::iter::repeat_n(80.0, 60));
    let series = series_from_closes("XOVER", &closes);

    // The "short" line is now the slower one, so it lags below on the rise.
    let signals = SignalGenerator::new(20, 10).unwrap().generate(&series);

    assert_eq!(signals.len(), 2, "unexpected signals: {:?}", signals);
    assert_eq!(signals[0].kind, SignalKind::Sell);
    assert_eq!(signals[0].timestamp, timestamp(30));
    assert_eq!(signals[1].kind, SignalKind::Buy);
    assert_eq!(signals[1].timestamp, timestamp(60));
}

#[test]
fn equal_periods_never_cross() {
    let mut closes = vec![100.0; 30];
    closes.extend(std::iter::repeat_n(120.0, 30));
    closes.extend(std::iter::repeat_n(80.0, 60));
    let series = series_from_closes("XOVER", &closes);

    assert!(SignalGenerator::new(10, 10).unwrap().generate(&series).is_empty());
}

#[test]
fn signals_skip_unparsable_closes() {
    let mut points: Vec<PricePoint> = series_from_closes("X", &[100.0; 25]).points().to_vec();
    points[3].close = PriceValue::Text("n/a".to_string());
    points.push(PricePoint {
        timestamp: timestamp(25),
        open: 150.0,
        high: 150.0,
        low: 150.0,
        close: PriceValue::Text("150".to_string()),
        volume: None,
    });
    let series = PriceSeries::new("X", points).unwrap();

    let signals = SignalGenerator::default().generate(&series);
    assert_eq!(signals.len(), 1);
    assert_eq!(signals[0].kind, SignalKind::Buy);
    assert_eq!(signals[0].timestamp, timestamp(25));
}

#[test]
fn flat_series_has_no_signals() {
    let series = series_from_closes("FLAT", &[42.0; 50]);
    assert!(SignalGenerator::default().generate(&series).is_empty());
}

#[test]
fn levels_from_single_step_comparisons() {
    let series = ohlc_series(&[10.0, 8.0, 9.0, 7.0], &[20.0, 21.0, 19.0, 22.0]);
    let levels = detect_levels(series.points());
    assert_eq!(levels.support_levels, vec![8.0, 7.0]);
    assert_eq!(levels.resistance_levels, vec![21.0, 22.0]);
}

#[test]
fn self_correlation_is_one_and_constant_is_degenerate() {
    let engine = AnalyticsEngine::default();
    let target = series_from_closes("T", &[1.0, 3.0, 2.0, 5.0, 4.0]);
    let flat_a = series_from_closes("A", &[7.0; 5]);
    let flat_b = series_from_closes("B", &[3.0; 5]);

    let report = engine.correlation(&target, &[("T".to_string(), target.clone())]);
    let coefficient = report.correlation_results.get("T").unwrap().coefficient().unwrap();
    assert_relative_eq!(coefficient, 1.0, epsilon = 1e-9);

    let report = engine.correlation(&flat_a, &[("B".to_string(), flat_b)]);
    assert_eq!(report.correlation_results.get("B"), Some(Correlation::Degenerate));
}

#[test]
fn correlation_results_keep_caller_order() {
    let engine = AnalyticsEngine::default();
    let target = series_from_closes("T", &[1.0, 2.0, 3.0, 4.0]);
    let comparisons: Vec<(String, PriceSeries)> = ["ZED", "ALPHA", "MID"]
        .iter()
        .enumerate()
        .map(|(i, symbol)| {
            let closes: Vec<f64> = (0..4).map(|x| (x * (i + 1)) as f64).collect();
            (symbol.to_string(), series_from_closes(symbol, &closes))
        })
        .collect();

    let report = engine.correlation(&target, &comparisons);
    let order: Vec<&str> = report.correlation_results.iter().map(|(s, _)| s).collect();
    assert_eq!(order, ["ZED", "ALPHA", "MID"]);

    let json = serde_json::to_string(&report).unwrap();
    assert!(json.starts_with(r#"{"correlationResults":{"ZED":"#));
}

#[test]
fn statistics_edge_cases() {
    assert_eq!(sharpe_ratio(0.01, 0.0, 0.0), 0.0);
    assert_eq!(population_std_dev(&[]), 0.0);
    assert_eq!(sample_std_dev(&[]), None);
}

#[test]
fn volatility_and_performance_use_different_divisors() {
    let engine = AnalyticsEngine::default();
    let series = series_from_closes("P", &[100.0, 110.0, 99.0, 108.9]);

    let volatility = engine.volatility(&series).volatility.unwrap();
    let metrics = engine.performance_metrics(&series);

    // Returns are 0.1, -0.1, 0.1.
    assert_relative_eq!(metrics.average_return, 0.1 / 3.0, epsilon = 1e-9);
    let population = metrics.standard_deviation;
    assert_relative_eq!(volatility / population, (3.0_f64 / 2.0).sqrt(), epsilon = 1e-9);
    assert_relative_eq!(metrics.sharpe_ratio, metrics.average_return / population, epsilon = 1e-12);
}

#[test]
fn empty_series_produces_defaults() {
    let engine = AnalyticsEngine::default();
    let series = PriceSeries::new("EMPTY", vec![]).unwrap();

    let extremes = engine.price_extremes(&series);
    assert_eq!(extremes.all_time_high, None);
    assert_eq!(extremes.all_time_low, None);
    assert_eq!(engine.volatility(&series).volatility, None);
    assert!(engine.trading_signals(&series).signals.is_empty());

    let metrics = engine.performance_metrics(&series);
    assert_eq!(metrics.average_return, 0.0);
    assert_eq!(metrics.standard_deviation, 0.0);
    assert_eq!(metrics.sharpe_ratio, 0.0);
}

#[test]
fn extremes_ignore_unparsable_closes() {
    let mut points = series_from_closes("X", &[5.0, 9.0, 2.0]).points().to_vec();
    points[1].close = PriceValue::Text("broken".to_string());
    let series = PriceSeries::new("X", points).unwrap();

    let extremes = AnalyticsEngine::default().price_extremes(&series);
    assert_eq!(extremes.all_time_high, Some(5.0));
    assert_eq!(extremes.all_time_low, Some(2.0));
}

#[test]
fn engine_applies_configured_parameters() {
    let params = AnalyticsParams {
        risk_free_rate: 0.05,
        return_policy: ReturnPolicy::Propagate,
        ..AnalyticsParams::default()
    };
    let engine = AnalyticsEngine::new(params).unwrap();
    let series = series_from_closes("Z", &[0.0, 1.0, 2.0]);

    let returns = engine.returns(&series);
    assert!(returns[0].is_infinite());
    assert_relative_eq!(returns[1], 1.0);

    let steady = series_from_closes("S", &[100.0, 110.0, 121.0]);
    let metrics = engine.performance_metrics(&steady);
    assert_eq!(metrics.standard_deviation, 0.0);
    assert_eq!(metrics.sharpe_ratio, 0.0);
}

#[test]
fn engine_rejects_zero_periods() {
    let params = AnalyticsParams {
        short_period: 0,
        ..AnalyticsParams::default()
    };
    assert!(AnalyticsEngine::new(params).is_err());

    let params = AnalyticsParams {
        short_period: 5,
        long_period: 5,
        ..AnalyticsParams::default()
    };
    assert!(AnalyticsEngine::new(params).is_ok());
}

#[test]
fn series_report_serializes_flat_camel_case() {
    let engine = AnalyticsEngine::default();
    let series = ohlc_series(&[10.0, 8.0, 9.0, 7.0], &[20.0, 21.0, 19.0, 22.0]);
    let value = serde_json::to_value(engine.analyze(&series)).unwrap();

    assert_eq!(value["symbol"], "OHLC");
    assert_eq!(value["bars"], 4);
    assert_eq!(value["supportLevels"], serde_json::json!([8.0, 7.0]));
    assert!(value.get("allTimeHigh").is_some());
    assert!(value.get("sharpeRatio").is_some());
    assert!(value.get("signals").is_some());
}
