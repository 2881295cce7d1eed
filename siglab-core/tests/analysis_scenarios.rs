//! End-to-end analysis scenarios over constructed candle series.

use chrono::{DateTime, TimeZone, Utc};
use siglab_core::analyze::{analyze, AnalyzeConfig};
use siglab_core::conditions::{MarketRegime, Trend};
use siglab_core::domain::Candle;
use siglab_core::patterns::{detect_liquidity_sweep, PatternDirection, PatternKind};
use siglab_core::signals::Recommendation;
use siglab_core::tunables::Tunables;

fn ts(i: usize) -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000 + i as i64 * 3600, 0).unwrap()
}

fn candles_from_closes(closes: &[f64]) -> Vec<Candle> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| Candle {
            timestamp: ts(i),
            open: close,
            high: close + 0.5,
            low: close - 0.5,
            close,
            volume: 1000.0,
        })
        .collect()
}

/// Strong uptrend: a sawtooth gaining ground two candles out of two
/// (+3.2, -1.8), which holds RSI in the low 60s while the EMA9/EMA21
/// spread settles above 3%.
fn strong_uptrend_series() -> Vec<Candle> {
    let mut closes = vec![100.0];
    for i in 0..29 {
        let delta = if i % 2 == 0 { 3.2 } else { -1.8 };
        closes.push(closes.last().unwrap() + delta);
    }
    candles_from_closes(&closes)
}

#[test]
fn uptrend_scenario_recommends_bullish() {
    let candles = strong_uptrend_series();
    let analysis = analyze(&candles, &AnalyzeConfig::default()).unwrap();

    assert_eq!(analysis.regime, MarketRegime::StrongUptrend);
    assert_eq!(analysis.conditions.trend, Trend::Up);
    assert!(
        analysis.indicators.rsi > 50.0 && analysis.indicators.rsi <= 70.0,
        "rsi {} should sit in the bullish band",
        analysis.indicators.rsi
    );
    assert!(analysis.signals.momentum >= 70);
    assert_eq!(analysis.signals.recommendation, Recommendation::Bullish);
}

/// Ranging market grinding down: 26 candles oscillating around 100, then a
/// stretch of small losses that drives RSI under 30 while the EMA spread
/// stays inside ±1%.
fn ranging_oversold_series() -> Vec<Candle> {
    let mut closes: Vec<f64> = (0..26)
        .map(|i| 100.0 + if i % 2 == 0 { 1.0 } else { -1.0 })
        .collect();
    let tail_deltas = [
        -0.2, -0.2, -0.2, 0.05, -0.2, -0.2, -0.2, 0.05, -0.2, -0.2, 0.05, -0.2, -0.2, 0.05,
    ];
    for delta in tail_deltas {
        closes.push(closes.last().unwrap() + delta);
    }
    candles_from_closes(&closes)
}

#[test]
fn ranging_oversold_scenario_signals_mean_reversion() {
    let candles = ranging_oversold_series();
    let analysis = analyze(&candles, &AnalyzeConfig::default()).unwrap();

    assert_eq!(analysis.regime, MarketRegime::Ranging);
    assert!(analysis.indicators.rsi < 30.0);
    assert!(analysis.conditions.oversold);
    assert!(analysis.signals.mean_reversion >= 70);
}

#[test]
fn sweep_scenario_detects_bullish_sweep() {
    // Flat series, then one candle spiking below support on heavy volume
    // with the close recovering to the top of its range.
    let mut candles = candles_from_closes(&[100.0; 34]);
    candles.push(Candle {
        timestamp: ts(34),
        open: 99.9,
        high: 100.1,
        low: 95.0,
        close: 99.8,
        volume: 3500.0,
    });

    let result = detect_liquidity_sweep(&candles, 20, &Tunables::default());
    assert!(result.detected);
    assert_eq!(result.pattern, Some(PatternKind::LiquiditySweep));
    assert_eq!(result.direction, Some(PatternDirection::Bullish));
    assert_eq!(result.confidence, 85);

    // The same sweep surfaces through the analyze path.
    let analysis = analyze(&candles, &AnalyzeConfig::default()).unwrap();
    assert!(analysis.patterns.liquidity_sweep.detected);
    assert_eq!(
        analysis.patterns.liquidity_sweep.direction,
        Some(PatternDirection::Bullish)
    );
}
