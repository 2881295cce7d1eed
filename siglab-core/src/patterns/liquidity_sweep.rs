//! Liquidity sweep detection.
//!
//! A bullish sweep: the most recent candle breaches the rolling support
//! level intrabar, closes back above it on elevated volume, and leaves a
//! dominant rejection wick. Mirror logic applies against resistance for the
//! bearish case. Only one direction is reported per call; bullish is
//! checked first.

use crate::domain::Candle;
use crate::patterns::levels::support_resistance;
use crate::patterns::{PatternDirection, PatternKind, PatternResult, MIN_PATTERN_CANDLES};
use crate::tunables::Tunables;

/// Detect a sweep on the most recent candle against levels from the prior
/// `lookback` candles. All four conditions must hold; confidence is the
/// fixed `sweep_confidence` when they do.
pub fn detect_liquidity_sweep(
    candles: &[Candle],
    lookback: usize,
    tunables: &Tunables,
) -> PatternResult {
    if candles.len() < MIN_PATTERN_CANDLES.max(lookback + 1) {
        return PatternResult::none();
    }

    let Ok(levels) = support_resistance(candles, lookback) else {
        return PatternResult::none();
    };
    let last = &candles[candles.len() - 1];
    let range = last.range();
    if range <= 0.0 {
        return PatternResult::none();
    }

    let window = &candles[candles.len() - 1 - lookback..candles.len() - 1];
    let avg_volume = window.iter().map(|c| c.volume).sum::<f64>() / lookback as f64;
    let volume_spike = last.volume > tunables.sweep_volume_ratio * avg_volume;

    // Bullish: breach support, recover above it.
    let breached_support = last.low < levels.support && last.close > levels.support;
    let close_recovered = (last.close - last.low) / range >= 1.0 - tunables.sweep_close_recovery;
    let wick_rejection = last.lower_wick() >= tunables.sweep_wick_ratio * last.upper_wick();

    if breached_support && volume_spike && close_recovered && wick_rejection {
        return PatternResult {
            detected: true,
            pattern: Some(PatternKind::LiquiditySweep),
            direction: Some(PatternDirection::Bullish),
            confidence: tunables.sweep_confidence,
            entry: Some(last.close),
            target: Some(levels.resistance),
            stop_loss: Some(last.low),
        };
    }

    // Bearish mirror: breach resistance, close back below it.
    let breached_resistance = last.high > levels.resistance && last.close < levels.resistance;
    let close_rejected = (last.high - last.close) / range >= 1.0 - tunables.sweep_close_recovery;
    let upper_wick_rejection = last.upper_wick() >= tunables.sweep_wick_ratio * last.lower_wick();

    if breached_resistance && volume_spike && close_rejected && upper_wick_rejection {
        return PatternResult {
            detected: true,
            pattern: Some(PatternKind::LiquiditySweep),
            direction: Some(PatternDirection::Bearish),
            confidence: tunables.sweep_confidence,
            entry: Some(last.close),
            target: Some(levels.support),
            stop_loss: Some(last.high),
        };
    }

    PatternResult::none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::candle::make_tight_candles;
    use chrono::Utc;

    fn base_series() -> Vec<Candle> {
        // 34 flat candles around 100; support ends up at 99.5.
        make_tight_candles(&[100.0; 34])
    }

    fn next_timestamp(candles: &[Candle]) -> chrono::DateTime<Utc> {
        candles.last().unwrap().timestamp + chrono::Duration::hours(1)
    }

    fn bullish_sweep_candle(candles: &[Candle]) -> Candle {
        // Spikes to 95, closes at 99.8 (above support 99.5, top of range),
        // on 3x volume, with the entire wick below the body.
        Candle {
            timestamp: next_timestamp(candles),
            open: 99.9,
            high: 100.0,
            low: 95.0,
            close: 99.8,
            volume: 3000.0,
        }
    }

    #[test]
    fn bullish_sweep_detected_with_fixed_confidence() {
        let mut candles = base_series();
        let sweep = bullish_sweep_candle(&candles);
        candles.push(sweep.clone());

        let result = detect_liquidity_sweep(&candles, 20, &Tunables::default());
        assert!(result.detected);
        assert_eq!(result.pattern, Some(PatternKind::LiquiditySweep));
        assert_eq!(result.direction, Some(PatternDirection::Bullish));
        assert_eq!(result.confidence, 85);
        assert_eq!(result.entry, Some(sweep.close));
        assert_eq!(result.stop_loss, Some(sweep.low));
    }

    #[test]
    fn bearish_sweep_detected() {
        let mut candles = base_series();
        candles.push(Candle {
            timestamp: next_timestamp(&candles),
            open: 100.1,
            high: 105.0,
            low: 100.0,
            close: 100.2,
            volume: 3000.0,
        });
        let result = detect_liquidity_sweep(&candles, 20, &Tunables::default());
        assert!(result.detected);
        assert_eq!(result.direction, Some(PatternDirection::Bearish));
    }

    #[test]
    fn low_volume_breach_is_not_a_sweep() {
        let mut candles = base_series();
        let mut sweep = bullish_sweep_candle(&candles);
        sweep.volume = 1100.0; // below 1.5x the 1000 average
        candles.push(sweep);
        assert!(!detect_liquidity_sweep(&candles, 20, &Tunables::default()).detected);
    }

    #[test]
    fn weak_close_recovery_is_not_a_sweep() {
        let mut candles = base_series();
        let mut sweep = bullish_sweep_candle(&candles);
        sweep.open = 95.5;
        sweep.close = 96.0; // closes near the low, below support
        candles.push(sweep);
        assert!(!detect_liquidity_sweep(&candles, 20, &Tunables::default()).detected);
    }

    #[test]
    fn short_history_is_not_an_error() {
        let candles = make_tight_candles(&[100.0; 10]);
        assert!(!detect_liquidity_sweep(&candles, 20, &Tunables::default()).detected);
    }

    #[test]
    fn only_one_direction_per_call() {
        let candles = base_series();
        let result = detect_liquidity_sweep(&candles, 20, &Tunables::default());
        // flat series: neither direction
        assert!(!result.detected);
        assert!(result.direction.is_none());
    }

    #[test]
    fn sweep_survives_zero_volume_history() {
        // Sources without volume report 0; a breach candle with any volume
        // still clears the multiplicative threshold.
        let mut candles: Vec<Candle> = make_tight_candles(&[100.0; 34])
            .into_iter()
            .map(|mut c| {
                c.volume = 0.0;
                c
            })
            .collect();
        let mut sweep = bullish_sweep_candle(&candles);
        sweep.volume = 10.0;
        candles.push(sweep);
        assert!(detect_liquidity_sweep(&candles, 20, &Tunables::default()).detected);
    }
}
