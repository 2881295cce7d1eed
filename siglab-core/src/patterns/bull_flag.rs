//! Bull flag detection.
//!
//! Pole: a rise of at least `flag_pole_pct` over the 10 candles preceding
//! the flag. Flag: a pullback of at most `flag_pullback_pct` over the next
//! 10 candles on lower average volume than the pole. Breakout is confirmed
//! when the latest close clears the flag high on rising volume; confirmed
//! flags score higher than forming ones.

use crate::domain::Candle;
use crate::patterns::{PatternDirection, PatternKind, PatternResult, MIN_PATTERN_CANDLES};
use crate::tunables::Tunables;

/// Candles in the pole leg.
pub const POLE_WINDOW: usize = 10;
/// Candles in the flag consolidation.
pub const FLAG_WINDOW: usize = 10;

pub fn detect_bull_flag(candles: &[Candle], tunables: &Tunables) -> PatternResult {
    if candles.len() < MIN_PATTERN_CANDLES {
        return PatternResult::none();
    }

    let n = candles.len();
    let pole = &candles[n - POLE_WINDOW - FLAG_WINDOW..n - FLAG_WINDOW];
    let flag = &candles[n - FLAG_WINDOW..];
    let last = &candles[n - 1];

    let pole_start = pole[0].close;
    let pole_end = pole[pole.len() - 1].close;
    if pole_start <= 0.0 {
        return PatternResult::none();
    }
    let pole_rise_pct = (pole_end - pole_start) / pole_start * 100.0;
    if pole_rise_pct < tunables.flag_pole_pct {
        return PatternResult::none();
    }

    let flag_low_close = flag.iter().map(|c| c.close).fold(f64::INFINITY, f64::min);
    let pullback_pct = (pole_end - flag_low_close) / pole_end * 100.0;
    if !(0.0..=tunables.flag_pullback_pct).contains(&pullback_pct) {
        return PatternResult::none();
    }

    let pole_volume = mean_volume(pole);
    let flag_volume = mean_volume(flag);
    if flag_volume >= pole_volume {
        return PatternResult::none();
    }

    let flag_low = flag.iter().map(|c| c.low).fold(f64::INFINITY, f64::min);
    let flag_high = flag[..flag.len() - 1]
        .iter()
        .map(|c| c.high)
        .fold(f64::NEG_INFINITY, f64::max);
    let pole_height = pole_end - pole_start;

    let breakout = last.close > flag_high && last.volume > flag_volume;
    let (confidence, entry) = if breakout {
        (tunables.flag_confidence_confirmed, last.close)
    } else {
        (tunables.flag_confidence_forming, flag_high)
    };

    PatternResult {
        detected: true,
        pattern: Some(PatternKind::BullFlag),
        direction: Some(PatternDirection::Bullish),
        confidence,
        entry: Some(entry),
        target: Some(entry + pole_height),
        stop_loss: Some(flag_low),
    }
}

fn mean_volume(candles: &[Candle]) -> f64 {
    candles.iter().map(|c| c.volume).sum::<f64>() / candles.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Candle;
    use chrono::{TimeZone, Utc};

    fn candle(i: usize, close: f64, volume: f64) -> Candle {
        Candle {
            timestamp: Utc.timestamp_opt(1_700_000_000 + i as i64 * 3600, 0).unwrap(),
            open: close,
            high: close + 0.5,
            low: close - 0.5,
            close,
            volume,
        }
    }

    /// 15 flat lead-in candles, a 10-candle pole from 100 to ~108, then a
    /// 10-candle flag drifting back to ~106 on half the volume.
    fn flag_series(breakout_close: Option<f64>) -> Vec<Candle> {
        let mut candles: Vec<Candle> = (0..15).map(|i| candle(i, 100.0, 1500.0)).collect();
        for i in 0..10 {
            candles.push(candle(15 + i, 100.0 + i as f64, 2000.0)); // pole: 100 → 109
        }
        for i in 0..9 {
            candles.push(candle(25 + i, 108.0 - (i % 3) as f64 * 0.5, 900.0));
        }
        let last_close = breakout_close.unwrap_or(107.5);
        let volume = if breakout_close.is_some() { 1500.0 } else { 900.0 };
        candles.push(candle(34, last_close, volume));
        candles
    }

    #[test]
    fn forming_flag_detected() {
        let candles = flag_series(None);
        let result = detect_bull_flag(&candles, &Tunables::default());
        assert!(result.detected);
        assert_eq!(result.pattern, Some(PatternKind::BullFlag));
        assert_eq!(result.confidence, 70);
        assert!(result.stop_loss.unwrap() < result.entry.unwrap());
    }

    #[test]
    fn breakout_flag_scores_higher() {
        let candles = flag_series(Some(110.0));
        let result = detect_bull_flag(&candles, &Tunables::default());
        assert!(result.detected);
        assert_eq!(result.confidence, 90);
        assert_eq!(result.entry, Some(110.0));
    }

    #[test]
    fn shallow_pole_is_rejected() {
        // 2% pole is under the 5% minimum.
        let mut candles: Vec<Candle> = (0..15).map(|i| candle(i, 100.0, 1500.0)).collect();
        for i in 0..10 {
            candles.push(candle(15 + i, 100.0 + i as f64 * 0.2, 2000.0));
        }
        for i in 0..10 {
            candles.push(candle(25 + i, 101.5, 900.0));
        }
        assert!(!detect_bull_flag(&candles, &Tunables::default()).detected);
    }

    #[test]
    fn deep_pullback_is_rejected() {
        let mut candles = flag_series(None);
        // Replace a flag candle with a 6% retrace from the pole end.
        let n = candles.len();
        candles[n - 5] = candle(n - 5, 109.0 * 0.94, 900.0);
        assert!(!detect_bull_flag(&candles, &Tunables::default()).detected);
    }

    #[test]
    fn heavy_flag_volume_is_rejected() {
        let mut candles = flag_series(None);
        let n = candles.len();
        for c in candles[n - FLAG_WINDOW..].iter_mut() {
            c.volume = 2500.0; // above the pole average
        }
        assert!(!detect_bull_flag(&candles, &Tunables::default()).detected);
    }

    #[test]
    fn short_history_is_not_an_error() {
        let candles: Vec<Candle> = (0..20).map(|i| candle(i, 100.0, 1000.0)).collect();
        assert!(!detect_bull_flag(&candles, &Tunables::default()).detected);
    }
}
