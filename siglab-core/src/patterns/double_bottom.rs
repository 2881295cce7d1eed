//! Double bottom detection.
//!
//! Two local minima within `double_bottom_tolerance_pct` of each other,
//! separated by at least one local maximum. The intervening peak is the
//! neckline; a close above it confirms the breakout and raises the
//! confidence.

use crate::domain::Candle;
use crate::patterns::extrema::{local_maxima, local_minima};
use crate::patterns::{PatternDirection, PatternKind, PatternResult, MIN_PATTERN_CANDLES};
use crate::tunables::Tunables;

pub fn detect_double_bottom(candles: &[Candle], tunables: &Tunables) -> PatternResult {
    if candles.len() < MIN_PATTERN_CANDLES {
        return PatternResult::none();
    }

    let minima = local_minima(candles, tunables.extrema_window);
    if minima.len() < 2 {
        return PatternResult::none();
    }
    let first = minima[minima.len() - 2];
    let second = minima[minima.len() - 1];

    let low1 = candles[first].low;
    let low2 = candles[second].low;
    if low1 <= 0.0 {
        return PatternResult::none();
    }
    if (low2 - low1).abs() / low1 * 100.0 > tunables.double_bottom_tolerance_pct {
        return PatternResult::none();
    }

    // The neckline is the highest intervening local maximum.
    let neckline = local_maxima(candles, tunables.extrema_window)
        .into_iter()
        .filter(|&m| m > first && m < second)
        .map(|m| candles[m].high)
        .fold(f64::NEG_INFINITY, f64::max);
    if neckline == f64::NEG_INFINITY {
        return PatternResult::none();
    }

    let last_close = candles[candles.len() - 1].close;
    let bottom = low1.min(low2);
    let confirmed = last_close > neckline;
    let (confidence, entry) = if confirmed {
        (tunables.double_bottom_confidence_confirmed, last_close)
    } else {
        (tunables.double_bottom_confidence_forming, neckline)
    };

    PatternResult {
        detected: true,
        pattern: Some(PatternKind::DoubleBottom),
        direction: Some(PatternDirection::Bullish),
        confidence,
        entry: Some(entry),
        target: Some(neckline + (neckline - bottom)),
        stop_loss: Some(bottom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::candle::make_tight_candles;

    /// W-shaped close series inside a longer flat stretch. Both bottoms at
    /// ~95, neckline peak at 103.
    fn w_series(tail_close: f64) -> Vec<Candle> {
        let mut closes = vec![100.0, 100.2, 100.4, 100.1, 100.3, 100.0, 100.2, 100.1];
        closes.extend_from_slice(&[
            100.0, 99.0, 97.0, 95.0, 97.0, 100.0, 103.0, 100.0, 97.0, 95.2, 97.0, 99.0,
        ]);
        // Drift while the pattern resolves.
        closes.extend_from_slice(&[
            100.0, 100.5, 101.0, 100.5, 101.0, 101.5, 101.0, 101.5, 102.0,
        ]);
        closes.push(tail_close);
        make_tight_candles(&closes)
    }

    #[test]
    fn forming_double_bottom() {
        // The last close sits below the neckline high (103.5).
        let candles = w_series(102.0);
        let result = detect_double_bottom(&candles, &Tunables::default());
        assert!(result.detected);
        assert_eq!(result.pattern, Some(PatternKind::DoubleBottom));
        assert_eq!(result.confidence, 75);
        // forming entry is the neckline itself
        assert_eq!(result.entry, Some(103.5));
        assert_eq!(result.stop_loss, Some(94.5));
    }

    #[test]
    fn confirmed_double_bottom() {
        let candles = w_series(104.0);
        let result = detect_double_bottom(&candles, &Tunables::default());
        assert!(result.detected);
        assert_eq!(result.confidence, 95);
        assert_eq!(result.entry, Some(104.0));
        // target projects the bottom-to-neckline height above the neckline
        let target = result.target.unwrap();
        assert!((target - (103.5 + (103.5 - 94.5))).abs() < 1e-9);
    }

    #[test]
    fn uneven_bottoms_are_rejected() {
        // Second bottom 6% below the first breaks the tolerance.
        let mut closes = vec![100.0; 10];
        closes.extend_from_slice(&[
            100.0, 97.0, 95.0, 97.0, 100.0, 103.0, 100.0, 94.0, 89.0, 94.0,
        ]);
        closes.extend_from_slice(&[96.0; 10]);
        let candles = make_tight_candles(&closes);
        assert!(!detect_double_bottom(&candles, &Tunables::default()).detected);
    }

    #[test]
    fn single_bottom_is_rejected() {
        let mut closes = vec![100.0; 12];
        closes.extend_from_slice(&[99.0, 97.0, 95.0, 97.0, 99.0]);
        closes.extend_from_slice(&[100.5; 13]);
        let candles = make_tight_candles(&closes);
        assert!(!detect_double_bottom(&candles, &Tunables::default()).detected);
    }

    #[test]
    fn short_history_is_not_an_error() {
        let candles = make_tight_candles(&[100.0, 95.0, 100.0, 95.0, 100.0]);
        assert!(!detect_double_bottom(&candles, &Tunables::default()).detected);
    }
}
