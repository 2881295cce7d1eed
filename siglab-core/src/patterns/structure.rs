//! Market structure: higher-lows and lower-highs.
//!
//! Reads the most recent local extrema: successively rising lows are a
//! bullish structure, successively falling highs a bearish one. Three
//! aligned points score higher than two. When both read true at once the
//! range is compressing in both directions and no direction is reported.

use crate::domain::Candle;
use crate::patterns::extrema::{local_maxima, local_minima};
use crate::patterns::{PatternDirection, PatternKind, PatternResult, MIN_PATTERN_CANDLES};
use crate::tunables::Tunables;

pub fn detect_market_structure(candles: &[Candle], tunables: &Tunables) -> PatternResult {
    if candles.len() < MIN_PATTERN_CANDLES {
        return PatternResult::none();
    }

    let minima = local_minima(candles, tunables.extrema_window);
    let maxima = local_maxima(candles, tunables.extrema_window);
    let last_close = candles[candles.len() - 1].close;

    let rising_lows = aligned_run(&minima, |i| candles[i].low, |a, b| a < b);
    let falling_highs = aligned_run(&maxima, |i| candles[i].high, |a, b| a > b);

    let higher_lows = rising_lows >= 2;
    let lower_highs = falling_highs >= 2;
    if higher_lows == lower_highs {
        return PatternResult::none();
    }

    if higher_lows {
        let confidence = if rising_lows >= 3 {
            tunables.structure_confidence_extended
        } else {
            tunables.structure_confidence
        };
        let latest_low = candles[*minima.last().expect("non-empty by run length")].low;
        PatternResult {
            detected: true,
            pattern: Some(PatternKind::HigherLows),
            direction: Some(PatternDirection::Bullish),
            confidence,
            entry: Some(last_close),
            target: None,
            stop_loss: Some(latest_low),
        }
    } else {
        let confidence = if falling_highs >= 3 {
            tunables.structure_confidence_extended
        } else {
            tunables.structure_confidence
        };
        let latest_high = candles[*maxima.last().expect("non-empty by run length")].high;
        PatternResult {
            detected: true,
            pattern: Some(PatternKind::LowerHighs),
            direction: Some(PatternDirection::Bearish),
            confidence,
            entry: Some(last_close),
            target: None,
            stop_loss: Some(latest_high),
        }
    }
}

/// Length of the trailing run of extrema (up to 3) whose values satisfy
/// `ordered(previous, next)` pairwise.
fn aligned_run(
    indices: &[usize],
    value: impl Fn(usize) -> f64,
    ordered: impl Fn(f64, f64) -> bool,
) -> usize {
    let take = indices.len().min(3);
    if take < 2 {
        return 0;
    }
    let tail = &indices[indices.len() - take..];
    let mut run = 1;
    for pair in tail.windows(2) {
        if ordered(value(pair[0]), value(pair[1])) {
            run += 1;
        } else {
            run = 1;
        }
    }
    run
}
