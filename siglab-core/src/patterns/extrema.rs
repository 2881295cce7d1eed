//! Local extrema detection over candle lows and highs.
//!
//! A candle is a local minimum when its low is strictly below the lows of
//! `window` candles on each side (default 2); mirrored for maxima on highs.
//! Plateau ties are not extrema, which keeps the index lists sparse on flat
//! data.

use crate::domain::Candle;

/// Indices of local minima of the candle lows.
pub fn local_minima(candles: &[Candle], window: usize) -> Vec<usize> {
    extrema_indices(candles, window, |a, b| a < b, |c| c.low)
}

/// Indices of local maxima of the candle highs.
pub fn local_maxima(candles: &[Candle], window: usize) -> Vec<usize> {
    extrema_indices(candles, window, |a, b| a > b, |c| c.high)
}

fn extrema_indices(
    candles: &[Candle],
    window: usize,
    beats: impl Fn(f64, f64) -> bool,
    key: impl Fn(&Candle) -> f64,
) -> Vec<usize> {
    let n = candles.len();
    if window == 0 || n < 2 * window + 1 {
        return Vec::new();
    }
    let mut result = Vec::new();
    for i in window..n - window {
        let center = key(&candles[i]);
        let is_extremum = (i - window..=i + window)
            .filter(|&j| j != i)
            .all(|j| beats(center, key(&candles[j])));
        if is_extremum {
            result.push(i);
        }
    }
    result
}
