//! Rolling support and resistance levels.
//!
//! Support is the lowest low and resistance the highest high over the
//! `lookback` candles immediately preceding the most recent one. The
//! current candle is excluded so a sweep through the level is measurable
//! against it.

use serde::{Deserialize, Serialize};

use crate::domain::Candle;
use crate::error::{ensure_min_len, Result};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SupportResistance {
    pub support: f64,
    pub resistance: f64,
}

/// Levels over the `lookback` candles before the last one.
///
/// Requires `lookback + 1` candles so the window never includes the candle
/// being evaluated against it.
pub fn support_resistance(candles: &[Candle], lookback: usize) -> Result<SupportResistance> {
    ensure_min_len(candles.len(), lookback + 1)?;
    let window = &candles[candles.len() - 1 - lookback..candles.len() - 1];

    let mut support = f64::INFINITY;
    let mut resistance = f64::NEG_INFINITY;
    for candle in window {
        support = support.min(candle.low);
        resistance = resistance.max(candle.high);
    }
    Ok(SupportResistance {
        support,
        resistance,
    })
}
