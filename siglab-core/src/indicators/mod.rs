//! Indicator calculator — pure functions over price/volume series.
//!
//! Every function takes the exact sub-sequence the caller wants evaluated
//! through and returns the value as of its last element, so the same
//! functions serve both the live path and the sliding windows of a backtest.
//! Short input is an `InsufficientData` error, never a degenerate value.

pub mod bollinger;
pub mod ema;
pub mod rsi;
pub mod volume;

pub use bollinger::{bollinger, BollingerBands};
pub use ema::ema;
pub use rsi::rsi;
pub use volume::{volume_profile, volume_profile_with, VolumeProfile, VolumeTrend};

use serde::{Deserialize, Serialize};

use crate::domain::{closes, Candle};
use crate::error::{ensure_min_len, Result};

/// Indicator period overrides.
///
/// Defaults are the documented 9/21/14/20-2σ stack; the `IndicatorSet`
/// field names keep the default periods for readability even when
/// overridden.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorPeriods {
    pub ema_fast: usize,
    pub ema_slow: usize,
    pub rsi: usize,
    pub bollinger: usize,
    pub bollinger_mult: f64,
}

impl Default for IndicatorPeriods {
    fn default() -> Self {
        Self {
            ema_fast: 9,
            ema_slow: 21,
            rsi: 14,
            bollinger: 20,
            bollinger_mult: 2.0,
        }
    }
}

impl IndicatorPeriods {
    /// Minimum candle count for the full indicator set: the longest period
    /// plus one, enforced centrally so every downstream component inherits it.
    pub fn min_candles(&self) -> usize {
        self.ema_fast.max(self.ema_slow).max(self.rsi).max(self.bollinger) + 1
    }
}

/// The full indicator snapshot as of the last candle in the window.
///
/// Invariants: `bollinger.lower <= bollinger.middle <= bollinger.upper`
/// and `0 <= rsi <= 100`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSet {
    pub ema9: f64,
    pub ema21: f64,
    pub rsi: f64,
    pub bollinger: BollingerBands,
}

impl IndicatorSet {
    /// Percentage spread between the fast and slow EMA, the regime input.
    pub fn ema_spread_pct(&self) -> f64 {
        (self.ema9 - self.ema21) / self.ema21 * 100.0
    }
}

/// Compute the full indicator set over a candle window.
pub fn indicator_set(candles: &[Candle], periods: &IndicatorPeriods) -> Result<IndicatorSet> {
    ensure_min_len(candles.len(), periods.min_candles())?;
    let prices = closes(candles);
    Ok(IndicatorSet {
        ema9: ema(&prices, periods.ema_fast)?,
        ema21: ema(&prices, periods.ema_slow)?,
        rsi: rsi(&prices, periods.rsi)?,
        bollinger: bollinger(&prices, periods.bollinger, periods.bollinger_mult)?,
    })
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
