//! Exponential Moving Average (EMA).
//!
//! Recursive: EMA[t] = k * price[t] + (1 - k) * EMA[t-1], k = 2 / (period + 1).
//! Seed: EMA[0] = price[0]. Returns the value as of the last price in the
//! window; callers pass the exact sub-sequence they want evaluated through.

use crate::error::{ensure_min_len, AnalysisError, Result};

/// EMA of `prices` as of the last element.
///
/// Requires at least `period + 1` prices so the seed does not dominate the
/// result; shorter input is an `InsufficientData` error.
pub fn ema(prices: &[f64], period: usize) -> Result<f64> {
    if period == 0 {
        return Err(AnalysisError::InvalidPeriod(period));
    }
    ensure_min_len(prices.len(), period + 1)?;

    let k = 2.0 / (period as f64 + 1.0);
    let mut value = prices[0];
    for &price in &prices[1..] {
        value = price * k + value * (1.0 - k);
    }
    Ok(value)
}
