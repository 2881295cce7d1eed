//! Relative Strength Index (RSI).
//!
//! Plain averages of gains and losses over the trailing `period` deltas
//! (no Wilder smoothing): RS = avg_gain / avg_loss,
//! RSI = 100 - 100 / (1 + RS).
//! Edge case: avg_loss == 0 → RSI = 100. This is the engine's only
//! special-cased arithmetic edge; everything else short-circuits as
//! `InsufficientData`.

use crate::error::{ensure_min_len, AnalysisError, Result};

/// RSI over the trailing `period` price changes, as of the last price.
pub fn rsi(prices: &[f64], period: usize) -> Result<f64> {
    if period == 0 {
        return Err(AnalysisError::InvalidPeriod(period));
    }
    ensure_min_len(prices.len(), period + 1)?;

    let start = prices.len() - period;
    let mut gain_sum = 0.0;
    let mut loss_sum = 0.0;
    for i in start..prices.len() {
        let delta = prices[i] - prices[i - 1];
        if delta > 0.0 {
            gain_sum += delta;
        } else {
            loss_sum -= delta;
        }
    }
    let avg_gain = gain_sum / period as f64;
    let avg_loss = loss_sum / period as f64;

    if avg_loss == 0.0 {
        // Fully one-sided gains (or a flat window): defined as 100, never a
        // divide by zero.
        return Ok(100.0);
    }

    let rs = avg_gain / avg_loss;
    Ok(100.0 - 100.0 / (1.0 + rs))
}
