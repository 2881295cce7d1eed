//! Bollinger Bands.
//!
//! middle = SMA(period), sd = population standard deviation over the same
//! window, upper/lower = middle ± multiplier * sd.

use serde::{Deserialize, Serialize};

use crate::error::{ensure_min_len, AnalysisError, Result};

/// The three band values as of the last price in the window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BollingerBands {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

impl BollingerBands {
    /// Band width relative to the middle, the volatility classifier input.
    pub fn relative_width(&self) -> f64 {
        if self.middle == 0.0 {
            return 0.0;
        }
        (self.upper - self.lower) / self.middle
    }

    /// Position of `price` inside the bands: 0.0 at the lower band, 1.0 at
    /// the upper. Collapsed bands (zero width) read as the middle.
    pub fn percent_b(&self, price: f64) -> f64 {
        let width = self.upper - self.lower;
        if width == 0.0 {
            return 0.5;
        }
        (price - self.lower) / width
    }
}

/// Bollinger Bands over the trailing `period` prices.
pub fn bollinger(prices: &[f64], period: usize, multiplier: f64) -> Result<BollingerBands> {
    if period == 0 {
        return Err(AnalysisError::InvalidPeriod(period));
    }
    ensure_min_len(prices.len(), period + 1)?;

    let window = &prices[prices.len() - period..];
    let middle = window.iter().sum::<f64>() / period as f64;
    let variance = window
        .iter()
        .map(|p| {
            let d = p - middle;
            d * d
        })
        .sum::<f64>()
        / period as f64;
    let sd = variance.sqrt();

    Ok(BollingerBands {
        upper: middle + multiplier * sd,
        middle,
        lower: middle - multiplier * sd,
    })
}
