//! Candle — the fundamental market data unit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};

/// OHLCV candle for a single instrument over a single interval.
///
/// Candles arrive pre-assembled and deduplicated from an external fetcher.
/// Volume may be `0.0` when the data source does not report it; every
/// consumer in this crate tolerates that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Candle {
    /// Basic OHLC sanity check: high bounds the range from above, low from below.
    pub fn is_sane(&self) -> bool {
        self.high >= self.low
            && self.high >= self.open
            && self.high >= self.close
            && self.low <= self.open
            && self.low <= self.close
            && self.open > 0.0
            && self.close > 0.0
            && self.volume >= 0.0
    }

    /// Full high-to-low range of the candle.
    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    /// Wick below the candle body.
    pub fn lower_wick(&self) -> f64 {
        self.open.min(self.close) - self.low
    }

    /// Wick above the candle body.
    pub fn upper_wick(&self) -> f64 {
        self.high - self.open.max(self.close)
    }
}

/// Validate an input series: non-empty, strictly increasing timestamps.
///
/// Called once at the analysis/backtest boundary; the rest of the engine
/// assumes an ordered series.
pub fn validate_series(candles: &[Candle]) -> Result<()> {
    if candles.is_empty() {
        return Err(AnalysisError::EmptySeries);
    }
    for i in 1..candles.len() {
        if candles[i].timestamp <= candles[i - 1].timestamp {
            return Err(AnalysisError::NonMonotonicTimestamps { index: i });
        }
    }
    Ok(())
}

/// Extract close prices.
pub fn closes(candles: &[Candle]) -> Vec<f64> {
    candles.iter().map(|c| c.close).collect()
}

/// Extract volumes.
pub fn volumes(candles: &[Candle]) -> Vec<f64> {
    candles.iter().map(|c| c.volume).collect()
}

/// Create synthetic candles from close prices for testing.
///
/// Generates plausible OHLV: open = prev close (or close for the first
/// candle), high/low bracket the body by 1.0, volume = 1000.
#[cfg(test)]
pub fn make_candles(closes: &[f64]) -> Vec<Candle> {
    use chrono::TimeZone;
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            Candle {
                timestamp: Utc.timestamp_opt(1_700_000_000 + i as i64 * 3600, 0).unwrap(),
                open,
                high: open.max(close) + 1.0,
                low: open.min(close) - 1.0,
                close,
                volume: 1000.0,
            }
        })
        .collect()
}

/// Create doji-style candles: open == close, high/low a half point around it.
///
/// Unlike `make_candles`, lows track closes one-to-one, so extrema of the
/// lows land exactly where the close series dips.
#[cfg(test)]
pub fn make_tight_candles(closes: &[f64]) -> Vec<Candle> {
    use chrono::TimeZone;
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| Candle {
            timestamp: Utc.timestamp_opt(1_700_000_000 + i as i64 * 3600, 0).unwrap(),
            open: close,
            high: close + 0.5,
            low: close - 0.5,
            close,
            volume: 1000.0,
        })
        .collect()
}
