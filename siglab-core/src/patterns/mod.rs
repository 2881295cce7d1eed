//! Pattern detector — liquidity sweeps and chart patterns.
//!
//! Absence of a pattern is a normal result (`detected = false`), never an
//! error: early backtest windows routinely have too little history. The
//! detectors only error when the caller's input is structurally unusable
//! (the level calculator with an oversized lookback).

pub mod bull_flag;
pub mod double_bottom;
pub mod extrema;
pub mod levels;
pub mod liquidity_sweep;
pub mod structure;

pub use bull_flag::detect_bull_flag;
pub use double_bottom::detect_double_bottom;
pub use extrema::{local_maxima, local_minima};
pub use levels::{support_resistance, SupportResistance};
pub use liquidity_sweep::detect_liquidity_sweep;
pub use structure::detect_market_structure;

use serde::{Deserialize, Serialize};

use crate::domain::Candle;
use crate::tunables::Tunables;

/// Minimum history before any detector reports a pattern.
pub const MIN_PATTERN_CANDLES: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    LiquiditySweep,
    BullFlag,
    DoubleBottom,
    HigherLows,
    LowerHighs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternDirection {
    Bullish,
    Bearish,
}

/// Outcome of one detector call.
///
/// A pattern that is not detected has `confidence = 0` and no price fields.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PatternResult {
    pub detected: bool,
    pub pattern: Option<PatternKind>,
    pub direction: Option<PatternDirection>,
    /// 0-100; fixed per pattern kind, higher when breakout-confirmed.
    pub confidence: u8,
    pub entry: Option<f64>,
    pub target: Option<f64>,
    pub stop_loss: Option<f64>,
}

impl PatternResult {
    pub fn none() -> Self {
        Self {
            detected: false,
            pattern: None,
            direction: None,
            confidence: 0,
            entry: None,
            target: None,
            stop_loss: None,
        }
    }

    pub fn is_bullish(&self) -> bool {
        self.detected && self.direction == Some(PatternDirection::Bullish)
    }

    pub fn is_bearish(&self) -> bool {
        self.detected && self.direction == Some(PatternDirection::Bearish)
    }
}

/// Combined detector output consumed by the signal generator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PatternScan {
    pub liquidity_sweep: PatternResult,
    pub chart_pattern: PatternResult,
}

/// Run all detectors over the window.
///
/// `lookback` sizes the support/resistance window for the sweep detector.
/// Among chart patterns the highest-confidence detection wins; ties resolve
/// in fixed order (flag, double bottom, structure) for reproducibility.
pub fn scan_patterns(candles: &[Candle], lookback: usize, tunables: &Tunables) -> PatternScan {
    let liquidity_sweep = detect_liquidity_sweep(candles, lookback, tunables);

    let mut chart_pattern = PatternResult::none();
    for candidate in [
        detect_bull_flag(candles, tunables),
        detect_double_bottom(candles, tunables),
        detect_market_structure(candles, tunables),
    ] {
        if candidate.detected && candidate.confidence > chart_pattern.confidence {
            chart_pattern = candidate;
        }
    }

    PatternScan {
        liquidity_sweep,
        chart_pattern,
    }
}
