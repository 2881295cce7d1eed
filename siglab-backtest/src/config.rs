//! Serializable backtest configuration.

use serde::{Deserialize, Serialize};

use siglab_core::analyze::AnalyzeConfig;
use siglab_core::indicators::IndicatorPeriods;
use siglab_core::signals::Strategy;
use siglab_core::tunables::Tunables;

/// Unique identifier for a backtest run (content-addressable hash).
pub type RunId = String;

/// Exit ladder, as percentages of the entry price.
///
/// Three take-profits at increasing distance and one stop-loss; the
/// simulator mirrors them below/above entry for short trades.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExitLevels {
    pub tp1_pct: f64,
    pub tp2_pct: f64,
    pub tp3_pct: f64,
    pub stop_pct: f64,
}

impl Default for ExitLevels {
    fn default() -> Self {
        Self {
            tp1_pct: 1.5,
            tp2_pct: 3.0,
            tp3_pct: 5.0,
            stop_pct: 2.0,
        }
    }
}

/// All parameters needed to reproduce a backtest run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BacktestConfig {
    pub strategy: Strategy,
    /// Signal score (0-100) that arms a long entry; `100 - threshold` and
    /// below arms a short.
    pub signal_threshold: u8,
    /// Candles fed to the signal window at each scan index.
    pub signal_lookback: usize,
    /// Maximum candles a trade may stay open before a timeout exit.
    pub max_hold_candles: usize,
    pub exits: ExitLevels,
    pub periods: IndicatorPeriods,
    pub tunables: Tunables,
    /// Support/resistance window used inside the signal computation.
    pub level_lookback: usize,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::Momentum,
            signal_threshold: 70,
            signal_lookback: 50,
            max_hold_candles: 20,
            exits: ExitLevels::default(),
            periods: IndicatorPeriods::default(),
            tunables: Tunables::default(),
            level_lookback: 20,
        }
    }
}

impl BacktestConfig {
    /// The analysis configuration applied to every signal window.
    pub fn analyze_config(&self) -> AnalyzeConfig {
        AnalyzeConfig {
            periods: self.periods,
            tunables: self.tunables.clone(),
            level_lookback: self.level_lookback,
        }
    }

    /// Effective window length per scan index: the configured lookback,
    /// never less than the analysis minimum.
    pub fn window_len(&self) -> usize {
        self.signal_lookback.max(self.analyze_config().min_candles())
    }

    /// Deterministic content hash of this configuration.
    ///
    /// Two runs with identical configs share a RunId, which makes cached
    /// results and sweep rows directly comparable.
    pub fn run_id(&self) -> RunId {
        let json = serde_json::to_string(self).expect("BacktestConfig serialization failed");
        blake3::hash(json.as_bytes()).to_hex().to_string()
    }
}
