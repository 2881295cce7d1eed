//! The live-path entry point: one candle window in, full analysis out.
//!
//! Errors from any stage abort the whole call — the caller gets an explicit
//! failure rather than a partially fabricated analysis.

use serde::{Deserialize, Serialize};

use crate::conditions::{classify, market_regime, MarketConditions, MarketRegime};
use crate::domain::{validate_series, Candle};
use crate::error::{ensure_min_len, Result};
use crate::indicators::{indicator_set, IndicatorPeriods, IndicatorSet};
use crate::patterns::{scan_patterns, support_resistance, PatternScan, SupportResistance};
use crate::signals::{generate_signals, SignalSet};
use crate::tunables::Tunables;

/// Configuration surface for one analysis call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzeConfig {
    pub periods: IndicatorPeriods,
    pub tunables: Tunables,
    /// Support/resistance window for the sweep detector and level report.
    pub level_lookback: usize,
}

impl Default for AnalyzeConfig {
    fn default() -> Self {
        Self {
            periods: IndicatorPeriods::default(),
            tunables: Tunables::default(),
            level_lookback: 20,
        }
    }
}

impl AnalyzeConfig {
    /// Minimum candles for a full analysis: the indicator requirement or the
    /// level window, whichever is larger.
    pub fn min_candles(&self) -> usize {
        self.periods.min_candles().max(self.level_lookback + 1)
    }
}

/// Everything the live handler serializes back to its caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketAnalysis {
    pub indicators: IndicatorSet,
    pub conditions: MarketConditions,
    pub regime: MarketRegime,
    pub patterns: PatternScan,
    pub signals: SignalSet,
    pub support_resistance: SupportResistance,
}

/// Analyze a candle window as of its last candle.
pub fn analyze(candles: &[Candle], config: &AnalyzeConfig) -> Result<MarketAnalysis> {
    validate_series(candles)?;
    ensure_min_len(candles.len(), config.min_candles())?;

    let indicators = indicator_set(candles, &config.periods)?;
    let conditions = classify(candles, &indicators, &config.tunables)?;
    let regime = market_regime(
        indicators.ema9,
        indicators.ema21,
        &config.tunables.regime_bands,
    );
    let patterns = scan_patterns(candles, config.level_lookback, &config.tunables);
    let last_close = candles[candles.len() - 1].close;
    let signals = generate_signals(
        &indicators,
        &conditions,
        regime,
        &patterns,
        last_close,
        &config.tunables,
    );
    let support_resistance = support_resistance(candles, config.level_lookback)?;

    Ok(MarketAnalysis {
        indicators,
        conditions,
        regime,
        patterns,
        signals,
        support_resistance,
    })
}
