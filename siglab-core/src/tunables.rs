//! Named engine constants with documented defaults.
//!
//! Every threshold the classifiers, detectors, and signal generators use is
//! collected here rather than scattered per call site, so tuning passes are
//! config changes instead of code changes. Defaults reproduce the documented
//! backtest behavior; deserialization fills missing fields from `Default`.

use serde::{Deserialize, Serialize};

/// EMA-spread breakpoints for regime classification, in percent.
///
/// Spread above `strong_pct` is a strong trend, between `weak_pct` and
/// `strong_pct` a weak trend, within `±weak_pct` ranging. Downtrends mirror.
/// Other components key signal adjustments off these exact defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegimeBands {
    pub weak_pct: f64,
    pub strong_pct: f64,
}

impl Default for RegimeBands {
    fn default() -> Self {
        Self {
            weak_pct: 1.0,
            strong_pct: 3.0,
        }
    }
}

/// Policy for mean-reversion scoring inside a strong trend.
///
/// `Penalize` subtracts a fixed amount from the score but can still let a
/// high base score through; `Block` forces the score to neutral so no
/// mean-reversion trade can fire. Both are kept because historical results
/// were produced with the penalty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendSuppression {
    Penalize,
    Block,
}

/// All tunable engine constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tunables {
    pub regime_bands: RegimeBands,

    /// EMA spread (percent) below which the trend reads sideways.
    pub trend_epsilon_pct: f64,

    /// Bollinger width / middle below this reads as low volatility.
    pub volatility_low: f64,
    /// Bollinger width / middle above this reads as high volatility.
    pub volatility_high: f64,

    /// Trailing-5 vs preceding-5 volume ratio above which volume is increasing.
    pub volume_increase_ratio: f64,
    /// Ratio below which volume is decreasing.
    pub volume_decrease_ratio: f64,

    /// Sweep candle volume must exceed this multiple of the trailing average.
    pub sweep_volume_ratio: f64,
    /// Rejection wick must be at least this multiple of the opposite wick.
    pub sweep_wick_ratio: f64,
    /// Close must recover into this fraction of the candle range.
    pub sweep_close_recovery: f64,
    /// Confidence assigned to a confirmed sweep (tuned 60 → 80 → 85 over time).
    pub sweep_confidence: u8,

    /// Minimum pole rise (percent over 10 candles) for a bull flag.
    pub flag_pole_pct: f64,
    /// Maximum pullback (percent) during the flag consolidation.
    pub flag_pullback_pct: f64,
    pub flag_confidence_forming: u8,
    pub flag_confidence_confirmed: u8,

    /// Maximum distance between the two bottoms, percent of the first low.
    pub double_bottom_tolerance_pct: f64,
    pub double_bottom_confidence_forming: u8,
    pub double_bottom_confidence_confirmed: u8,

    /// Candles compared on each side when locating local extrema.
    pub extrema_window: usize,

    /// Confidence for a two-point / three-point structure pattern.
    pub structure_confidence: u8,
    pub structure_confidence_extended: u8,

    /// Recommendation thresholds on the 0-100 signal scale.
    pub bullish_threshold: u8,
    pub bearish_threshold: u8,

    /// Added to the momentum score when a strong regime aligns with direction.
    pub regime_momentum_boost: u8,
    /// Added to mean-reversion conviction in a ranging regime.
    pub ranging_reversion_boost: u8,
    /// Subtracted from mean-reversion conviction in a strong trend.
    pub strong_trend_reversion_penalty: u8,
    pub trend_suppression: TrendSuppression,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            regime_bands: RegimeBands::default(),
            trend_epsilon_pct: 0.1,
            volatility_low: 0.02,
            volatility_high: 0.05,
            volume_increase_ratio: 1.2,
            volume_decrease_ratio: 0.8,
            sweep_volume_ratio: 1.5,
            sweep_wick_ratio: 1.5,
            sweep_close_recovery: 0.7,
            sweep_confidence: 85,
            flag_pole_pct: 5.0,
            flag_pullback_pct: 3.0,
            flag_confidence_forming: 70,
            flag_confidence_confirmed: 90,
            double_bottom_tolerance_pct: 2.0,
            double_bottom_confidence_forming: 75,
            double_bottom_confidence_confirmed: 95,
            extrema_window: 2,
            structure_confidence: 70,
            structure_confidence_extended: 75,
            bullish_threshold: 70,
            bearish_threshold: 30,
            regime_momentum_boost: 25,
            ranging_reversion_boost: 20,
            strong_trend_reversion_penalty: 25,
            trend_suppression: TrendSuppression::Penalize,
        }
    }
}
