//! Market condition classifier and regime detection.
//!
//! Conditions are derived, recomputed fresh on every call; nothing here
//! holds identity across invocations. Regime is a total partition of the
//! EMA-spread axis — every spread value maps to exactly one regime, with
//! the documented ±1% / ±3% default breakpoints.

use serde::{Deserialize, Serialize};

use crate::domain::{volumes, Candle};
use crate::indicators::{volume_profile_with, IndicatorSet, VolumeTrend};
use crate::error::Result;
use crate::tunables::{RegimeBands, Tunables};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Up,
    Down,
    Sideways,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Volatility {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Momentum {
    Bullish,
    Bearish,
    Neutral,
}

/// Coarse trend-strength classification from the EMA9/EMA21 spread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketRegime {
    StrongUptrend,
    WeakUptrend,
    Ranging,
    WeakDowntrend,
    StrongDowntrend,
}

impl MarketRegime {
    pub fn is_strong_trend(&self) -> bool {
        matches!(self, Self::StrongUptrend | Self::StrongDowntrend)
    }
}

/// Qualitative descriptors for the current window.
///
/// Overbought/oversold are reported as conditions rather than folded into
/// `momentum`; the signal generator interprets them per strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketConditions {
    pub trend: Trend,
    pub volatility: Volatility,
    pub volume: VolumeTrend,
    pub momentum: Momentum,
    pub overbought: bool,
    pub oversold: bool,
}

/// Classify trend, volatility, volume, and momentum from the indicator set.
pub fn classify(
    candles: &[Candle],
    indicators: &IndicatorSet,
    tunables: &Tunables,
) -> Result<MarketConditions> {
    let spread_pct = indicators.ema_spread_pct();
    let trend = if spread_pct > tunables.trend_epsilon_pct {
        Trend::Up
    } else if spread_pct < -tunables.trend_epsilon_pct {
        Trend::Down
    } else {
        Trend::Sideways
    };

    let width = indicators.bollinger.relative_width();
    let volatility = if width < tunables.volatility_low {
        Volatility::Low
    } else if width > tunables.volatility_high {
        Volatility::High
    } else {
        Volatility::Medium
    };

    let volume = volume_profile_with(
        &volumes(candles),
        tunables.volume_increase_ratio,
        tunables.volume_decrease_ratio,
    )?
    .trend;

    let rsi = indicators.rsi;
    let momentum = if rsi > 50.0 && rsi <= 70.0 && trend == Trend::Up {
        Momentum::Bullish
    } else if rsi >= 30.0 && rsi < 50.0 && trend == Trend::Down {
        Momentum::Bearish
    } else {
        Momentum::Neutral
    };

    Ok(MarketConditions {
        trend,
        volatility,
        volume,
        momentum,
        overbought: rsi > 70.0,
        oversold: rsi < 30.0,
    })
}

/// Map the EMA spread onto a regime.
///
/// Boundary values resolve toward the weaker classification: a spread of
/// exactly `strong_pct` is a weak trend, exactly `weak_pct` is ranging.
pub fn market_regime(ema9: f64, ema21: f64, bands: &RegimeBands) -> MarketRegime {
    let spread_pct = (ema9 - ema21) / ema21 * 100.0;
    if spread_pct > bands.strong_pct {
        MarketRegime::StrongUptrend
    } else if spread_pct > bands.weak_pct {
        MarketRegime::WeakUptrend
    } else if spread_pct >= -bands.weak_pct {
        MarketRegime::Ranging
    } else if spread_pct >= -bands.strong_pct {
        MarketRegime::WeakDowntrend
    } else {
        MarketRegime::StrongDowntrend
    }
}
