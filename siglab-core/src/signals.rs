//! Signal generator — per-strategy confidence scores and the recommendation.
//!
//! Both scores live on one directional 0-100 scale: above 50 favors longs,
//! below 50 favors shorts, 50 is neutral. Momentum reads trend continuation;
//! mean reversion reads snap-back toward the middle of the range. Both are
//! always computed together; the caller decides which to act on.

use serde::{Deserialize, Serialize};

use crate::conditions::{MarketConditions, MarketRegime, Momentum, Trend};
use crate::indicators::IndicatorSet;
use crate::patterns::PatternScan;
use crate::tunables::{TrendSuppression, Tunables};

/// Strategy selector for backtests and the live handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    Momentum,
    MeanReversion,
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Momentum => write!(f, "momentum"),
            Self::MeanReversion => write!(f, "mean_reversion"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Recommendation {
    Bullish,
    Bearish,
    BuyDip,
    SellRally,
    Hold,
}

/// Both strategy scores plus the thresholded recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalSet {
    pub momentum: u8,
    pub mean_reversion: u8,
    pub recommendation: Recommendation,
}

impl SignalSet {
    pub fn strength(&self, strategy: Strategy) -> u8 {
        match strategy {
            Strategy::Momentum => self.momentum,
            Strategy::MeanReversion => self.mean_reversion,
        }
    }
}

/// Compute both signals and the recommendation.
///
/// `last_close` is the close of the window's final candle; the
/// mean-reversion score reads its position inside the Bollinger bands.
pub fn generate_signals(
    indicators: &IndicatorSet,
    conditions: &MarketConditions,
    regime: MarketRegime,
    patterns: &PatternScan,
    last_close: f64,
    tunables: &Tunables,
) -> SignalSet {
    let momentum = momentum_signal(indicators, conditions, regime, tunables);
    let mean_reversion =
        mean_reversion_signal(indicators, conditions, regime, patterns, last_close, tunables);
    let recommendation = recommend(momentum, mean_reversion, tunables);
    SignalSet {
        momentum,
        mean_reversion,
        recommendation,
    }
}

/// Momentum confidence: trend/momentum alignment, crossover recency, and
/// regime agreement.
pub fn momentum_signal(
    indicators: &IndicatorSet,
    conditions: &MarketConditions,
    regime: MarketRegime,
    tunables: &Tunables,
) -> u8 {
    let mut score: i32 = 50;

    match conditions.trend {
        Trend::Up => score += 15,
        Trend::Down => score -= 15,
        Trend::Sideways => {}
    }
    match conditions.momentum {
        Momentum::Bullish => score += 15,
        Momentum::Bearish => score -= 15,
        Momentum::Neutral => {}
    }

    // A crossover is recent while the spread is past the sideways epsilon
    // but still inside the weak band.
    let spread = indicators.ema_spread_pct();
    let weak = tunables.regime_bands.weak_pct;
    if spread > tunables.trend_epsilon_pct && spread <= weak {
        score += 10;
    } else if spread < -tunables.trend_epsilon_pct && spread >= -weak {
        score -= 10;
    }

    // Strong regimes amplify an aligned score and drag a contradicting one
    // back toward neutral.
    let boost = i32::from(tunables.regime_momentum_boost);
    match regime {
        MarketRegime::StrongUptrend => {
            if score >= 50 {
                score += boost;
            } else {
                score += boost.min(50 - score);
            }
        }
        MarketRegime::StrongDowntrend => {
            if score <= 50 {
                score -= boost;
            } else {
                score -= boost.min(score - 50);
            }
        }
        _ => {}
    }

    clamp_score(score)
}

/// Mean-reversion confidence: RSI extremity, band-edge proximity, regime,
/// and reversal patterns.
pub fn mean_reversion_signal(
    indicators: &IndicatorSet,
    conditions: &MarketConditions,
    regime: MarketRegime,
    patterns: &PatternScan,
    last_close: f64,
    tunables: &Tunables,
) -> u8 {
    // A strong trend suppresses mean reversion. The penalty variant below is
    // known to let high base scores through; Block pins the score to neutral
    // so no reversal trade can fire.
    if regime.is_strong_trend() && tunables.trend_suppression == TrendSuppression::Block {
        return 50;
    }

    let mut score: i32 = 50;

    let rsi = indicators.rsi;
    if conditions.oversold {
        score += 20;
        if rsi < 20.0 {
            score += 10;
        }
    } else if conditions.overbought {
        score -= 20;
        if rsi > 80.0 {
            score -= 10;
        }
    }

    let percent_b = indicators.bollinger.percent_b(last_close);
    if percent_b <= 0.1 {
        score += 15;
    } else if percent_b >= 0.9 {
        score -= 15;
    }

    if patterns.liquidity_sweep.is_bullish() || patterns.chart_pattern.is_bullish() {
        score += 15;
    }
    if patterns.liquidity_sweep.is_bearish() || patterns.chart_pattern.is_bearish() {
        score -= 15;
    }

    match regime {
        MarketRegime::Ranging => {
            // More conviction in whichever direction the evidence points.
            let boost = i32::from(tunables.ranging_reversion_boost);
            if score > 50 {
                score += boost;
            } else if score < 50 {
                score -= boost;
            }
        }
        MarketRegime::StrongUptrend | MarketRegime::StrongDowntrend => {
            // Penalize: pull conviction toward neutral without crossing it.
            let penalty = i32::from(tunables.strong_trend_reversion_penalty);
            if score > 50 {
                score = (score - penalty).max(50);
            } else if score < 50 {
                score = (score + penalty).min(50);
            }
        }
        _ => {}
    }

    clamp_score(score)
}

/// Thresholded recommendation: momentum first, then mean reversion.
pub fn recommend(momentum: u8, mean_reversion: u8, tunables: &Tunables) -> Recommendation {
    if momentum > tunables.bullish_threshold {
        Recommendation::Bullish
    } else if momentum < tunables.bearish_threshold {
        Recommendation::Bearish
    } else if mean_reversion > tunables.bullish_threshold {
        Recommendation::BuyDip
    } else if mean_reversion < tunables.bearish_threshold {
        Recommendation::SellRally
    } else {
        Recommendation::Hold
    }
}

fn clamp_score(score: i32) -> u8 {
    score.clamp(0, 100) as u8
}
