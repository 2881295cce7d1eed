//! Walk-forward trade simulator.
//!
//! Scans a candle series with a sliding analysis window, opens a trade
//! whenever the configured strategy's signal clears the threshold, and
//! walks forward candle by candle resolving the exit ladder against each
//! candle's range. Only prefix windows are ever analyzed, so no candle
//! can influence a decision made before it existed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use siglab_core::analyze::analyze;
use siglab_core::domain::Candle;
use siglab_core::error::AnalysisError;
use siglab_core::signals::Strategy;

use crate::config::BacktestConfig;

/// Minimum candles required before a backtest can produce any trade.
pub const MIN_BACKTEST_CANDLES: usize = 50;

#[derive(Debug, Error)]
pub enum BacktestError {
    #[error("insufficient history: backtest requires {required} candles, got {got}")]
    InsufficientHistory { required: usize, got: usize },
    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}

pub type Result<T> = std::result::Result<T, BacktestError>;

/// Trade direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Long,
    Short,
}

/// Which exit condition closed a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExitReason {
    Tp1,
    Tp2,
    Tp3,
    StopLoss,
    Timeout,
}

/// Trade outcome classification.
///
/// Take-profit exits are wins and stop-losses are losses regardless of
/// the realized number; a timeout counts as a partial win only when it
/// closed in profit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Win,
    Loss,
    Partial,
}

/// A trade at the moment of entry, before its outcome is known.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeSetup {
    pub entry_index: usize,
    pub entry_timestamp: DateTime<Utc>,
    pub entry_price: f64,
    pub direction: Direction,
    pub strategy: Strategy,
    /// Signal score oriented by direction: for shorts this is `100 - score`,
    /// so higher always means more conviction.
    pub signal_strength: f64,
    pub tp1: f64,
    pub tp2: f64,
    pub tp3: f64,
    pub stop_loss: f64,
}

/// A completed trade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeResult {
    pub setup: TradeSetup,
    pub exit_index: usize,
    pub exit_timestamp: DateTime<Utc>,
    pub exit_price: f64,
    pub exit_reason: ExitReason,
    pub outcome: Outcome,
    /// Realized return in percent, oriented so profit is positive for
    /// both directions.
    pub pnl_percent: f64,
    /// Candles held, entry exclusive.
    pub duration_candles: usize,
}

/// Full output of a single backtest run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestReport {
    pub run_id: String,
    pub config: BacktestConfig,
    pub candles_scanned: usize,
    pub trades: Vec<TradeResult>,
}

/// Runs a backtest of `config` over `candles`.
///
/// Trades are non-overlapping: after an entry the scan resumes at the
/// candle following the exit. A trade still open when the series ends is
/// closed at the final close with a timeout exit.
pub fn run_backtest(candles: &[Candle], config: &BacktestConfig) -> Result<BacktestReport> {
    let window_len = config.window_len();
    let required = MIN_BACKTEST_CANDLES.max(window_len + 1);
    if candles.len() < required {
        return Err(BacktestError::InsufficientHistory {
            required,
            got: candles.len(),
        });
    }

    let analyze_config = config.analyze_config();
    let mut trades = Vec::new();
    let mut i = window_len - 1;

    // Last index that can host an entry: at least one forward candle must
    // exist to resolve exits against.
    while i + 1 < candles.len() {
        let window = &candles[i + 1 - window_len..=i];
        let analysis = analyze(window, &analyze_config)?;
        let score = f64::from(analysis.signals.strength(config.strategy));
        let threshold = f64::from(config.signal_threshold);

        let direction = if score > threshold {
            Some(Direction::Long)
        } else if score < 100.0 - threshold {
            Some(Direction::Short)
        } else {
            None
        };

        match direction {
            Some(direction) => {
                let entry = candles[i].close;
                let setup = make_setup(i, entry, direction, score, config, &candles[i]);
                let trade = walk_forward(candles, setup, config.max_hold_candles);
                i = trade.exit_index + 1;
                trades.push(trade);
            }
            None => i += 1,
        }
    }

    Ok(BacktestReport {
        run_id: config.run_id(),
        config: config.clone(),
        candles_scanned: candles.len(),
        trades,
    })
}

fn make_setup(
    index: usize,
    entry: f64,
    direction: Direction,
    score: f64,
    config: &BacktestConfig,
    candle: &Candle,
) -> TradeSetup {
    let exits = &config.exits;
    let (tp1, tp2, tp3, stop_loss) = match direction {
        Direction::Long => (
            entry * (1.0 + exits.tp1_pct / 100.0),
            entry * (1.0 + exits.tp2_pct / 100.0),
            entry * (1.0 + exits.tp3_pct / 100.0),
            entry * (1.0 - exits.stop_pct / 100.0),
        ),
        Direction::Short => (
            entry * (1.0 - exits.tp1_pct / 100.0),
            entry * (1.0 - exits.tp2_pct / 100.0),
            entry * (1.0 - exits.tp3_pct / 100.0),
            entry * (1.0 + exits.stop_pct / 100.0),
        ),
    };
    let signal_strength = match direction {
        Direction::Long => score,
        Direction::Short => 100.0 - score,
    };

    TradeSetup {
        entry_index: index,
        entry_timestamp: candle.timestamp,
        entry_price: entry,
        direction,
        strategy: config.strategy,
        signal_strength,
        tp1,
        tp2,
        tp3,
        stop_loss,
    }
}

/// Walks forward from the entry candle resolving exits against each
/// candle's range, one exit at most per candle.
fn walk_forward(candles: &[Candle], setup: TradeSetup, max_hold: usize) -> TradeResult {
    let last = candles.len() - 1;
    let horizon = last.min(setup.entry_index + max_hold.max(1));

    for index in setup.entry_index + 1..=horizon {
        let candle = &candles[index];
        if let Some((price, reason)) = resolve_exit(&setup, candle) {
            return close_trade(setup, index, candle.timestamp, price, reason);
        }
    }

    // Timeout: close at the last candle inside the hold horizon.
    let candle = &candles[horizon];
    close_trade(
        setup,
        horizon,
        candle.timestamp,
        candle.close,
        ExitReason::Timeout,
    )
}

/// Resolves at most one exit against a single candle.
///
/// The stop-loss has priority when both the stop and a take-profit are
/// inside the candle's range, since intrabar ordering is unknowable from
/// OHLC data and the conservative reading is assumed. Among reachable
/// take-profits, the nearest fires. A gap past a level fills at the open
/// rather than the level itself.
fn resolve_exit(setup: &TradeSetup, candle: &Candle) -> Option<(f64, ExitReason)> {
    match setup.direction {
        Direction::Long => {
            if candle.low <= setup.stop_loss {
                // Gap below the stop fills at the open.
                return Some((candle.open.min(setup.stop_loss), ExitReason::StopLoss));
            }
            let ladder = [
                (setup.tp1, ExitReason::Tp1),
                (setup.tp2, ExitReason::Tp2),
                (setup.tp3, ExitReason::Tp3),
            ];
            // Nearest take-profit the candle's high reaches; a gap above
            // a level fills at the open.
            for (level, reason) in ladder {
                if candle.high >= level {
                    return Some((candle.open.max(level), reason));
                }
            }
            None
        }
        Direction::Short => {
            if candle.high >= setup.stop_loss {
                return Some((candle.open.max(setup.stop_loss), ExitReason::StopLoss));
            }
            let ladder = [
                (setup.tp1, ExitReason::Tp1),
                (setup.tp2, ExitReason::Tp2),
                (setup.tp3, ExitReason::Tp3),
            ];
            for (level, reason) in ladder {
                if candle.low <= level {
                    return Some((candle.open.min(level), reason));
                }
            }
            None
        }
    }
}

fn close_trade(
    setup: TradeSetup,
    exit_index: usize,
    exit_timestamp: DateTime<Utc>,
    exit_price: f64,
    exit_reason: ExitReason,
) -> TradeResult {
    let raw = (exit_price - setup.entry_price) / setup.entry_price * 100.0;
    let pnl_percent = match setup.direction {
        Direction::Long => raw,
        Direction::Short => -raw,
    };
    let outcome = match exit_reason {
        ExitReason::Tp1 | ExitReason::Tp2 | ExitReason::Tp3 => Outcome::Win,
        ExitReason::StopLoss => Outcome::Loss,
        ExitReason::Timeout => {
            if pnl_percent > 0.0 {
                Outcome::Partial
            } else {
                Outcome::Loss
            }
        }
    };
    let duration_candles = exit_index - setup.entry_index;

    TradeResult {
        setup,
        exit_index,
        exit_timestamp,
        exit_price,
        exit_reason,
        outcome,
        pnl_percent,
        duration_candles,
    }
}
