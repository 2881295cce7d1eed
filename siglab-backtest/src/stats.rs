//! Aggregate statistics over a completed trade ledger.

use serde::{Deserialize, Serialize};

use crate::simulator::{ExitReason, Outcome, TradeResult};

/// How many trades ended at each rung of the exit ladder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExitCounts {
    pub tp1: usize,
    pub tp2: usize,
    pub tp3: usize,
    pub stop_loss: usize,
    pub timeout: usize,
}

/// Summary statistics for one backtest run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestStats {
    pub total_trades: usize,
    pub wins: usize,
    pub losses: usize,
    pub partials: usize,
    /// Fraction of trades that are full wins, 0.0 when no trades ran.
    pub win_rate: f64,
    /// Gross profit over gross loss, capped at 100.
    pub profit_factor: f64,
    /// Sum of per-trade percentage returns.
    pub total_pnl_percent: f64,
    pub avg_pnl_percent: f64,
    pub avg_duration_candles: f64,
    pub exits: ExitCounts,
    /// Mean entry signal strength of winning trades, 0.0 without wins.
    pub avg_strength_wins: f64,
    /// Mean entry signal strength of losing trades, 0.0 without losses.
    pub avg_strength_losses: f64,
    /// Mean entry signal strength of partial trades, 0.0 without partials.
    pub avg_strength_partials: f64,
}

impl BacktestStats {
    /// Computes all statistics in one pass over the ledger.
    pub fn compute(trades: &[TradeResult]) -> Self {
        let total_trades = trades.len();
        let mut wins = 0;
        let mut losses = 0;
        let mut partials = 0;
        let mut gross_profit = 0.0;
        let mut gross_loss = 0.0;
        let mut total_pnl = 0.0;
        let mut total_duration = 0usize;
        let mut exits = ExitCounts::default();
        let mut strength_wins = 0.0;
        let mut strength_losses = 0.0;
        let mut strength_partials = 0.0;

        for trade in trades {
            total_pnl += trade.pnl_percent;
            total_duration += trade.duration_candles;
            if trade.pnl_percent >= 0.0 {
                gross_profit += trade.pnl_percent;
            } else {
                gross_loss += -trade.pnl_percent;
            }
            match trade.outcome {
                Outcome::Win => {
                    wins += 1;
                    strength_wins += trade.setup.signal_strength;
                }
                Outcome::Loss => {
                    losses += 1;
                    strength_losses += trade.setup.signal_strength;
                }
                Outcome::Partial => {
                    partials += 1;
                    strength_partials += trade.setup.signal_strength;
                }
            }
            match trade.exit_reason {
                ExitReason::Tp1 => exits.tp1 += 1,
                ExitReason::Tp2 => exits.tp2 += 1,
                ExitReason::Tp3 => exits.tp3 += 1,
                ExitReason::StopLoss => exits.stop_loss += 1,
                ExitReason::Timeout => exits.timeout += 1,
            }
        }

        let win_rate = if total_trades == 0 {
            0.0
        } else {
            wins as f64 / total_trades as f64
        };
        let profit_factor = if total_trades == 0 {
            0.0
        } else if gross_loss < 1e-10 {
            if gross_profit > 0.0 {
                100.0
            } else {
                0.0
            }
        } else {
            (gross_profit / gross_loss).min(100.0)
        };
        let avg_pnl_percent = if total_trades == 0 {
            0.0
        } else {
            total_pnl / total_trades as f64
        };
        let avg_duration_candles = if total_trades == 0 {
            0.0
        } else {
            total_duration as f64 / total_trades as f64
        };
        let avg_strength_wins = if wins == 0 {
            0.0
        } else {
            strength_wins / wins as f64
        };
        let avg_strength_losses = if losses == 0 {
            0.0
        } else {
            strength_losses / losses as f64
        };
        let avg_strength_partials = if partials == 0 {
            0.0
        } else {
            strength_partials / partials as f64
        };

        Self {
            total_trades,
            wins,
            losses,
            partials,
            win_rate,
            profit_factor,
            total_pnl_percent: total_pnl,
            avg_pnl_percent,
            avg_duration_candles,
            exits,
            avg_strength_wins,
            avg_strength_losses,
            avg_strength_partials,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulator::{Direction, TradeSetup};
    use chrono::{TimeZone, Utc};
    use siglab_core::signals::Strategy;

    fn trade(pnl: f64, reason: ExitReason, outcome: Outcome, strength: f64) -> TradeResult {
        let ts = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        TradeResult {
            setup: TradeSetup {
                entry_index: 0,
                entry_timestamp: ts,
                entry_price: 100.0,
                direction: Direction::Long,
                strategy: Strategy::Momentum,
                signal_strength: strength,
                tp1: 101.5,
                tp2: 103.0,
                tp3: 105.0,
                stop_loss: 98.0,
            },
            exit_index: 4,
            exit_timestamp: ts,
            exit_price: 100.0 + pnl,
            exit_reason: reason,
            outcome,
            pnl_percent: pnl,
            duration_candles: 4,
        }
    }

    #[test]
    fn empty_ledger_is_all_zeros() {
        let stats = BacktestStats::compute(&[]);
        assert_eq!(stats.total_trades, 0);
        assert_eq!(stats.win_rate, 0.0);
        assert_eq!(stats.profit_factor, 0.0);
        assert_eq!(stats.avg_pnl_percent, 0.0);
    }

    #[test]
    fn mixed_ledger_counts_and_rates() {
        let trades = vec![
            trade(1.5, ExitReason::Tp1, Outcome::Win, 80.0),
            trade(3.0, ExitReason::Tp2, Outcome::Win, 90.0),
            trade(-2.0, ExitReason::StopLoss, Outcome::Loss, 72.0),
            trade(0.4, ExitReason::Timeout, Outcome::Partial, 75.0),
        ];
        let stats = BacktestStats::compute(&trades);
        assert_eq!(stats.total_trades, 4);
        assert_eq!(stats.wins, 2);
        assert_eq!(stats.losses, 1);
        assert_eq!(stats.partials, 1);
        assert_eq!(stats.win_rate, 0.5);
        assert_eq!(stats.exits.tp1, 1);
        assert_eq!(stats.exits.tp2, 1);
        assert_eq!(stats.exits.stop_loss, 1);
        assert_eq!(stats.exits.timeout, 1);
        // gross profit 4.9, gross loss 2.0
        assert!((stats.profit_factor - 2.45).abs() < 1e-9);
        assert!((stats.total_pnl_percent - 2.9).abs() < 1e-9);
        assert_eq!(stats.avg_strength_wins, 85.0);
        assert_eq!(stats.avg_strength_losses, 72.0);
        assert_eq!(stats.avg_strength_partials, 75.0);
    }

    #[test]
    fn all_wins_cap_profit_factor() {
        let trades = vec![
            trade(1.5, ExitReason::Tp1, Outcome::Win, 80.0),
            trade(3.0, ExitReason::Tp2, Outcome::Win, 85.0),
        ];
        let stats = BacktestStats::compute(&trades);
        assert_eq!(stats.profit_factor, 100.0);
        assert_eq!(stats.win_rate, 1.0);
        assert_eq!(stats.avg_strength_partials, 0.0);
    }

    #[test]
    fn all_losses_zero_profit_factor() {
        let trades = vec![trade(-2.0, ExitReason::StopLoss, Outcome::Loss, 71.0)];
        let stats = BacktestStats::compute(&trades);
        assert_eq!(stats.profit_factor, 0.0);
        assert_eq!(stats.win_rate, 0.0);
    }
}
