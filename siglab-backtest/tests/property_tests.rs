//! Property-based invariants of the simulator and stats.

use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;

use siglab_backtest::{run_backtest, BacktestConfig, BacktestStats, ExitReason};
use siglab_core::domain::Candle;

fn candles_from_closes(closes: &[f64]) -> Vec<Candle> {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| Candle {
            timestamp: start + Duration::hours(i as i64),
            open: close,
            high: close + 0.5,
            low: close - 0.5,
            close,
            volume: 1000.0,
        })
        .collect()
}

/// Random walks that stay comfortably positive.
fn close_series() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-1.0f64..1.0, 60..150).prop_map(|deltas| {
        let mut closes = Vec::with_capacity(deltas.len() + 1);
        let mut price = 100.0;
        closes.push(price);
        for d in deltas {
            price = (price + d).max(5.0);
            closes.push(price);
        }
        closes
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn backtest_is_deterministic(closes in close_series()) {
        let candles = candles_from_closes(&closes);
        let config = BacktestConfig::default();
        let a = run_backtest(&candles, &config).unwrap();
        let b = run_backtest(&candles, &config).unwrap();
        prop_assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn pnl_sign_matches_exit_reason(closes in close_series()) {
        let candles = candles_from_closes(&closes);
        let config = BacktestConfig { signal_threshold: 60, ..BacktestConfig::default() };
        let report = run_backtest(&candles, &config).unwrap();
        for trade in &report.trades {
            match trade.exit_reason {
                ExitReason::Tp1 | ExitReason::Tp2 | ExitReason::Tp3 => {
                    prop_assert!(trade.pnl_percent > 0.0)
                }
                ExitReason::StopLoss => prop_assert!(trade.pnl_percent < 0.0),
                ExitReason::Timeout => {}
            }
        }
    }

    #[test]
    fn trades_are_ordered_and_bounded(closes in close_series()) {
        let candles = candles_from_closes(&closes);
        let config = BacktestConfig { signal_threshold: 60, ..BacktestConfig::default() };
        let report = run_backtest(&candles, &config).unwrap();
        for pair in report.trades.windows(2) {
            prop_assert!(pair[1].setup.entry_index > pair[0].exit_index);
        }
        for trade in &report.trades {
            prop_assert!(trade.exit_index > trade.setup.entry_index);
            prop_assert!(trade.exit_index < candles.len());
            prop_assert!(trade.duration_candles <= config.max_hold_candles);
            prop_assert!(trade.setup.signal_strength > f64::from(config.signal_threshold));
        }
    }

    #[test]
    fn stats_are_consistent_with_the_ledger(closes in close_series()) {
        let candles = candles_from_closes(&closes);
        let config = BacktestConfig { signal_threshold: 60, ..BacktestConfig::default() };
        let report = run_backtest(&candles, &config).unwrap();
        let stats = BacktestStats::compute(&report.trades);
        prop_assert_eq!(stats.total_trades, report.trades.len());
        prop_assert_eq!(stats.wins + stats.losses + stats.partials, stats.total_trades);
        let exits = stats.exits;
        prop_assert_eq!(
            exits.tp1 + exits.tp2 + exits.tp3 + exits.stop_loss + exits.timeout,
            stats.total_trades
        );
        prop_assert!((0.0..=1.0).contains(&stats.win_rate));
        prop_assert!((0.0..=100.0).contains(&stats.profit_factor));
    }
}
