//! SigLab Backtest — deterministic strategy simulation over candle history.
//!
//! Walks a candle series left to right, opens a simulated trade whenever the
//! configured strategy's signal crosses its threshold, and resolves each
//! trade against a three-level take-profit ladder and one stop-loss. Output
//! is a trade-by-trade ledger plus aggregate statistics; identical input
//! always produces byte-identical output.

pub mod config;
pub mod export;
pub mod simulator;
pub mod stats;
pub mod sweep;

pub use config::{BacktestConfig, ExitLevels, RunId};
pub use export::{
    export_json, export_sweep_csv, export_trades_csv, import_json, load_artifacts, save_artifacts,
};
pub use simulator::{
    run_backtest, BacktestError, BacktestReport, Direction, ExitReason, Outcome, TradeResult,
    TradeSetup, MIN_BACKTEST_CANDLES,
};
pub use stats::{BacktestStats, ExitCounts};
pub use sweep::{run_sweep, SweepGrid, SweepRow};
