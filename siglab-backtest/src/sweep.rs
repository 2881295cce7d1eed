//! Parameter sweeps over strategy and threshold grids.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use siglab_core::domain::Candle;
use siglab_core::signals::Strategy;

use crate::config::{BacktestConfig, RunId};
use crate::simulator::{run_backtest, Result};
use crate::stats::BacktestStats;

/// Grid of parameter values to sweep. The cartesian product of the two
/// axes defines the run set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepGrid {
    pub strategies: Vec<Strategy>,
    pub thresholds: Vec<u8>,
}

impl Default for SweepGrid {
    fn default() -> Self {
        Self {
            strategies: vec![Strategy::Momentum, Strategy::MeanReversion],
            thresholds: vec![60, 65, 70, 75, 80],
        }
    }
}

impl SweepGrid {
    /// Expands the grid into concrete configs, strategy-major order.
    pub fn expand(&self, base: &BacktestConfig) -> Vec<BacktestConfig> {
        let mut configs = Vec::with_capacity(self.strategies.len() * self.thresholds.len());
        for &strategy in &self.strategies {
            for &threshold in &self.thresholds {
                configs.push(BacktestConfig {
                    strategy,
                    signal_threshold: threshold,
                    ..base.clone()
                });
            }
        }
        configs
    }
}

/// One row of sweep output: the varied parameters plus the run's stats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepRow {
    pub run_id: RunId,
    pub strategy: Strategy,
    pub signal_threshold: u8,
    pub stats: BacktestStats,
}

/// Runs every grid point against the same candle series in parallel.
///
/// Rows come back in grid order regardless of which worker finished
/// first, so sweep output is reproducible run to run.
pub fn run_sweep(
    candles: &[Candle],
    base: &BacktestConfig,
    grid: &SweepGrid,
) -> Result<Vec<SweepRow>> {
    grid.expand(base)
        .par_iter()
        .map(|config| {
            let report = run_backtest(candles, config)?;
            Ok(SweepRow {
                run_id: report.run_id,
                strategy: config.strategy,
                signal_threshold: config.signal_threshold,
                stats: BacktestStats::compute(&report.trades),
            })
        })
        .collect()
}
