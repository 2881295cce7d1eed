//! Report and ledger export — JSON and CSV artifact generation.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::simulator::{BacktestReport, TradeResult};
use crate::stats::BacktestStats;
use crate::sweep::SweepRow;

/// Serialize a `BacktestReport` to pretty JSON.
pub fn export_json(report: &BacktestReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("failed to serialize BacktestReport to JSON")
}

/// Deserialize a `BacktestReport` from JSON.
pub fn import_json(json: &str) -> Result<BacktestReport> {
    serde_json::from_str(json).context("failed to deserialize BacktestReport from JSON")
}

/// Export a trade ledger as CSV.
///
/// Columns: entry_index, entry_timestamp, direction, strategy,
/// signal_strength, entry_price, exit_index, exit_timestamp, exit_price,
/// exit_reason, outcome, pnl_percent, duration_candles
pub fn export_trades_csv(trades: &[TradeResult]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "entry_index",
        "entry_timestamp",
        "direction",
        "strategy",
        "signal_strength",
        "entry_price",
        "exit_index",
        "exit_timestamp",
        "exit_price",
        "exit_reason",
        "outcome",
        "pnl_percent",
        "duration_candles",
    ])?;

    for t in trades {
        wtr.write_record([
            &t.setup.entry_index.to_string(),
            &t.setup.entry_timestamp.to_rfc3339(),
            &format!("{:?}", t.setup.direction),
            &t.setup.strategy.to_string(),
            &format!("{:.1}", t.setup.signal_strength),
            &format!("{:.6}", t.setup.entry_price),
            &t.exit_index.to_string(),
            &t.exit_timestamp.to_rfc3339(),
            &format!("{:.6}", t.exit_price),
            &format!("{:?}", t.exit_reason),
            &format!("{:?}", t.outcome),
            &format!("{:.4}", t.pnl_percent),
            &t.duration_candles.to_string(),
        ])?;
    }

    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

/// Export sweep rows as CSV, one row per grid point.
pub fn export_sweep_csv(rows: &[SweepRow]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "run_id",
        "strategy",
        "signal_threshold",
        "trades",
        "win_rate",
        "profit_factor",
        "total_pnl_percent",
        "avg_duration_candles",
    ])?;

    for row in rows {
        wtr.write_record([
            &row.run_id,
            &row.strategy.to_string(),
            &row.signal_threshold.to_string(),
            &row.stats.total_trades.to_string(),
            &format!("{:.4}", row.stats.win_rate),
            &format!("{:.4}", row.stats.profit_factor),
            &format!("{:.4}", row.stats.total_pnl_percent),
            &format!("{:.2}", row.stats.avg_duration_candles),
        ])?;
    }

    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

/// Save the artifact set for a single run under `output_dir/<run_id>/`:
/// `report.json` (full `BacktestReport`), `trades.csv`, and `stats.json`.
///
/// Returns the path to the created directory.
pub fn save_artifacts(report: &BacktestReport, output_dir: &Path) -> Result<PathBuf> {
    let run_dir = output_dir.join(&report.run_id);
    std::fs::create_dir_all(&run_dir)
        .with_context(|| format!("failed to create artifact dir: {}", run_dir.display()))?;

    let json = export_json(report)?;
    std::fs::write(run_dir.join("report.json"), &json)?;

    let trades_csv = export_trades_csv(&report.trades)?;
    std::fs::write(run_dir.join("trades.csv"), &trades_csv)?;

    let stats = BacktestStats::compute(&report.trades);
    let stats_json =
        serde_json::to_string_pretty(&stats).context("failed to serialize BacktestStats")?;
    std::fs::write(run_dir.join("stats.json"), &stats_json)?;

    Ok(run_dir)
}

/// Load a `BacktestReport` back from an artifact directory.
pub fn load_artifacts(dir: &Path) -> Result<BacktestReport> {
    let path = dir.join("report.json");
    let json = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    import_json(&json)
}
