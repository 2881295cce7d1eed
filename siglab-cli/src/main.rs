//! SigLab CLI — analyze, backtest, and sweep commands.
//!
//! Commands:
//! - `analyze` — run the full analysis over a candle file and print JSON
//! - `backtest` — run a backtest from a TOML config and save artifacts
//! - `sweep` — run a strategy/threshold grid and write a CSV summary

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::{DateTime, TimeZone, Utc};
use clap::{Parser, Subcommand};

use siglab_backtest::{
    export_sweep_csv, run_backtest, run_sweep, save_artifacts, BacktestConfig, BacktestStats,
    SweepGrid,
};
use siglab_core::analyze::{analyze, AnalyzeConfig};
use siglab_core::domain::Candle;
use siglab_core::signals::Strategy;

#[derive(Parser)]
#[command(name = "siglab", about = "SigLab CLI — market analysis and backtesting")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full analysis over a candle file and print the result as JSON.
    Analyze {
        /// Candle file (.csv or .json).
        #[arg(long)]
        input: PathBuf,

        /// Optional TOML config file overriding default periods and tunables.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Analyze only the trailing N candles instead of the whole file.
        #[arg(long)]
        tail: Option<usize>,
    },
    /// Run a backtest and save the report, trade ledger, and stats.
    Backtest {
        /// Candle file (.csv or .json).
        #[arg(long)]
        input: PathBuf,

        /// Optional TOML config file (full `BacktestConfig` surface).
        #[arg(long)]
        config: Option<PathBuf>,

        /// Strategy override: momentum or mean_reversion.
        #[arg(long)]
        strategy: Option<String>,

        /// Signal threshold override (0-100).
        #[arg(long)]
        threshold: Option<u8>,

        /// Output directory for run artifacts.
        #[arg(long, default_value = "results")]
        output_dir: PathBuf,
    },
    /// Run a strategy/threshold sweep and write a CSV summary.
    Sweep {
        /// Candle file (.csv or .json).
        #[arg(long)]
        input: PathBuf,

        /// Optional TOML config file used as the sweep base.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Thresholds to sweep (defaults to 60 65 70 75 80).
        #[arg(long, num_args = 1..)]
        thresholds: Vec<u8>,

        /// Output CSV path.
        #[arg(long, default_value = "sweep.csv")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            input,
            config,
            tail,
        } => run_analyze(&input, config.as_deref(), tail),
        Commands::Backtest {
            input,
            config,
            strategy,
            threshold,
            output_dir,
        } => run_backtest_cmd(&input, config.as_deref(), strategy, threshold, &output_dir),
        Commands::Sweep {
            input,
            config,
            thresholds,
            output,
        } => run_sweep_cmd(&input, config.as_deref(), thresholds, &output),
    }
}

fn run_analyze(input: &Path, config_path: Option<&Path>, tail: Option<usize>) -> Result<()> {
    let candles = load_candles(input)?;
    let config = match config_path {
        Some(path) => load_backtest_config(path)?.analyze_config(),
        None => AnalyzeConfig::default(),
    };

    let window = match tail {
        Some(n) if n < candles.len() => &candles[candles.len() - n..],
        _ => &candles[..],
    };

    let analysis = analyze(window, &config)
        .with_context(|| format!("analysis failed over {} candles", window.len()))?;
    println!("{}", serde_json::to_string_pretty(&analysis)?);
    Ok(())
}

fn run_backtest_cmd(
    input: &Path,
    config_path: Option<&Path>,
    strategy: Option<String>,
    threshold: Option<u8>,
    output_dir: &Path,
) -> Result<()> {
    let candles = load_candles(input)?;
    let mut config = match config_path {
        Some(path) => load_backtest_config(path)?,
        None => BacktestConfig::default(),
    };
    if let Some(name) = strategy {
        config.strategy = parse_strategy(&name)?;
    }
    if let Some(t) = threshold {
        if t > 100 {
            bail!("--threshold must be between 0 and 100");
        }
        config.signal_threshold = t;
    }

    let report = run_backtest(&candles, &config)?;
    let stats = BacktestStats::compute(&report.trades);
    print_summary(&report.run_id, candles.len(), &stats);

    let run_dir = save_artifacts(&report, output_dir)?;
    println!("Artifacts saved to: {}", run_dir.display());
    Ok(())
}

fn run_sweep_cmd(
    input: &Path,
    config_path: Option<&Path>,
    thresholds: Vec<u8>,
    output: &Path,
) -> Result<()> {
    let candles = load_candles(input)?;
    let base = match config_path {
        Some(path) => load_backtest_config(path)?,
        None => BacktestConfig::default(),
    };
    let mut grid = SweepGrid::default();
    if !thresholds.is_empty() {
        if let Some(&bad) = thresholds.iter().find(|&&t| t > 100) {
            bail!("threshold {bad} out of range (0-100)");
        }
        grid.thresholds = thresholds;
    }

    let rows = run_sweep(&candles, &base, &grid)?;

    println!(
        "{:<16} {:>9} {:>7} {:>9} {:>9} {:>10}",
        "Strategy", "Threshold", "Trades", "Win Rate", "PF", "Total PnL"
    );
    println!("{}", "-".repeat(64));
    for row in &rows {
        println!(
            "{:<16} {:>9} {:>7} {:>8.1}% {:>9.2} {:>9.2}%",
            row.strategy.to_string(),
            row.signal_threshold,
            row.stats.total_trades,
            row.stats.win_rate * 100.0,
            row.stats.profit_factor,
            row.stats.total_pnl_percent,
        );
    }

    let csv = export_sweep_csv(&rows)?;
    std::fs::write(output, &csv)
        .with_context(|| format!("failed to write {}", output.display()))?;
    println!();
    println!("Sweep written to: {}", output.display());
    Ok(())
}

fn parse_strategy(name: &str) -> Result<Strategy> {
    match name {
        "momentum" => Ok(Strategy::Momentum),
        "mean_reversion" => Ok(Strategy::MeanReversion),
        _ => bail!("unknown strategy '{name}'. Valid: momentum, mean_reversion"),
    }
}

fn load_backtest_config(path: &Path) -> Result<BacktestConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("invalid config {}", path.display()))
}

/// Load candles from CSV or JSON, dispatched on the file extension.
fn load_candles(path: &Path) -> Result<Vec<Candle>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    let candles = match ext.as_str() {
        "csv" => load_candles_csv(path)?,
        "json" => load_candles_json(path)?,
        other => bail!("unsupported candle format '.{other}' (expected .csv or .json)"),
    };
    if candles.is_empty() {
        bail!("no candles in {}", path.display());
    }
    Ok(candles)
}

/// CSV columns: timestamp, open, high, low, close, volume. Timestamps may
/// be RFC 3339 strings or unix seconds.
fn load_candles_csv(path: &Path) -> Result<Vec<Candle>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    let mut candles = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("bad CSV record at row {}", i + 2))?;
        if record.len() < 6 {
            bail!(
                "row {}: expected 6 columns (timestamp,open,high,low,close,volume), got {}",
                i + 2,
                record.len()
            );
        }
        let timestamp = parse_timestamp(&record[0])
            .with_context(|| format!("row {}: bad timestamp '{}'", i + 2, &record[0]))?;
        let parse = |field: usize, name: &str| -> Result<f64> {
            record[field]
                .trim()
                .parse::<f64>()
                .with_context(|| format!("row {}: bad {name} '{}'", i + 2, &record[field]))
        };
        candles.push(Candle {
            timestamp,
            open: parse(1, "open")?,
            high: parse(2, "high")?,
            low: parse(3, "low")?,
            close: parse(4, "close")?,
            volume: parse(5, "volume")?,
        });
    }
    Ok(candles)
}

fn load_candles_json(path: &Path) -> Result<Vec<Candle>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid candle JSON in {}", path.display()))
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(secs) = raw.parse::<i64>() {
        return Utc
            .timestamp_opt(secs, 0)
            .single()
            .with_context(|| format!("unix timestamp {secs} out of range"));
    }
    let parsed = DateTime::parse_from_rfc3339(raw)?;
    Ok(parsed.with_timezone(&Utc))
}

fn print_summary(run_id: &str, candle_count: usize, stats: &BacktestStats) {
    println!();
    println!("=== Backtest Result ===");
    println!("Run ID:         {run_id}");
    println!("Candles:        {candle_count}");
    println!("Trades:         {}", stats.total_trades);
    println!();
    println!("--- Performance ---");
    println!("Win Rate:       {:.1}%", stats.win_rate * 100.0);
    println!("Profit Factor:  {:.2}", stats.profit_factor);
    println!("Total PnL:      {:.2}%", stats.total_pnl_percent);
    println!("Avg PnL:        {:.2}%", stats.avg_pnl_percent);
    println!("Avg Duration:   {:.1} candles", stats.avg_duration_candles);
    println!(
        "Exits:          tp1={} tp2={} tp3={} stop={} timeout={}",
        stats.exits.tp1, stats.exits.tp2, stats.exits.tp3, stats.exits.stop_loss,
        stats.exits.timeout
    );
    println!(
        "Signal Edge:    wins avg {:.1}, losses avg {:.1}, partials avg {:.1}",
        stats.avg_strength_wins, stats.avg_strength_losses, stats.avg_strength_partials
    );
    println!();
}
