//! SigLab Core — the pure technical-analysis engine.
//!
//! Everything in this crate is a deterministic transform over an in-memory
//! candle slice:
//! - Domain types (candles, indicator sets, market conditions, patterns)
//! - Indicator calculator (EMA, RSI, Bollinger Bands, volume profile)
//! - Market condition classifier and regime detection
//! - Pattern detector (liquidity sweeps, bull flags, double bottoms, structure)
//! - Signal generator (momentum and mean-reversion confidence scores)
//! - The one-shot `analyze` entry point for the live path
//!
//! No I/O, no clocks, no randomness, no state across calls. Safe to invoke
//! from any number of concurrent callers, each with its own candle slice.

pub mod analyze;
pub mod conditions;
pub mod domain;
pub mod error;
pub mod indicators;
pub mod patterns;
pub mod signals;
pub mod tunables;

pub use analyze::{analyze, AnalyzeConfig, MarketAnalysis};
pub use error::{AnalysisError, Result};

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: all public engine types are Send + Sync.
    ///
    /// Backtest sweeps run one engine call per rayon task, so every value
    /// type crossing that boundary must be thread-safe.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<domain::Candle>();
        require_sync::<domain::Candle>();
        require_send::<indicators::IndicatorSet>();
        require_sync::<indicators::IndicatorSet>();
        require_send::<indicators::VolumeProfile>();
        require_sync::<indicators::VolumeProfile>();
        require_send::<conditions::MarketConditions>();
        require_sync::<conditions::MarketConditions>();
        require_send::<conditions::MarketRegime>();
        require_sync::<conditions::MarketRegime>();
        require_send::<patterns::PatternResult>();
        require_sync::<patterns::PatternResult>();
        require_send::<patterns::PatternScan>();
        require_sync::<patterns::PatternScan>();
        require_send::<signals::SignalSet>();
        require_sync::<signals::SignalSet>();
        require_send::<tunables::Tunables>();
        require_sync::<tunables::Tunables>();
        require_send::<MarketAnalysis>();
        require_sync::<MarketAnalysis>();
        require_send::<AnalysisError>();
        require_sync::<AnalysisError>();
    }
}
