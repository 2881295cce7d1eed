//! Engine errors.
//!
//! Insufficient history is always an explicit error, never a silent default
//! or a NaN — a caller making a trading decision on fabricated values is a
//! worse failure mode than an explicit rejection. The single sanctioned
//! arithmetic special case (RSI with zero average loss) lives in the RSI
//! implementation, not here.

use thiserror::Error;

/// Errors from analysis calls.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("insufficient data: {required} candles required, got {got}")]
    InsufficientData { required: usize, got: usize },

    #[error("empty candle series")]
    EmptySeries,

    #[error("candle timestamps not strictly increasing at index {index}")]
    NonMonotonicTimestamps { index: usize },

    #[error("invalid indicator period: {0} (must be >= 1)")]
    InvalidPeriod(usize),
}

pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Central minimum-length guard.
///
/// Every indicator, classifier, and the analyze entry point funnel their
/// history requirement through here so the guarantee is uniform downstream.
pub fn ensure_min_len(len: usize, required: usize) -> Result<()> {
    if len == 0 {
        return Err(AnalysisError::EmptySeries);
    }
    if len < required {
        return Err(AnalysisError::InsufficientData { required, got: len });
    }
    Ok(())
}
