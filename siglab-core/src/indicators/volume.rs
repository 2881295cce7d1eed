//! Volume profile — trailing average, current ratio, and short-term trend.
//!
//! trend compares the trailing-5 mean against the preceding trailing-5 mean:
//! above 1.2× reads increasing, below 0.8× decreasing, else stable.

use serde::{Deserialize, Serialize};

use crate::error::{ensure_min_len, Result};

/// Direction of recent volume relative to the preceding stretch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolumeTrend {
    Increasing,
    Decreasing,
    Stable,
}

/// Volume summary as of the last element of the window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolumeProfile {
    /// Trailing-20 mean volume.
    pub average: f64,
    /// Current volume over the trailing average. 0.0 when the average is 0
    /// (sources that report no volume at all).
    pub ratio: f64,
    pub trend: VolumeTrend,
}

/// Number of trailing volumes averaged for the baseline.
pub const VOLUME_AVERAGE_WINDOW: usize = 20;

const TREND_WINDOW: usize = 5;

/// Volume profile over the trailing window. Requires at least
/// `VOLUME_AVERAGE_WINDOW` entries; zero volumes are tolerated throughout.
pub fn volume_profile(volumes: &[f64]) -> Result<VolumeProfile> {
    volume_profile_with(volumes, 1.2, 0.8)
}

/// As `volume_profile`, with explicit trend breakpoints.
pub fn volume_profile_with(
    volumes: &[f64],
    increase_ratio: f64,
    decrease_ratio: f64,
) -> Result<VolumeProfile> {
    ensure_min_len(volumes.len(), VOLUME_AVERAGE_WINDOW)?;

    let tail = &volumes[volumes.len() - VOLUME_AVERAGE_WINDOW..];
    let average = tail.iter().sum::<f64>() / VOLUME_AVERAGE_WINDOW as f64;
    let current = *volumes.last().expect("non-empty ensured above");
    let ratio = if average == 0.0 { 0.0 } else { current / average };

    let n = volumes.len();
    let recent = mean(&volumes[n - TREND_WINDOW..]);
    let prior = mean(&volumes[n - 2 * TREND_WINDOW..n - TREND_WINDOW]);
    let trend = if prior == 0.0 {
        VolumeTrend::Stable
    } else if recent > increase_ratio * prior {
        VolumeTrend::Increasing
    } else if recent < decrease_ratio * prior {
        VolumeTrend::Decreasing
    } else {
        VolumeTrend::Stable
    };

    Ok(VolumeProfile {
        average,
        ratio,
        trend,
    })
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}
