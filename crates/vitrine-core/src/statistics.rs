//! Progress and score statistics shared by the quiz engines.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Percentage of a session covered when the cursor sits on `current`
/// (zero-based) out of `total` steps.
///
/// Returns 0.0 for an empty session and never exceeds 100.0.
pub fn progress_percent(current: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let step = (current + 1).min(total);
    step as f64 / total as f64 * 100.0
}

/// Rounded percentage of `score` out of `total`, 0 when there is nothing to score.
pub fn percentage(score: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (score as f64 / total as f64 * 100.0).round() as u32
}

/// Coarse grading of a trivia result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceTier {
    Excellent,
    WellDone,
    NotBad,
    KeepExploring,
}

impl PerformanceTier {
    /// Tier for a rounded percentage.
    pub fn from_percentage(percent: u32) -> Self {
        match percent {
            80.. => PerformanceTier::Excellent,
            60..=79 => PerformanceTier::WellDone,
            40..=59 => PerformanceTier::NotBad,
            _ => PerformanceTier::KeepExploring,
        }
    }
}

impl fmt::Display for PerformanceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PerformanceTier::Excellent => write!(f, "excellent"),
            PerformanceTier::WellDone => write!(f, "well done"),
            PerformanceTier::NotBad => write!(f, "not bad"),
            PerformanceTier::KeepExploring => write!(f, "keep exploring"),
        }
    }
}
