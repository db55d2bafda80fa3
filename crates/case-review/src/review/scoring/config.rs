use serde::{Deserialize, Serialize};

use super::super::domain::Rating;

/// Slack applied to inclusive thresholds so a weighted sum that lands a rounding error short
/// of a boundary still counts as reaching it.
const THRESHOLD_EPSILON: f64 = 1e-9;

/// Rubric configuration describing the overall weighting and rating thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub uqc_weight: f64,
    pub cqc_weight: f64,
    pub good_threshold: f64,
    pub ok_threshold: f64,
}

impl ScoringConfig {
    /// Map a completion percentage onto a rating. Both thresholds are inclusive.
    pub fn rate_pct(&self, pct: f64) -> Rating {
        if pct + THRESHOLD_EPSILON >= self.good_threshold {
            Rating::Good
        } else if pct + THRESHOLD_EPSILON >= self.ok_threshold {
            Rating::Ok
        } else {
            Rating::Bad
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            uqc_weight: 0.6,
            cqc_weight: 0.4,
            good_threshold: 0.75,
            ok_threshold: 0.40,
        }
    }
}
