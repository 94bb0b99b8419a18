// In crates/scoring/src/types.rs

use core_types::Decision;
use serde::{Deserialize, Serialize};

pub const DEFAULT_ALPHA: f64 = 0.4;
pub const DEFAULT_POS_THRESHOLD: f64 = 0.25;
pub const DEFAULT_NEG_THRESHOLD: f64 = -0.25;

/// The tunable parameters of the aggregator and the decision rule.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct ScoringSettings {
    /// EMA decay; the weight given to each newer observation.
    #[serde(default = "default_alpha")]
    pub alpha: f64,
    /// Scores at or above this value are a BUY.
    #[serde(default = "default_pos_threshold")]
    pub pos_threshold: f64,
    /// Scores at or below this value are a SELL.
    #[serde(default = "default_neg_threshold")]
    pub neg_threshold: f64,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            pos_threshold: DEFAULT_POS_THRESHOLD,
            neg_threshold: DEFAULT_NEG_THRESHOLD,
        }
    }
}

fn default_alpha() -> f64 { DEFAULT_ALPHA }
fn default_pos_threshold() -> f64 { DEFAULT_POS_THRESHOLD }
fn default_neg_threshold() -> f64 { DEFAULT_NEG_THRESHOLD }

/// The outcome of scoring one ordered run of headlines.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Assessment {
    pub score: f64,
    pub decision: Decision,
    /// How many headlines went into the score.
    pub observations: usize,
}
