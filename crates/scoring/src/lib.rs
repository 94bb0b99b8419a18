// In crates/scoring/src/lib.rs

//! Turns a sequence of classified headlines into a single sentiment score and
//! a BUY/HOLD/SELL call. Everything in this crate is pure: no I/O, no clocks.

pub mod aggregator;
pub mod decision;
pub mod error;
pub mod types;

use core_types::{Decision, ScoredHeadline};

pub use aggregator::SentimentAggregator;
pub use decision::DecisionRule;
pub use error::{Error, Result};
pub use types::{Assessment, ScoringSettings};

/// The aggregator and decision rule, validated together.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scorer {
    aggregator: SentimentAggregator,
    rule: DecisionRule,
}

impl Scorer {
    /// Validates both the decay and the thresholds.
    ///
    /// Thresholds are checked first so a run with both problems reports the
    /// threshold misconfiguration.
    pub fn from_settings(settings: &ScoringSettings) -> Result<Self> {
        let rule = DecisionRule::new(settings.pos_threshold, settings.neg_threshold)?;
        let aggregator = SentimentAggregator::new(settings.alpha)?;
        Ok(Self { aggregator, rule })
    }

    /// Scores headlines ordered most recent first.
    ///
    /// With nothing to score the result is a neutral `0.0` and `Hold`,
    /// whatever the thresholds are.
    pub fn assess(&self, headlines: &[ScoredHeadline]) -> Assessment {
        if headlines.is_empty() {
            tracing::debug!("No scored headlines; defaulting to HOLD.");
            return Assessment {
                score: 0.0,
                decision: Decision::Hold,
                observations: 0,
            };
        }

        let score = self.aggregator.aggregate(headlines);
        let decision = self.rule.decide(score);
        tracing::debug!(score, %decision, observations = headlines.len(), "Sentiment assessed.");

        Assessment {
            score,
            decision,
            observations: headlines.len(),
        }
    }
}
