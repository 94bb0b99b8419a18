// In crates/scoring/src/decision.rs

use core_types::Decision;

use crate::error::{Error, Result};

/// Maps an aggregated score onto BUY / HOLD / SELL.
///
/// Both boundaries are inclusive toward the directional call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecisionRule {
    pos_threshold: f64,
    neg_threshold: f64,
}

impl DecisionRule {
    /// Creates a rule. `pos_threshold` must be strictly greater than `neg_threshold`.
    pub fn new(pos_threshold: f64, neg_threshold: f64) -> Result<Self> {
        // Written so that NaN on either side is rejected too.
        if !(pos_threshold > neg_threshold) || !pos_threshold.is_finite() || !neg_threshold.is_finite() {
            return Err(Error::InvalidThresholds {
                pos: pos_threshold,
                neg: neg_threshold,
            });
        }
        Ok(Self { pos_threshold, neg_threshold })
    }

    pub fn decide(&self, score: f64) -> Decision {
        if score >= self.pos_threshold {
            Decision::Buy
        } else if score <= self.neg_threshold {
            Decision::Sell
        } else {
            Decision::Hold
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule() -> DecisionRule {
        DecisionRule::new(0.25, -0.25).unwrap()
    }

    #[test]
    fn test_boundaries_are_inclusive() {
        assert_eq!(rule().decide(0.25), Decision::Buy);
        assert_eq!(rule().decide(-0.25), Decision::Sell);
    }

    #[test]
    fn test_strictly_between_holds() {
        assert_eq!(rule().decide(0.0), Decision::Hold);
        assert_eq!(rule().decide(0.2499), Decision::Hold);
        assert_eq!(rule().decide(-0.2499), Decision::Hold);
    }

    #[test]
    fn test_beyond_thresholds() {
        assert_eq!(rule().decide(0.9), Decision::Buy);
        assert_eq!(rule().decide(-0.9), Decision::Sell);
    }

    #[test]
    fn test_misconfigured_thresholds() {
        assert_eq!(
            DecisionRule::new(0.1, 0.2),
            Err(Error::InvalidThresholds { pos: 0.1, neg: 0.2 })
        );
        // Equal thresholds leave no HOLD band and are rejected as well.
        assert!(DecisionRule::new(0.2, 0.2).is_err());
        assert!(DecisionRule::new(f64::NAN, 0.2).is_err());
        assert!(DecisionRule::new(f64::INFINITY, 0.2).is_err());
    }
}
