// In crates/scoring/src/aggregator.rs

use core_types::ScoredHeadline;

use crate::error::{Error, Result};

/// Folds signed headline values into an exponentially weighted moving average.
///
/// The oldest observation seeds the average; each newer one updates it with
/// `score = alpha * value + (1 - alpha) * score`. No bias correction is applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SentimentAggregator {
    alpha: f64,
}

impl SentimentAggregator {
    /// Creates an aggregator. `alpha` must lie in `(0, 1]`.
    pub fn new(alpha: f64) -> Result<Self> {
        if !(alpha > 0.0 && alpha <= 1.0) {
            return Err(Error::InvalidAlpha(alpha));
        }
        Ok(Self { alpha })
    }

    /// Aggregates headlines ordered **most recent first**, as sources return them.
    pub fn aggregate(&self, headlines: &[ScoredHeadline]) -> f64 {
        self.ema(headlines.iter().rev().map(ScoredHeadline::signed_value))
    }

    /// Runs the EMA over values ordered **oldest first**. Empty input yields `0.0`.
    pub fn ema<I>(&self, values: I) -> f64
    where
        I: IntoIterator<Item = f64>,
    {
        let mut values = values.into_iter();
        let Some(seed) = values.next() else {
            return 0.0;
        };
        values.fold(seed, |score, value| self.alpha * value + (1.0 - self.alpha) * score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use core_types::{Headline, SentimentLabel};

    fn scored(label: SentimentLabel, confidence: f64) -> ScoredHeadline {
        let h = Headline::new("headline", Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap());
        ScoredHeadline::from_parts(h, label, confidence).unwrap()
    }

    #[test]
    fn test_alpha_bounds() {
        assert!(SentimentAggregator::new(0.0).is_err());
        assert!(SentimentAggregator::new(-0.2).is_err());
        assert!(SentimentAggregator::new(1.0001).is_err());
        assert!(SentimentAggregator::new(f64::NAN).is_err());
        assert!(SentimentAggregator::new(1.0).is_ok());
        assert!(SentimentAggregator::new(1e-9).is_ok());
    }

    #[test]
    fn test_empty_is_zero() {
        let agg = SentimentAggregator::new(0.4).unwrap();
        assert_eq!(agg.aggregate(&[]), 0.0);
        assert_eq!(agg.ema(std::iter::empty()), 0.0);
    }

    #[test]
    fn test_single_positive_yields_its_confidence() {
        for alpha in [0.05, 0.3, 0.5, 0.99, 1.0] {
            let agg = SentimentAggregator::new(alpha).unwrap();
            let score = agg.aggregate(&[scored(SentimentLabel::Positive, 0.73)]);
            assert_eq!(score, 0.73, "alpha = {alpha}");
        }
    }

    #[test]
    fn test_running_scores_match_worked_example() {
        let agg = SentimentAggregator::new(0.5).unwrap();
        assert!((agg.ema([0.8]) - 0.8).abs() < 1e-12);
        assert!((agg.ema([0.8, -0.2]) - 0.3).abs() < 1e-12);
        assert!((agg.ema([0.8, -0.2, 0.5]) - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_aggregate_iterates_oldest_to_newest() {
        // Most recent first: the newest headline is negative.
        let headlines = vec![
            scored(SentimentLabel::Negative, 1.0),
            scored(SentimentLabel::Positive, 1.0),
        ];
        let agg = SentimentAggregator::new(0.75).unwrap();
        // seed +1.0, then 0.75 * -1.0 + 0.25 * 1.0
        assert!((agg.aggregate(&headlines) - (-0.5)).abs() < 1e-12);
    }

    #[test]
    fn test_alpha_one_tracks_the_newest_value() {
        let agg = SentimentAggregator::new(1.0).unwrap();
        assert_eq!(agg.ema([0.9, -0.4, 0.1, -0.7]), -0.7);
    }

    #[test]
    fn test_neutral_pulls_toward_zero() {
        let agg = SentimentAggregator::new(0.5).unwrap();
        assert!((agg.ema([0.8, 0.0]) - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_monotone_in_every_value() {
        let base = [0.8, -0.2, 0.5, -0.9, 0.0, 0.3];
        for alpha in [0.1, 0.4, 0.5, 0.9, 1.0] {
            let agg = SentimentAggregator::new(alpha).unwrap();
            let reference = agg.ema(base);
            for i in 0..base.len() {
                let mut raised = base;
                raised[i] = (raised[i] + 0.25).min(1.0);
                assert!(
                    agg.ema(raised) >= reference,
                    "raising value {i} lowered the score at alpha {alpha}"
                );
            }
            let all_raised: Vec<f64> = base.iter().map(|v| (v + 0.1_f64).min(1.0)).collect();
            assert!(agg.ema(all_raised) >= reference);
        }
    }
}
