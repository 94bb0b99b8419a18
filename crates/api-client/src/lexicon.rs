// In crates/api-client/src/lexicon.rs

use std::collections::HashMap;

use async_trait::async_trait;
use core_types::{Classification, SentimentLabel};

use crate::SentimentClassifier;
use crate::error::Result;

/// Words that flip the polarity of the next sentiment-bearing term.
const NEGATIONS: &[&str] = &["not", "no", "never", "without", "fails", "failed"];

/// Offline, rule-based classifier over a small financial word list.
///
/// Useful without network access or inference quota. Far less accurate than
/// FinBERT; it only looks at individual words and simple negation.
#[derive(Debug, Clone)]
pub struct LexiconClassifier {
    words: HashMap<&'static str, f64>,
}

impl Default for LexiconClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl LexiconClassifier {
    pub fn new() -> Self {
        let positive = [
            ("beat", 0.6), ("beats", 0.6), ("bullish", 0.8), ("surge", 0.7), ("surges", 0.7),
            ("surged", 0.7), ("rally", 0.7), ("rallies", 0.7), ("soar", 0.8), ("soars", 0.8),
            ("soared", 0.8), ("gain", 0.5), ("gains", 0.5), ("jump", 0.6), ("jumps", 0.6),
            ("profit", 0.6), ("growth", 0.6), ("record", 0.6), ("upgrade", 0.6),
            ("upgraded", 0.6), ("outperform", 0.7), ("strong", 0.5), ("rise", 0.5),
            ("rises", 0.5), ("exceed", 0.6), ("exceeds", 0.6), ("rebound", 0.5),
            ("recovery", 0.5), ("optimistic", 0.6), ("boost", 0.5), ("boosts", 0.5),
        ];
        let negative = [
            ("miss", -0.6), ("misses", -0.6), ("bearish", -0.8), ("crash", -0.9),
            ("plunge", -0.8), ("plunges", -0.8), ("drop", -0.6), ("drops", -0.6),
            ("fall", -0.5), ("falls", -0.5), ("decline", -0.6), ("declines", -0.6),
            ("loss", -0.6), ("losses", -0.6), ("weak", -0.5), ("downgrade", -0.6),
            ("downgraded", -0.6), ("lawsuit", -0.6), ("probe", -0.5), ("fraud", -0.9),
            ("slump", -0.7), ("slumps", -0.7), ("tumble", -0.7), ("tumbles", -0.7),
            ("curbs", -0.5), ("ban", -0.6), ("recall", -0.5), ("layoffs", -0.6),
            ("warning", -0.5), ("cut", -0.4), ("cuts", -0.4),
        ];

        Self {
            words: positive.into_iter().chain(negative).collect(),
        }
    }

    /// Sums the weights of known terms, flipping a term that follows a negation.
    pub fn raw_score(&self, text: &str) -> f64 {
        let mut score = 0.0;
        let mut negate = false;

        for token in text
            .split(|c: char| !c.is_alphanumeric() && c != '\'')
            .filter(|t| !t.is_empty())
        {
            let token = token.to_lowercase();
            if NEGATIONS.contains(&token.as_str()) || token.ends_with("n't") {
                negate = true;
                continue;
            }
            if let Some(weight) = self.words.get(token.as_str()) {
                score += if negate { -weight } else { *weight };
                negate = false;
            }
        }

        score
    }
}

#[async_trait]
impl SentimentClassifier for LexiconClassifier {
    fn name(&self) -> &'static str {
        "FinancialLexicon"
    }

    async fn classify(&self, text: &str) -> Result<Classification> {
        let score = self.raw_score(text);
        let confidence = score.abs().min(1.0);

        let classification = if score > 0.0 {
            Classification::new(SentimentLabel::Positive, confidence)?
        } else if score < 0.0 {
            Classification::new(SentimentLabel::Negative, confidence)?
        } else {
            Classification::new(SentimentLabel::Neutral, 1.0)?
        };
        Ok(classification)
    }
}
