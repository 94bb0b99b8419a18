// In crates/core-types/src/types.rs

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A single news item as delivered by a headline source.
///
/// Only `text` and `published_at` take part in scoring. The remaining fields
/// are carried along so the scored headlines can be exported as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Headline {
    /// The headline (article title).
    pub text: String,
    /// When the article was published.
    pub published_at: DateTime<Utc>,
    /// The article summary, if the source provides one.
    #[serde(default)]
    pub description: Option<String>,
    /// The publisher name (e.g. "Reuters").
    #[serde(default)]
    pub source: Option<String>,
    /// Link to the original article.
    #[serde(default)]
    pub url: Option<String>,
}

impl Headline {
    /// Creates a headline with only the fields needed for scoring.
    pub fn new(text: impl Into<String>, published_at: DateTime<Utc>) -> Self {
        Self {
            text: text.into(),
            published_at,
            description: None,
            source: None,
            url: None,
        }
    }
}

/// The discrete label a sentiment classifier assigns to a text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl SentimentLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Neutral => "neutral",
            SentimentLabel::Negative => "negative",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SentimentLabel {
    type Err = Error;

    /// Parses a classifier label case-insensitively ("Positive", "NEGATIVE", ...).
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "positive" => Ok(SentimentLabel::Positive),
            "neutral" => Ok(SentimentLabel::Neutral),
            "negative" => Ok(SentimentLabel::Negative),
            other => Err(Error::UnknownLabel(other.to_string())),
        }
    }
}

/// What a classifier returns for one piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub label: SentimentLabel,
    /// Model confidence in `label`, within `[0, 1]`.
    pub confidence: f64,
}

impl Classification {
    /// Creates a classification, rejecting confidences outside `[0, 1]` (and NaN).
    pub fn new(label: SentimentLabel, confidence: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&confidence) {
            return Err(Error::InvalidConfidence(confidence));
        }
        Ok(Self { label, confidence })
    }

    /// Maps the label onto a signed magnitude:
    /// positive → `+confidence`, negative → `-confidence`, neutral → `0`.
    pub fn signed_value(&self) -> f64 {
        match self.label {
            SentimentLabel::Positive => self.confidence,
            SentimentLabel::Negative => -self.confidence,
            SentimentLabel::Neutral => 0.0,
        }
    }
}

/// A headline together with its classification. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredHeadline {
    headline: Headline,
    classification: Classification,
}

impl ScoredHeadline {
    pub fn new(headline: Headline, classification: Classification) -> Self {
        Self { headline, classification }
    }

    /// Convenience constructor that validates the confidence.
    pub fn from_parts(headline: Headline, label: SentimentLabel, confidence: f64) -> Result<Self> {
        Ok(Self::new(headline, Classification::new(label, confidence)?))
    }

    pub fn headline(&self) -> &Headline {
        &self.headline
    }

    pub fn label(&self) -> SentimentLabel {
        self.classification.label
    }

    pub fn confidence(&self) -> f64 {
        self.classification.confidence
    }

    pub fn signed_value(&self) -> f64 {
        self.classification.signed_value()
    }
}

/// The naive trading recommendation derived from the aggregated score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Decision {
    Buy,
    Hold,
    Sell,
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Buy => write!(f, "BUY"),
            Decision::Hold => write!(f, "HOLD"),
            Decision::Sell => write!(f, "SELL"),
        }
    }
}
