// In crates/engine/src/lib.rs

pub mod error;

use std::collections::HashSet;

use api_client::{HeadlineQuery, HeadlineSource, SentimentClassifier};
use chrono::{DateTime, Duration, Utc};
use core_types::{Classification, Headline, ScoredHeadline};
use scoring::{Assessment, Scorer, ScoringSettings};

pub use error::{Error, Result};

/// One invocation of the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct RunRequest {
    pub ticker: String,
    /// Look-back window in days, at least 1.
    pub days: u32,
    pub language: String,
    pub page_size: u32,
}

/// Everything a run produced, ready for reporting.
#[derive(Debug, Clone)]
pub struct SentimentRun {
    /// Upper-cased ticker.
    pub ticker: String,
    pub window_start: DateTime<Utc>,
    pub window_end: DateTime<Utc>,
    /// Headlines returned by the source.
    pub fetched: usize,
    /// Headlines left after window filtering and de-duplication.
    pub considered: usize,
    /// Headlines the classifier failed on.
    pub skipped: usize,
    /// Classified headlines, most recent first.
    pub scored: Vec<ScoredHeadline>,
    pub assessment: Assessment,
}

/// The pipeline orchestrator: fetch → classify → aggregate → decide.
pub struct Engine {
    scorer: Scorer,
    source: Box<dyn HeadlineSource>,
    classifier: Box<dyn SentimentClassifier>,
}

impl Engine {
    /// Validates the scoring settings before taking ownership of the
    /// collaborators, so a misconfiguration never reaches the network.
    pub fn new(
        settings: &ScoringSettings,
        source: Box<dyn HeadlineSource>,
        classifier: Box<dyn SentimentClassifier>,
    ) -> Result<Self> {
        let scorer = Scorer::from_settings(settings)?;
        Ok(Self { scorer, source, classifier })
    }

    /// Runs the pipeline once for the window ending at `now`.
    pub async fn run(&self, request: &RunRequest, now: DateTime<Utc>) -> Result<SentimentRun> {
        let ticker = request.ticker.trim();
        if ticker.is_empty() {
            return Err(Error::InvalidRequest("ticker must not be empty".to_string()));
        }
        if request.days == 0 {
            return Err(Error::InvalidRequest("look-back window must be at least one day".to_string()));
        }

        // --- 1. Fetch ---
        let window_start = now
            .checked_sub_signed(Duration::days(i64::from(request.days)))
            .ok_or_else(|| {
                Error::InvalidRequest(format!("a {}-day look-back window is out of range", request.days))
            })?;
        let query = HeadlineQuery {
            ticker: ticker.to_string(),
            from: window_start,
            to: now,
            language: request.language.clone(),
            page_size: request.page_size,
        };

        tracing::info!(ticker, days = request.days, source = self.source.name(), "Fetching headlines...");
        let fetched = self
            .source
            .fetch_headlines(&query)
            .await
            .map_err(|error| Error::Fetch { source_name: self.source.name(), error })?;
        let fetched_count = fetched.len();

        let headlines = prepare_headlines(fetched, window_start);
        tracing::info!(fetched = fetched_count, considered = headlines.len(), "Headlines ready for classification.");

        // --- 2. Classify (sequentially, order preserved) ---
        let considered = headlines.len();
        let mut scored = Vec::with_capacity(considered);
        let mut skipped = 0;

        for headline in headlines {
            match self.classify(&headline.text).await {
                Ok(classification) => {
                    tracing::debug!(
                        label = %classification.label,
                        confidence = classification.confidence,
                        text = %headline.text,
                        "Classified headline."
                    );
                    scored.push(ScoredHeadline::new(headline, classification));
                }
                Err(e) => {
                    skipped += 1;
                    tracing::warn!(error = %e, text = %headline.text, "Classifier failed; skipping headline.");
                }
            }
        }

        // --- 3. Aggregate & decide ---
        let assessment = self.scorer.assess(&scored);
        tracing::info!(
            score = assessment.score,
            decision = %assessment.decision,
            scored = scored.len(),
            skipped,
            "Run complete."
        );

        Ok(SentimentRun {
            ticker: ticker.to_uppercase(),
            window_start,
            window_end: now,
            fetched: fetched_count,
            considered,
            skipped,
            scored,
            assessment,
        })
    }

    /// Classifies one text, re-checking the confidence whatever the classifier returns.
    async fn classify(&self, text: &str) -> api_client::Result<Classification> {
        let raw = self.classifier.classify(text).await?;
        Ok(Classification::new(raw.label, raw.confidence)?)
    }
}

/// Drops headlines older than `window_start`, orders the rest most recent
/// first (ties keep fetch order), and removes repeated `(text, published_at)` pairs.
pub fn prepare_headlines(mut headlines: Vec<Headline>, window_start: DateTime<Utc>) -> Vec<Headline> {
    headlines.retain(|h| h.published_at >= window_start);
    headlines.sort_by(|a, b| b.published_at.cmp(&a.published_at));

    let mut seen = HashSet::new();
    headlines.retain(|h| seen.insert((h.text.clone(), h.published_at)));
    headlines
}
