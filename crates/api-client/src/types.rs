// In crates/api-client/src/types.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What to ask a headline source for.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlineQuery {
    /// The ticker symbol as typed by the user (e.g. "nvda").
    pub ticker: String,
    /// Oldest publication time of interest.
    pub from: DateTime<Utc>,
    /// Newest publication time of interest.
    pub to: DateTime<Utc>,
    /// ISO-639-1 language code (e.g. "en").
    pub language: String,
    /// Maximum number of articles to request.
    pub page_size: u32,
}

impl HeadlineQuery {
    /// The full-text search expression: the ticker as given OR upper-cased.
    pub fn search_terms(&self) -> String {
        format!("({} OR {})", self.ticker, self.ticker.to_uppercase())
    }
}

// --- NewsAPI wire types ---

/// The body of `GET /v2/everything`, for both success and error responses.
#[derive(Debug, Deserialize)]
pub struct EverythingResponse {
    /// "ok" or "error".
    pub status: String,
    /// Machine-readable error code (e.g. "rateLimited", "apiKeyInvalid").
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(rename = "totalResults", default)]
    pub total_results: Option<u64>,
    #[serde(default)]
    pub articles: Vec<RawArticle>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawArticle {
    #[serde(default)]
    pub source: Option<RawSource>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawSource {
    #[serde(default)]
    pub name: Option<String>,
}

// --- Hugging Face inference wire types ---

#[derive(Debug, Serialize)]
pub struct InferenceRequest<'a> {
    pub inputs: &'a str,
}

/// One label/probability pair of a text-classification response.
#[derive(Debug, Clone, Deserialize)]
pub struct LabelScore {
    pub label: String,
    pub score: f64,
}

/// The inference API answers a single input with either a nested or a flat
/// list of label scores, or with an error object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum InferenceResponse {
    Nested(Vec<Vec<LabelScore>>),
    Flat(Vec<LabelScore>),
    Error {
        error: String,
        #[serde(default)]
        estimated_time: Option<f64>,
    },
}
