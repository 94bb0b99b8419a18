// In crates/api-client/src/huggingface.rs

use std::time::Duration;

use app_config::ClassifierSettings;
use async_trait::async_trait;
use core_types::{Classification, SentimentLabel};

use crate::error::{Error, Result};
use crate::types::{InferenceRequest, InferenceResponse, LabelScore};
use crate::{SentimentClassifier, USER_AGENT};

/// FinBERT (or any three-way sentiment model) served by the Hugging Face
/// inference API.
#[derive(Debug, Clone)]
pub struct HuggingFaceClassifier {
    http_client: reqwest::Client,
    /// Full model endpoint, e.g. `.../models/ProsusAI/finbert`.
    endpoint: String,
    api_key: Option<String>,
    max_chars: usize,
}

impl HuggingFaceClassifier {
    pub fn new(settings: &ClassifierSettings) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::ClientBuildError(e.to_string()))?;

        let endpoint = format!(
            "{}/{}",
            settings.base_url.trim_end_matches('/'),
            settings.model.trim_start_matches('/')
        );

        if settings.api_key.is_none() {
            tracing::warn!("HF_API_TOKEN not set; anonymous inference requests are heavily rate limited.");
        }

        Ok(Self {
            http_client,
            endpoint,
            api_key: settings.api_key.clone(),
            max_chars: settings.max_chars,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl SentimentClassifier for HuggingFaceClassifier {
    fn name(&self) -> &'static str {
        "HuggingFaceInference"
    }

    async fn classify(&self, text: &str) -> Result<Classification> {
        let inputs = truncate_chars(text, self.max_chars);

        let mut request = self
            .http_client
            .post(&self.endpoint)
            .json(&InferenceRequest { inputs });
        if let Some(token) = &self.api_key {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(Error::RequestFailed)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(Error::RequestFailed)?;

        parse_inference_response(status, &body)
    }
}

/// Picks the most probable label out of an inference response.
pub fn parse_inference_response(status: u16, body: &str) -> Result<Classification> {
    if status == 429 {
        return Err(Error::RateLimited {
            provider: "Hugging Face",
            msg: body.to_string(),
        });
    }

    let parsed: InferenceResponse = match serde_json::from_str(body) {
        Ok(parsed) => parsed,
        Err(_) if !(200..300).contains(&status) => {
            return Err(Error::HttpStatus { status, body: body.to_string() });
        }
        Err(e) => return Err(Error::DeserializationFailed(e)),
    };

    let scores = match parsed {
        InferenceResponse::Nested(mut batches) => {
            if batches.is_empty() {
                return Err(Error::EmptyPrediction);
            }
            batches.swap_remove(0)
        }
        InferenceResponse::Flat(scores) => scores,
        InferenceResponse::Error { error, estimated_time } => {
            let msg = match estimated_time {
                Some(secs) => format!("{error} (retry in ~{secs:.0}s)"),
                None => error,
            };
            return Err(Error::ApiError { code: status.to_string(), msg });
        }
    };

    best_label(&scores)
}

fn best_label(scores: &[LabelScore]) -> Result<Classification> {
    let best = scores
        .iter()
        .max_by(|a, b| a.score.total_cmp(&b.score))
        .ok_or(Error::EmptyPrediction)?;

    let label: SentimentLabel = best.label.parse()?;
    Ok(Classification::new(label, best.score)?)
}

/// Cuts `text` to at most `max_chars` characters without splitting a code point.
fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
