// In crates/api-client/src/lib.rs

use app_config::{ClassifierProvider, ClassifierSettings, NewsApiSettings};
use async_trait::async_trait;
use core_types::{Classification, Headline};

pub mod error;
pub mod huggingface;
pub mod lexicon;
pub mod news_api;
pub mod types;

// Re-export public types
pub use error::{Error, Result};
pub use huggingface::HuggingFaceClassifier;
pub use lexicon::LexiconClassifier;
pub use news_api::NewsApiClient;
pub use types::HeadlineQuery;

/// Sent with every outbound request; NewsAPI rejects requests without one.
pub const USER_AGENT: &str = concat!("news-sentiment/", env!("CARGO_PKG_VERSION"));

/// The universal interface for a source of news headlines.
#[async_trait]
pub trait HeadlineSource: Send + Sync {
    /// The name of the source (e.g., "NewsAPI").
    fn name(&self) -> &'static str;

    /// Fetches the headlines matching `query`.
    ///
    /// Order is unspecified and duplicates may occur. An empty result is `Ok`.
    async fn fetch_headlines(&self, query: &HeadlineQuery) -> Result<Vec<Headline>>;
}

/// The universal interface for a sentiment classifier.
#[async_trait]
pub trait SentimentClassifier: Send + Sync {
    /// The name of the classifier (e.g., "HuggingFaceInference").
    fn name(&self) -> &'static str;

    /// Assigns a label and a confidence in `[0, 1]` to one text.
    async fn classify(&self, text: &str) -> Result<Classification>;
}

// Free functions to allow api_client::new_* usage

pub fn new_headline_source(settings: &NewsApiSettings) -> Result<Box<dyn HeadlineSource>> {
    Ok(Box::new(NewsApiClient::new(settings)?))
}

pub fn new_classifier(settings: &ClassifierSettings) -> Result<Box<dyn SentimentClassifier>> {
    let classifier: Box<dyn SentimentClassifier> = match settings.provider {
        ClassifierProvider::HuggingFace => Box::new(HuggingFaceClassifier::new(settings)?),
        ClassifierProvider::Lexicon => Box::new(LexiconClassifier::new()),
    };
    Ok(classifier)
}
