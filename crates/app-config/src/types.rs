// In crates/app-config/src/types.rs

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use scoring::ScoringSettings;

/// NewsAPI caps `pageSize` at 100 articles per request.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Longest accepted look-back window, in days.
pub const MAX_LOOKBACK_DAYS: u32 = 3650;

#[derive(Deserialize, Debug, Clone, Default)]
pub struct Settings {
    /// The application's general settings.
    #[serde(default)]
    pub app: AppSettings,
    /// Settings for the NewsAPI headline source.
    #[serde(default)]
    pub newsapi: NewsApiSettings,
    /// Settings for the sentiment classifier.
    #[serde(default)]
    pub classifier: ClassifierSettings,
    /// EMA decay and decision thresholds.
    #[serde(default)]
    pub scoring: ScoringSettings,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AppSettings {
    /// Ticker used when none is given on the command line.
    #[serde(default = "default_ticker")]
    pub default_ticker: String,
    /// Look-back window used when none is given on the command line.
    #[serde(default = "default_days")]
    pub default_days: u32,
    /// Where the scored headlines are exported as CSV.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    /// Whether to export the scored headlines at all.
    #[serde(default = "default_true")]
    pub save_csv: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            default_ticker: default_ticker(),
            default_days: default_days(),
            output_dir: default_output_dir(),
            save_csv: true,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct NewsApiSettings {
    /// The NewsAPI key. Usually supplied through `NEWSAPI_KEY`.
    #[serde(default)]
    pub api_key: Option<String>,
    /// The REST API base URL for NewsAPI.
    #[serde(default = "default_newsapi_url")]
    pub base_url: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for NewsApiSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_newsapi_url(),
            language: default_language(),
            page_size: default_page_size(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Which classifier backs the run.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ClassifierProvider {
    /// FinBERT served by the Hugging Face inference API.
    #[default]
    HuggingFace,
    /// Offline word-list classifier.
    Lexicon,
}

impl fmt::Display for ClassifierProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassifierProvider::HuggingFace => write!(f, "huggingface"),
            ClassifierProvider::Lexicon => write!(f, "lexicon"),
        }
    }
}

impl FromStr for ClassifierProvider {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "huggingface" | "hf" => Ok(ClassifierProvider::HuggingFace),
            "lexicon" => Ok(ClassifierProvider::Lexicon),
            other => Err(format!("unknown classifier '{other}'. Use 'huggingface' or 'lexicon'")),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct ClassifierSettings {
    #[serde(default)]
    pub provider: ClassifierProvider,
    /// Base URL of the inference endpoint; the model id is appended.
    #[serde(default = "default_inference_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// Hugging Face access token. Usually supplied through `HF_API_TOKEN`.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Headlines longer than this many characters are truncated before classification.
    #[serde(default = "default_max_chars")]
    pub max_chars: usize,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ClassifierSettings {
    fn default() -> Self {
        Self {
            provider: ClassifierProvider::default(),
            base_url: default_inference_url(),
            model: default_model(),
            api_key: None,
            max_chars: default_max_chars(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Helper functions for serde defaults
fn default_ticker() -> String { "NVDA".to_string() }
fn default_days() -> u32 { 1 }
fn default_output_dir() -> String { "data".to_string() }
fn default_true() -> bool { true }
fn default_newsapi_url() -> String { "https://newsapi.org/v2".to_string() }
fn default_language() -> String { "en".to_string() }
fn default_page_size() -> u32 { MAX_PAGE_SIZE }
fn default_timeout_secs() -> u64 { 30 }
fn default_inference_url() -> String { "https://router.huggingface.co/hf-inference/models".to_string() }
fn default_model() -> String { "ProsusAI/finbert".to_string() }
fn default_max_chars() -> usize { 512 }
