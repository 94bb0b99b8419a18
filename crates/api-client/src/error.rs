// In crates/api-client/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to build the API client: {0}")]
    ClientBuildError(String),
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(#[from] serde_json::Error),
    #[error("API error: code {code}, msg: {msg}")]
    ApiError { code: String, msg: String },
    #[error("Rate limited by {provider}: {msg}")]
    RateLimited { provider: &'static str, msg: String },
    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },
    #[error("Invalid classifier output: {0}")]
    InvalidOutput(#[from] core_types::Error),
    #[error("Classifier returned no labels")]
    EmptyPrediction,
}

pub type Result<T> = std::result::Result<T, Error>;
