// In crates/app-config/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to load configuration: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("NEWSAPI_KEY not found. Create a .env file or set the environment variable.")]
    MissingApiKey,

    #[error("Invalid scoring parameters: {0}")]
    InvalidScoring(#[from] scoring::Error),

    #[error("Invalid setting `{key}`: {reason}")]
    InvalidSetting { key: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
