// In crates/engine/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid scoring configuration: {0}")]
    Config(#[from] scoring::Error),

    #[error("Invalid run request: {0}")]
    InvalidRequest(String),

    #[error("Failed to fetch headlines from {source_name}: {error}")]
    Fetch {
        source_name: &'static str,
        #[source]
        error: api_client::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
