// In crates/core-types/src/error.rs

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Unknown sentiment label: '{0}'")]
    UnknownLabel(String),

    #[error("Confidence must be within [0, 1], got {0}")]
    InvalidConfidence(f64),
}

pub type Result<T> = std::result::Result<T, Error>;
