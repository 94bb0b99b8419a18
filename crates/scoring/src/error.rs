// In crates/scoring/src/error.rs

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("EMA decay alpha must be in (0, 1], got {0}")]
    InvalidAlpha(f64),

    #[error("Positive threshold ({pos}) must be greater than negative threshold ({neg})")]
    InvalidThresholds { pos: f64, neg: f64 },
}

pub type Result<T> = std::result::Result<T, Error>;
