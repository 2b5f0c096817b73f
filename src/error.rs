//! Error types for Steno

use thiserror::Error;

/// Result type alias using Steno's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors in Steno
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
