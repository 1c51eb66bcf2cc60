//! Error types for the doclens library.

use std::io;
use thiserror::Error;

/// Result type alias for doclens operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while analysing documents.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Layout data that violates the input contract.
    #[error("Invalid layout: {0}")]
    InvalidLayout(String),

    /// A collection directory is incomplete.
    #[error("Invalid collection: {0}")]
    Collection(String),

    /// A statistical predictor could not be fitted or applied.
    #[error("Model error: {0}")]
    Model(String),

    /// A configuration value is outside its legal range.
    #[error("Invalid option `{name}`: {reason}")]
    InvalidOption {
        /// Option name
        name: &'static str,
        /// Why the value was rejected
        reason: String,
    },

    /// Error during rendering (JSON, Markdown).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    pub(crate) fn invalid_option(name: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidOption {
            name,
            reason: reason.into(),
        }
    }
}
