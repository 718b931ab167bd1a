//! Error types for this crate.
//!
//! All fallible operations return [`Result<T>`] which uses [`SentixError`] as
//! the error type. Note that [`classify`](crate::sentiment::SentimentPipeline::classify)
//! is deliberately infallible; only model acquisition surfaces errors.

use thiserror::Error;

/// A [`Result`](std::result::Result) alias using [`SentixError`] as the error type.
pub type Result<T> = std::result::Result<T, SentixError>;

/// The unified error type for all crate errors.
///
/// # Example
///
/// ```rust,no_run
/// use sentix::error::{Result, SentixError};
///
/// fn handle_error(e: SentixError) {
///     match &e {
///         SentixError::ModelUnavailable(_) => {
///             // No model at all. Surface "analysis unavailable, check connectivity"
///         }
///         SentixError::Download(_) => {
///             // Network issue on a single file - retry may help
///         }
///         SentixError::Device(_) => {
///             // GPU unavailable - fall back to CPU
///         }
///         SentixError::Tokenization(_) => {
///             // Bad tokenizer artifact
///         }
///         SentixError::Unexpected(_) => {
///             // Internal error - report bug
///             eprintln!("Internal error: {e}");
///         }
///         _ => {}
///     }
/// }
/// ```
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SentixError {
    /// Both the remote fetch and the local-cache lookup failed. Fatal for the
    /// session; carries the original fetch failure reason.
    #[error("model unavailable: {0}")]
    ModelUnavailable(String),

    /// Network or download failure. Retry may help.
    #[error("{0}")]
    Download(String),

    /// Tokenizer artifact failed to load or parse.
    #[error("{0}")]
    Tokenization(String),

    /// Device initialization failure. Fall back to CPU.
    #[error("{0}")]
    Device(String),

    /// Internal error. Report if seen.
    #[error("{0}")]
    Unexpected(String),
}

impl From<hf_hub::api::sync::ApiError> for SentixError {
    fn from(value: hf_hub::api::sync::ApiError) -> Self {
        SentixError::Download(format!("HuggingFace API error: {value}"))
    }
}

impl From<candle_core::Error> for SentixError {
    fn from(value: candle_core::Error) -> Self {
        SentixError::Unexpected(value.to_string())
    }
}

impl From<std::io::Error> for SentixError {
    fn from(value: std::io::Error) -> Self {
        SentixError::Unexpected(value.to_string())
    }
}

impl From<serde_json::Error> for SentixError {
    fn from(value: serde_json::Error) -> Self {
        SentixError::Unexpected(value.to_string())
    }
}
