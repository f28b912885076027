//! Error types for the text-generation stage.

use thiserror::Error;

/// Errors that can occur when calling the generative API.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// Network-level error during HTTP communication.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Request timed out.
    #[error("generation request timed out")]
    Timeout,

    /// API returned an error status.
    #[error("generation API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Unparseable response body.
    #[error("invalid generation response: {0}")]
    InvalidResponse(String),

    /// Response carried no text.
    #[error("model returned no text")]
    EmptyCandidates,

    /// Prompt or output was blocked by the provider.
    #[error("generation blocked: {0}")]
    Blocked(String),
}
