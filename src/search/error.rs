//! Error types for the search stage.

use thiserror::Error;

/// Errors that can occur when querying the search provider.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Network-level error during HTTP communication.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Request timed out.
    #[error("search request timed out")]
    Timeout,

    /// Rate limit or quota exceeded.
    #[error("search rate limit exceeded")]
    RateLimited,

    /// Invalid API key.
    #[error("search API key was rejected")]
    Unauthorized,

    /// Provider returned an error status.
    #[error("search API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Unparseable response body.
    #[error("invalid search response: {0}")]
    InvalidResponse(String),

    /// Response parsed but carried no `organic` field.
    #[error("search response has no organic results field")]
    MissingOrganic,
}

impl SearchError {
    /// Classify a non-2xx status the way Serper reports failures
    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            401 | 403 => {
                let lower = body.to_lowercase();
                if lower.contains("rate") || lower.contains("quota") || lower.contains("limit") {
                    SearchError::RateLimited
                } else {
                    SearchError::Unauthorized
                }
            }
            429 => SearchError::RateLimited,
            _ => SearchError::Api {
                status,
                message: body,
            },
        }
    }
}
