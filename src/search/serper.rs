//! Serper.dev Google search engine implementation

use super::error::SearchError;
use super::models::SearchResults;
use super::traits::SearchEngine;
use crate::config::SearchApiSettings;
use crate::network::{ApiRequest, ApiResponse};
use serde_json::json;
use tracing::{debug, trace};

pub const DEFAULT_BASE_URL: &str = "https://google.serper.dev/search";

/// Serper web search engine
pub struct Serper {
    base_url: String,
    api_key: String,
}

impl Serper {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
        }
    }

    pub fn from_settings(settings: &SearchApiSettings) -> Self {
        Self::new(settings.api_key.clone()).with_base_url(settings.base_url.clone())
    }

    /// Sets a custom endpoint (useful for testing).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl SearchEngine for Serper {
    fn name(&self) -> &str {
        "serper"
    }

    fn request(&self, query: &str) -> Result<ApiRequest, SearchError> {
        Ok(ApiRequest::post(&self.base_url)
            .header("X-API-KEY", &self.api_key)
            .header("Content-Type", "application/json")
            .json(json!({ "q": query })))
    }

    fn response(&self, response: ApiResponse) -> Result<SearchResults, SearchError> {
        debug!(status = response.status, "Received response from Serper");

        if !response.is_success() {
            return Err(SearchError::from_status(response.status, response.text));
        }

        trace!(body = %response.text, "Response body");

        response
            .json::<SearchResults>()
            .map_err(|e| SearchError::InvalidResponse(format!("JSON parse error: {e}")))
    }
}
