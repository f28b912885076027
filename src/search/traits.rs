//! Search engine traits

use super::error::SearchError;
use super::models::SearchResults;
use crate::network::{ApiRequest, ApiResponse};
use async_trait::async_trait;

/// A search API described as a request builder plus a response parser.
///
/// The HTTP round trip itself is done by [`super::SearchStage`], so engines
/// stay synchronous and testable without a network.
pub trait SearchEngine: Send + Sync {
    /// Engine name used in logs and metrics
    fn name(&self) -> &str;

    /// Build the HTTP request for a query
    fn request(&self, query: &str) -> Result<ApiRequest, SearchError>;

    /// Parse the HTTP response into results
    fn response(&self, response: ApiResponse) -> Result<SearchResults, SearchError>;
}

/// Anything that can turn a query into search results.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &str) -> Result<SearchResults, SearchError>;
}
