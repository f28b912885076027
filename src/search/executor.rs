//! Search execution against a single configured engine

use super::error::SearchError;
use super::models::SearchResults;
use super::traits::{SearchEngine, SearchProvider};
use crate::network::HttpClient;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::timeout;
use tracing::{debug, error, info, warn};

/// Runs one engine over HTTP with a hard timeout
pub struct SearchStage {
    /// HTTP client for making requests
    client: HttpClient,
    /// Engine that builds requests and parses responses
    engine: Arc<dyn SearchEngine>,
    /// Upper bound for the whole round trip
    timeout: Duration,
}

impl SearchStage {
    pub fn new(client: HttpClient, engine: Arc<dyn SearchEngine>) -> Self {
        Self {
            client,
            engine,
            timeout: Duration::from_secs(10),
        }
    }

    /// Set request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl SearchProvider for SearchStage {
    async fn search(&self, query: &str) -> Result<SearchResults, SearchError> {
        let engine_name = self.engine.name();
        let start = Instant::now();

        let request = match self.engine.request(query) {
            Ok(req) => req,
            Err(e) => {
                error!("Failed to build request for {}: {}", engine_name, e);
                return Err(e);
            }
        };

        info!("Searching {} for '{}'", engine_name, query);

        let result = timeout(
            self.timeout,
            self.client.execute_with_timeout(request, self.timeout),
        )
        .await;

        let elapsed = start.elapsed();

        match result {
            Ok(Ok(response)) => match self.engine.response(response) {
                Ok(results) => {
                    debug!(
                        "Engine {} returned {} organic results in {:?}",
                        engine_name,
                        results.organic.as_ref().map_or(0, Vec::len),
                        elapsed
                    );
                    Ok(results)
                }
                Err(e) => {
                    warn!("Failed to parse response from {}: {}", engine_name, e);
                    Err(e)
                }
            },
            Ok(Err(e)) if e.is_timeout() => {
                warn!("Timeout for engine {} after {:?}", engine_name, elapsed);
                Err(SearchError::Timeout)
            }
            Ok(Err(e)) => {
                warn!("Request failed for {}: {}", engine_name, e);
                Err(SearchError::Network(e))
            }
            Err(_) => {
                warn!("Timeout for engine {} after {:?}", engine_name, elapsed);
                Err(SearchError::Timeout)
            }
        }
    }
}
