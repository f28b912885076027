//! Application state shared across handlers

use crate::config::Settings;
use crate::llm::{GeminiClient, TextGenerator};
use crate::metrics::Metrics;
use crate::network::HttpClient;
use crate::orchestrator::QueryOrchestrator;
use crate::search::{SearchProvider, SearchStage, Serper};
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Global settings
    pub settings: Arc<Settings>,
    /// The single query orchestrator behind the page
    pub orchestrator: Arc<QueryOrchestrator>,
    /// Template renderer
    pub templates: Arc<super::Templates>,
}

impl AppState {
    /// Create state wired to the configured Serper and Gemini endpoints
    pub fn new(settings: Settings, client: HttpClient) -> anyhow::Result<Self> {
        let search = SearchStage::new(
            client.clone(),
            Arc::new(Serper::from_settings(&settings.search)),
        )
        .with_timeout(settings.search.timeout());
        let generator = GeminiClient::from_settings(client, &settings.llm);

        Self::with_providers(settings, Arc::new(search), Arc::new(generator))
    }

    /// Create state around arbitrary providers
    pub fn with_providers(
        settings: Settings,
        search: Arc<dyn SearchProvider>,
        generator: Arc<dyn TextGenerator>,
    ) -> anyhow::Result<Self> {
        let orchestrator = Arc::new(QueryOrchestrator::new(
            search,
            generator,
            settings.ui.initial_suggestions.clone(),
            Arc::new(Metrics::new()),
        ));
        let templates = Arc::new(super::Templates::new()?);

        Ok(Self {
            settings: Arc::new(settings),
            orchestrator,
            templates,
        })
    }

    /// Get instance name
    pub fn instance_name(&self) -> &str {
        &self.settings.general.instance_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::company_summary_prompt;
    use crate::results::Summary;
    use serde_json::json;
    use wiremock::matchers::{body_json, body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const REFUSAL: &str = "ERROR: OFF-TOPIC CONTENT - This content does not appear to be about a company or organization.";

    #[tokio::test]
    async fn test_configured_providers_end_to_end() {
        let serper = MockServer::start().await;
        let gemini = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/search"))
            .and(header("X-API-KEY", "search-secret"))
            .and(body_json(json!({ "q": "acme" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "organic": [{ "title": "A", "link": "L1", "snippet": "S1" }],
                "relatedSearches": ["x", { "query": "y" }, null, { "query": "" }]
            })))
            .expect(1)
            .mount(&serper)
            .await;

        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-2.5-flash:generateContent"))
            .and(header("x-goog-api-key", "llm-secret"))
            .and(body_partial_json(json!({
                "contents": [{
                    "role": "user",
                    "parts": [{ "text": company_summary_prompt("Title: A\nLink: L1\nSnippet: S1\n") }]
                }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{
                    "content": { "role": "model", "parts": [{ "text": REFUSAL }] },
                    "finishReason": "STOP"
                }]
            })))
            .expect(1)
            .mount(&gemini)
            .await;

        let mut settings = Settings::default();
        settings.search.base_url = format!("{}/search", serper.uri());
        settings.search.api_key = "search-secret".to_string();
        settings.llm.base_url = gemini.uri();
        settings.llm.api_key = "llm-secret".to_string();

        let state = AppState::new(settings, HttpClient::new().unwrap()).unwrap();
        let answer = state.orchestrator.submit(" acme ").await.unwrap();

        assert_eq!(answer.query, "acme");
        assert_eq!(answer.summary, Some(Summary::OffTopic(REFUSAL.to_string())));
        assert_eq!(answer.related_searches, vec!["x", "y"]);
        assert!(!state.orchestrator.snapshot().is_searching());
    }
}
