//! Google Generative Language (Gemini) client implementation.

use super::error::GenerationError;
use super::traits::{GenerationRequest, TextGenerator};
use super::types::{
    GeminiContent, GeminiError, GeminiGenerationConfig, GeminiRequest, GeminiResponse,
};
use crate::config::LlmSettings;
use crate::network::{ApiRequest, ApiResponse, HttpClient};
use async_trait::async_trait;
use std::time::{Duration, Instant};
use tokio::time::timeout;
use tracing::{debug, error, info, instrument, trace};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Client for the Gemini generateContent endpoint.
#[derive(Clone)]
pub struct GeminiClient {
    client: HttpClient,
    api_key: String,
    model: String,
    base_url: String,
    timeout: Duration,
    generation_config: Option<GeminiGenerationConfig>,
}

impl GeminiClient {
    pub fn new(client: HttpClient, api_key: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(60),
            generation_config: None,
        }
    }

    pub fn from_settings(client: HttpClient, settings: &LlmSettings) -> Self {
        let generation_config =
            if settings.temperature.is_some() || settings.max_output_tokens.is_some() {
                Some(GeminiGenerationConfig {
                    max_output_tokens: settings.max_output_tokens,
                    temperature: settings.temperature,
                })
            } else {
                None
            };

        Self {
            generation_config,
            ..Self::new(client, settings.api_key.clone())
                .with_model(settings.model.clone())
                .with_base_url(settings.base_url.clone())
                .with_timeout(settings.timeout())
        }
    }

    /// Sets the model name.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets a custom base URL (useful for testing).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn generate_content_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }

    fn build_request(&self, request: &GenerationRequest) -> Result<ApiRequest, GenerationError> {
        let body = GeminiRequest {
            contents: vec![GeminiContent::user(request.prompt.clone())],
            system_instruction: Some(GeminiContent::system(request.system.clone())),
            generation_config: self.generation_config.clone(),
        };
        let body = serde_json::to_value(&body)
            .map_err(|e| GenerationError::InvalidResponse(format!("request encoding: {e}")))?;

        Ok(ApiRequest::post(self.generate_content_url())
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(body))
    }

    fn parse_response(response: ApiResponse) -> Result<String, GenerationError> {
        debug!(status = response.status, "Received response from Gemini");

        if !response.is_success() {
            error!(status = response.status, body = %response.text, "API error response");
            let message = match response.json::<GeminiError>() {
                Ok(api_error) => match api_error.error.status {
                    Some(status) => format!("{} ({})", api_error.error.message, status),
                    None => api_error.error.message,
                },
                Err(_) => response.text,
            };
            return Err(GenerationError::Api {
                status: response.status,
                message,
            });
        }

        trace!(body = %response.text, "Response body");

        let parsed: GeminiResponse = response.json().map_err(|e| {
            error!(error = %e, "Failed to parse response");
            GenerationError::InvalidResponse(format!("Failed to parse response: {e}"))
        })?;

        if let Some(usage) = &parsed.usage_metadata {
            debug!(
                prompt_tokens = ?usage.prompt_token_count,
                output_tokens = ?usage.candidates_token_count,
                total_tokens = ?usage.total_token_count,
                "Token usage"
            );
        }

        extract_text(parsed)
    }
}

/// Pull the first candidate's text out of a response
fn extract_text(response: GeminiResponse) -> Result<String, GenerationError> {
    if let Some(reason) = response
        .prompt_feedback
        .as_ref()
        .and_then(|feedback| feedback.block_reason.clone())
    {
        return Err(GenerationError::Blocked(reason));
    }

    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or(GenerationError::EmptyCandidates)?;

    let text = candidate
        .content
        .as_ref()
        .map(GeminiContent::joined_text)
        .unwrap_or_default();

    if !text.is_empty() {
        return Ok(text);
    }

    let reason = candidate.finish_reason.unwrap_or_default();
    if matches!(
        reason.as_str(),
        "SAFETY" | "RECITATION" | "BLOCKLIST" | "PROHIBITED_CONTENT"
    ) {
        Err(GenerationError::Blocked(reason))
    } else {
        Err(GenerationError::EmptyCandidates)
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    fn model(&self) -> &str {
        &self.model
    }

    #[instrument(skip(self, request), fields(model = %self.model))]
    async fn generate(&self, request: GenerationRequest) -> Result<String, GenerationError> {
        info!("Starting Gemini generateContent request");
        let start = Instant::now();

        let api_request = self.build_request(&request)?;
        let result = timeout(
            self.timeout,
            self.client.execute_with_timeout(api_request, self.timeout),
        )
        .await;

        let response = match result {
            Ok(Ok(response)) => response,
            Ok(Err(e)) if e.is_timeout() => return Err(GenerationError::Timeout),
            Ok(Err(e)) => {
                error!(error = %e, "HTTP request failed");
                return Err(GenerationError::Network(e));
            }
            Err(_) => return Err(GenerationError::Timeout),
        };

        let text = Self::parse_response(response)?;
        debug!(chars = text.len(), elapsed = ?start.elapsed(), "Generation complete");
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> GeminiClient {
        GeminiClient::new(HttpClient::new().unwrap(), "g-key").with_base_url(server.uri())
    }

    fn text_response(text: &str) -> serde_json::Value {
        json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": text }] },
                "finishReason": "STOP"
            }],
            "usageMetadata": { "promptTokenCount": 10, "candidatesTokenCount": 5, "totalTokenCount": 15 }
        })
    }

    #[test]
    fn test_generate_content_url() {
        let client = GeminiClient::new(HttpClient::new().unwrap(), "k")
            .with_base_url("http://localhost:8080/");
        assert_eq!(
            client.generate_content_url(),
            "http://localhost:8080/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn test_from_settings_generation_config() {
        let mut settings = LlmSettings::default();
        let plain = GeminiClient::from_settings(HttpClient::new().unwrap(), &settings);
        assert!(plain.generation_config.is_none());

        settings.temperature = Some(0.2);
        settings.model = "gemini-2.0-flash".to_string();
        let tuned = GeminiClient::from_settings(HttpClient::new().unwrap(), &settings);
        assert_eq!(tuned.model(), "gemini-2.0-flash");
        assert_eq!(tuned.generation_config.unwrap().temperature, Some(0.2));
    }

    #[tokio::test]
    async fn test_generate_sends_system_and_prompt() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-2.5-flash:generateContent"))
            .and(header("x-goog-api-key", "g-key"))
            .and(body_partial_json(json!({
                "systemInstruction": { "parts": [{ "text": "be brief" }] },
                "contents": [{ "role": "user", "parts": [{ "text": "hello" }] }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(text_response("Acme summary")))
            .expect(1)
            .mount(&server)
            .await;

        let text = client(&server)
            .generate(GenerationRequest::new("be brief", "hello"))
            .await
            .unwrap();
        assert_eq!(text, "Acme summary");
    }

    #[tokio::test]
    async fn test_api_error_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": { "code": 400, "message": "API key not valid", "status": "INVALID_ARGUMENT" }
            })))
            .mount(&server)
            .await;

        let err = client(&server)
            .generate(GenerationRequest::new("s", "p"))
            .await
            .unwrap_err();
        match err {
            GenerationError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "API key not valid (INVALID_ARGUMENT)");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_extract_text_joins_parts() {
        let response: GeminiResponse = serde_json::from_value(json!({
            "candidates": [{ "content": { "parts": [{ "text": "a" }, { "text": "b" }] } }]
        }))
        .unwrap();
        assert_eq!(extract_text(response).unwrap(), "ab");
    }

    #[test]
    fn test_extract_text_blocked_prompt() {
        let response: GeminiResponse = serde_json::from_value(json!({
            "promptFeedback": { "blockReason": "SAFETY" }
        }))
        .unwrap();
        assert!(matches!(extract_text(response), Err(GenerationError::Blocked(r)) if r == "SAFETY"));
    }

    #[test]
    fn test_extract_text_empty() {
        let response: GeminiResponse = serde_json::from_value(json!({ "candidates": [] })).unwrap();
        assert!(matches!(extract_text(response), Err(GenerationError::EmptyCandidates)));

        let filtered: GeminiResponse = serde_json::from_value(json!({
            "candidates": [{ "finishReason": "SAFETY" }]
        }))
        .unwrap();
        assert!(matches!(extract_text(filtered), Err(GenerationError::Blocked(_))));
    }
}
