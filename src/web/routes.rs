//! Route definitions

use super::handlers;
use super::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Page routes
        .route("/", get(handlers::index))
        .route("/search", post(handlers::search))
        .route("/related", get(handlers::related))
        .route("/stats", get(handlers::stats))
        // API routes
        .route("/api/search", post(handlers::api_search))
        .route("/api/state", get(handlers::api_state))
        .route("/health", get(handlers::health))
        // Static routes
        .route("/static/style.css", get(handlers::stylesheet))
        .route("/favicon.ico", get(handlers::favicon))
        // Add middleware
        .layer(CompressionLayer::new())
        .layer(cors)
        // Add state
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::llm::{GenerationError, GenerationRequest, TextGenerator};
    use crate::search::{OrganicResult, RelatedSearch, SearchError, SearchProvider, SearchResults};
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::Value;
    use std::sync::Arc;
    use tokio::sync::Notify;
    use tower::ServiceExt;

    struct StaticSearch;

    #[async_trait]
    impl SearchProvider for StaticSearch {
        async fn search(&self, _query: &str) -> Result<SearchResults, SearchError> {
            Ok(
                SearchResults::with_organic(vec![OrganicResult::new("Acme", "https://acme.test", "Anvils")])
                    .with_related(vec![RelatedSearch::Text("acme careers".into())]),
            )
        }
    }

    struct FailingSearch;

    #[async_trait]
    impl SearchProvider for FailingSearch {
        async fn search(&self, _query: &str) -> Result<SearchResults, SearchError> {
            Err(SearchError::RateLimited)
        }
    }

    /// Parks inside `search` until released
    struct BlockingSearch {
        started: Arc<Notify>,
        release: Arc<Notify>,
    }

    #[async_trait]
    impl SearchProvider for BlockingSearch {
        async fn search(&self, _query: &str) -> Result<SearchResults, SearchError> {
            self.started.notify_one();
            self.release.notified().await;
            Ok(SearchResults::with_organic(vec![]))
        }
    }

    struct EchoGenerator;

    #[async_trait]
    impl TextGenerator for EchoGenerator {
        fn model(&self) -> &str {
            "echo"
        }

        async fn generate(&self, _request: GenerationRequest) -> Result<String, GenerationError> {
            Ok("Acme builds anvils.".to_string())
        }
    }

    fn app(search: Arc<dyn SearchProvider>) -> Router {
        let state = AppState::with_providers(Settings::default(), search, Arc::new(EchoGenerator))
            .unwrap();
        create_router(state)
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn json_post(uri: &str, body: &str) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_index_renders_initial_suggestions() {
        let response = app(Arc::new(StaticSearch))
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert!(html.contains("PROLIFIC"));
        assert!(html.contains("please give information about last9"));
    }

    #[tokio::test]
    async fn test_api_search_returns_answer() {
        let response = app(Arc::new(StaticSearch))
            .oneshot(json_post("/api/search", r#"{"q":"  acme  "}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["query"], "acme");
        assert_eq!(body["summary"], "Acme builds anvils.");
        assert_eq!(body["kind"], "analysis");
        assert_eq!(body["related_searches"][0], "acme careers");
    }

    #[tokio::test]
    async fn test_api_search_rejects_blank_query() {
        let response = app(Arc::new(StaticSearch))
            .oneshot(json_post("/api/search", r#"{"q":"   "}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert!(body["stage"].is_null());
    }

    #[tokio::test]
    async fn test_api_search_reports_failed_stage() {
        let app = app(Arc::new(FailingSearch));
        let response = app
            .clone()
            .oneshot(json_post("/api/search", r#"{"q":"acme"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(body_json(response).await["stage"], "search");

        let response = app
            .oneshot(Request::get("/api/state").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let state = body_json(response).await;
        assert_eq!(state["phase"], "failed");
        assert_eq!(state["searching"], false);
    }

    #[tokio::test]
    async fn test_form_search_redirects_home() {
        let app = app(Arc::new(StaticSearch));
        let request = Request::post("/search")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("q=acme"))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/");

        let response = app
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let html = body_text(response).await;
        assert!(html.contains("Acme builds anvils."));
        assert!(html.contains("acme careers"));
    }

    #[tokio::test]
    async fn test_related_sets_query_without_searching() {
        let app = app(Arc::new(StaticSearch));
        let response = app
            .clone()
            .oneshot(Request::get("/related?q=acme%20careers").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let response = app
            .oneshot(Request::get("/api/state").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let state = body_json(response).await;
        assert_eq!(state["query"], "acme careers");
        assert_eq!(state["phase"], "idle");
        assert_eq!(state["answer"]["summary"], "");
    }

    #[tokio::test]
    async fn test_stylesheet_and_health() {
        let app = app(Arc::new(StaticSearch));
        let response = app
            .clone()
            .oneshot(Request::get("/static/style.css").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/css"));

        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(body_json(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_submissions_rejected_while_busy() {
        let started = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());
        let app = app(Arc::new(BlockingSearch {
            started: started.clone(),
            release: release.clone(),
        }));

        let first = tokio::spawn(
            app.clone()
                .oneshot(json_post("/api/search", r#"{"q":"acme"}"#)),
        );
        started.notified().await;

        let form = Request::post("/search")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("q=other"))
            .unwrap();
        let response = app.clone().oneshot(form).await.unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        let html = body_text(response).await;
        assert!(html.contains("A request is already in progress"));
        assert!(html.contains("SEARCHING..."));

        let response = app
            .clone()
            .oneshot(json_post("/api/search", r#"{"q":"other"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert!(body_json(response).await["stage"].is_null());

        release.notify_one();
        let response = first.await.unwrap().unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(Request::get("/api/state").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let state = body_json(response).await;
        assert_eq!(state["query"], "acme");
        assert_eq!(state["phase"], "done");
    }

    #[tokio::test]
    async fn test_blank_form_search_leaves_state_untouched() {
        let app = app(Arc::new(FailingSearch));
        let request = Request::post("/search")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("q=+++"))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/");

        let response = app
            .oneshot(Request::get("/api/state").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let state = body_json(response).await;
        assert_eq!(state["phase"], "idle");
        assert_eq!(state["query"], "");
    }
}
