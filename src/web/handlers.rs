//! HTTP request handlers

use super::state::AppState;
use super::templates::STYLESHEET;
use crate::metrics::Stage;
use crate::orchestrator::{OrchestratorState, Phase, PipelineError};
use crate::results::Answer;
use axum::{
    extract::{Form, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Form body for a page submission
#[derive(Debug, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub q: String,
}

/// JSON body for an API submission
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub q: String,
}

/// Query parameters for a related-search click
#[derive(Debug, Deserialize)]
pub struct RelatedParams {
    #[serde(default)]
    pub q: String,
}

/// Answer as returned by the JSON API
#[derive(Debug, Serialize)]
pub struct AnswerResponse {
    pub query: String,
    pub summary: String,
    pub kind: Option<&'static str>,
    pub related_searches: Vec<String>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl From<Answer> for AnswerResponse {
    fn from(answer: Answer) -> Self {
        Self {
            summary: answer.summary_text().to_string(),
            kind: answer.summary.as_ref().map(|s| s.kind()),
            query: answer.query,
            related_searches: answer.related_searches,
            completed_at: answer.completed_at,
        }
    }
}

/// Orchestrator snapshot as returned by the JSON API
#[derive(Debug, Serialize)]
pub struct StateResponse {
    pub query: String,
    pub searching: bool,
    #[serde(flatten)]
    pub phase: Phase,
    pub answer: AnswerResponse,
}

impl From<OrchestratorState> for StateResponse {
    fn from(state: OrchestratorState) -> Self {
        Self {
            query: state.query().to_string(),
            searching: state.is_searching(),
            phase: state.phase().clone(),
            answer: state.answer().clone().into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    stage: Option<Stage>,
}

impl IntoResponse for PipelineError {
    fn into_response(self) -> Response {
        let status = match self {
            PipelineError::EmptyQuery => StatusCode::BAD_REQUEST,
            PipelineError::Busy => StatusCode::CONFLICT,
            PipelineError::Search(_) | PipelineError::Generation(_) => StatusCode::BAD_GATEWAY,
        };
        let body = ErrorBody {
            error: self.to_string(),
            stage: self.stage(),
        };
        (status, Json(body)).into_response()
    }
}

/// Everything the index template reads
#[derive(Debug, Serialize)]
struct PageView<'a> {
    instance_name: &'a str,
    version: &'static str,
    query: &'a str,
    searching: bool,
    submit_disabled: bool,
    summary: &'a str,
    summary_kind: &'static str,
    related_searches: &'a [String],
    show_results: bool,
    error: Option<String>,
    notice: Option<&'a str>,
    completed_at: Option<String>,
}

fn render_index(state: &AppState, notice: Option<&str>, status: StatusCode) -> Response {
    let snapshot = state.orchestrator.snapshot();
    let answer = snapshot.answer();
    let searching = snapshot.is_searching();

    let error = match snapshot.phase() {
        Phase::Failed { stage, reason } => Some(format!("{} failed: {}", stage, reason)),
        _ => None,
    };

    let view = PageView {
        instance_name: state.instance_name(),
        version: crate::VERSION,
        query: snapshot.query(),
        searching,
        submit_disabled: searching || snapshot.query().trim().is_empty(),
        summary: answer.summary_text(),
        summary_kind: answer.summary.as_ref().map(|s| s.kind()).unwrap_or_default(),
        related_searches: &answer.related_searches,
        show_results: answer.has_content(),
        error,
        notice,
        completed_at: answer
            .completed_at
            .map(|at| at.format("%Y-%m-%d %H:%M:%S UTC").to_string()),
    };

    match state.templates.render("index.html", &view) {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            tracing::error!("Template error: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Template error").into_response()
        }
    }
}

/// Home page handler
pub async fn index(State(state): State<AppState>) -> Response {
    render_index(&state, None, StatusCode::OK)
}

/// Page submission handler
pub async fn search(State(state): State<AppState>, Form(form): Form<SearchForm>) -> Response {
    match state.orchestrator.submit(&form.q).await {
        Err(PipelineError::Busy) => render_index(
            &state,
            Some("A request is already in progress. Please wait for it to finish."),
            StatusCode::CONFLICT,
        ),
        // Success and pipeline failures are both recorded in the state
        _ => Redirect::to("/").into_response(),
    }
}

/// Related-search tag handler: fills the input without searching
pub async fn related(
    State(state): State<AppState>,
    Query(params): Query<RelatedParams>,
) -> Redirect {
    state.orchestrator.select_related(&params.q);
    Redirect::to("/")
}

/// JSON submission handler
pub async fn api_search(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<AnswerResponse>, PipelineError> {
    let answer = state.orchestrator.submit(&request.q).await?;
    Ok(Json(answer.into()))
}

/// JSON state snapshot handler
pub async fn api_state(State(state): State<AppState>) -> Json<StateResponse> {
    Json(state.orchestrator.snapshot().into())
}

#[derive(Debug, Serialize)]
struct StatsView<'a> {
    instance_name: &'a str,
    version: &'static str,
    metrics: crate::metrics::MetricsSnapshot,
}

/// Stats page handler
pub async fn stats(State(state): State<AppState>) -> impl IntoResponse {
    let view = StatsView {
        instance_name: state.instance_name(),
        version: crate::VERSION,
        metrics: state.orchestrator.metrics().snapshot(),
    };

    match state.templates.render("stats.html", &view) {
        Ok(html) => Html(html),
        Err(e) => {
            tracing::error!("Template error: {}", e);
            Html("<h1>Stats</h1>".to_string())
        }
    }
}

/// Health check handler
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": crate::VERSION
    }))
}

/// Stylesheet handler
pub async fn stylesheet() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], STYLESHEET)
}

/// Favicon handler
pub async fn favicon() -> impl IntoResponse {
    StatusCode::NO_CONTENT
}
