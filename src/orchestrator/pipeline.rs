//! Search → transform → summarize, one submission at a time

use super::error::PipelineError;
use super::state::OrchestratorState;
use crate::llm::{GenerationRequest, TextGenerator};
use crate::metrics::{Metrics, Stage};
use crate::results::{transform, Answer, Summary};
use crate::search::SearchProvider;
use std::sync::{Arc, PoisonError, RwLock, RwLockWriteGuard};
use std::time::Instant;
use tokio::sync::Mutex;
use tracing::{debug, error, info, info_span, warn, Instrument};
use uuid::Uuid;

/// Owns the page state and runs submissions through the three stages.
///
/// At most one submission runs at a time; a second one fails fast with
/// [`PipelineError::Busy`] instead of queueing.
pub struct QueryOrchestrator {
    search: Arc<dyn SearchProvider>,
    generator: Arc<dyn TextGenerator>,
    state: Arc<RwLock<OrchestratorState>>,
    run_slot: Mutex<()>,
    metrics: Arc<Metrics>,
}

/// Returns the state to `Idle` if a submission is dropped mid-flight
struct SearchingGuard {
    state: Arc<RwLock<OrchestratorState>>,
    generation: u64,
}

impl Drop for SearchingGuard {
    fn drop(&mut self) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if state.release(self.generation) {
            warn!(generation = self.generation, "Submission abandoned before completion");
        }
    }
}

impl QueryOrchestrator {
    pub fn new(
        search: Arc<dyn SearchProvider>,
        generator: Arc<dyn TextGenerator>,
        initial_suggestions: Vec<String>,
        metrics: Arc<Metrics>,
    ) -> Self {
        Self {
            search,
            generator,
            state: Arc::new(RwLock::new(OrchestratorState::new(initial_suggestions))),
            run_slot: Mutex::new(()),
            metrics,
        }
    }

    /// Copy of the current state for rendering
    pub fn snapshot(&self) -> OrchestratorState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Replace the input text without running anything
    pub fn set_query(&self, text: &str) -> bool {
        self.write_state().set_query(text)
    }

    /// A related-search tag was clicked: fill the input, do not submit
    pub fn select_related(&self, tag: &str) -> bool {
        let applied = self.set_query(tag);
        debug!(tag, applied, "Related search selected");
        applied
    }

    /// Run one submission end to end.
    ///
    /// The query is trimmed; an empty query returns [`PipelineError::EmptyQuery`]
    /// without touching the state or the network. On success the answer
    /// replaces the previous one. On failure the previous answer is kept and
    /// the state records the failing stage. The searching phase is left on
    /// every path, including cancellation.
    pub async fn submit(&self, raw_query: &str) -> Result<Answer, PipelineError> {
        let query = raw_query.trim();
        if query.is_empty() {
            debug!("Ignoring empty query");
            return Err(PipelineError::EmptyQuery);
        }

        let _slot = match self.run_slot.try_lock() {
            Ok(slot) => slot,
            Err(_) => {
                self.metrics.inc_busy();
                warn!(query, "Rejected submission while another is in flight");
                return Err(PipelineError::Busy);
            }
        };

        let generation = self.write_state().begin(query);
        let _guard = SearchingGuard {
            state: self.state.clone(),
            generation,
        };
        self.metrics.inc_submission();

        let span = info_span!("submission", id = %Uuid::new_v4(), generation);
        let outcome = self.run(query).instrument(span).await;

        let mut state = self.write_state();
        match outcome {
            Ok(answer) => {
                state.complete(generation, answer.clone());
                self.metrics.inc_completed();
                Ok(answer)
            }
            Err(e) => {
                let stage = e.stage().unwrap_or(Stage::Search);
                state.fail(generation, stage, e.to_string());
                Err(e)
            }
        }
    }

    async fn run(&self, query: &str) -> Result<Answer, PipelineError> {
        info!(query, "Running query");

        let started = Instant::now();
        let results = self.search.search(query).await.map_err(|e| {
            self.metrics.record_error(Stage::Search);
            error!(error = %e, "Search stage failed");
            e
        })?;
        self.record(Stage::Search, started);

        let started = Instant::now();
        let transformed = transform(results).map_err(|e| {
            self.metrics.record_error(Stage::Transform);
            error!(error = %e, "Transform stage failed");
            e
        })?;
        self.record(Stage::Transform, started);
        debug!(
            organic = transformed.organic_count,
            context_chars = transformed.context.len(),
            related = transformed.related_searches.len(),
            "Search results transformed"
        );

        let started = Instant::now();
        let request = GenerationRequest::company_summary(&transformed.context);
        let text = self.generator.generate(request).await.map_err(|e| {
            self.metrics.record_error(Stage::Generation);
            error!(error = %e, model = self.generator.model(), "Generation stage failed");
            e
        })?;
        self.record(Stage::Generation, started);

        let summary = Summary::from_text(text);
        info!(kind = summary.kind(), "Answer ready");
        Ok(Answer::new(query, summary, transformed.related_searches))
    }

    fn record(&self, stage: Stage, started: Instant) {
        self.metrics
            .record_latency(stage, started.elapsed().as_millis() as u64);
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, OrchestratorState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}
