//! Pipeline error type

use crate::llm::GenerationError;
use crate::metrics::Stage;
use crate::search::SearchError;
use thiserror::Error;

/// Why a submission did not produce an answer
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Query was empty after trimming; nothing was sent
    #[error("query is empty")]
    EmptyQuery,

    /// Another submission is still running
    #[error("a request is already in progress")]
    Busy,

    #[error("search failed: {0}")]
    Search(#[from] SearchError),

    #[error("summary generation failed: {0}")]
    Generation(#[from] GenerationError),
}

impl PipelineError {
    /// Stage that failed, for errors raised inside the pipeline
    pub fn stage(&self) -> Option<Stage> {
        match self {
            PipelineError::EmptyQuery | PipelineError::Busy => None,
            PipelineError::Search(SearchError::MissingOrganic) => Some(Stage::Transform),
            PipelineError::Search(_) => Some(Stage::Search),
            PipelineError::Generation(_) => Some(Stage::Generation),
        }
    }
}
