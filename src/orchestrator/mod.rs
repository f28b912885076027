//! Query orchestration
//!
//! Owns the query, answer and phase, and drives each submission through
//! search, transform and summarize in order.

mod error;
mod pipeline;
mod state;

pub use error::PipelineError;
pub use pipeline::QueryOrchestrator;
pub use state::{OrchestratorState, Phase};
