//! Prolific: a personal company research assistant
//!
//! Takes a free-text query, runs it through a web search API, and asks a
//! generative model to summarize the results if they describe a company.
//! Related searches from the search provider are offered as follow-ups.

pub mod config;
pub mod llm;
pub mod metrics;
pub mod network;
pub mod orchestrator;
pub mod results;
pub mod search;
pub mod web;

pub use config::Settings;
pub use orchestrator::{PipelineError, QueryOrchestrator};
pub use results::{Answer, Summary};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
