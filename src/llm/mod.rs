//! Summarize stage
//!
//! Sends the serialized search context to a generative model under a fixed
//! company-analyst instruction.

mod error;
mod gemini;
mod prompt;
mod traits;
mod types;

pub use error::GenerationError;
pub use gemini::GeminiClient;
pub use prompt::{company_summary_prompt, COMPANY_ANALYST_INSTRUCTION};
pub use traits::{GenerationRequest, TextGenerator};
