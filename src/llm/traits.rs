//! Text generation traits

use super::error::GenerationError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A single-turn generation call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// System instruction
    pub system: String,
    /// User prompt
    pub prompt: String,
}

impl GenerationRequest {
    pub fn new(system: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            prompt: prompt.into(),
        }
    }
}

/// A model that answers one prompt with one block of text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Model identifier, for logs
    fn model(&self) -> &str;

    async fn generate(&self, request: GenerationRequest) -> Result<String, GenerationError>;
}
