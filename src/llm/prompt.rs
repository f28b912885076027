//! Fixed instruction and prompt template for company summaries

use super::traits::GenerationRequest;

/// System instruction sent with every summarize call
pub const COMPANY_ANALYST_INSTRUCTION: &str = "You are a company analysis AI assistant. Your task is to analyze and summarize information about companies/organizations ONLY. If the provided content is NOT about a company, organization, business, or corporate entity, you MUST respond with: 'ERROR: OFF-TOPIC CONTENT - This content does not appear to be about a company or organization. Please provide information about a specific company, business, or organization to analyze.' Do not provide summaries for weather, news, general websites, politics or non-business content.";

const PROMPT_PREFIX: &str = "Please analyze the following content and provide a company summary if it's about a business/organization, or indicate if it's off-topic: ";

/// Embed the serialized search context verbatim in the prompt template
pub fn company_summary_prompt(context: &str) -> String {
    format!("{PROMPT_PREFIX}{context}")
}

impl GenerationRequest {
    /// The summarize request for a serialized search context
    pub fn company_summary(context: &str) -> Self {
        Self::new(COMPANY_ANALYST_INSTRUCTION, company_summary_prompt(context))
    }
}
