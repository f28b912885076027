//! Search result data models

use serde::{Deserialize, Serialize};

/// A non-advertisement search result.
///
/// Fields the provider omits (or sends as `null`) deserialize to `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganicResult {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub snippet: Option<String>,
}

impl OrganicResult {
    pub fn new(
        title: impl Into<String>,
        link: impl Into<String>,
        snippet: impl Into<String>,
    ) -> Self {
        Self {
            title: Some(title.into()),
            link: Some(link.into()),
            snippet: Some(snippet.into()),
        }
    }
}

/// One entry of the provider's related-search list.
///
/// Providers send either a bare string or an object carrying a `query`
/// field; anything else is kept as raw JSON so one odd entry does not fail
/// the whole response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RelatedSearch {
    Text(String),
    Query { query: Option<String> },
    Other(serde_json::Value),
}

impl RelatedSearch {
    /// The suggestion text, if this entry carries one
    pub fn text(&self) -> Option<&str> {
        match self {
            RelatedSearch::Text(text) => Some(text),
            RelatedSearch::Query { query } => query.as_deref(),
            RelatedSearch::Other(_) => None,
        }
    }
}

/// Parsed search provider response (consumed fields only)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    /// Organic results in provider order; `None` when the field was absent
    #[serde(default)]
    pub organic: Option<Vec<OrganicResult>>,
    /// Suggested follow-up queries
    #[serde(default)]
    pub related_searches: Option<Vec<RelatedSearch>>,
}

impl SearchResults {
    pub fn with_organic(organic: Vec<OrganicResult>) -> Self {
        Self {
            organic: Some(organic),
            related_searches: None,
        }
    }

    pub fn with_related(mut self, related: Vec<RelatedSearch>) -> Self {
        self.related_searches = Some(related);
        self
    }
}
