//! Answer type definitions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Prefix the model is instructed to emit for non-business content
pub const OFF_TOPIC_PREFIX: &str = "ERROR: OFF-TOPIC CONTENT";

/// Generated summary text, tagged by whether the model refused.
///
/// The text is always kept verbatim; the tag only drives presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum Summary {
    /// A company analysis
    Analysis(String),
    /// The fixed off-topic refusal
    OffTopic(String),
}

impl Summary {
    /// Tag raw model output
    pub fn from_text(text: String) -> Self {
        if text.trim_start().starts_with(OFF_TOPIC_PREFIX) {
            Summary::OffTopic(text)
        } else {
            Summary::Analysis(text)
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Summary::Analysis(text) | Summary::OffTopic(text) => text,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Summary::Analysis(_) => "analysis",
            Summary::OffTopic(_) => "off_topic",
        }
    }

    pub fn is_off_topic(&self) -> bool {
        matches!(self, Summary::OffTopic(_))
    }
}

/// The displayed result of the last completed query.
///
/// Replaced wholesale on every completed request.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Answer {
    /// Query that produced this answer (empty for the initial answer)
    pub query: String,
    /// Generated summary; `None` before the first completed query
    pub summary: Option<Summary>,
    /// Suggestion tags
    pub related_searches: Vec<String>,
    /// When the answer was produced
    pub completed_at: Option<DateTime<Utc>>,
}

impl Answer {
    /// Answer shown before any query has run
    pub fn initial(suggestions: Vec<String>) -> Self {
        Self {
            related_searches: suggestions,
            ..Default::default()
        }
    }

    pub fn new(query: impl Into<String>, summary: Summary, related_searches: Vec<String>) -> Self {
        Self {
            query: query.into(),
            summary: Some(summary),
            related_searches,
            completed_at: Some(Utc::now()),
        }
    }

    /// Summary text, empty when nothing has been generated yet
    pub fn summary_text(&self) -> &str {
        self.summary.as_ref().map(Summary::text).unwrap_or_default()
    }

    /// Whether the results section has anything to show
    pub fn has_content(&self) -> bool {
        !self.summary_text().is_empty() || !self.related_searches.is_empty()
    }
}
