//! Reshaping search results into model context and suggestion tags

use crate::search::{OrganicResult, RelatedSearch, SearchError, SearchResults};

/// Output of the transform stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transformed {
    /// Newline-delimited block handed to the text generator
    pub context: String,
    /// Normalized related-search suggestions
    pub related_searches: Vec<String>,
    /// Number of organic results in `context`
    pub organic_count: usize,
}

/// Serialize and normalize a search response.
///
/// Fails only when the provider omitted the `organic` field altogether; an
/// empty list is a valid (empty) context.
pub fn transform(results: SearchResults) -> Result<Transformed, SearchError> {
    let organic = results.organic.ok_or(SearchError::MissingOrganic)?;

    Ok(Transformed {
        context: serialize_context(&organic),
        related_searches: normalize_related(results.related_searches.unwrap_or_default()),
        organic_count: organic.len(),
    })
}

/// Format one result as a `Title:`/`Link:`/`Snippet:` block
pub fn format_result(result: &OrganicResult) -> String {
    format!(
        "Title: {}\nLink: {}\nSnippet: {}\n",
        result.title.as_deref().unwrap_or_default(),
        result.link.as_deref().unwrap_or_default(),
        result.snippet.as_deref().unwrap_or_default(),
    )
}

/// Join all result blocks with a blank line between them, in input order.
///
/// No deduplication or truncation is applied.
pub fn serialize_context(results: &[OrganicResult]) -> String {
    results
        .iter()
        .map(format_result)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Flatten related searches to plain strings, dropping entries without text
pub fn normalize_related(entries: Vec<RelatedSearch>) -> Vec<String> {
    entries
        .iter()
        .filter_map(RelatedSearch::text)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
        .collect()
}
