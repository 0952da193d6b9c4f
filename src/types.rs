//! Data structures shared across the extraction pipeline

use serde::{Deserialize, Serialize};

/// A search request, consumed once per search to build the results-page URL.
///
/// Empty string fields are treated as unset. `limit`/`offset` of zero leave
/// the corresponding URL parameters off so the engine serves its defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    /// Search terms
    pub text: String,

    /// Restrict results to one site (`site:` operator)
    pub site: String,

    /// Restrict results to one file type (`filetype:` operator)
    pub filetype: String,

    /// Interface/result language code, e.g. "en" or "de"
    pub lang_code: String,

    /// Requested number of results per page
    pub limit: u32,

    /// Paging offset (index of the first result to serve)
    pub offset: u32,
}

impl Query {
    /// True when there is nothing to search for
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty() && self.site.trim().is_empty()
    }
}

/// A single extracted search result
///
/// Immutable once constructed. `title` falls back to a fixed placeholder when
/// the title node exists but its text cannot be read; `description` may be
/// empty. Neither is a failure signal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Result ranking (1-indexed, position among all containers examined)
    pub rank: usize,

    /// Raw, unvalidated target URL (may be empty if the href was unreadable)
    pub url: String,

    /// Result title
    pub title: String,

    /// Description snippet, empty when the page carries none
    pub description: String,
}

/// Ordered collection of results for one query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResults {
    /// Search query that produced these results
    pub query: Query,

    /// Extracted results, insertion order = rank order
    pub results: Vec<SearchResult>,
}

impl SearchResults {
    /// Create new `SearchResults`
    #[must_use]
    pub fn new(query: Query, results: Vec<SearchResult>) -> Self {
        Self { query, results }
    }
}
