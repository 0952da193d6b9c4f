//! Google SERP engine
//!
//! Drives a rendered results page through the extraction pipeline:
//! navigate, strip noise nodes, parse the reported total, then walk the
//! result containers in document order. Selector constants live here so a
//! markup drift is a one-file fix.

mod extract;
mod sanitize;
mod stats;
mod url;

pub use extract::{
    DESCRIPTION_POLICY, LINK_POLICY, MissingField, TITLE_NODE_POLICY, TITLE_TEXT_POLICY,
    URL_POLICY,
};
pub use url::build_url;

use tracing::{trace, warn};

use crate::config::SearchConfig;
use crate::error::{SearchError, SearchOutcome};
use crate::page::SerpPage;
use crate::types::{Query, SearchResult};

/// Base URL the query string is appended to
pub const SEARCH_BASE_URL: &str = "https://www.google.com/search";

/// CSS selector for the results-summary node
/// ("About 1,234,567 results (0.42 seconds)")
pub const STATS_SELECTOR: &str = "div#result-stats";

/// CSS selector for organic result containers
///
/// Google tags each organic entry with `data-hveid`/`data-ved` tracking
/// attributes and a `lang` attribute; the combination filters out most
/// non-result widgets.
pub const RESULT_SELECTOR: &str = "div[data-hveid][data-ved][lang]";

/// CSS selector for the primary link inside a result container
pub const LINK_SELECTOR: &str = "a";

/// CSS selector for the title heading inside the primary link
pub const TITLE_SELECTOR: &str = "h3";

/// CSS selector for the description snippet
///
/// Known not to match every markup variant; a miss degrades the entry's
/// description to empty rather than failing anything.
pub const DESCRIPTION_SELECTOR: &str = r#"div[data-sncf~="1"]"#;

/// CSS selector for "related queries" noise widgets removed before
/// extraction
pub const NOISE_SELECTOR: &str = "div[data-initq]";

/// Title substituted when the heading node exists but its text is unreadable
pub const TITLE_PLACEHOLDER: &str = "No title";

/// The Google search engine
///
/// Stateless apart from its configuration; one instance may serve any
/// number of sequential searches, each against its own page.
#[derive(Debug, Clone)]
pub struct Google {
    config: SearchConfig,
}

impl Google {
    /// Create an engine with the given configuration
    #[must_use]
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    /// Engine identifier
    #[must_use]
    pub fn name(&self) -> &'static str {
        "google"
    }

    /// Search configuration in effect
    #[must_use]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Run one search against `page`
    ///
    /// The page is the caller's; this call navigates it, mutates its DOM
    /// (noise removal), and closes it on the way out unless
    /// `leave_page_open` is configured. Close failures are logged, never
    /// propagated.
    ///
    /// On success the result set is ordered by rank and may be empty (a
    /// reported total of zero short-circuits before any container query).
    /// On failure no partial results are returned, even though individual
    /// entries degrade rather than fail inside a successful extraction.
    pub async fn search<P: SerpPage>(
        &self,
        page: &P,
        query: &Query,
    ) -> SearchOutcome<Vec<SearchResult>> {
        trace!(?query, "starting google search");

        let outcome = self.run(page, query).await;

        if !self.config.leave_page_open {
            if let Err(e) = page.close().await {
                warn!(error = %e, "failed to close results page");
            }
        }

        outcome
    }

    async fn run<P: SerpPage>(
        &self,
        page: &P,
        query: &Query,
    ) -> SearchOutcome<Vec<SearchResult>> {
        let url = url::build_url(query)?;

        if let Err(source) = page.goto(&url).await {
            return Err(SearchError::Navigation { url, source });
        }

        sanitize::strip_noise(page).await;

        let total = stats::find_total_results(page, self.config.stats_timeout).await?;
        trace!(total, "total results reported");

        // Engines omit the container nodes entirely on a zero-result page;
        // querying for them would only burn the full timeout.
        if total == 0 {
            return Ok(Vec::new());
        }

        let containers = page
            .query_all(RESULT_SELECTOR, self.config.results_timeout)
            .await
            .map_err(SearchError::ResultQuery)?;

        Ok(extract::extract_results(&containers).await)
    }
}

impl Default for Google {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}
