//! Error types for the extraction pipeline
//!
//! Call-level failures only. Per-entry extraction problems (missing link,
//! unreadable title, absent description) never surface here — they are
//! recovered inside the extractor according to its field policy.

use thiserror::Error;

use crate::page::PageError;

/// Result type alias for search operations
pub type SearchOutcome<T> = Result<T, SearchError>;

/// Failure kinds that abort a whole search call
///
/// A failed search carries no partial results; degraded entries (placeholder
/// title, empty URL or description) only ever appear in a *successful*
/// result set.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The query carries no search terms at all
    #[error("cannot build a search URL from an empty query")]
    EmptyQuery,

    /// Search URL construction failed
    #[error("failed to build search URL: {0}")]
    UrlBuild(#[from] url::ParseError),

    /// Navigation to the results page failed
    #[error("navigation to {url} failed: {source}")]
    Navigation {
        /// URL that failed to load
        url: String,
        /// Underlying page failure
        source: PageError,
    },

    /// Results-summary node absent, or its query timed out
    #[error("result stats not found: {0}")]
    StatsNotFound(#[source] PageError),

    /// Results-summary node found but its text could not be read
    #[error("cannot extract result stats text: {0}")]
    StatsText(#[source] PageError),

    /// No digits in the results-summary text, or the digits overflow
    ///
    /// A genuinely empty result set must still be reported numerically by
    /// the page ("About 0 results ..."); digit-free summary text is a parse
    /// failure, never a silent zero.
    #[error("could not parse total result count from {text:?}: {reason}")]
    InvalidCount {
        /// Summary text after suffix stripping
        text: String,
        /// What went wrong with digit extraction or integer conversion
        reason: String,
    },

    /// The result-container query timed out or errored
    #[error("result container query failed: {0}")]
    ResultQuery(#[source] PageError),
}

impl SearchError {
    /// True when the failure was a page-query deadline expiring, which a
    /// caller may reasonably retry at a higher level
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Navigation { source, .. }
            | Self::StatsNotFound(source)
            | Self::StatsText(source)
            | Self::ResultQuery(source) => source.is_timeout(),
            Self::EmptyQuery | Self::UrlBuild(_) | Self::InvalidCount { .. } => false,
        }
    }
}
