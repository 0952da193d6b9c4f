//! Search configuration
//!
//! Every external wait in the pipeline is bounded by one of these timeouts;
//! there are no unbounded queries. Defaults follow the behavior observed
//! against live result pages.

use std::time::Duration;

/// Default deadline for the results-summary (stats) query
pub const DEFAULT_STATS_TIMEOUT: Duration = Duration::from_secs(5);

/// Default deadline for the result-container query
pub const DEFAULT_RESULTS_TIMEOUT: Duration = Duration::from_secs(10);

/// Tunables for one search engine instance
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Deadline for locating the results-summary node
    pub stats_timeout: Duration,

    /// Deadline for locating result containers
    pub results_timeout: Duration,

    /// Leave the page open after the search instead of closing it
    ///
    /// Useful for debugging selector drift against a live page. The page
    /// then belongs to the caller; the pipeline will not touch it again.
    pub leave_page_open: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            stats_timeout: DEFAULT_STATS_TIMEOUT,
            results_timeout: DEFAULT_RESULTS_TIMEOUT,
            leave_page_open: false,
        }
    }
}

impl SearchConfig {
    /// Override the results-summary query deadline
    #[must_use]
    pub fn with_stats_timeout(mut self, timeout: Duration) -> Self {
        self.stats_timeout = timeout;
        self
    }

    /// Override the result-container query deadline
    #[must_use]
    pub fn with_results_timeout(mut self, timeout: Duration) -> Self {
        self.results_timeout = timeout;
        self
    }

    /// Keep the page open after the search completes
    #[must_use]
    pub fn with_leave_page_open(mut self, leave_open: bool) -> Self {
        self.leave_page_open = leave_open;
        self
    }
}
