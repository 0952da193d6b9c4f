//! Rendered-page capability traits
//!
//! The extraction pipeline never talks to a concrete browser-automation
//! backend. It depends on [`SerpPage`] and [`SerpElement`], a small
//! navigate/query/evaluate/close surface that the chromiumoxide
//! implementation in [`cdp`] provides in production and that tests replace
//! with a fixture-backed fake.

pub mod cdp;

pub use cdp::CdpPage;

use std::time::Duration;
use thiserror::Error;

/// Failures at the rendered-page boundary
///
/// Timeouts are a distinct kind: every page query carries an explicit
/// deadline, and a stalled page must surface as a typed failure rather than
/// an unbounded wait.
#[derive(Debug, Error)]
pub enum PageError {
    /// No element matched the selector
    #[error("no element matched selector {selector:?}")]
    NotFound {
        /// Selector that produced no matches
        selector: String,
    },

    /// Query deadline elapsed before any element matched
    #[error("query for {selector:?} timed out after {waited:?}")]
    Timeout {
        /// Selector that was being polled
        selector: String,
        /// How long the query waited before giving up
        waited: Duration,
    },

    /// Browser backend failure (lost connection, protocol error, ...)
    #[error("browser backend error: {0}")]
    Backend(String),
}

impl PageError {
    /// Wrap a backend error, keeping only its message
    pub(crate) fn backend(err: impl std::fmt::Display) -> Self {
        Self::Backend(err.to_string())
    }

    /// True for deadline expiry, as opposed to a definitive miss or a
    /// backend failure
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

/// One rendered, navigable page
///
/// The page is the single shared mutable resource of a search call: the
/// pipeline navigates it, removes noise nodes from its DOM, queries it, and
/// finally closes it unless the caller asked for it to stay open. One page
/// must not be shared by concurrent searches; independent pages are
/// independent.
#[allow(async_fn_in_trait)]
pub trait SerpPage {
    /// Element handle type produced by queries on this page
    type Element: SerpElement;

    /// Navigate to `url` and wait for the load to settle
    async fn goto(&self, url: &str) -> Result<(), PageError>;

    /// Query for all elements matching `selector`, waiting up to `timeout`
    /// for at least one match to appear in the DOM
    ///
    /// Dynamically rendered pages populate results after navigation
    /// completes, so a query must poll rather than sample once.
    async fn query_all(
        &self,
        selector: &str,
        timeout: Duration,
    ) -> Result<Vec<Self::Element>, PageError>;

    /// Evaluate a script in the page, discarding its value
    async fn evaluate(&self, script: &str) -> Result<(), PageError>;

    /// Close the page, releasing its renderer resources
    async fn close(&self) -> Result<(), PageError>;
}

/// One element handle within a rendered page
#[allow(async_fn_in_trait)]
pub trait SerpElement: Sized {
    /// Find the first descendant matching `selector`, without waiting
    async fn find(&self, selector: &str) -> Result<Self, PageError>;

    /// Visible text content of the element
    async fn text(&self) -> Result<String, PageError>;

    /// Attribute value, `None` when the attribute is absent
    async fn attribute(&self, name: &str) -> Result<Option<String>, PageError>;
}
