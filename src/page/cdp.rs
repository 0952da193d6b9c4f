//! chromiumoxide-backed implementation of the page capability traits
//!
//! Timed queries are poll loops with an explicit deadline: CDP's
//! `find_elements` samples the DOM at one instant, but dynamically rendered
//! SERPs populate results after navigation completes, so we re-sample on an
//! interval until the deadline elapses.

use std::time::{Duration, Instant};

use chromiumoxide::element::Element;
use chromiumoxide::page::Page;
use tracing::{debug, trace};

use super::{PageError, SerpElement, SerpPage};

/// How often a timed query re-samples the DOM while waiting for a match
const QUERY_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// A chromiumoxide [`Page`] exposed through [`SerpPage`]
#[derive(Clone)]
pub struct CdpPage {
    page: Page,
}

impl CdpPage {
    /// Wrap an existing chromiumoxide page
    #[must_use]
    pub fn new(page: Page) -> Self {
        Self { page }
    }

    /// Access the underlying chromiumoxide page
    #[must_use]
    pub fn inner(&self) -> &Page {
        &self.page
    }
}

impl SerpPage for CdpPage {
    type Element = CdpElement;

    async fn goto(&self, url: &str) -> Result<(), PageError> {
        self.page.goto(url).await.map_err(PageError::backend)?;
        // goto resolves when the HTTP response arrives; the load event is
        // what settles the initial DOM.
        self.page
            .wait_for_navigation()
            .await
            .map_err(PageError::backend)?;
        Ok(())
    }

    async fn query_all(
        &self,
        selector: &str,
        timeout: Duration,
    ) -> Result<Vec<CdpElement>, PageError> {
        let start = Instant::now();

        loop {
            match self.page.find_elements(selector).await {
                Ok(elements) if !elements.is_empty() => {
                    debug!(
                        selector,
                        count = elements.len(),
                        elapsed = ?start.elapsed(),
                        "selector matched"
                    );
                    return Ok(elements.into_iter().map(CdpElement).collect());
                }
                // Not present yet. CDP reports "no nodes" both as an empty
                // set and as an error depending on the query path, so both
                // feed the poll loop.
                Ok(_) | Err(_) if start.elapsed() < timeout => {
                    tokio::time::sleep(QUERY_POLL_INTERVAL).await;
                }
                Ok(_) => {
                    return Err(PageError::Timeout {
                        selector: selector.to_string(),
                        waited: start.elapsed(),
                    });
                }
                Err(e) => {
                    trace!(selector, error = %e, "query gave up after deadline");
                    return Err(PageError::Timeout {
                        selector: selector.to_string(),
                        waited: start.elapsed(),
                    });
                }
            }
        }
    }

    async fn evaluate(&self, script: &str) -> Result<(), PageError> {
        self.page
            .evaluate(script)
            .await
            .map_err(PageError::backend)?;
        Ok(())
    }

    async fn close(&self) -> Result<(), PageError> {
        self.page
            .clone()
            .close()
            .await
            .map_err(PageError::backend)?;
        Ok(())
    }
}

/// A chromiumoxide [`Element`] exposed through [`SerpElement`]
pub struct CdpElement(Element);

impl SerpElement for CdpElement {
    async fn find(&self, selector: &str) -> Result<Self, PageError> {
        match self.0.find_element(selector).await {
            Ok(el) => Ok(Self(el)),
            Err(_) => Err(PageError::NotFound {
                selector: selector.to_string(),
            }),
        }
    }

    async fn text(&self) -> Result<String, PageError> {
        match self.0.inner_text().await {
            Ok(Some(text)) => Ok(text),
            // A node with no text renders as empty, not as a failure.
            Ok(None) => Ok(String::new()),
            Err(e) => Err(PageError::backend(e)),
        }
    }

    async fn attribute(&self, name: &str) -> Result<Option<String>, PageError> {
        self.0.attribute(name).await.map_err(PageError::backend)
    }
}
