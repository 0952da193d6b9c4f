//! Fixture-backed fake page for pipeline tests
//!
//! Implements the page capability traits over declarative fixtures, and
//! records every navigation, query, script, and close so tests can assert
//! on the pipeline's interaction contract, not just its output.

#![allow(dead_code)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use serpscrape::google::{DESCRIPTION_SELECTOR, RESULT_SELECTOR, STATS_SELECTOR, TITLE_SELECTOR};
use serpscrape::page::{PageError, SerpElement, SerpPage};

/// Primary link of a fixture container
#[derive(Debug, Clone)]
pub enum LinkFixture {
    /// No `a` element at all
    Missing,
    /// Link present, `href` attribute absent
    NoHref,
    /// Link present with this target
    Href(String),
}

/// Title heading of a fixture container
#[derive(Debug, Clone)]
pub enum TitleFixture {
    /// No `h3` inside the link
    MissingNode,
    /// Heading present, text extraction fails
    UnreadableText,
    /// Heading with this text
    Text(String),
}

/// Description node of a fixture container
#[derive(Debug, Clone)]
pub enum DescFixture {
    /// No description node
    Missing,
    /// Node present, text extraction fails
    Unreadable,
    /// Node with this text
    Text(String),
}

/// One result container on the fixture page
#[derive(Debug, Clone)]
pub struct ContainerFixture {
    pub link: LinkFixture,
    pub title: TitleFixture,
    pub description: DescFixture,
}

impl ContainerFixture {
    /// A fully populated container
    pub fn complete(href: &str, title: &str, description: &str) -> Self {
        Self {
            link: LinkFixture::Href(href.to_string()),
            title: TitleFixture::Text(title.to_string()),
            description: DescFixture::Text(description.to_string()),
        }
    }
}

/// Results-summary node state on the fixture page
#[derive(Debug, Clone)]
pub enum StatsFixture {
    /// Node absent; the stats query times out
    Missing,
    /// Node present, text extraction fails
    Unreadable,
    /// Node with this text
    Text(String),
}

/// A scripted rendered page
pub struct FakePage {
    pub stats: StatsFixture,
    pub containers: Vec<ContainerFixture>,
    /// Navigation fails when set, as on an unreachable network
    pub fail_goto: bool,

    pub navigations: Mutex<Vec<String>>,
    pub queries: Mutex<Vec<String>>,
    pub scripts: Mutex<Vec<String>>,
    pub closes: AtomicUsize,
}

impl FakePage {
    pub fn new(stats: StatsFixture, containers: Vec<ContainerFixture>) -> Self {
        Self {
            stats,
            containers,
            fail_goto: false,
            navigations: Mutex::new(Vec::new()),
            queries: Mutex::new(Vec::new()),
            scripts: Mutex::new(Vec::new()),
            closes: AtomicUsize::new(0),
        }
    }

    /// Page whose summary reports `total` with the usual phrasing
    pub fn with_total(total: u64, containers: Vec<ContainerFixture>) -> Self {
        Self::new(
            StatsFixture::Text(format!("About {total} results (0.42 seconds)")),
            containers,
        )
    }

    pub fn close_count(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }

    pub fn queried_selectors(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }

    pub fn evaluated_scripts(&self) -> Vec<String> {
        self.scripts.lock().unwrap().clone()
    }
}

/// Element handle into a [`FakePage`]
#[derive(Debug, Clone)]
pub enum FakeElement {
    Stats(StatsFixture),
    Container(ContainerFixture),
    Link(ContainerFixture),
    Heading(ContainerFixture),
    Description(ContainerFixture),
}

impl SerpPage for FakePage {
    type Element = FakeElement;

    async fn goto(&self, url: &str) -> Result<(), PageError> {
        self.navigations.lock().unwrap().push(url.to_string());
        if self.fail_goto {
            return Err(PageError::Backend("net::ERR_CONNECTION_RESET".to_string()));
        }
        Ok(())
    }

    async fn query_all(
        &self,
        selector: &str,
        timeout: Duration,
    ) -> Result<Vec<FakeElement>, PageError> {
        self.queries.lock().unwrap().push(selector.to_string());

        match selector {
            STATS_SELECTOR => match &self.stats {
                StatsFixture::Missing => Err(PageError::Timeout {
                    selector: selector.to_string(),
                    waited: timeout,
                }),
                stats => Ok(vec![FakeElement::Stats(stats.clone())]),
            },
            RESULT_SELECTOR => {
                if self.containers.is_empty() {
                    return Err(PageError::Timeout {
                        selector: selector.to_string(),
                        waited: timeout,
                    });
                }
                Ok(self
                    .containers
                    .iter()
                    .cloned()
                    .map(FakeElement::Container)
                    .collect())
            }
            other => Err(PageError::NotFound {
                selector: other.to_string(),
            }),
        }
    }

    async fn evaluate(&self, script: &str) -> Result<(), PageError> {
        self.scripts.lock().unwrap().push(script.to_string());
        Ok(())
    }

    async fn close(&self) -> Result<(), PageError> {
        self.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

impl SerpElement for FakeElement {
    async fn find(&self, selector: &str) -> Result<Self, PageError> {
        let not_found = || PageError::NotFound {
            selector: selector.to_string(),
        };

        match self {
            FakeElement::Container(c) => match selector {
                "a" => match c.link {
                    LinkFixture::Missing => Err(not_found()),
                    _ => Ok(FakeElement::Link(c.clone())),
                },
                DESCRIPTION_SELECTOR => match c.description {
                    DescFixture::Missing => Err(not_found()),
                    _ => Ok(FakeElement::Description(c.clone())),
                },
                _ => Err(not_found()),
            },
            FakeElement::Link(c) => match selector {
                TITLE_SELECTOR => match c.title {
                    TitleFixture::MissingNode => Err(not_found()),
                    _ => Ok(FakeElement::Heading(c.clone())),
                },
                _ => Err(not_found()),
            },
            _ => Err(not_found()),
        }
    }

    async fn text(&self) -> Result<String, PageError> {
        match self {
            FakeElement::Stats(StatsFixture::Text(text)) => Ok(text.clone()),
            FakeElement::Stats(_) => Err(PageError::Backend("node text unavailable".to_string())),
            FakeElement::Heading(c) => match &c.title {
                TitleFixture::Text(text) => Ok(text.clone()),
                _ => Err(PageError::Backend("node text unavailable".to_string())),
            },
            FakeElement::Description(c) => match &c.description {
                DescFixture::Text(text) => Ok(text.clone()),
                _ => Err(PageError::Backend("node text unavailable".to_string())),
            },
            _ => Err(PageError::Backend("no text on this element".to_string())),
        }
    }

    async fn attribute(&self, name: &str) -> Result<Option<String>, PageError> {
        match (self, name) {
            (FakeElement::Link(c), "href") => match &c.link {
                LinkFixture::Href(href) => Ok(Some(href.clone())),
                _ => Ok(None),
            },
            _ => Ok(None),
        }
    }
}
