//! Structured search-result extraction from rendered SERPs
//!
//! Drives a headless browser to a search-engine results page and parses the
//! rendered DOM into a total-result count and an ordered list of entries
//! (rank, URL, title, description). Extraction is best-effort per entry:
//! missing markup degrades or skips a single entry according to a fixed
//! policy, while navigation and count-parse failures abort the whole call
//! with a typed error.
//!
//! The pipeline depends only on the [`page::SerpPage`] capability trait;
//! production uses the chromiumoxide implementation, tests substitute a
//! fixture-backed fake.
//!
//! ```no_run
//! use serpscrape::{BrowserManager, Google, Query, SearchConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let manager = BrowserManager::new();
//!     let browser = manager.get_or_launch().await?;
//!
//!     let page = {
//!         let guard = browser.lock().await;
//!         let wrapper = guard.as_ref().expect("browser just launched");
//!         wrapper.new_serp_page().await?
//!     };
//!
//!     let engine = Google::new(SearchConfig::default());
//!     let query = Query {
//!         text: "rust async programming".to_string(),
//!         ..Query::default()
//!     };
//!     let results = engine.search(&page, &query).await?;
//!     println!("{} results", results.len());
//!
//!     manager.shutdown().await?;
//!     Ok(())
//! }
//! ```

pub mod browser;
pub mod config;
pub mod error;
pub mod google;
pub mod page;
pub mod types;

pub use browser::{BrowserManager, BrowserWrapper};
pub use config::SearchConfig;
pub use error::{SearchError, SearchOutcome};
pub use google::Google;
pub use page::{CdpPage, PageError, SerpElement, SerpPage};
pub use types::{Query, SearchResult, SearchResults};
