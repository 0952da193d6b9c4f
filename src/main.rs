//! CLI entry point: run one search and print the results as JSON.

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use serpscrape::{BrowserManager, Google, Query, SearchConfig, SearchResults};

#[derive(Debug, Parser)]
#[command(
    name = "serpscrape",
    version,
    about = "Extract structured results from a rendered SERP"
)]
struct Cli {
    /// Search terms
    #[arg(required = true)]
    query: Vec<String>,

    /// Restrict results to one site (site: operator)
    #[arg(long)]
    site: Option<String>,

    /// Restrict results to one file type (filetype: operator)
    #[arg(long)]
    filetype: Option<String>,

    /// Result language code (hl parameter)
    #[arg(long)]
    lang: Option<String>,

    /// Requested number of results per page
    #[arg(long, default_value_t = 0)]
    limit: u32,

    /// Paging offset
    #[arg(long, default_value_t = 0)]
    offset: u32,

    /// Leave the results page open after the search (for debugging)
    #[arg(long)]
    leave_page_open: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let query = Query {
        text: cli.query.join(" "),
        site: cli.site.unwrap_or_default(),
        filetype: cli.filetype.unwrap_or_default(),
        lang_code: cli.lang.unwrap_or_default(),
        limit: cli.limit,
        offset: cli.offset,
    };

    let manager = BrowserManager::new();
    let browser = manager.get_or_launch().await?;

    let page = {
        let guard = browser.lock().await;
        let wrapper = guard.as_ref().context("browser not running")?;
        wrapper.new_serp_page().await?
    };

    let config = SearchConfig::default().with_leave_page_open(cli.leave_page_open);
    let engine = Google::new(config);

    let results = engine.search(&page, &query).await?;
    println!(
        "{}",
        serde_json::to_string_pretty(&SearchResults::new(query, results))?
    );

    manager.shutdown().await?;
    Ok(())
}
