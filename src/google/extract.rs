//! Result-list extraction
//!
//! Walks the matched result containers in document order and builds one
//! [`SearchResult`] per usable container. Extraction is best-effort at the
//! entry level: what happens when a field is missing or unreadable is fixed
//! by the policy constants below, not decided inline, so the tolerance
//! contract stays auditable in one place.

use tracing::{debug, warn};

use super::{DESCRIPTION_SELECTOR, LINK_SELECTOR, TITLE_PLACEHOLDER, TITLE_SELECTOR};
use crate::page::SerpElement;
use crate::types::SearchResult;

/// What to do when a field cannot be located or read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingField {
    /// Drop the whole entry; its rank slot stays consumed
    SkipEntry,
    /// Emit the entry with an empty string for this field
    Degrade,
    /// Emit the entry with a fixed placeholder for this field
    Placeholder(&'static str),
}

/// Primary link element absent: the entry has no target, drop it
pub const LINK_POLICY: MissingField = MissingField::SkipEntry;

/// `href` attribute absent or unreadable: keep the entry, URL is empty
pub const URL_POLICY: MissingField = MissingField::Degrade;

/// Title heading absent: structurally mandatory, drop the entry
pub const TITLE_NODE_POLICY: MissingField = MissingField::SkipEntry;

/// Title heading present but text unreadable: keep the entry under a
/// placeholder title
pub const TITLE_TEXT_POLICY: MissingField = MissingField::Placeholder(TITLE_PLACEHOLDER);

/// Description node absent or unreadable: keep the entry, description is
/// empty (the selector is known not to match all markup variants)
pub const DESCRIPTION_POLICY: MissingField = MissingField::Degrade;

/// Fallback value for a string field under `policy`, `None` meaning the
/// entry must be skipped
fn fallback(policy: MissingField) -> Option<String> {
    match policy {
        MissingField::SkipEntry => None,
        MissingField::Degrade => Some(String::new()),
        MissingField::Placeholder(text) => Some(text.to_string()),
    }
}

/// Extract one result per usable container, preserving document order
///
/// Rank is the 1-based position among *all* containers examined, so a
/// skipped container leaves a gap in the produced ranks rather than
/// compacting the numbering.
pub(crate) async fn extract_results<E: SerpElement>(containers: &[E]) -> Vec<SearchResult> {
    let mut results = Vec::with_capacity(containers.len());

    for (i, container) in containers.iter().enumerate() {
        if let Some(result) = extract_entry(container, i + 1).await {
            results.push(result);
        }
    }

    debug!(
        extracted = results.len(),
        examined = containers.len(),
        "result extraction complete"
    );
    results
}

async fn extract_entry<E: SerpElement>(container: &E, rank: usize) -> Option<SearchResult> {
    let Ok(link) = container.find(LINK_SELECTOR).await else {
        // LINK_POLICY
        debug!(rank, "result container has no link element, skipping entry");
        return None;
    };

    let url = match link.attribute("href").await {
        Ok(Some(href)) => href,
        Ok(None) | Err(_) => {
            warn!(rank, "no `href` on result link");
            fallback(URL_POLICY)?
        }
    };

    let Ok(heading) = link.find(TITLE_SELECTOR).await else {
        // TITLE_NODE_POLICY
        warn!(rank, "no `h3` in result link, skipping entry");
        return None;
    };

    let title = match heading.text().await {
        Ok(text) => text,
        Err(e) => {
            warn!(rank, error = %e, "cannot extract title text");
            fallback(TITLE_TEXT_POLICY)?
        }
    };

    let description = match container.find(DESCRIPTION_SELECTOR).await {
        Ok(node) => match node.text().await {
            Ok(text) => text,
            Err(e) => {
                debug!(rank, error = %e, "cannot extract description text");
                fallback(DESCRIPTION_POLICY)?
            }
        },
        Err(_) => {
            debug!(rank, "no description node matched {DESCRIPTION_SELECTOR:?}");
            fallback(DESCRIPTION_POLICY)?
        }
    };

    Some(SearchResult {
        rank,
        url,
        title,
        description,
    })
}
