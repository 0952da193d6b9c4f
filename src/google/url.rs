//! Search URL construction
//!
//! Consumes the query once per search. Operator fields (`site:`,
//! `filetype:`) fold into the `q` parameter; paging, count, and language
//! map to `start`, `num`, and `hl`.

use url::Url;

use super::SEARCH_BASE_URL;
use crate::error::{SearchError, SearchOutcome};
use crate::types::Query;

/// Build the results-page URL for `query`
///
/// # Errors
/// `EmptyQuery` when the query carries neither search terms nor a site
/// restriction.
pub fn build_url(query: &Query) -> SearchOutcome<String> {
    if query.is_empty() {
        return Err(SearchError::EmptyQuery);
    }

    let mut url = Url::parse(SEARCH_BASE_URL)?;

    let mut terms = query.text.trim().to_string();
    let site = query.site.trim();
    if !site.is_empty() {
        terms = format!("{terms} site:{site}");
    }
    let filetype = query.filetype.trim();
    if !filetype.is_empty() {
        terms = format!("{terms} filetype:{filetype}");
    }

    {
        let mut pairs = url.query_pairs_mut();
        pairs.append_pair("q", terms.trim());

        let lang = query.lang_code.trim();
        if !lang.is_empty() {
            pairs.append_pair("hl", lang);
        }
        if query.limit > 0 {
            pairs.append_pair("num", &query.limit.to_string());
        }
        if query.offset > 0 {
            pairs.append_pair("start", &query.offset.to_string());
        }
    }

    Ok(url.into())
}
