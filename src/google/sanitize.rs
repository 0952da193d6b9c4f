//! Pre-extraction DOM cleanup
//!
//! "Related queries" widgets share enough attributes with organic result
//! containers to produce false positives in the container query, so they
//! are removed from the live DOM before any extraction query runs.

use tracing::debug;

use crate::page::SerpPage;

/// Removes every noise node matching [`super::NOISE_SELECTOR`] in one
/// evaluated script
const STRIP_NOISE_SCRIPT: &str =
    ";(() => { document.querySelectorAll('div[data-initq]').forEach(el => el.remove()); })();";

/// Strip known noise nodes from the rendered DOM
///
/// Best-effort: a page without noise nodes, or a failed evaluation, must
/// not fail the search.
pub(crate) async fn strip_noise<P: SerpPage>(page: &P) {
    if let Err(e) = page.evaluate(STRIP_NOISE_SCRIPT).await {
        debug!(error = %e, "noise-node removal script failed");
    }
}
