//! Total-result-count parsing
//!
//! The results-summary node carries free-form text like
//! `"About 1,234,567 results (0.42 seconds)"`: a locale-separated number
//! followed by a parenthesized timing fragment whose own digits must not
//! leak into the count. The trailing fragment is removed by pattern match
//! (not by a fixed-length cut, which breaks the moment the phrase length
//! shifts), then the remaining decimal digits are concatenated and parsed.

use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::STATS_SELECTOR;
use crate::error::{SearchError, SearchOutcome};
use crate::page::{PageError, SerpElement, SerpPage};

/// Trailing parenthesized fragment, e.g. `"(0.42 seconds)"`
static TIMING_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\([^()]*\)\s*$").expect("valid timing-suffix regex"));

/// Single decimal digit, matched in order across the remaining text
static DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d").expect("valid digit regex"));

/// Locate the results-summary node and parse the reported total
///
/// # Errors
/// - `StatsNotFound` when the node is absent or the query times out
/// - `StatsText` when the node's text cannot be read
/// - `InvalidCount` when the text yields no digits or overflows
pub(crate) async fn find_total_results<P: SerpPage>(
    page: &P,
    timeout: Duration,
) -> SearchOutcome<u64> {
    let matches = page
        .query_all(STATS_SELECTOR, timeout)
        .await
        .map_err(SearchError::StatsNotFound)?;

    let Some(node) = matches.first() else {
        return Err(SearchError::StatsNotFound(PageError::NotFound {
            selector: STATS_SELECTOR.to_string(),
        }));
    };

    let text = node.text().await.map_err(SearchError::StatsText)?;
    parse_total(&text)
}

/// Parse the total count out of the summary text
///
/// Digit-free text (e.g. a localized "no results" phrase once the timing
/// fragment is stripped) is an `InvalidCount` error, never a silent zero;
/// a real zero total arrives as the digit `0`.
pub(crate) fn parse_total(text: &str) -> SearchOutcome<u64> {
    let remainder = TIMING_SUFFIX.replace(text, "");

    let digits: String = DIGIT
        .find_iter(&remainder)
        .map(|m| m.as_str())
        .collect();

    if digits.is_empty() {
        debug!(text, "results summary carried no digits");
        return Err(SearchError::InvalidCount {
            text: remainder.into_owned(),
            reason: "no digits in results summary".to_string(),
        });
    }

    digits.parse::<u64>().map_err(|e| SearchError::InvalidCount {
        text: remainder.into_owned(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn parses_separated_total() {
        let total = parse_total("About 1,234,567 results (0.42 seconds)").unwrap();
        assert_eq!(total, 1_234_567);
    }

    #[test]
    fn parses_dotted_locale_separator() {
        let total = parse_total("Ungefähr 1.234.567 Ergebnisse (0,38 Sekunden)").unwrap();
        assert_eq!(total, 1_234_567);
    }

    #[test]
    fn timing_digits_do_not_leak() {
        // Without suffix stripping this would parse as 42042.
        let total = parse_total("About 42 results (0.42 seconds)").unwrap();
        assert_eq!(total, 42);
    }

    #[test]
    fn explicit_zero_is_zero() {
        let total = parse_total("About 0 results (0.15 seconds)").unwrap();
        assert_eq!(total, 0);
    }

    #[test]
    fn digit_free_summary_is_an_error() {
        let err = parse_total("No results found (0.10 seconds)").unwrap_err();
        assert!(matches!(err, SearchError::InvalidCount { .. }));
    }

    #[test]
    fn missing_timing_suffix_still_parses() {
        let total = parse_total("About 9,900 results").unwrap();
        assert_eq!(total, 9_900);
    }

    #[test]
    fn overflow_fails_instead_of_wrapping() {
        // 30 digits, far beyond u64::MAX.
        let err = parse_total("About 999,999,999,999,999,999,999,999,999,999 results (0.42 seconds)")
            .unwrap_err();
        assert!(matches!(err, SearchError::InvalidCount { .. }));
    }

    proptest! {
        /// Any total rendered in the observed summary shape round-trips.
        #[test]
        fn rendered_totals_round_trip(total: u64, millis in 0u32..10_000) {
            let rendered = format!(
                "About {} results ({}.{:02} seconds)",
                group_thousands(total),
                millis / 1000,
                (millis % 1000) / 10,
            );
            prop_assert_eq!(parse_total(&rendered).unwrap(), total);
        }
    }

    fn group_thousands(n: u64) -> String {
        let digits = n.to_string();
        let mut grouped = String::new();
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(c);
        }
        grouped
    }
}
