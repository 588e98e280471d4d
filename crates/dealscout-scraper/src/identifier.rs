//! Product identifier extraction and canonical product URLs.
//!
//! Listing anchors point at URLs like
//! `https://www.amazon.co.uk/Desk-Lamp/dp/B07XJ8C8F5/ref=sr_1_3?keywords=...`.
//! The identifier is the segment between the detail-page marker and the
//! reference (or query) marker that follows it.

use dealscout_core::ProductIdentifier;

use crate::error::ScraperError;

/// Path segment that precedes the identifier on detail-page URLs.
pub const DETAIL_PATH: &str = "dp/";

const DETAIL_MARKER: &str = "/dp/";
const REFERENCE_MARKER: &str = "/ref";
const QUERY_MARKER: char = '?';

/// Extracts the product identifier from a detail-page URL.
///
/// # Errors
///
/// Returns [`ScraperError::MalformedUrl`] if the detail marker or the
/// terminating reference/query marker is absent, or if the segment between
/// them is not an alphanumeric identifier.
pub fn extract_id(url: &str) -> Result<ProductIdentifier, ScraperError> {
    let malformed = |reason: &str| ScraperError::MalformedUrl {
        url: url.to_owned(),
        reason: reason.to_owned(),
    };

    let start = url
        .find(DETAIL_MARKER)
        .ok_or_else(|| malformed("no /dp/ segment"))?
        + DETAIL_MARKER.len();
    let rest = &url[start..];

    let end = match (rest.find(REFERENCE_MARKER), rest.find(QUERY_MARKER)) {
        (Some(r), Some(q)) => r.min(q),
        (Some(r), None) => r,
        (None, Some(q)) => q,
        (None, None) => return Err(malformed("no /ref or query marker after identifier")),
    };

    ProductIdentifier::parse(&rest[..end])
        .ok_or_else(|| malformed("identifier segment is empty or not alphanumeric"))
}

/// Builds the canonical detail-page URL for `id`, e.g.
/// `build_url("https://x/", id)` → `"https://x/dp/B000ABC123"`.
#[must_use]
pub fn build_url(base: &str, id: &ProductIdentifier) -> String {
    format!("{}/{DETAIL_PATH}{id}", base.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: &str) -> ProductIdentifier {
        ProductIdentifier::parse(raw).unwrap()
    }

    #[test]
    fn extracts_between_detail_and_ref_markers() {
        assert_eq!(
            extract_id("https://x/dp/B000ABC123/ref=xyz").unwrap(),
            id("B000ABC123")
        );
    }

    #[test]
    fn extracts_from_slugged_listing_url() {
        let url = "https://www.amazon.co.uk/Lumina-LED-Desk-Lamp/dp/B07XJ8C8F5/ref=sr_1_3?keywords=desk+lamp&qid=1";
        assert_eq!(extract_id(url).unwrap(), id("B07XJ8C8F5"));
    }

    #[test]
    fn extracts_from_relative_href() {
        assert_eq!(
            extract_id("/Desk-Lamp/dp/B07XJ8C8F5/ref=sr_1_1").unwrap(),
            id("B07XJ8C8F5")
        );
    }

    #[test]
    fn query_marker_also_terminates() {
        assert_eq!(
            extract_id("https://x/dp/B000ABC123?th=1&psc=1").unwrap(),
            id("B000ABC123")
        );
    }

    #[test]
    fn earliest_terminator_wins() {
        assert_eq!(
            extract_id("https://x/dp/B000ABC123?tag=a/ref=b").unwrap(),
            id("B000ABC123")
        );
    }

    #[test]
    fn missing_detail_marker_is_malformed() {
        let err = extract_id("https://x/gp/B000ABC123/ref=xyz").unwrap_err();
        assert!(
            matches!(err, ScraperError::MalformedUrl { ref reason, .. } if reason.contains("/dp/")),
            "expected MalformedUrl, got: {err:?}"
        );
    }

    #[test]
    fn missing_terminator_is_malformed() {
        assert!(matches!(
            extract_id("https://x/dp/B000ABC123"),
            Err(ScraperError::MalformedUrl { .. })
        ));
    }

    #[test]
    fn empty_segment_is_malformed() {
        assert!(matches!(
            extract_id("https://x/dp//ref=xyz"),
            Err(ScraperError::MalformedUrl { .. })
        ));
    }

    #[test]
    fn build_url_with_trailing_slash_base() {
        assert_eq!(
            build_url("https://x/", &id("B000ABC123")),
            "https://x/dp/B000ABC123"
        );
    }

    #[test]
    fn build_url_without_trailing_slash_base() {
        assert_eq!(
            build_url("https://x", &id("B000ABC123")),
            "https://x/dp/B000ABC123"
        );
    }

    #[test]
    fn build_then_extract_round_trips() {
        for raw in ["B000ABC123", "0316769177", "B07XJ8C8F5", "X"] {
            let url = format!("{}/ref=", build_url("https://www.amazon.co.uk/", &id(raw)));
            assert_eq!(extract_id(&url).unwrap(), id(raw), "round trip for {raw}");
        }
    }
}
