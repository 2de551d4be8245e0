//! Netscape Bookmark File Format parser.
//!
//! Every browser's HTML bookmark export descends from this format. The
//! parser walks the document's anchor elements in order and never errors:
//! anchors without an `http(s)` href are dropped, missing attributes
//! degrade to defaults.

use chrono::{DateTime, TimeZone, Utc};
use scraper::{Html, Selector};

use crate::models::{is_http_url, BookmarkCandidate, DEFAULT_TITLE};

/// Parse the full text of a Netscape bookmark export into candidates, in
/// document order.
pub fn parse_netscape(html: &str) -> Vec<BookmarkCandidate> {
    let Ok(anchors) = Selector::parse("a") else {
        return Vec::new();
    };
    let document = Html::parse_document(html);

    let mut out = Vec::new();
    for anchor in document.select(&anchors) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        if !is_http_url(href) {
            continue;
        }

        let text = anchor.text().collect::<String>();
        let title = match text.trim() {
            "" => DEFAULT_TITLE.to_string(),
            t => t.to_string(),
        };

        let mut candidate = BookmarkCandidate::new(title, href.to_string());
        candidate.added_at = anchor
            .value()
            .attr("add_date")
            .and_then(epoch_seconds_to_utc);
        candidate.icon = anchor.value().attr("icon").map(|i| i.to_string());
        out.push(candidate);
    }
    out
}

/// `ADD_DATE` carries Unix epoch seconds. Absent or non-numeric values
/// yield `None`. Kept separate from the Chromium conversion: the two
/// formats use different epochs and units.
fn epoch_seconds_to_utc(raw: &str) -> Option<DateTime<Utc>> {
    let secs: i64 = raw.trim().parse().ok()?;
    Utc.timestamp_opt(secs, 0).single()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::SecondsFormat;

    const EXPORT: &str = r#"<!DOCTYPE NETSCAPE-Bookmark-file-1>
<META HTTP-EQUIV="Content-Type" CONTENT="text/html; charset=UTF-8">
<TITLE>Bookmarks</TITLE>
<H1>Bookmarks</H1>
<DL><p>
    <DT><H3 ADD_DATE="1690000000">Reading</H3>
    <DL><p>
        <DT><A HREF="https://example.com/a" ADD_DATE="1700000000" ICON="data:image/png;base64,AAA=">First</A>
        <DT><A HREF="http://example.com/b">Second</A>
        <DT><A HREF="javascript:void(0)">Bookmarklet</A>
        <DT><A HREF="ftp://example.com/c">Legacy</A>
        <DT><A HREF="https://example.com/d">   </A>
    </DL><p>
</DL><p>
"#;

    #[test]
    fn test_non_http_anchors_are_dropped() {
        let candidates = parse_netscape(EXPORT);
        assert_eq!(candidates.len(), 3);
        assert!(candidates.iter().all(|c| is_http_url(&c.url)));
    }

    #[test]
    fn test_document_order_is_preserved() {
        let candidates = parse_netscape(EXPORT);
        let urls: Vec<&str> = candidates.iter().map(|c| c.url.as_str()).collect();
        assert_eq!(
            urls,
            [
                "https://example.com/a",
                "http://example.com/b",
                "https://example.com/d"
            ]
        );
    }

    #[test]
    fn test_add_date_epoch_seconds_conversion() {
        let dt = epoch_seconds_to_utc("1700000000").unwrap();
        assert_eq!(
            dt.to_rfc3339_opts(SecondsFormat::Millis, true),
            "2023-11-14T22:13:20.000Z"
        );
    }

    #[test]
    fn test_add_date_non_numeric_is_none() {
        assert!(epoch_seconds_to_utc("").is_none());
        assert!(epoch_seconds_to_utc("yesterday").is_none());
        assert!(epoch_seconds_to_utc("17e9").is_none());
    }

    #[test]
    fn test_missing_add_date_yields_none() {
        let candidates = parse_netscape(EXPORT);
        assert!(candidates[0].added_at.is_some());
        assert!(candidates[1].added_at.is_none());
    }

    #[test]
    fn test_icon_attribute_is_kept_verbatim() {
        let candidates = parse_netscape(EXPORT);
        assert_eq!(
            candidates[0].icon.as_deref(),
            Some("data:image/png;base64,AAA=")
        );
        assert!(candidates[1].icon.is_none());
    }

    #[test]
    fn test_blank_title_defaults_to_untitled() {
        let candidates = parse_netscape(EXPORT);
        assert_eq!(candidates[2].title, DEFAULT_TITLE);
    }

    #[test]
    fn test_defaults_applied_at_parse_time() {
        let candidates = parse_netscape(EXPORT);
        for c in &candidates {
            assert!(!c.title.is_empty());
            assert_eq!(c.category, crate::category::FALLBACK_CATEGORY);
            assert!(c.tags.is_empty());
            assert!(c.description.is_empty());
            assert!(!c.is_favorite);
        }
    }

    #[test]
    fn test_malformed_markup_degrades_gracefully() {
        let html =
            "<dl><dt><a href=\"https://ok.example\" add_date=>Unclosed</a><dt><a>no href</a></dl";
        let candidates = parse_netscape(html);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].url, "https://ok.example");
        assert!(candidates[0].added_at.is_none());
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        assert!(parse_netscape("").is_empty());
    }
}
