//! Page metadata extraction.
//!
//! Pulls a best-effort title, description, preview image, and canonical URL
//! out of raw HTML using prioritized fallback chains over Open Graph,
//! Twitter, and plain meta tags. The HTML is parsed with a real DOM, so
//! malformed tags, bare attribute values, and single quotes are tolerated;
//! extraction never fails — the worst case is an all-empty result carrying
//! the input URL.

use std::collections::HashMap;

use scraper::{Html, Selector};
use url::Url;

use crate::models::ExtractedMetadata;

/// Extract metadata from `html` as fetched from `base_url`.
///
/// The returned `url` is the page's canonical URL when it declares one
/// (`<link rel="canonical">`, then `og:url`), otherwise `base_url`. The
/// preview image is resolved absolute against that canonical URL, not the
/// fetch URL — the two differ after redirects.
pub fn extract(html: &str, base_url: &str) -> ExtractedMetadata {
    if html.trim().is_empty() {
        return ExtractedMetadata {
            url: base_url.to_string(),
            ..Default::default()
        };
    }

    let document = Html::parse_document(html);
    let meta = collect_meta_values(&document);
    let canonical_links = collect_canonical_hrefs(&document);
    let title_tag = collect_title_tag(&document);

    let title = first_non_empty(&meta, &["og:title", "twitter:title"])
        .unwrap_or_else(|| title_tag.unwrap_or_default());
    let description = first_non_empty(
        &meta,
        &["og:description", "twitter:description", "description"],
    )
    .unwrap_or_default();
    let image_raw = first_non_empty(
        &meta,
        &[
            "og:image:secure_url",
            "og:image",
            "twitter:image",
            "twitter:image:src",
        ],
    )
    .unwrap_or_default();

    let url = canonical_links
        .into_iter()
        .map(|href| href.trim().to_string())
        .find(|href| !href.is_empty())
        .or_else(|| first_non_empty(&meta, &["og:url"]))
        .unwrap_or_else(|| base_url.to_string());

    let image = match image_raw.as_str() {
        "" => None,
        raw => Some(resolve_against(&url, raw)),
    };

    ExtractedMetadata {
        title: normalize_text(&title),
        description: normalize_text(&description),
        image,
        url,
    }
}

/// Multi-valued map of every `<meta>` tag's content, keyed by lowercased
/// `property`, `name`, and `http-equiv`. All values per key are retained;
/// lookups take the first non-empty one.
fn collect_meta_values(document: &Html) -> HashMap<String, Vec<String>> {
    let mut map: HashMap<String, Vec<String>> = HashMap::new();
    let Ok(selector) = Selector::parse("meta") else {
        return map;
    };
    for element in document.select(&selector) {
        let content = element.value().attr("content").unwrap_or("");
        for key_attr in ["property", "name", "http-equiv"] {
            if let Some(key) = element.value().attr(key_attr) {
                map.entry(key.trim().to_lowercase())
                    .or_default()
                    .push(content.to_string());
            }
        }
    }
    map
}

fn collect_canonical_hrefs(document: &Html) -> Vec<String> {
    let Ok(selector) = Selector::parse("link") else {
        return Vec::new();
    };
    document
        .select(&selector)
        .filter(|el| {
            el.value()
                .attr("rel")
                .map(|rel| {
                    rel.split_whitespace()
                        .any(|part| part.eq_ignore_ascii_case("canonical"))
                })
                .unwrap_or(false)
        })
        .filter_map(|el| el.value().attr("href").map(|h| h.to_string()))
        .collect()
}

fn collect_title_tag(document: &Html) -> Option<String> {
    let selector = Selector::parse("title").ok()?;
    document
        .select(&selector)
        .next()
        .map(|el| el.text().collect::<String>())
}

fn first_non_empty(map: &HashMap<String, Vec<String>>, keys: &[&str]) -> Option<String> {
    for key in keys {
        if let Some(values) = map.get(*key) {
            if let Some(value) = values.iter().map(|v| v.trim()).find(|v| !v.is_empty()) {
                return Some(value.to_string());
            }
        }
    }
    None
}

/// Join a possibly-relative reference against the page's canonical URL.
/// Any parse failure returns the raw reference unchanged.
fn resolve_against(base: &str, reference: &str) -> String {
    match Url::parse(base).and_then(|b| b.join(reference)) {
        Ok(resolved) => resolved.to_string(),
        Err(_) => reference.to_string(),
    }
}

/// Decode the six common HTML entities, collapse whitespace runs to single
/// spaces, and trim. `&amp;` is decoded last so pre-encoded sequences are
/// not decoded twice in one pass.
fn normalize_text(raw: &str) -> String {
    let decoded = raw
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&");
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}
