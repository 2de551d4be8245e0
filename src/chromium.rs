//! Chromium `Bookmarks` profile file parser.
//!
//! The file is a JSON tree under a `roots` object. Traversal is depth-first
//! pre-order, accumulating named folders into a path stack; a bookmark's
//! category is its top-level folder and its tags are the full flattened
//! path. Fails closed: unparseable JSON or a missing `roots` object yields
//! an empty sequence, never an error.

use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::category::FALLBACK_CATEGORY;
use crate::models::{is_http_url, BookmarkCandidate, DEFAULT_TITLE};

/// Microseconds between 1601-01-01 (the WebKit epoch) and 1970-01-01,
/// expressed in milliseconds.
const WEBKIT_EPOCH_OFFSET_MS: f64 = 11_644_473_600_000.0;

/// Parse the text of a Chromium-family `Bookmarks` file into candidates,
/// in tree pre-order.
pub fn parse_chromium(json_text: &str) -> Vec<BookmarkCandidate> {
    let Ok(document) = serde_json::from_str::<Value>(json_text) else {
        return Vec::new();
    };
    let Some(roots) = document.get("roots").and_then(|r| r.as_object()) else {
        return Vec::new();
    };

    let mut out = Vec::new();
    for root in roots.values() {
        // Start at each root's children: the synthetic root folders
        // ("Bookmarks bar", "Other bookmarks") never enter the path.
        if let Some(children) = root.get("children").and_then(|c| c.as_array()) {
            let mut path = Vec::new();
            for child in children {
                walk(child, &mut path, &mut out);
            }
        }
    }
    out
}

fn walk(node: &Value, path: &mut Vec<String>, out: &mut Vec<BookmarkCandidate>) {
    match node.get("type").and_then(|t| t.as_str()) {
        Some("folder") => {
            let Some(children) = node.get("children").and_then(|c| c.as_array()) else {
                return;
            };
            let name = node
                .get("name")
                .and_then(|n| n.as_str())
                .unwrap_or("")
                .trim();
            let named = !name.is_empty();
            if named {
                path.push(name.to_string());
            }
            for child in children {
                walk(child, path, out);
            }
            if named {
                path.pop();
            }
        }
        Some("url") => {
            let Some(url) = node.get("url").and_then(|u| u.as_str()) else {
                return;
            };
            if !is_http_url(url) {
                return;
            }

            let name = node
                .get("name")
                .and_then(|n| n.as_str())
                .unwrap_or("")
                .trim();
            let title = if name.is_empty() { DEFAULT_TITLE } else { name };

            let mut candidate = BookmarkCandidate::new(title.to_string(), url.to_string());
            candidate.added_at = node.get("date_added").and_then(webkit_timestamp_to_utc);
            candidate.category = path
                .first()
                .cloned()
                .unwrap_or_else(|| FALLBACK_CATEGORY.to_string());
            candidate.tags = path.clone();
            out.push(candidate);
        }
        _ => {}
    }
}

/// `date_added` is a WebKit timestamp: microseconds since 1601-01-01,
/// serialized as a decimal string. Values that are not finite positive
/// numbers yield `None`. Kept separate from the Netscape conversion: the
/// two formats use different epochs and units.
fn webkit_timestamp_to_utc(raw: &Value) -> Option<DateTime<Utc>> {
    let micros = match raw {
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        Value::Number(n) => n.as_f64()?,
        _ => return None,
    };
    if !micros.is_finite() || micros <= 0.0 {
        return None;
    }
    let unix_ms = micros / 1000.0 - WEBKIT_EPOCH_OFFSET_MS;
    Utc.timestamp_millis_opt(unix_ms as i64).single()
}
