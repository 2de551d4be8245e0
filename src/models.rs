//! Core data models for the ingestion pipeline.
//!
//! These types represent bookmarks as they move from a raw export file or a
//! fetched page toward persistence. Both are transient: the store assigns
//! identity and long-lived timestamps on insert.

use chrono::{DateTime, Utc};

/// Title assigned when a source provides none.
pub const DEFAULT_TITLE: &str = "Untitled";

/// A parsed-but-not-yet-persisted bookmark.
///
/// Every candidate carries a non-empty `title` and an `http(s)` `url`;
/// parsers apply defaults at construction time so no field is ever left
/// undefined for the store.
#[derive(Debug, Clone, PartialEq)]
pub struct BookmarkCandidate {
    pub title: String,
    pub url: String,
    /// Best-effort creation time recovered from the source encoding.
    pub added_at: Option<DateTime<Utc>>,
    /// Favicon or preview-image reference, if the source had one.
    pub icon: Option<String>,
    pub description: String,
    pub category: String,
    /// Ordered tag list. Flattened folder paths land here for hierarchical
    /// sources. Serialized comma-joined only at storage/wire boundaries.
    pub tags: Vec<String>,
    pub is_favorite: bool,
}

impl BookmarkCandidate {
    /// A candidate with all defaults applied, ready for parsers to fill in.
    pub fn new(title: String, url: String) -> Self {
        Self {
            title,
            url,
            added_at: None,
            icon: None,
            description: String::new(),
            category: crate::category::FALLBACK_CATEGORY.to_string(),
            tags: Vec::new(),
            is_favorite: false,
        }
    }

    /// Comma-joined wire form of the tag list (`"Work, Projects"`).
    pub fn tags_joined(&self) -> String {
        self.tags.join(", ")
    }
}

/// Split a comma-joined tag string back into an ordered list, dropping
/// empty segments.
pub fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_string())
        .collect()
}

/// Best-effort metadata pulled from a fetched page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedMetadata {
    pub title: String,
    pub description: String,
    /// Absolute preview-image URL, resolved against the canonical URL.
    pub image: Option<String>,
    /// The page's declared canonical URL, or the fetch URL if none.
    pub url: String,
}

/// The acceptance predicate shared by both format parsers: only `http` and
/// `https` URLs survive ingestion, everything else is dropped silently.
pub fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}
