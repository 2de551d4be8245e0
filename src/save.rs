//! Single-URL save flow: fetch → extract → categorize → store.

use anyhow::{bail, Result};

use crate::category;
use crate::config::Config;
use crate::db;
use crate::fetch::{FetchedPage, HttpFetcher, PageFetcher};
use crate::metadata;
use crate::models::{is_http_url, BookmarkCandidate, DEFAULT_TITLE};
use crate::store::{BookmarkStore, InsertOutcome, Ownership, SqliteStore};

/// Build a finalized candidate from a fetched page. Works equally for an
/// empty page (fetch soft-failure): the result is a bare bookmark with the
/// URL as its only signal.
pub fn candidate_from_page(html: &str, final_url: &str) -> BookmarkCandidate {
    let meta = metadata::extract(html, final_url);

    let title = if meta.title.is_empty() {
        DEFAULT_TITLE.to_string()
    } else {
        meta.title
    };

    let mut candidate = BookmarkCandidate::new(title, meta.url);
    candidate.description = meta.description;
    // The extracted preview image rides in the icon slot; added_at stays
    // empty — creation time is the store's to assign.
    candidate.icon = meta.image;
    candidate.category = category::resolve(&candidate);
    candidate
}

pub async fn run_save(
    config: &Config,
    url: &str,
    user: Option<String>,
    collection: Option<String>,
) -> Result<()> {
    if !is_http_url(url) {
        bail!("Only http/https URLs can be saved: {}", url);
    }

    let fetcher = HttpFetcher::new(&config.fetch)?;
    let page = match fetcher.fetch(url).await {
        Ok(page) => page,
        Err(err) => {
            // Timeouts and unreachable hosts are soft failures: the
            // bookmark is saved without metadata.
            eprintln!("warning: fetch failed ({:#}); saving without metadata", err);
            FetchedPage {
                html: String::new(),
                final_url: url.to_string(),
            }
        }
    };

    let candidate = candidate_from_page(&page.html, &page.final_url);

    let pool = db::connect(&config.db).await?;
    let store = SqliteStore::new(pool.clone());
    let owner = Ownership {
        user_id: user.unwrap_or_else(|| config.import.default_user.clone()),
        collection_id: collection,
    };

    let outcome = store.insert(&owner, &candidate).await?;

    println!("save {}", candidate.url);
    println!("  title: {}", candidate.title);
    println!("  category: {}", candidate.category);
    match outcome {
        InsertOutcome::Created => println!("  created"),
        InsertOutcome::Duplicate => println!("  skipped (duplicate)"),
    }
    println!("ok");

    pool.close().await;
    Ok(())
}
