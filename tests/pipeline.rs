//! Library-level pipeline tests: parse → resolve → persist, without the CLI.

use linkstash::category;
use linkstash::ingest::{parse_export, persist_candidates, resolve_categories, ImportFormat};
use linkstash::metadata;
use linkstash::models::BookmarkCandidate;
use linkstash::save::candidate_from_page;
use linkstash::store::{BookmarkStore, InsertOutcome, MemoryStore, Ownership};

fn owner(user: &str) -> Ownership {
    Ownership {
        user_id: user.to_string(),
        collection_id: None,
    }
}

#[tokio::test]
async fn test_netscape_import_through_memory_store() {
    let export = r#"<DL><p>
        <DT><A HREF="https://github.com/tokio-rs/tokio" ADD_DATE="1700000000">Tokio</A>
        <DT><A HREF="file:///etc/passwd">Local</A>
        <DT><A HREF="https://example.com/course/intro">Free beginner course</A>
    </DL><p>"#;

    let mut candidates = parse_export(ImportFormat::Netscape, export);
    resolve_categories(&mut candidates);

    let store = MemoryStore::new();
    let report = persist_candidates(&store, &owner("u"), &candidates)
        .await
        .unwrap();
    assert_eq!(report.candidates, 2);
    assert_eq!(report.created, 2);
    assert_eq!(report.skipped, 0);

    let inserted = store.inserted();
    assert_eq!(inserted[0].url, "https://github.com/tokio-rs/tokio");
    assert_eq!(inserted[0].category, "Development");
    assert_eq!(inserted[1].category, "Learning");
}

#[tokio::test]
async fn test_chromium_import_keeps_folder_breadcrumbs() {
    let export = r#"{
        "roots": {
            "bookmark_bar": {
                "type": "folder",
                "name": "Bookmarks bar",
                "children": [
                    {
                        "type": "folder",
                        "name": "Work",
                        "children": [
                            {
                                "type": "folder",
                                "name": "Projects",
                                "children": [
                                    { "type": "url", "name": "Board", "url": "https://board.example.com" }
                                ]
                            }
                        ]
                    }
                ]
            }
        }
    }"#;

    let mut candidates = parse_export(ImportFormat::Chromium, export);
    resolve_categories(&mut candidates);

    let store = MemoryStore::new();
    persist_candidates(&store, &owner("u"), &candidates)
        .await
        .unwrap();

    let inserted = store.inserted();
    assert_eq!(inserted.len(), 1);
    assert_eq!(inserted[0].category, "Work");
    assert_eq!(inserted[0].tags_joined(), "Work, Projects");
}

#[tokio::test]
async fn test_save_then_import_dedupes_on_url() {
    let html = r#"<head>
        <meta property="og:title" content="Team board">
        <link rel="canonical" href="https://board.example.com/">
    </head>"#;
    let saved = candidate_from_page(html, "https://board.example.com/?ref=tw");

    let store = MemoryStore::new();
    let who = owner("u");
    assert_eq!(
        store.insert(&who, &saved).await.unwrap(),
        InsertOutcome::Created
    );

    // A later bulk import carrying the same canonical URL is a duplicate.
    let dup = BookmarkCandidate::new("Board".into(), "https://board.example.com/".into());
    assert_eq!(
        store.insert(&who, &dup).await.unwrap(),
        InsertOutcome::Duplicate
    );
}

#[test]
fn test_metadata_image_follows_canonical_host() {
    let html = r#"<head>
        <link rel="canonical" href="https://cdn.articles.example.net/post/42">
        <meta property="og:image" content="../img/hero.jpg">
    </head>"#;
    let meta = metadata::extract(html, "https://short.link/abc");
    assert_eq!(meta.url, "https://cdn.articles.example.net/post/42");
    assert_eq!(
        meta.image.as_deref(),
        Some("https://cdn.articles.example.net/img/hero.jpg")
    );
}

#[test]
fn test_category_resolution_is_stable_across_passes() {
    let mut candidate = BookmarkCandidate::new(
        "Learn React with this free course".into(),
        "https://example.com/react".into(),
    );
    for _ in 0..3 {
        candidate.category = category::resolve(&candidate);
        assert_eq!(candidate.category, "Learning");
    }
}
