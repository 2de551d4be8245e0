//! Export stored bookmarks back to interchange formats.
//!
//! Two targets: JSON (the flat wire shape, tags comma-joined) and a
//! Netscape bookmark HTML document that the importer round-trips. Output
//! goes to stdout unless `--output` names a file.

use anyhow::{bail, Result};
use chrono::DateTime;
use serde::Serialize;
use sqlx::Row;
use std::path::Path;

use crate::config::Config;
use crate::db;

#[derive(Serialize)]
struct ExportBookmark {
    url: String,
    title: String,
    description: String,
    category: String,
    /// Comma-joined wire form.
    tags: String,
    icon: Option<String>,
    is_favorite: bool,
    added_at: Option<String>,
}

/// Export a user's bookmarks as `"json"` or Netscape `"html"`.
pub async fn run_export(
    config: &Config,
    output: Option<&Path>,
    format: &str,
    user: Option<String>,
) -> Result<()> {
    let pool = db::connect(&config.db).await?;
    let user = user.unwrap_or_else(|| config.import.default_user.clone());

    let rows = sqlx::query(
        "SELECT url, title, description, category, tags, icon, is_favorite, added_at \
         FROM bookmarks WHERE user_id = ? ORDER BY created_at, url",
    )
    .bind(&user)
    .fetch_all(&pool)
    .await?;

    let bookmarks: Vec<ExportBookmark> = rows
        .iter()
        .map(|row| ExportBookmark {
            url: row.get("url"),
            title: row.get("title"),
            description: row.get("description"),
            category: row.get("category"),
            tags: row.get("tags"),
            icon: row.get("icon"),
            is_favorite: row.get("is_favorite"),
            added_at: row.get("added_at"),
        })
        .collect();

    let rendered = match format {
        "json" => serde_json::to_string_pretty(&bookmarks)?,
        "html" => render_netscape(&bookmarks),
        other => bail!("Unknown export format: '{}'. Must be html or json.", other),
    };

    match output {
        Some(path) => std::fs::write(path, rendered)?,
        None => println!("{}", rendered),
    }

    pool.close().await;
    Ok(())
}

/// Render the Netscape Bookmark File Format document the parsers accept.
fn render_netscape(bookmarks: &[ExportBookmark]) -> String {
    let mut out = String::from(
        "<!DOCTYPE NETSCAPE-Bookmark-file-1>\n\
         <!-- This is an automatically generated file. Do not edit! -->\n\
         <META HTTP-EQUIV=\"Content-Type\" CONTENT=\"text/html; charset=UTF-8\">\n\
         <TITLE>Bookmarks</TITLE>\n\
         <H1>Bookmarks</H1>\n\
         <DL><p>\n",
    );
    for b in bookmarks {
        out.push_str("    <DT><A HREF=\"");
        out.push_str(&escape_attr(&b.url));
        out.push('"');
        if let Some(secs) = b.added_at.as_deref().and_then(rfc3339_to_epoch_seconds) {
            out.push_str(&format!(" ADD_DATE=\"{}\"", secs));
        }
        if let Some(icon) = &b.icon {
            out.push_str(" ICON=\"");
            out.push_str(&escape_attr(icon));
            out.push('"');
        }
        out.push('>');
        out.push_str(&escape_text(&b.title));
        out.push_str("</A>\n");
    }
    out.push_str("</DL><p>\n");
    out
}

fn rfc3339_to_epoch_seconds(raw: &str) -> Option<i64> {
    DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.timestamp())
}

fn escape_attr(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}

fn escape_text(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
