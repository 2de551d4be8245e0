use anyhow::Result;
use sqlx::Row;

use crate::config::Config;
use crate::db;

pub async fn run_list(
    config: &Config,
    user: Option<String>,
    category: Option<String>,
    limit: Option<i64>,
) -> Result<()> {
    let pool = db::connect(&config.db).await?;
    let user = user.unwrap_or_else(|| config.import.default_user.clone());
    let limit = limit.unwrap_or(50);

    let rows = match &category {
        Some(cat) => {
            sqlx::query(
                "SELECT title, category, url FROM bookmarks \
                 WHERE user_id = ? AND category = ? \
                 ORDER BY created_at DESC, url LIMIT ?",
            )
            .bind(&user)
            .bind(cat)
            .bind(limit)
            .fetch_all(&pool)
            .await?
        }
        None => {
            sqlx::query(
                "SELECT title, category, url FROM bookmarks \
                 WHERE user_id = ? \
                 ORDER BY created_at DESC, url LIMIT ?",
            )
            .bind(&user)
            .bind(limit)
            .fetch_all(&pool)
            .await?
        }
    };

    println!("{:<42} {:<14} URL", "TITLE", "CATEGORY");
    for row in &rows {
        let title: String = row.get("title");
        let category: String = row.get("category");
        let url: String = row.get("url");
        println!("{:<42} {:<14} {}", clip(&title, 40), category, url);
    }
    println!("{} bookmarks", rows.len());

    pool.close().await;
    Ok(())
}

fn clip(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_leaves_short_titles_alone() {
        assert_eq!(clip("short", 40), "short");
    }

    #[test]
    fn test_clip_truncates_on_char_boundaries() {
        let long = "x".repeat(50);
        let clipped = clip(&long, 40);
        assert_eq!(clipped.chars().count(), 40);
        assert!(clipped.ends_with('…'));
    }
}
