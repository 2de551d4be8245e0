//! Persistence seam for finalized candidates.
//!
//! The ingestion pipeline hands fully-resolved [`BookmarkCandidate`]s to a
//! [`BookmarkStore`]; the store owns identity, long-lived timestamps, and
//! duplicate detection (by `(user_id, url)`). Parsers never deduplicate.

use std::collections::HashSet;
use std::sync::RwLock;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::models::BookmarkCandidate;

/// Caller-assigned ownership attached to every insert.
#[derive(Debug, Clone)]
pub struct Ownership {
    pub user_id: String,
    pub collection_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Created,
    /// The owner already has this URL; the incoming record was skipped.
    Duplicate,
}

#[async_trait]
pub trait BookmarkStore: Send + Sync {
    async fn insert(
        &self,
        owner: &Ownership,
        candidate: &BookmarkCandidate,
    ) -> Result<InsertOutcome>;
}

/// SQLite-backed store. Tags are flattened to their comma-joined wire form
/// at this boundary; `added_at` is serialized as RFC 3339 with milliseconds.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookmarkStore for SqliteStore {
    async fn insert(
        &self,
        owner: &Ownership,
        candidate: &BookmarkCandidate,
    ) -> Result<InsertOutcome> {
        let id = Uuid::new_v4().to_string();
        let added_at = candidate
            .added_at
            .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true));
        let now = Utc::now().timestamp();

        let result = sqlx::query(
            r#"
            INSERT INTO bookmarks
                (id, user_id, collection_id, url, title, description,
                 category, tags, icon, is_favorite, added_at, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(user_id, url) DO NOTHING
            "#,
        )
        .bind(&id)
        .bind(&owner.user_id)
        .bind(&owner.collection_id)
        .bind(&candidate.url)
        .bind(&candidate.title)
        .bind(&candidate.description)
        .bind(&candidate.category)
        .bind(candidate.tags_joined())
        .bind(&candidate.icon)
        .bind(candidate.is_favorite)
        .bind(added_at)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            Ok(InsertOutcome::Duplicate)
        } else {
            Ok(InsertOutcome::Created)
        }
    }
}

/// In-memory store for exercising the pipeline without a database.
pub struct MemoryStore {
    seen: RwLock<HashSet<(String, String)>>,
    inserted: RwLock<Vec<BookmarkCandidate>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            seen: RwLock::new(HashSet::new()),
            inserted: RwLock::new(Vec::new()),
        }
    }

    /// Candidates accepted so far, in insertion order.
    pub fn inserted(&self) -> Vec<BookmarkCandidate> {
        self.inserted.read().unwrap().clone()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BookmarkStore for MemoryStore {
    async fn insert(
        &self,
        owner: &Ownership,
        candidate: &BookmarkCandidate,
    ) -> Result<InsertOutcome> {
        let key = (owner.user_id.clone(), candidate.url.clone());
        if !self.seen.write().unwrap().insert(key) {
            return Ok(InsertOutcome::Duplicate);
        }
        self.inserted.write().unwrap().push(candidate.clone());
        Ok(InsertOutcome::Created)
    }
}
