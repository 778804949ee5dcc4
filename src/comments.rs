//! Comment store: an append-only log of sentiment-tagged citizen comments.
//!
//! The [`CommentStore`] trait defines the two storage operations the
//! feedback pipeline needs, enabling pluggable backends (SQLite for the
//! application, in-memory for tests). There is no update and no delete;
//! comments are immutable once written.
//!
//! Labels are stored verbatim. Validation happens upstream at
//! classification time, so a label outside the recognized set round-trips
//! through storage unchanged.

use async_trait::async_trait;
use sqlx::{Row, SqlitePool};
use std::sync::RwLock;

use crate::error::Error;
use crate::models::Comment;

/// Category assigned to every comment until category extraction is refined.
pub const DEFAULT_CATEGORY: &str = "General";

#[async_trait]
pub trait CommentStore: Send + Sync {
    /// Append a comment, returning its assigned sequence number.
    async fn append(
        &self,
        document_id: &str,
        body: &str,
        sentiment: &str,
        category: &str,
    ) -> Result<i64, Error>;

    /// All comments for one document, in insertion order. Loads the whole
    /// set; there is no pagination.
    async fn list_by_document(&self, document_id: &str) -> Result<Vec<Comment>, Error>;
}

/// SQLite implementation of the [`CommentStore`] trait.
pub struct SqliteCommentStore {
    pool: SqlitePool,
}

impl SqliteCommentStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl CommentStore for SqliteCommentStore {
    async fn append(
        &self,
        document_id: &str,
        body: &str,
        sentiment: &str,
        category: &str,
    ) -> Result<i64, Error> {
        let result = sqlx::query(
            "INSERT INTO comments (document_name, comment, sentiment, category) VALUES (?, ?, ?, ?)",
        )
        .bind(document_id)
        .bind(body)
        .bind(sentiment)
        .bind(category)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    async fn list_by_document(&self, document_id: &str) -> Result<Vec<Comment>, Error> {
        let rows = sqlx::query(
            "SELECT id, document_name, comment, sentiment, category FROM comments WHERE document_name = ? ORDER BY id",
        )
        .bind(document_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(|row| Comment {
                id: row.get("id"),
                document_name: row.get("document_name"),
                body: row.get("comment"),
                sentiment: row.get("sentiment"),
                category: row.get("category"),
            })
            .collect())
    }
}

/// In-memory store for tests.
pub struct MemoryCommentStore {
    comments: RwLock<Vec<Comment>>,
}

impl MemoryCommentStore {
    pub fn new() -> Self {
        Self {
            comments: RwLock::new(Vec::new()),
        }
    }
}

impl Default for MemoryCommentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommentStore for MemoryCommentStore {
    async fn append(
        &self,
        document_id: &str,
        body: &str,
        sentiment: &str,
        category: &str,
    ) -> Result<i64, Error> {
        let mut comments = self.comments.write().unwrap();
        let id = comments.last().map(|c| c.id + 1).unwrap_or(1);
        comments.push(Comment {
            id,
            document_name: document_id.to_string(),
            body: body.to_string(),
            sentiment: sentiment.to_string(),
            category: category.to_string(),
        });
        Ok(id)
    }

    async fn list_by_document(&self, document_id: &str) -> Result<Vec<Comment>, Error> {
        let comments = self.comments.read().unwrap();
        Ok(comments
            .iter()
            .filter(|c| c.document_name == document_id)
            .cloned()
            .collect())
    }
}
