//! Short link repository.

use async_trait::async_trait;

use super::{DbPool, InsertOutcome, LinkStore};
use crate::Result;

/// Short link entity.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ShortLink {
    /// Row ID.
    pub id: i64,
    /// Unique short code.
    pub short_code: String,
    /// Sanitized base name of the target file.
    pub original_filename: String,
    /// Whether the target lived in the private subtree at creation.
    pub is_private: bool,
    /// Whether the link resolves.
    pub is_enabled: bool,
    /// Creation timestamp.
    pub created_at: String,
}

/// New short link for creation. Links always start enabled.
#[derive(Debug, Clone)]
pub struct NewShortLink {
    /// Unique short code.
    pub short_code: String,
    /// Sanitized base name of the target file.
    pub original_filename: String,
    /// Whether the target is private.
    pub is_private: bool,
}

/// sqlx-backed link store.
#[derive(Clone)]
pub struct ShortLinkRepository {
    pool: DbPool,
}

impl ShortLinkRepository {
    /// Create a new repository instance.
    pub fn new(pool: &DbPool) -> Self {
        Self { pool: pool.clone() }
    }
}

#[async_trait]
impl LinkStore for ShortLinkRepository {
    async fn find_by_code(&self, code: &str) -> Result<Option<ShortLink>> {
        let link = sqlx::query_as::<_, ShortLink>(
            "SELECT id, short_code, original_filename, is_private, is_enabled, created_at
             FROM short_links WHERE short_code = $1",
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(link)
    }

    async fn exists_by_code(&self, code: &str) -> Result<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM short_links WHERE short_code = $1")
            .bind(code)
            .fetch_one(&self.pool)
            .await?;

        Ok(count > 0)
    }

    async fn insert(&self, new_link: &NewShortLink) -> Result<InsertOutcome> {
        let result = sqlx::query(
            "INSERT INTO short_links (short_code, original_filename, is_private, is_enabled)
             VALUES ($1, $2, $3, $4)",
        )
        .bind(&new_link.short_code)
        .bind(&new_link.original_filename)
        .bind(new_link.is_private)
        .bind(true)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(InsertOutcome::Inserted),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Ok(InsertOutcome::Duplicate),
            Err(e) => Err(e.into()),
        }
    }

    async fn set_enabled(&self, code: &str, enabled: bool) -> Result<()> {
        sqlx::query("UPDATE short_links SET is_enabled = $1 WHERE short_code = $2")
            .bind(enabled)
            .bind(code)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
