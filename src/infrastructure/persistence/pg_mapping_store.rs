//! PostgreSQL implementation of the mapping store.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::{InsertOutcome, MappingStore, ShortCode, ShortLinkEntry, StoreError};

/// PostgreSQL store backed by the `short_links` table.
///
/// `code` is the table's primary key, so `INSERT ... ON CONFLICT DO NOTHING`
/// gives an atomic insert-if-absent across every connection and every
/// service instance sharing the database.
pub struct PgMappingStore {
    pool: Arc<PgPool>,
}

impl PgMappingStore {
    /// Creates a new store with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MappingStore for PgMappingStore {
    async fn exists(&self, code: &ShortCode) -> Result<bool, StoreError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM short_links WHERE code = $1)",
        )
        .bind(code.as_str())
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(exists)
    }

    async fn insert_if_absent(&self, entry: ShortLinkEntry) -> Result<InsertOutcome, StoreError> {
        let inserted = sqlx::query_scalar::<_, String>(
            r#"
            INSERT INTO short_links (code, target)
            VALUES ($1, $2)
            ON CONFLICT (code) DO NOTHING
            RETURNING code
            "#,
        )
        .bind(entry.code.as_str())
        .bind(&entry.target)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(match inserted {
            Some(_) => InsertOutcome::Inserted,
            None => InsertOutcome::AlreadyExists,
        })
    }

    async fn get(&self, code: &ShortCode) -> Result<Option<ShortLinkEntry>, StoreError> {
        let target =
            sqlx::query_scalar::<_, String>("SELECT target FROM short_links WHERE code = $1")
                .bind(code.as_str())
                .fetch_optional(self.pool.as_ref())
                .await?;

        Ok(target.map(|target| ShortLinkEntry::new(code.clone(), target)))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }
}
