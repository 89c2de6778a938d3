//! Postgres-backed document store.
//!
//! Documents live in a single `documents` table keyed by `(collection, id)`
//! with the entity body in a `jsonb` column. Writes are upserts so the store
//! matches the create-or-overwrite contract of [`DocumentStore`].

use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use super::{DocumentStore, StoreError};

/// A [`DocumentStore`] over a Postgres connection pool.
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect, verify connectivity, and apply migrations.
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;

        sqlx::query("SELECT 1").execute(&pool).await?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| StoreError::Unavailable(format!("Migration failed: {e}")))?;

        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl DocumentStore for PgStore {
    async fn fetch(&self, collection: &str, id: &str) -> Result<Option<Value>, StoreError> {
        let doc = sqlx::query_scalar::<_, Value>(
            "SELECT data FROM documents WHERE collection = $1 AND id = $2",
        )
        .bind(collection)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(doc)
    }

    async fn list(&self, collection: &str) -> Result<Vec<Value>, StoreError> {
        let docs = sqlx::query_scalar::<_, Value>(
            "SELECT data FROM documents WHERE collection = $1 ORDER BY id",
        )
        .bind(collection)
        .fetch_all(&self.pool)
        .await?;
        Ok(docs)
    }

    async fn persist(&self, collection: &str, id: &str, doc: &Value) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO documents (collection, id, data) VALUES ($1, $2, $3) \
             ON CONFLICT (collection, id) DO UPDATE SET data = $3, updated_at = now()",
        )
        .bind(collection)
        .bind(id)
        .bind(doc)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn remove(&self, collection: &str, id: &str) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
