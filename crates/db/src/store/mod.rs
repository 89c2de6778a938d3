//! The document-store seam.
//!
//! Every entity is persisted as an opaque JSON document in a named collection,
//! keyed by a string id -- the capability set the backing
//! backend-as-a-service exposes. Repositories only ever talk to
//! [`DocumentStore`], so the in-memory store (tests, local development) and
//! the Postgres store are interchangeable.

pub mod memory;
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Errors surfaced by a document store implementation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Backend-agnostic persistence capability.
///
/// `persist` is an upsert: it creates the document or overwrites it whole
/// (last writer wins -- there is no version token in this design).
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch a single document, or `None` if absent.
    async fn fetch(&self, collection: &str, id: &str) -> Result<Option<Value>, StoreError>;

    /// List every document in a collection, ordered by id.
    async fn list(&self, collection: &str) -> Result<Vec<Value>, StoreError>;

    /// Create or overwrite a document.
    async fn persist(&self, collection: &str, id: &str, doc: &Value) -> Result<(), StoreError>;

    /// Remove a document. Returns `false` if it did not exist.
    async fn remove(&self, collection: &str, id: &str) -> Result<bool, StoreError>;
}

/// Shared handle used by application state and background tasks.
pub type SharedStore = Arc<dyn DocumentStore>;
