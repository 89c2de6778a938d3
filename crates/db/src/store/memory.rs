//! In-memory document store.
//!
//! Backs the test suites and local development without a database. Documents
//! live in a `BTreeMap` per collection so listing order is stable.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use super::{DocumentStore, StoreError};

/// A process-local [`DocumentStore`].
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, BTreeMap<String, Value>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn fetch(&self, collection: &str, id: &str) -> Result<Option<Value>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.get(id))
            .cloned())
    }

    async fn list(&self, collection: &str) -> Result<Vec<Value>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|docs| docs.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn persist(&self, collection: &str, id: &str, doc: &Value) -> Result<(), StoreError> {
        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), doc.clone());
        Ok(())
    }

    async fn remove(&self, collection: &str, id: &str) -> Result<bool, StoreError> {
        let mut collections = self.collections.write().await;
        Ok(collections
            .get_mut(collection)
            .map(|docs| docs.remove(id).is_some())
            .unwrap_or(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn persist_then_fetch_roundtrip() {
        let store = MemoryStore::new();
        let doc = json!({"id": "a", "name": "A"});
        store.persist("profiles", "a", &doc).await.unwrap();
        assert_eq!(store.fetch("profiles", "a").await.unwrap(), Some(doc));
    }

    #[tokio::test]
    async fn fetch_missing_returns_none() {
        let store = MemoryStore::new();
        assert_eq!(store.fetch("profiles", "nope").await.unwrap(), None);
    }

    #[tokio::test]
    async fn persist_overwrites_existing() {
        let store = MemoryStore::new();
        store.persist("pages", "p", &json!({"v": 1})).await.unwrap();
        store.persist("pages", "p", &json!({"v": 2})).await.unwrap();
        assert_eq!(
            store.fetch("pages", "p").await.unwrap(),
            Some(json!({"v": 2}))
        );
    }

    #[tokio::test]
    async fn list_returns_all_documents_in_id_order() {
        let store = MemoryStore::new();
        store.persist("pages", "b", &json!({"id": "b"})).await.unwrap();
        store.persist("pages", "a", &json!({"id": "a"})).await.unwrap();
        let docs = store.list("pages").await.unwrap();
        assert_eq!(docs, vec![json!({"id": "a"}), json!({"id": "b"})]);
    }

    #[tokio::test]
    async fn remove_reports_whether_present() {
        let store = MemoryStore::new();
        store.persist("users", "u", &json!({})).await.unwrap();
        assert!(store.remove("users", "u").await.unwrap());
        assert!(!store.remove("users", "u").await.unwrap());
    }
}
