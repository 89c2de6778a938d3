//! The audit log writer and reader.
//!
//! Entries are append-only: nothing in the application mutates or deletes a
//! history document once written. Writes are strictly best-effort -- a failed
//! append is logged and swallowed so it can never fail or roll back the
//! primary entity write that triggered it.

use chrono::Utc;

use opsdesk_core::audit::redact_sensitive_fields;
use opsdesk_core::types::new_entity_id;

use crate::error::RepoError;
use crate::models::{HistoryEntry, HistoryQuery, NewHistoryEntry};
use crate::store::DocumentStore;

/// Store collection holding history entries.
pub const COLLECTION: &str = "history";

/// Default page size for history reads.
const DEFAULT_LIMIT: usize = 500;

pub struct HistoryRepo;

impl HistoryRepo {
    /// Append a history entry. Fire-and-forget: failures are logged as
    /// warnings and never surface to the caller.
    pub async fn record(store: &dyn DocumentStore, new: NewHistoryEntry) {
        let entry = HistoryEntry {
            id: new_entity_id(),
            timestamp: Utc::now(),
            entity_type: new.entity_type.to_string(),
            entity_name: new.entity_name,
            action: new.action,
            details: new.details,
            user_name: new.user_name,
            old_data: new.old_data.as_ref().map(redact_sensitive_fields),
            new_data: new.new_data.as_ref().map(redact_sensitive_fields),
        };

        let doc = match serde_json::to_value(&entry) {
            Ok(doc) => doc,
            Err(err) => {
                tracing::warn!(
                    entity_type = %entry.entity_type,
                    error = %err,
                    "Failed to serialize history entry"
                );
                return;
            }
        };

        if let Err(err) = store.persist(COLLECTION, &entry.id, &doc).await {
            tracing::warn!(
                entity_type = %entry.entity_type,
                action = %entry.action,
                error = %err,
                "Failed to write history entry"
            );
        }
    }

    /// List history entries, newest first.
    ///
    /// Filterable by entity type and a timestamp lower bound. The store seam
    /// has no query capability, so filtering and ordering happen here.
    pub async fn list(
        store: &dyn DocumentStore,
        query: &HistoryQuery,
    ) -> Result<Vec<HistoryEntry>, RepoError> {
        let docs = store.list(COLLECTION).await?;
        let mut entries: Vec<HistoryEntry> = docs
            .into_iter()
            .filter_map(|doc| match serde_json::from_value(doc) {
                Ok(entry) => Some(entry),
                Err(err) => {
                    tracing::warn!(error = %err, "Skipping corrupt history entry");
                    None
                }
            })
            .collect();

        if let Some(ref entity_type) = query.entity_type {
            entries.retain(|e| &e.entity_type == entity_type);
        }
        if let Some(since) = query.since {
            entries.retain(|e| e.timestamp >= since);
        }

        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
        entries.truncate(query.limit.unwrap_or(DEFAULT_LIMIT));
        Ok(entries)
    }
}
