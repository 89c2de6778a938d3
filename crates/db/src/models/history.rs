//! History (audit log) models.
//!
//! History entries are immutable once written: there is no update DTO and no
//! delete path through the application.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use opsdesk_core::audit::AuditAction;
use opsdesk_core::types::{EntityId, Timestamp};

/// One immutable audit log entry in the `history` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: EntityId,
    pub timestamp: Timestamp,
    pub entity_type: String,
    pub entity_name: String,
    pub action: AuditAction,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub old_data: Option<Value>,
    #[serde(default)]
    pub new_data: Option<Value>,
}

/// Payload for appending a history entry; id and timestamp are assigned by
/// the writer, and snapshots are redacted before storage.
#[derive(Debug, Clone)]
pub struct NewHistoryEntry {
    pub entity_type: &'static str,
    pub entity_name: String,
    pub action: AuditAction,
    pub details: Option<String>,
    pub user_name: Option<String>,
    pub old_data: Option<Value>,
    pub new_data: Option<Value>,
}

/// Filter parameters for reading the history log.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryQuery {
    /// Only entries for this entity type.
    pub entity_type: Option<String>,
    /// Only entries with `timestamp >= since`.
    pub since: Option<Timestamp>,
    /// Maximum number of entries returned (default 500).
    pub limit: Option<usize>,
}
