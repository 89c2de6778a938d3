//! Checks for the audit log writer: entry content, redaction, filtering, and
//! the guarantee that a failed history append never fails the primary write.

mod common;

use common::{save_page, save_profile};

use async_trait::async_trait;
use serde_json::Value;

use opsdesk_core::audit::AuditAction;
use opsdesk_core::error::CoreError;
use opsdesk_db::models::{HistoryQuery, Page, SaveUser};
use opsdesk_db::repositories::{crud, HistoryRepo, PageRepo, ProfileRepo, UserRepo};
use opsdesk_db::store::MemoryStore;
use opsdesk_db::{DocumentStore, RepoError, StoreError};

async fn entries(store: &dyn DocumentStore) -> Vec<opsdesk_db::models::HistoryEntry> {
    HistoryRepo::list(store, &HistoryQuery::default()).await.unwrap()
}

fn save_user(id: Option<&str>, name: &str, email: &str) -> SaveUser {
    SaveUser {
        id: id.map(str::to_string),
        name: name.to_string(),
        status: None,
        email: email.to_string(),
        role: None,
        password: None,
    }
}

// ---------------------------------------------------------------------------
// Entry content
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_writes_created_entry() {
    let store = MemoryStore::new();
    ProfileRepo::save(&store, save_profile(None, "Alice", &[]), Some("ops".to_string()))
        .await
        .unwrap();

    let entries = entries(&store).await;
    assert_eq!(entries.len(), 1);
    let entry = &entries[0];
    assert_eq!(entry.action, AuditAction::Create);
    assert_eq!(entry.entity_type, "Profile");
    assert_eq!(entry.entity_name, "Alice");
    assert_eq!(entry.details.as_deref(), Some("Created"));
    assert_eq!(entry.user_name.as_deref(), Some("ops"));
    assert!(entry.old_data.is_none());
    assert!(entry.new_data.is_some());
}

#[tokio::test]
async fn update_details_summarize_changed_fields() {
    let store = MemoryStore::new();
    let profile = ProfileRepo::save(&store, save_profile(None, "Alice", &[]), None)
        .await
        .unwrap();
    ProfileRepo::save(&store, save_profile(Some(&profile.id), "Alicia", &[]), None)
        .await
        .unwrap();

    let entries = entries(&store).await;
    let entry = &entries[0];
    assert_eq!(entry.action, AuditAction::Update);
    assert_eq!(entry.details.as_deref(), Some("name: Alice -> Alicia"));
    assert!(entry.old_data.is_some());
}

#[tokio::test]
async fn identical_resubmission_logs_no_significant_changes() {
    let store = MemoryStore::new();
    let profile = ProfileRepo::save(&store, save_profile(None, "Alice", &[]), None)
        .await
        .unwrap();
    ProfileRepo::save(&store, save_profile(Some(&profile.id), "Alice", &[]), None)
        .await
        .unwrap();

    let entries = entries(&store).await;
    assert_eq!(entries[0].details.as_deref(), Some("No significant changes"));
}

#[tokio::test]
async fn delete_entry_keeps_last_known_state() {
    let store = MemoryStore::new();
    let profile = ProfileRepo::save(&store, save_profile(None, "Alice", &[]), None)
        .await
        .unwrap();
    ProfileRepo::delete(&store, &profile.id, None).await.unwrap();

    let entries = entries(&store).await;
    let entry = &entries[0];
    assert_eq!(entry.action, AuditAction::Delete);
    let old = entry.old_data.as_ref().unwrap();
    assert_eq!(old["name"], "Alice");
    assert!(entry.new_data.is_none());
}

#[tokio::test]
async fn status_toggle_writes_activate_and_deactivate_entries() {
    let store = MemoryStore::new();
    let profile = ProfileRepo::save(&store, save_profile(None, "Alice", &[]), None)
        .await
        .unwrap();
    ProfileRepo::set_active(&store, &profile.id, false, None)
        .await
        .unwrap();
    ProfileRepo::set_active(&store, &profile.id, true, None)
        .await
        .unwrap();

    let entries = entries(&store).await;
    assert_eq!(entries[0].action, AuditAction::Activate);
    assert_eq!(entries[0].details.as_deref(), Some("Status set to active"));
    assert_eq!(entries[1].action, AuditAction::Deactivate);
    assert_eq!(entries[1].details.as_deref(), Some("Status set to inactive"));
}

#[tokio::test]
async fn bulk_operation_writes_one_aggregate_entry() {
    let store = MemoryStore::new();
    ProfileRepo::bulk_upsert(
        &store,
        vec![
            save_profile(None, "Alice", &[]),
            save_profile(None, "Bob", &[]),
            save_profile(None, "Carol", &[]),
        ],
        None,
    )
    .await
    .unwrap();

    let entries = entries(&store).await;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].entity_name, "3 Profiles");
    assert_eq!(entries[0].action, AuditAction::Update);
    assert_eq!(entries[0].details.as_deref(), Some("Bulk upsert"));
}

// ---------------------------------------------------------------------------
// Redaction
// ---------------------------------------------------------------------------

#[tokio::test]
async fn snapshots_redact_credential_fields() {
    let store = MemoryStore::new();
    let mut dto = save_profile(None, "Alice", &[]);
    dto.password = Some("hunter2".to_string());
    dto.two_factor_secret = Some("otpauth://x".to_string());
    let profile = ProfileRepo::save(&store, dto, None).await.unwrap();

    let entries = entries(&store).await;
    let new_data = entries[0].new_data.as_ref().unwrap();
    assert_eq!(new_data["password"], "[REDACTED]");
    assert_eq!(new_data["two_factor_secret"], "[REDACTED]");
    assert_eq!(new_data["name"], "Alice");

    // The stored profile itself keeps the real values.
    let raw = store.fetch("profiles", &profile.id).await.unwrap().unwrap();
    assert_eq!(raw["password"], "hunter2");
}

#[tokio::test]
async fn credential_changes_stay_out_of_details() {
    let store = MemoryStore::new();
    let profile = ProfileRepo::save(&store, save_profile(None, "Alice", &[]), None)
        .await
        .unwrap();
    let mut dto = save_profile(Some(&profile.id), "Alice", &[]);
    dto.password = Some("hunter2".to_string());
    ProfileRepo::save(&store, dto, None).await.unwrap();

    let entries = entries(&store).await;
    assert_eq!(entries[0].details.as_deref(), Some("No significant changes"));
}

// ---------------------------------------------------------------------------
// Non-blocking guarantee
// ---------------------------------------------------------------------------

/// Delegates to a [`MemoryStore`] but fails every write to the history
/// collection.
struct FailingHistoryStore {
    inner: MemoryStore,
}

#[async_trait]
impl DocumentStore for FailingHistoryStore {
    async fn fetch(&self, collection: &str, id: &str) -> Result<Option<Value>, StoreError> {
        self.inner.fetch(collection, id).await
    }

    async fn list(&self, collection: &str) -> Result<Vec<Value>, StoreError> {
        self.inner.list(collection).await
    }

    async fn persist(&self, collection: &str, id: &str, doc: &Value) -> Result<(), StoreError> {
        if collection == "history" {
            return Err(StoreError::Unavailable("history writes disabled".to_string()));
        }
        self.inner.persist(collection, id, doc).await
    }

    async fn remove(&self, collection: &str, id: &str) -> Result<bool, StoreError> {
        self.inner.remove(collection, id).await
    }
}

#[tokio::test]
async fn failed_history_append_never_fails_the_write() {
    let store = FailingHistoryStore {
        inner: MemoryStore::new(),
    };

    let profile = ProfileRepo::save(&store, save_profile(None, "Alice", &[]), None)
        .await
        .unwrap();
    ProfileRepo::delete(&store, &profile.id, None).await.unwrap();
    PageRepo::save(&store, save_page(None, "Page A", &[]), None)
        .await
        .unwrap();

    assert!(entries(&store).await.is_empty());
    assert_eq!(crud::list::<Page>(&store).await.unwrap().len(), 1);
}

// ---------------------------------------------------------------------------
// Rejected writes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn duplicate_email_is_rejected_before_any_side_effect() {
    let store = MemoryStore::new();
    UserRepo::save(&store, save_user(None, "Alice", "alice@example.com"), None)
        .await
        .unwrap();

    let err = UserRepo::save(&store, save_user(None, "Impostor", "alice@example.com"), None)
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Core(CoreError::Conflict(_))));

    // One user, one history entry.
    assert_eq!(store.list("users").await.unwrap().len(), 1);
    assert_eq!(entries(&store).await.len(), 1);
}

#[tokio::test]
async fn batch_with_duplicate_emails_is_rejected_before_any_side_effect() {
    let store = MemoryStore::new();
    let err = UserRepo::bulk_upsert(
        &store,
        vec![
            save_user(None, "Alice", "same@example.com"),
            save_user(None, "Impostor", "same@example.com"),
        ],
        None,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, RepoError::Core(CoreError::Conflict(_))));

    assert!(store.list("users").await.unwrap().is_empty());
    assert!(entries(&store).await.is_empty());
}

#[tokio::test]
async fn batch_with_duplicate_external_ids_is_rejected_before_any_side_effect() {
    let store = MemoryStore::new();
    let mut first = save_page(None, "Page A", &[]);
    first.external_id = Some("ext-1".to_string());
    let mut second = save_page(None, "Page B", &[]);
    second.external_id = Some("ext-1".to_string());

    let err = PageRepo::bulk_upsert(&store, vec![first, second], None)
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Core(CoreError::Conflict(_))));

    assert!(store.list("pages").await.unwrap().is_empty());
    assert!(entries(&store).await.is_empty());
}

#[tokio::test]
async fn validation_failure_writes_nothing() {
    let store = MemoryStore::new();
    let err = ProfileRepo::save(&store, save_profile(None, "", &[]), None)
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Core(CoreError::Validation(_))));
    assert!(store.list("profiles").await.unwrap().is_empty());
    assert!(entries(&store).await.is_empty());
}

#[tokio::test]
async fn update_of_missing_entity_is_not_found() {
    let store = MemoryStore::new();
    let err = ProfileRepo::save(&store, save_profile(Some("ghost"), "Alice", &[]), None)
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Core(CoreError::NotFound { .. })));
    assert!(entries(&store).await.is_empty());
}

// ---------------------------------------------------------------------------
// Reading the log
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_orders_newest_first_and_filters_by_type() {
    let store = MemoryStore::new();
    ProfileRepo::save(&store, save_profile(None, "Alice", &[]), None)
        .await
        .unwrap();
    PageRepo::save(&store, save_page(None, "Page A", &[]), None)
        .await
        .unwrap();
    let profile = ProfileRepo::save(&store, save_profile(None, "Bob", &[]), None)
        .await
        .unwrap();
    ProfileRepo::delete(&store, &profile.id, None).await.unwrap();

    let all = entries(&store).await;
    assert_eq!(all.len(), 4);
    assert_eq!(all[0].action, AuditAction::Delete);
    assert!(all.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));

    let pages_only = HistoryRepo::list(
        &store,
        &HistoryQuery {
            entity_type: Some("Page".to_string()),
            ..HistoryQuery::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(pages_only.len(), 1);
    assert_eq!(pages_only[0].entity_name, "Page A");
}

#[tokio::test]
async fn list_respects_limit_and_since() {
    let store = MemoryStore::new();
    for name in ["A", "B", "C"] {
        ProfileRepo::save(&store, save_profile(None, name, &[]), None)
            .await
            .unwrap();
    }

    let limited = HistoryRepo::list(
        &store,
        &HistoryQuery {
            limit: Some(2),
            ..HistoryQuery::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(limited.len(), 2);

    let all = entries(&store).await;
    let cutoff = all[0].timestamp;
    let recent = HistoryRepo::list(
        &store,
        &HistoryQuery {
            since: Some(cutoff),
            ..HistoryQuery::default()
        },
    )
    .await
    .unwrap();
    assert!(recent.iter().all(|e| e.timestamp >= cutoff));
    assert!(!recent.is_empty());
}
