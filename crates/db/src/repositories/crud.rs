//! Shared CRUD pipeline used by every entity repository.
//!
//! Generic over [`StoredEntity`] so Domains, Partnerships, Integrations, and
//! Users get the full diff + history treatment without per-entity
//! repositories; the linked entities (Profile, Page, Project, Business
//! Manager) wrap these helpers with their relationship-sync steps.

use chrono::Utc;
use serde_json::Value;
use validator::Validate;

use opsdesk_core::audit::AuditAction;
use opsdesk_core::diff;
use opsdesk_core::error::CoreError;
use opsdesk_core::types::new_entity_id;

use crate::error::RepoError;
use crate::models::{NewHistoryEntry, SaveDto, StoredEntity, STATUS_ACTIVE, STATUS_INACTIVE};
use crate::repositories::history_repo::HistoryRepo;
use crate::store::{DocumentStore, StoreError};

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

/// Fetch an entity by id, or `None` if absent.
pub async fn find_by_id<E: StoredEntity>(
    store: &dyn DocumentStore,
    id: &str,
) -> Result<Option<E>, RepoError> {
    let Some(doc) = store.fetch(E::COLLECTION, id).await? else {
        return Ok(None);
    };
    let entity = serde_json::from_value(doc)
        .map_err(|e| CoreError::Internal(format!("Corrupt {} document {id}: {e}", E::KIND)))?;
    Ok(Some(entity))
}

/// Fetch an entity by id, failing with `NotFound` if absent.
pub async fn require<E: StoredEntity>(
    store: &dyn DocumentStore,
    id: &str,
) -> Result<E, RepoError> {
    find_by_id::<E>(store, id).await?.ok_or_else(|| {
        RepoError::Core(CoreError::NotFound {
            entity: E::KIND,
            id: id.to_string(),
        })
    })
}

/// List every entity in the collection.
///
/// Documents that no longer deserialize are skipped with a warning rather
/// than failing the whole listing.
pub async fn list<E: StoredEntity>(store: &dyn DocumentStore) -> Result<Vec<E>, RepoError> {
    let docs = store.list(E::COLLECTION).await?;
    let mut entities = Vec::with_capacity(docs.len());
    for doc in docs {
        match serde_json::from_value::<E>(doc) {
            Ok(entity) => entities.push(entity),
            Err(err) => {
                tracing::warn!(kind = E::KIND, error = %err, "Skipping corrupt document");
            }
        }
    }
    Ok(entities)
}

// ---------------------------------------------------------------------------
// Writes
// ---------------------------------------------------------------------------

/// Serialize and persist an entity document.
pub async fn persist<E: StoredEntity>(
    store: &dyn DocumentStore,
    entity: &E,
) -> Result<(), RepoError> {
    let doc = serde_json::to_value(entity).map_err(StoreError::from)?;
    store.persist(E::COLLECTION, entity.id(), &doc).await?;
    Ok(())
}

/// Validate a save payload and assemble the new state.
///
/// Returns the entity to persist together with the prior state (`None` on
/// create). Fails with `NotFound` when updating a missing entity, before any
/// side effect runs.
pub async fn prepare_save<E, D>(store: &dyn DocumentStore, dto: D) -> Result<(E, Option<E>), RepoError>
where
    E: StoredEntity,
    D: SaveDto<E>,
{
    dto.validate()?;
    let now = Utc::now();
    match dto.id().map(str::to_string) {
        Some(id) => {
            let prior = require::<E>(store, &id).await?;
            let entity = dto.into_entity(id, Some(&prior), now);
            Ok((entity, Some(prior)))
        }
        None => Ok((dto.into_entity(new_entity_id(), None, now), None)),
    }
}

/// Full save pipeline for entities without link fields.
pub async fn save<E, D>(
    store: &dyn DocumentStore,
    dto: D,
    actor: Option<String>,
) -> Result<E, RepoError>
where
    E: StoredEntity,
    D: SaveDto<E>,
{
    let (entity, prior) = prepare_save(store, dto).await?;
    persist(store, &entity).await?;
    record_save(store, &entity, prior.as_ref(), actor).await;
    Ok(entity)
}

/// Delete pipeline for entities without link fields.
pub async fn delete<E: StoredEntity>(
    store: &dyn DocumentStore,
    id: &str,
    actor: Option<String>,
) -> Result<(), RepoError> {
    let prior = require::<E>(store, id).await?;
    store.remove(E::COLLECTION, id).await?;
    record_delete(store, &prior, actor).await;
    Ok(())
}

/// Toggle an entity's status, recording an Activate/Deactivate entry.
pub async fn set_active<E: StoredEntity>(
    store: &dyn DocumentStore,
    id: &str,
    active: bool,
    actor: Option<String>,
) -> Result<E, RepoError> {
    let mut entity = require::<E>(store, id).await?;
    let target = if active { STATUS_ACTIVE } else { STATUS_INACTIVE };
    if entity.status() != target {
        entity.set_status(target.to_string());
        entity.set_updated_at(Utc::now());
        persist(store, &entity).await?;
    }
    let action = if active {
        AuditAction::Activate
    } else {
        AuditAction::Deactivate
    };
    HistoryRepo::record(
        store,
        NewHistoryEntry {
            entity_type: E::KIND,
            entity_name: entity.display_name(),
            action,
            details: Some(format!("Status set to {target}")),
            user_name: actor,
            old_data: None,
            new_data: None,
        },
    )
    .await;
    Ok(entity)
}

// ---------------------------------------------------------------------------
// Bulk writes
// ---------------------------------------------------------------------------

/// Persist a batch of save payloads.
///
/// The bulk path reads no per-item prior state: submitted payloads are
/// authoritative, and the whole batch is validated before anything persists.
pub async fn bulk_persist<E, D>(store: &dyn DocumentStore, dtos: Vec<D>) -> Result<Vec<E>, RepoError>
where
    E: StoredEntity,
    D: SaveDto<E>,
{
    for dto in &dtos {
        dto.validate()?;
    }
    let now = Utc::now();
    let mut saved = Vec::with_capacity(dtos.len());
    for dto in dtos {
        let id = dto.id().map(str::to_string).unwrap_or_else(new_entity_id);
        let entity = dto.into_entity(id, None, now);
        persist(store, &entity).await?;
        saved.push(entity);
    }
    Ok(saved)
}

/// Bulk upsert for entities without link fields.
pub async fn bulk_upsert<E, D>(
    store: &dyn DocumentStore,
    dtos: Vec<D>,
    actor: Option<String>,
) -> Result<Vec<E>, RepoError>
where
    E: StoredEntity,
    D: SaveDto<E>,
{
    let saved = bulk_persist(store, dtos).await?;
    record_bulk::<E>(
        store,
        saved.len(),
        AuditAction::Update,
        Some("Bulk upsert".to_string()),
        actor,
    )
    .await;
    Ok(saved)
}

/// Remove a batch of entities by id; missing ids are skipped.
///
/// Returns the removed entities so linked repositories can run their
/// unlinking sync.
pub async fn bulk_remove<E: StoredEntity>(
    store: &dyn DocumentStore,
    ids: &[String],
) -> Result<Vec<E>, RepoError> {
    let mut removed = Vec::new();
    for id in ids {
        if let Some(entity) = find_by_id::<E>(store, id).await? {
            store.remove(E::COLLECTION, id).await?;
            removed.push(entity);
        }
    }
    Ok(removed)
}

/// Bulk delete for entities without link fields. Returns the removal count.
pub async fn bulk_delete<E: StoredEntity>(
    store: &dyn DocumentStore,
    ids: &[String],
    actor: Option<String>,
) -> Result<usize, RepoError> {
    let removed = bulk_remove::<E>(store, ids).await?;
    record_bulk::<E>(store, removed.len(), AuditAction::Delete, None, actor).await;
    Ok(removed.len())
}

// ---------------------------------------------------------------------------
// History entries (best-effort; never fail the primary write)
// ---------------------------------------------------------------------------

/// Append the Create/Update entry for a completed save.
pub async fn record_save<E: StoredEntity>(
    store: &dyn DocumentStore,
    entity: &E,
    prior: Option<&E>,
    actor: Option<String>,
) {
    let old_data = prior.and_then(|p| serde_json::to_value(p).ok());
    let new_data = serde_json::to_value(entity).ok();
    let details = diff::change_summary(
        old_data.as_ref(),
        new_data.as_ref().unwrap_or(&Value::Null),
    );
    let action = if prior.is_some() {
        AuditAction::Update
    } else {
        AuditAction::Create
    };
    HistoryRepo::record(
        store,
        NewHistoryEntry {
            entity_type: E::KIND,
            entity_name: entity.display_name(),
            action,
            details: Some(details),
            user_name: actor,
            old_data,
            new_data,
        },
    )
    .await;
}

/// Append the Delete entry with the entity's last known state.
pub async fn record_delete<E: StoredEntity>(
    store: &dyn DocumentStore,
    prior: &E,
    actor: Option<String>,
) {
    HistoryRepo::record(
        store,
        NewHistoryEntry {
            entity_type: E::KIND,
            entity_name: prior.display_name(),
            action: AuditAction::Delete,
            details: None,
            user_name: actor,
            old_data: serde_json::to_value(prior).ok(),
            new_data: None,
        },
    )
    .await;
}

/// Append one aggregate entry for a bulk operation ("3 Profiles").
pub async fn record_bulk<E: StoredEntity>(
    store: &dyn DocumentStore,
    count: usize,
    action: AuditAction,
    details: Option<String>,
    actor: Option<String>,
) {
    let label = if count == 1 {
        E::KIND.to_string()
    } else {
        format!("{}s", E::KIND)
    };
    HistoryRepo::record(
        store,
        NewHistoryEntry {
            entity_type: E::KIND,
            entity_name: format!("{count} {label}"),
            action,
            details,
            user_name: actor,
            old_data: None,
            new_data: None,
        },
    )
    .await;
}

// ---------------------------------------------------------------------------
// Validation helpers
// ---------------------------------------------------------------------------

/// Reject the save when another document of this type already holds `value`
/// in `field`. Runs before any side effect.
pub async fn ensure_unique_field<E: StoredEntity>(
    store: &dyn DocumentStore,
    field: &'static str,
    value: &str,
    exempt_id: Option<&str>,
) -> Result<(), RepoError> {
    let docs = store.list(E::COLLECTION).await?;
    for doc in docs {
        if doc.get(field).and_then(Value::as_str) != Some(value) {
            continue;
        }
        let is_self = match (doc.get("id").and_then(Value::as_str), exempt_id) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        };
        if !is_self {
            return Err(RepoError::Core(CoreError::Conflict(format!(
                "{} with {field} '{value}' already exists",
                E::KIND
            ))));
        }
    }
    Ok(())
}
