//! Repository for the `pages` collection.
//!
//! Mirror of the profile repository from the page side of the link: edits to
//! `profile_ids` propagate back to the affected profiles' `page_ids`, and the
//! end state must match whichever side initiated the edit. Also enforces
//! `external_id` uniqueness before any side effect.

use std::collections::BTreeSet;

use opsdesk_core::audit::AuditAction;
use opsdesk_core::error::CoreError;
use opsdesk_core::links::LinkDelta;

use crate::error::RepoError;
use crate::models::{Page, SavePage, StoredEntity};
use crate::repositories::{crud, sync};
use crate::store::DocumentStore;

pub struct PageRepo;

impl PageRepo {
    pub async fn find_by_id(store: &dyn DocumentStore, id: &str) -> Result<Option<Page>, RepoError> {
        crud::find_by_id(store, id).await
    }

    pub async fn list(store: &dyn DocumentStore) -> Result<Vec<Page>, RepoError> {
        crud::list(store).await
    }

    /// Create or update a page, then push its link changes to the profiles.
    pub async fn save(
        store: &dyn DocumentStore,
        dto: SavePage,
        actor: Option<String>,
    ) -> Result<Page, RepoError> {
        if let Some(external_id) = dto.external_id.as_deref().filter(|v| !v.is_empty()) {
            crud::ensure_unique_field::<Page>(store, "external_id", external_id, dto.id.as_deref())
                .await?;
        }

        let (page, prior) = crud::prepare_save(store, dto).await?;
        crud::persist(store, &page).await?;

        let old_links = prior
            .as_ref()
            .map(|p: &Page| p.profile_ids.clone())
            .unwrap_or_default();
        let delta = LinkDelta::between(&old_links, &page.profile_ids);
        if !delta.is_empty() {
            sync::apply_page_link_delta(store, &page.id, &delta).await;
        }

        crud::record_save(store, &page, prior.as_ref(), actor).await;
        Ok(page)
    }

    /// Delete a page and unlink it from every profile that referenced it.
    pub async fn delete(
        store: &dyn DocumentStore,
        id: &str,
        actor: Option<String>,
    ) -> Result<(), RepoError> {
        let prior = crud::require::<Page>(store, id).await?;
        store.remove(Page::COLLECTION, id).await?;

        let delta = LinkDelta {
            removed: prior.profile_ids.clone(),
            ..LinkDelta::default()
        };
        if !delta.is_empty() {
            sync::apply_page_link_delta(store, id, &delta).await;
        }

        crud::record_delete(store, &prior, actor).await;
        Ok(())
    }

    pub async fn set_active(
        store: &dyn DocumentStore,
        id: &str,
        active: bool,
        actor: Option<String>,
    ) -> Result<Page, RepoError> {
        crud::set_active(store, id, active, actor).await
    }

    /// Bulk upsert: submitted link sets are authoritative for the batch.
    ///
    /// `external_id` must be unique against the store and within the batch
    /// itself; either conflict rejects the whole batch before anything
    /// persists.
    pub async fn bulk_upsert(
        store: &dyn DocumentStore,
        dtos: Vec<SavePage>,
        actor: Option<String>,
    ) -> Result<Vec<Page>, RepoError> {
        let mut seen: BTreeSet<&str> = BTreeSet::new();
        for dto in &dtos {
            if let Some(external_id) = dto.external_id.as_deref().filter(|v| !v.is_empty()) {
                crud::ensure_unique_field::<Page>(
                    store,
                    "external_id",
                    external_id,
                    dto.id.as_deref(),
                )
                .await?;
                if !seen.insert(external_id) {
                    return Err(RepoError::Core(CoreError::Conflict(format!(
                        "Page with external_id '{external_id}' appears more than once in the batch"
                    ))));
                }
            }
        }

        let saved = crud::bulk_persist(store, dtos).await?;
        sync::sync_page_profiles_bulk(store, &saved).await;
        crud::record_bulk::<Page>(
            store,
            saved.len(),
            AuditAction::Update,
            Some("Bulk upsert".to_string()),
            actor,
        )
        .await;
        Ok(saved)
    }

    /// Bulk delete, dropping the removed pages from every linked profile.
    pub async fn bulk_delete(
        store: &dyn DocumentStore,
        ids: &[String],
        actor: Option<String>,
    ) -> Result<usize, RepoError> {
        let removed = crud::bulk_remove::<Page>(store, ids).await?;
        sync::sync_pages_removed(store, &removed).await;
        crud::record_bulk::<Page>(store, removed.len(), AuditAction::Delete, None, actor).await;
        Ok(removed.len())
    }
}
