//! Repository for the `profiles` collection.
//!
//! Wraps the shared CRUD pipeline with Profile <-> Page relationship sync:
//! the profile's `page_ids` is the forward side, and every save, bulk save,
//! and delete propagates the matching membership change to the affected
//! pages' `profile_ids`.

use opsdesk_core::audit::AuditAction;
use opsdesk_core::links::LinkDelta;

use crate::error::RepoError;
use crate::models::{Profile, SaveProfile, StoredEntity};
use crate::repositories::{crud, sync};
use crate::store::DocumentStore;

pub struct ProfileRepo;

impl ProfileRepo {
    pub async fn find_by_id(
        store: &dyn DocumentStore,
        id: &str,
    ) -> Result<Option<Profile>, RepoError> {
        crud::find_by_id(store, id).await
    }

    pub async fn list(store: &dyn DocumentStore) -> Result<Vec<Profile>, RepoError> {
        crud::list(store).await
    }

    /// Create or update a profile, then push its link changes to the pages.
    pub async fn save(
        store: &dyn DocumentStore,
        dto: SaveProfile,
        actor: Option<String>,
    ) -> Result<Profile, RepoError> {
        let (profile, prior) = crud::prepare_save(store, dto).await?;
        crud::persist(store, &profile).await?;

        let old_links = prior
            .as_ref()
            .map(|p: &Profile| p.page_ids.clone())
            .unwrap_or_default();
        let delta = LinkDelta::between(&old_links, &profile.page_ids);
        if !delta.is_empty() {
            sync::apply_profile_link_delta(store, &profile.id, &delta).await;
        }

        crud::record_save(store, &profile, prior.as_ref(), actor).await;
        Ok(profile)
    }

    /// Delete a profile and unlink it from every page it referenced.
    pub async fn delete(
        store: &dyn DocumentStore,
        id: &str,
        actor: Option<String>,
    ) -> Result<(), RepoError> {
        let prior = crud::require::<Profile>(store, id).await?;
        store.remove(Profile::COLLECTION, id).await?;

        let delta = LinkDelta {
            removed: prior.page_ids.clone(),
            ..LinkDelta::default()
        };
        if !delta.is_empty() {
            sync::apply_profile_link_delta(store, id, &delta).await;
        }

        crud::record_delete(store, &prior, actor).await;
        Ok(())
    }

    pub async fn set_active(
        store: &dyn DocumentStore,
        id: &str,
        active: bool,
        actor: Option<String>,
    ) -> Result<Profile, RepoError> {
        crud::set_active(store, id, active, actor).await
    }

    /// Bulk upsert: submitted link sets are authoritative for the batch.
    pub async fn bulk_upsert(
        store: &dyn DocumentStore,
        dtos: Vec<SaveProfile>,
        actor: Option<String>,
    ) -> Result<Vec<Profile>, RepoError> {
        let saved = crud::bulk_persist(store, dtos).await?;
        sync::sync_profile_pages_bulk(store, &saved).await;
        crud::record_bulk::<Profile>(
            store,
            saved.len(),
            AuditAction::Update,
            Some("Bulk upsert".to_string()),
            actor,
        )
        .await;
        Ok(saved)
    }

    /// Bulk delete, dropping the removed profiles from every linked page.
    pub async fn bulk_delete(
        store: &dyn DocumentStore,
        ids: &[String],
        actor: Option<String>,
    ) -> Result<usize, RepoError> {
        let removed = crud::bulk_remove::<Profile>(store, ids).await?;
        sync::sync_profiles_removed(store, &removed).await;
        crud::record_bulk::<Profile>(store, removed.len(), AuditAction::Delete, None, actor).await;
        Ok(removed.len())
    }
}
