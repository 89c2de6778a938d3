//! Repository for the `business_managers` collection.
//!
//! Apps live nested inside the business manager document, so this is the
//! app-side edit path for the Project <-> App link: each saved app's
//! `project_ids` is authoritative and is reasserted onto the projects.

use opsdesk_core::audit::AuditAction;

use crate::error::RepoError;
use crate::models::{BusinessManager, SaveBusinessManager, StoredEntity};
use crate::repositories::{crud, sync};
use crate::store::DocumentStore;

pub struct BusinessManagerRepo;

impl BusinessManagerRepo {
    pub async fn find_by_id(
        store: &dyn DocumentStore,
        id: &str,
    ) -> Result<Option<BusinessManager>, RepoError> {
        crud::find_by_id(store, id).await
    }

    pub async fn list(store: &dyn DocumentStore) -> Result<Vec<BusinessManager>, RepoError> {
        crud::list(store).await
    }

    /// Create or update a business manager, reasserting app ownership.
    pub async fn save(
        store: &dyn DocumentStore,
        dto: SaveBusinessManager,
        actor: Option<String>,
    ) -> Result<BusinessManager, RepoError> {
        let (bm, prior) = crud::prepare_save(store, dto).await?;
        crud::persist(store, &bm).await?;

        sync::sync_bm_apps(store, prior.as_ref(), &bm).await;

        crud::record_save(store, &bm, prior.as_ref(), actor).await;
        Ok(bm)
    }

    /// Delete a business manager, releasing every project its apps held.
    pub async fn delete(
        store: &dyn DocumentStore,
        id: &str,
        actor: Option<String>,
    ) -> Result<(), RepoError> {
        let prior = crud::require::<BusinessManager>(store, id).await?;
        store.remove(BusinessManager::COLLECTION, id).await?;

        sync::release_bm_apps(store, &prior).await;

        crud::record_delete(store, &prior, actor).await;
        Ok(())
    }

    pub async fn set_active(
        store: &dyn DocumentStore,
        id: &str,
        active: bool,
        actor: Option<String>,
    ) -> Result<BusinessManager, RepoError> {
        crud::set_active(store, id, active, actor).await
    }

    /// Bulk upsert. Each submitted document's apps are authoritative; with no
    /// per-item prior state, ownership is reasserted from the new documents.
    pub async fn bulk_upsert(
        store: &dyn DocumentStore,
        dtos: Vec<SaveBusinessManager>,
        actor: Option<String>,
    ) -> Result<Vec<BusinessManager>, RepoError> {
        let saved = crud::bulk_persist(store, dtos).await?;
        for bm in &saved {
            sync::sync_bm_apps(store, None, bm).await;
        }
        crud::record_bulk::<BusinessManager>(
            store,
            saved.len(),
            AuditAction::Update,
            Some("Bulk upsert".to_string()),
            actor,
        )
        .await;
        Ok(saved)
    }

    /// Bulk delete, releasing the projects held by every removed document.
    pub async fn bulk_delete(
        store: &dyn DocumentStore,
        ids: &[String],
        actor: Option<String>,
    ) -> Result<usize, RepoError> {
        let removed = crud::bulk_remove::<BusinessManager>(store, ids).await?;
        for bm in &removed {
            sync::release_bm_apps(store, bm).await;
        }
        crud::record_bulk::<BusinessManager>(store, removed.len(), AuditAction::Delete, None, actor)
            .await;
        Ok(removed.len())
    }
}
