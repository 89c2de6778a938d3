//! Repository for the `projects` collection.
//!
//! A project links to at most one app through `chatbot_id`; reassignments
//! propagate to the affected apps' `project_ids`. Two projects may claim the
//! same app from this side -- the app-side edit path (business manager save)
//! is the reconciler that reasserts single ownership.

use opsdesk_core::audit::AuditAction;

use crate::error::RepoError;
use crate::models::{Project, SaveProject, StoredEntity};
use crate::repositories::{crud, sync};
use crate::store::DocumentStore;

pub struct ProjectRepo;

impl ProjectRepo {
    pub async fn find_by_id(
        store: &dyn DocumentStore,
        id: &str,
    ) -> Result<Option<Project>, RepoError> {
        crud::find_by_id(store, id).await
    }

    pub async fn list(store: &dyn DocumentStore) -> Result<Vec<Project>, RepoError> {
        crud::list(store).await
    }

    /// Create or update a project, propagating a chatbot reassignment.
    pub async fn save(
        store: &dyn DocumentStore,
        dto: SaveProject,
        actor: Option<String>,
    ) -> Result<Project, RepoError> {
        let (project, prior) = crud::prepare_save(store, dto).await?;
        crud::persist(store, &project).await?;

        let old_app = prior.as_ref().and_then(|p: &Project| p.chatbot_id.as_deref());
        sync::sync_chatbot_change(store, &project.id, old_app, project.chatbot_id.as_deref())
            .await;

        crud::record_save(store, &project, prior.as_ref(), actor).await;
        Ok(project)
    }

    /// Delete a project and release its app link.
    pub async fn delete(
        store: &dyn DocumentStore,
        id: &str,
        actor: Option<String>,
    ) -> Result<(), RepoError> {
        let prior = crud::require::<Project>(store, id).await?;
        store.remove(Project::COLLECTION, id).await?;

        sync::sync_chatbot_change(store, id, prior.chatbot_id.as_deref(), None).await;

        crud::record_delete(store, &prior, actor).await;
        Ok(())
    }

    pub async fn set_active(
        store: &dyn DocumentStore,
        id: &str,
        active: bool,
        actor: Option<String>,
    ) -> Result<Project, RepoError> {
        crud::set_active(store, id, active, actor).await
    }

    /// Bulk upsert: submitted chatbot links are authoritative for the batch.
    ///
    /// The bulk path reads no per-item prior state, so stale memberships are
    /// found by sweeping the apps rather than diffing against a prior.
    pub async fn bulk_upsert(
        store: &dyn DocumentStore,
        dtos: Vec<SaveProject>,
        actor: Option<String>,
    ) -> Result<Vec<Project>, RepoError> {
        let saved = crud::bulk_persist(store, dtos).await?;
        sync::sync_project_chatbots_bulk(store, &saved).await;
        crud::record_bulk::<Project>(
            store,
            saved.len(),
            AuditAction::Update,
            Some("Bulk upsert".to_string()),
            actor,
        )
        .await;
        Ok(saved)
    }

    /// Bulk delete, releasing every app membership the removed projects held.
    pub async fn bulk_delete(
        store: &dyn DocumentStore,
        ids: &[String],
        actor: Option<String>,
    ) -> Result<usize, RepoError> {
        let removed = crud::bulk_remove::<Project>(store, ids).await?;
        sync::sync_projects_removed(store, &removed).await;
        crud::record_bulk::<Project>(
            store,
            removed.len(),
            AuditAction::Delete,
            None,
            actor,
        )
        .await;
        Ok(removed.len())
    }
}
