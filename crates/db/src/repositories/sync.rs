//! Relationship synchronizer: inverse-side maintenance for the denormalized
//! link fields.
//!
//! Profile.page_ids <-> Page.profile_ids and Project.chatbot_id <->
//! App.project_ids are kept in agreement by recomputing the inverse side
//! after every save, bulk save, and delete. The primary entity is already
//! durably persisted when these functions run, so every step here is
//! best-effort: a failed inverse write is logged as a warning and the loop
//! continues with the remaining linked entities. There is no multi-entity
//! transaction; partial synchronization under store failure is accepted.

use std::collections::{BTreeMap, BTreeSet};

use opsdesk_core::links::{recompute_inverse, LinkDelta};
use opsdesk_core::types::EntityId;

use crate::error::RepoError;
use crate::models::{BusinessManager, Page, Profile, Project};
use crate::repositories::crud;
use crate::store::DocumentStore;

// ---------------------------------------------------------------------------
// Profile <-> Page (single save / delete)
// ---------------------------------------------------------------------------

/// Propagate a profile's link changes to the affected pages.
pub async fn apply_profile_link_delta(
    store: &dyn DocumentStore,
    profile_id: &str,
    delta: &LinkDelta,
) {
    for page_id in &delta.added {
        if let Err(err) = set_page_membership(store, page_id, profile_id, true).await {
            tracing::warn!(profile_id, page_id, error = %err, "Inverse page update failed; continuing");
        }
    }
    for page_id in &delta.removed {
        if let Err(err) = set_page_membership(store, page_id, profile_id, false).await {
            tracing::warn!(profile_id, page_id, error = %err, "Inverse page update failed; continuing");
        }
    }
}

/// Propagate a page's link changes to the affected profiles.
///
/// Independent mirror of [`apply_profile_link_delta`]; both must converge to
/// the same end state whichever side initiated the edit.
pub async fn apply_page_link_delta(store: &dyn DocumentStore, page_id: &str, delta: &LinkDelta) {
    for profile_id in &delta.added {
        if let Err(err) = set_profile_membership(store, profile_id, page_id, true).await {
            tracing::warn!(page_id, profile_id, error = %err, "Inverse profile update failed; continuing");
        }
    }
    for profile_id in &delta.removed {
        if let Err(err) = set_profile_membership(store, profile_id, page_id, false).await {
            tracing::warn!(page_id, profile_id, error = %err, "Inverse profile update failed; continuing");
        }
    }
}

async fn set_page_membership(
    store: &dyn DocumentStore,
    page_id: &str,
    profile_id: &str,
    member: bool,
) -> Result<(), RepoError> {
    let Some(mut page) = crud::find_by_id::<Page>(store, page_id).await? else {
        tracing::warn!(page_id, "Linked page not found; skipping inverse update");
        return Ok(());
    };
    let changed = if member {
        page.profile_ids.insert(profile_id.to_string())
    } else {
        page.profile_ids.remove(profile_id)
    };
    if changed {
        crud::persist(store, &page).await?;
    }
    Ok(())
}

async fn set_profile_membership(
    store: &dyn DocumentStore,
    profile_id: &str,
    page_id: &str,
    member: bool,
) -> Result<(), RepoError> {
    let Some(mut profile) = crud::find_by_id::<Profile>(store, profile_id).await? else {
        tracing::warn!(profile_id, "Linked profile not found; skipping inverse update");
        return Ok(());
    };
    let changed = if member {
        profile.page_ids.insert(page_id.to_string())
    } else {
        profile.page_ids.remove(page_id)
    };
    if changed {
        crud::persist(store, &profile).await?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Profile <-> Page (bulk)
// ---------------------------------------------------------------------------

/// Reconcile pages after a bulk profile upsert.
///
/// The submitted batch is authoritative for its members: each affected page's
/// `profile_ids` becomes `(existing - batch ids) + claimants in the batch`.
/// Links from profiles outside the batch are untouched.
pub async fn sync_profile_pages_bulk(store: &dyn DocumentStore, profiles: &[Profile]) {
    let batch_ids: BTreeSet<EntityId> = profiles.iter().map(|p| p.id.clone()).collect();
    let mut claims: BTreeMap<EntityId, BTreeSet<EntityId>> = BTreeMap::new();
    for profile in profiles {
        for page_id in &profile.page_ids {
            claims
                .entry(page_id.clone())
                .or_default()
                .insert(profile.id.clone());
        }
    }
    reconcile_pages(store, &batch_ids, &claims).await;
}

/// Drop all page links held by a batch of removed profiles.
pub async fn sync_profiles_removed(store: &dyn DocumentStore, removed: &[Profile]) {
    let batch_ids: BTreeSet<EntityId> = removed.iter().map(|p| p.id.clone()).collect();
    reconcile_pages(store, &batch_ids, &BTreeMap::new()).await;
}

/// Reconcile profiles after a bulk page upsert. Mirror of
/// [`sync_profile_pages_bulk`].
pub async fn sync_page_profiles_bulk(store: &dyn DocumentStore, pages: &[Page]) {
    let batch_ids: BTreeSet<EntityId> = pages.iter().map(|p| p.id.clone()).collect();
    let mut claims: BTreeMap<EntityId, BTreeSet<EntityId>> = BTreeMap::new();
    for page in pages {
        for profile_id in &page.profile_ids {
            claims
                .entry(profile_id.clone())
                .or_default()
                .insert(page.id.clone());
        }
    }
    reconcile_profiles(store, &batch_ids, &claims).await;
}

/// Drop all profile links held by a batch of removed pages.
pub async fn sync_pages_removed(store: &dyn DocumentStore, removed: &[Page]) {
    let batch_ids: BTreeSet<EntityId> = removed.iter().map(|p| p.id.clone()).collect();
    reconcile_profiles(store, &batch_ids, &BTreeMap::new()).await;
}

/// Recompute `profile_ids` once per affected page.
///
/// Affected pages are those claimed by the batch plus those still holding a
/// batch member from before the batch (stale links to drop).
async fn reconcile_pages(
    store: &dyn DocumentStore,
    batch_ids: &BTreeSet<EntityId>,
    claims: &BTreeMap<EntityId, BTreeSet<EntityId>>,
) {
    let mut targets: BTreeSet<EntityId> = claims.keys().cloned().collect();
    match crud::list::<Page>(store).await {
        Ok(pages) => {
            for page in pages {
                if page.profile_ids.iter().any(|id| batch_ids.contains(id)) {
                    targets.insert(page.id);
                }
            }
        }
        Err(err) => {
            tracing::warn!(error = %err, "Could not scan pages for stale links; syncing claimed pages only");
        }
    }

    let no_claimants = BTreeSet::new();
    for page_id in &targets {
        let claimants = claims.get(page_id).unwrap_or(&no_claimants);
        if let Err(err) = reconcile_page(store, page_id, batch_ids, claimants).await {
            tracing::warn!(page_id, error = %err, "Bulk page reconcile failed; continuing");
        }
    }
}

async fn reconcile_page(
    store: &dyn DocumentStore,
    page_id: &str,
    batch_ids: &BTreeSet<EntityId>,
    claimants: &BTreeSet<EntityId>,
) -> Result<(), RepoError> {
    let Some(mut page) = crud::find_by_id::<Page>(store, page_id).await? else {
        tracing::warn!(page_id, "Claimed page not found; skipping");
        return Ok(());
    };
    let next = recompute_inverse(&page.profile_ids, batch_ids, claimants);
    if next != page.profile_ids {
        page.profile_ids = next;
        crud::persist(store, &page).await?;
    }
    Ok(())
}

/// Recompute `page_ids` once per affected profile. Mirror of
/// [`reconcile_pages`].
async fn reconcile_profiles(
    store: &dyn DocumentStore,
    batch_ids: &BTreeSet<EntityId>,
    claims: &BTreeMap<EntityId, BTreeSet<EntityId>>,
) {
    let mut targets: BTreeSet<EntityId> = claims.keys().cloned().collect();
    match crud::list::<Profile>(store).await {
        Ok(profiles) => {
            for profile in profiles {
                if profile.page_ids.iter().any(|id| batch_ids.contains(id)) {
                    targets.insert(profile.id);
                }
            }
        }
        Err(err) => {
            tracing::warn!(error = %err, "Could not scan profiles for stale links; syncing claimed profiles only");
        }
    }

    let no_claimants = BTreeSet::new();
    for profile_id in &targets {
        let claimants = claims.get(profile_id).unwrap_or(&no_claimants);
        if let Err(err) = reconcile_profile(store, profile_id, batch_ids, claimants).await {
            tracing::warn!(profile_id, error = %err, "Bulk profile reconcile failed; continuing");
        }
    }
}

async fn reconcile_profile(
    store: &dyn DocumentStore,
    profile_id: &str,
    batch_ids: &BTreeSet<EntityId>,
    claimants: &BTreeSet<EntityId>,
) -> Result<(), RepoError> {
    let Some(mut profile) = crud::find_by_id::<Profile>(store, profile_id).await? else {
        tracing::warn!(profile_id, "Claimed profile not found; skipping");
        return Ok(());
    };
    let next = recompute_inverse(&profile.page_ids, batch_ids, claimants);
    if next != profile.page_ids {
        profile.page_ids = next;
        crud::persist(store, &profile).await?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Project.chatbot_id <-> App.project_ids
// ---------------------------------------------------------------------------

/// Propagate a project's chatbot reassignment to the affected apps.
///
/// Removes the project from the previously linked app's `project_ids` and
/// adds it to the newly linked app's. Apps are located by scanning business
/// manager documents (apps are nested, not top-level entities).
pub async fn sync_chatbot_change(
    store: &dyn DocumentStore,
    project_id: &str,
    old_app: Option<&str>,
    new_app: Option<&str>,
) {
    if old_app == new_app {
        return;
    }
    if let Some(app_id) = old_app {
        if let Err(err) = set_app_membership(store, app_id, project_id, false).await {
            tracing::warn!(project_id, app_id, error = %err, "Inverse app update failed; continuing");
        }
    }
    if let Some(app_id) = new_app {
        if let Err(err) = set_app_membership(store, app_id, project_id, true).await {
            tracing::warn!(project_id, app_id, error = %err, "Inverse app update failed; continuing");
        }
    }
}

async fn set_app_membership(
    store: &dyn DocumentStore,
    app_id: &str,
    project_id: &str,
    member: bool,
) -> Result<(), RepoError> {
    let bms = crud::list::<BusinessManager>(store).await?;
    let Some(mut bm) = bms.into_iter().find(|bm| bm.app(app_id).is_some()) else {
        tracing::warn!(app_id, "App not found in any business manager; skipping inverse update");
        return Ok(());
    };
    let mut changed = false;
    for app in &mut bm.apps {
        if app.id != app_id {
            continue;
        }
        changed = if member {
            app.project_ids.insert(project_id.to_string())
        } else {
            app.project_ids.remove(project_id)
        };
    }
    if changed {
        crud::persist(store, &bm).await?;
    }
    Ok(())
}

/// Reconcile app memberships after a bulk project upsert.
///
/// Mirror of [`sync_profile_pages_bulk`] for the chatbot link: the batch is
/// authoritative for its members, so each app's `project_ids` becomes
/// `(existing - batch ids) + batch members whose chatbot_id is the app`.
/// Memberships held by projects outside the batch are untouched.
pub async fn sync_project_chatbots_bulk(store: &dyn DocumentStore, projects: &[Project]) {
    let batch_ids: BTreeSet<EntityId> = projects.iter().map(|p| p.id.clone()).collect();
    let mut claims: BTreeMap<EntityId, BTreeSet<EntityId>> = BTreeMap::new();
    for project in projects {
        if let Some(app_id) = &project.chatbot_id {
            claims
                .entry(app_id.clone())
                .or_default()
                .insert(project.id.clone());
        }
    }
    reconcile_apps(store, &batch_ids, &claims).await;
}

/// Drop all app memberships held by a batch of removed projects.
pub async fn sync_projects_removed(store: &dyn DocumentStore, removed: &[Project]) {
    let batch_ids: BTreeSet<EntityId> = removed.iter().map(|p| p.id.clone()).collect();
    reconcile_apps(store, &batch_ids, &BTreeMap::new()).await;
}

/// Recompute `project_ids` for every app across all business managers.
///
/// Apps are nested, so the sweep walks whole documents and persists each one
/// at most once, however many of its apps changed.
async fn reconcile_apps(
    store: &dyn DocumentStore,
    batch_ids: &BTreeSet<EntityId>,
    claims: &BTreeMap<EntityId, BTreeSet<EntityId>>,
) {
    let bms = match crud::list::<BusinessManager>(store).await {
        Ok(bms) => bms,
        Err(err) => {
            tracing::warn!(error = %err, "Could not scan business managers for app reconcile; skipping");
            return;
        }
    };

    let no_claimants = BTreeSet::new();
    for mut bm in bms {
        let mut changed = false;
        for app in &mut bm.apps {
            let claimants = claims.get(&app.id).unwrap_or(&no_claimants);
            let next = recompute_inverse(&app.project_ids, batch_ids, claimants);
            if next != app.project_ids {
                app.project_ids = next;
                changed = true;
            }
        }
        if changed {
            if let Err(err) = crud::persist(store, &bm).await {
                tracing::warn!(bm_id = %bm.id, error = %err, "Bulk app reconcile failed; continuing");
            }
        }
    }
}

/// Reassert app ownership after a business manager save.
///
/// The saved document's `apps[].project_ids` is authoritative: newly listed
/// projects get `chatbot_id` set to the app, dropped projects get it cleared,
/// and apps removed from the document entirely release their projects.
pub async fn sync_bm_apps(
    store: &dyn DocumentStore,
    prior: Option<&BusinessManager>,
    bm: &BusinessManager,
) {
    let empty = BTreeSet::new();
    for app in &bm.apps {
        let old_set = prior
            .and_then(|p| p.app(&app.id))
            .map(|a| &a.project_ids)
            .unwrap_or(&empty);
        let delta = LinkDelta::between(old_set, &app.project_ids);
        for project_id in &delta.added {
            if let Err(err) = point_project_at_app(store, project_id, &app.id).await {
                tracing::warn!(project_id, app_id = %app.id, error = %err, "Project chatbot update failed; continuing");
            }
        }
        for project_id in &delta.removed {
            if let Err(err) = clear_project_chatbot(store, project_id, &app.id).await {
                tracing::warn!(project_id, app_id = %app.id, error = %err, "Project chatbot clear failed; continuing");
            }
        }
    }

    // Apps dropped from the document release every project they held.
    if let Some(prior) = prior {
        for old_app in &prior.apps {
            if bm.app(&old_app.id).is_some() {
                continue;
            }
            for project_id in &old_app.project_ids {
                if let Err(err) = clear_project_chatbot(store, project_id, &old_app.id).await {
                    tracing::warn!(project_id, app_id = %old_app.id, error = %err, "Project chatbot clear failed; continuing");
                }
            }
        }
    }
}

/// Release every project claimed by a deleted business manager's apps.
pub async fn release_bm_apps(store: &dyn DocumentStore, prior: &BusinessManager) {
    for app in &prior.apps {
        for project_id in &app.project_ids {
            if let Err(err) = clear_project_chatbot(store, project_id, &app.id).await {
                tracing::warn!(project_id, app_id = %app.id, error = %err, "Project chatbot clear failed; continuing");
            }
        }
    }
}

async fn point_project_at_app(
    store: &dyn DocumentStore,
    project_id: &str,
    app_id: &str,
) -> Result<(), RepoError> {
    let Some(mut project) = crud::find_by_id::<Project>(store, project_id).await? else {
        tracing::warn!(project_id, "Linked project not found; skipping inverse update");
        return Ok(());
    };
    if project.chatbot_id.as_deref() != Some(app_id) {
        project.chatbot_id = Some(app_id.to_string());
        crud::persist(store, &project).await?;
    }
    Ok(())
}

async fn clear_project_chatbot(
    store: &dyn DocumentStore,
    project_id: &str,
    app_id: &str,
) -> Result<(), RepoError> {
    let Some(mut project) = crud::find_by_id::<Project>(store, project_id).await? else {
        return Ok(());
    };
    // Only clear while the project still points at this app; a concurrent
    // reassignment elsewhere wins.
    if project.chatbot_id.as_deref() == Some(app_id) {
        project.chatbot_id = None;
        crud::persist(store, &project).await?;
    }
    Ok(())
}
