//! Handlers for the `/profiles` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use opsdesk_core::error::CoreError;
use opsdesk_db::models::{Profile, SaveProfile};
use opsdesk_db::repositories::ProfileRepo;

use crate::actor::Actor;
use crate::error::{AppError, AppResult};
use crate::handlers::BulkDeleteRequest;
use crate::response::{DataResponse, DeletedResponse};
use crate::state::AppState;

/// GET /api/v1/profiles
pub async fn list(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<Profile>>>> {
    let profiles = ProfileRepo::list(state.store.as_ref()).await?;
    Ok(Json(DataResponse { data: profiles }))
}

/// POST /api/v1/profiles
pub async fn create(
    State(state): State<AppState>,
    actor: Actor,
    Json(mut input): Json<SaveProfile>,
) -> AppResult<(StatusCode, Json<Profile>)> {
    input.id = None;
    let profile = ProfileRepo::save(state.store.as_ref(), input, actor.into_inner()).await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

/// GET /api/v1/profiles/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Profile>> {
    let profile = ProfileRepo::find_by_id(state.store.as_ref(), &id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Profile",
            id,
        }))?;
    Ok(Json(profile))
}

/// PUT /api/v1/profiles/{id}
///
/// Overrides `input.id` with the value from the URL path.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    actor: Actor,
    Json(mut input): Json<SaveProfile>,
) -> AppResult<Json<Profile>> {
    input.id = Some(id);
    let profile = ProfileRepo::save(state.store.as_ref(), input, actor.into_inner()).await?;
    Ok(Json(profile))
}

/// DELETE /api/v1/profiles/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
    actor: Actor,
) -> AppResult<StatusCode> {
    ProfileRepo::delete(state.store.as_ref(), &id, actor.into_inner()).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/profiles/bulk
pub async fn bulk_upsert(
    State(state): State<AppState>,
    actor: Actor,
    Json(inputs): Json<Vec<SaveProfile>>,
) -> AppResult<Json<DataResponse<Vec<Profile>>>> {
    let saved = ProfileRepo::bulk_upsert(state.store.as_ref(), inputs, actor.into_inner()).await?;
    Ok(Json(DataResponse { data: saved }))
}

/// POST /api/v1/profiles/bulk-delete
pub async fn bulk_delete(
    State(state): State<AppState>,
    actor: Actor,
    Json(input): Json<BulkDeleteRequest>,
) -> AppResult<Json<DeletedResponse>> {
    let deleted =
        ProfileRepo::bulk_delete(state.store.as_ref(), &input.ids, actor.into_inner()).await?;
    Ok(Json(DeletedResponse { deleted }))
}

/// POST /api/v1/profiles/{id}/activate
pub async fn activate(
    State(state): State<AppState>,
    Path(id): Path<String>,
    actor: Actor,
) -> AppResult<Json<Profile>> {
    let profile = ProfileRepo::set_active(state.store.as_ref(), &id, true, actor.into_inner()).await?;
    Ok(Json(profile))
}

/// POST /api/v1/profiles/{id}/deactivate
pub async fn deactivate(
    State(state): State<AppState>,
    Path(id): Path<String>,
    actor: Actor,
) -> AppResult<Json<Profile>> {
    let profile =
        ProfileRepo::set_active(state.store.as_ref(), &id, false, actor.into_inner()).await?;
    Ok(Json(profile))
}
