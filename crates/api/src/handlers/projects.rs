//! Handlers for the `/projects` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use opsdesk_core::error::CoreError;
use opsdesk_db::models::{Project, SaveProject};
use opsdesk_db::repositories::ProjectRepo;

use crate::actor::Actor;
use crate::error::{AppError, AppResult};
use crate::handlers::BulkDeleteRequest;
use crate::response::{DataResponse, DeletedResponse};
use crate::state::AppState;

/// GET /api/v1/projects
pub async fn list(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<Project>>>> {
    let projects = ProjectRepo::list(state.store.as_ref()).await?;
    Ok(Json(DataResponse { data: projects }))
}

/// POST /api/v1/projects
pub async fn create(
    State(state): State<AppState>,
    actor: Actor,
    Json(mut input): Json<SaveProject>,
) -> AppResult<(StatusCode, Json<Project>)> {
    input.id = None;
    let project = ProjectRepo::save(state.store.as_ref(), input, actor.into_inner()).await?;
    Ok((StatusCode::CREATED, Json(project)))
}

/// GET /api/v1/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Project>> {
    let project = ProjectRepo::find_by_id(state.store.as_ref(), &id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    Ok(Json(project))
}

/// PUT /api/v1/projects/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    actor: Actor,
    Json(mut input): Json<SaveProject>,
) -> AppResult<Json<Project>> {
    input.id = Some(id);
    let project = ProjectRepo::save(state.store.as_ref(), input, actor.into_inner()).await?;
    Ok(Json(project))
}

/// DELETE /api/v1/projects/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
    actor: Actor,
) -> AppResult<StatusCode> {
    ProjectRepo::delete(state.store.as_ref(), &id, actor.into_inner()).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/projects/bulk
pub async fn bulk_upsert(
    State(state): State<AppState>,
    actor: Actor,
    Json(inputs): Json<Vec<SaveProject>>,
) -> AppResult<Json<DataResponse<Vec<Project>>>> {
    let saved = ProjectRepo::bulk_upsert(state.store.as_ref(), inputs, actor.into_inner()).await?;
    Ok(Json(DataResponse { data: saved }))
}

/// POST /api/v1/projects/bulk-delete
pub async fn bulk_delete(
    State(state): State<AppState>,
    actor: Actor,
    Json(input): Json<BulkDeleteRequest>,
) -> AppResult<Json<DeletedResponse>> {
    let deleted =
        ProjectRepo::bulk_delete(state.store.as_ref(), &input.ids, actor.into_inner()).await?;
    Ok(Json(DeletedResponse { deleted }))
}

/// POST /api/v1/projects/{id}/activate
pub async fn activate(
    State(state): State<AppState>,
    Path(id): Path<String>,
    actor: Actor,
) -> AppResult<Json<Project>> {
    let project =
        ProjectRepo::set_active(state.store.as_ref(), &id, true, actor.into_inner()).await?;
    Ok(Json(project))
}

/// POST /api/v1/projects/{id}/deactivate
pub async fn deactivate(
    State(state): State<AppState>,
    Path(id): Path<String>,
    actor: Actor,
) -> AppResult<Json<Project>> {
    let project =
        ProjectRepo::set_active(state.store.as_ref(), &id, false, actor.into_inner()).await?;
    Ok(Json(project))
}
