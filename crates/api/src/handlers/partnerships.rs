//! Handlers for the `/partnerships` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use opsdesk_core::error::CoreError;
use opsdesk_db::models::{Partnership, SavePartnership};
use opsdesk_db::repositories::crud;

use crate::actor::Actor;
use crate::error::{AppError, AppResult};
use crate::handlers::BulkDeleteRequest;
use crate::response::{DataResponse, DeletedResponse};
use crate::state::AppState;

/// GET /api/v1/partnerships
pub async fn list(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Partnership>>>> {
    let partnerships = crud::list::<Partnership>(state.store.as_ref()).await?;
    Ok(Json(DataResponse { data: partnerships }))
}

/// POST /api/v1/partnerships
pub async fn create(
    State(state): State<AppState>,
    actor: Actor,
    Json(mut input): Json<SavePartnership>,
) -> AppResult<(StatusCode, Json<Partnership>)> {
    input.id = None;
    let partnership = crud::save(state.store.as_ref(), input, actor.into_inner()).await?;
    Ok((StatusCode::CREATED, Json(partnership)))
}

/// GET /api/v1/partnerships/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Partnership>> {
    let partnership = crud::find_by_id::<Partnership>(state.store.as_ref(), &id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Partnership",
            id,
        }))?;
    Ok(Json(partnership))
}

/// PUT /api/v1/partnerships/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    actor: Actor,
    Json(mut input): Json<SavePartnership>,
) -> AppResult<Json<Partnership>> {
    input.id = Some(id);
    let partnership = crud::save(state.store.as_ref(), input, actor.into_inner()).await?;
    Ok(Json(partnership))
}

/// DELETE /api/v1/partnerships/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
    actor: Actor,
) -> AppResult<StatusCode> {
    crud::delete::<Partnership>(state.store.as_ref(), &id, actor.into_inner()).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/partnerships/bulk
pub async fn bulk_upsert(
    State(state): State<AppState>,
    actor: Actor,
    Json(inputs): Json<Vec<SavePartnership>>,
) -> AppResult<Json<DataResponse<Vec<Partnership>>>> {
    let saved = crud::bulk_upsert(state.store.as_ref(), inputs, actor.into_inner()).await?;
    Ok(Json(DataResponse { data: saved }))
}

/// POST /api/v1/partnerships/bulk-delete
pub async fn bulk_delete(
    State(state): State<AppState>,
    actor: Actor,
    Json(input): Json<BulkDeleteRequest>,
) -> AppResult<Json<DeletedResponse>> {
    let deleted =
        crud::bulk_delete::<Partnership>(state.store.as_ref(), &input.ids, actor.into_inner())
            .await?;
    Ok(Json(DeletedResponse { deleted }))
}

/// POST /api/v1/partnerships/{id}/activate
pub async fn activate(
    State(state): State<AppState>,
    Path(id): Path<String>,
    actor: Actor,
) -> AppResult<Json<Partnership>> {
    let partnership =
        crud::set_active::<Partnership>(state.store.as_ref(), &id, true, actor.into_inner())
            .await?;
    Ok(Json(partnership))
}

/// POST /api/v1/partnerships/{id}/deactivate
pub async fn deactivate(
    State(state): State<AppState>,
    Path(id): Path<String>,
    actor: Actor,
) -> AppResult<Json<Partnership>> {
    let partnership =
        crud::set_active::<Partnership>(state.store.as_ref(), &id, false, actor.into_inner())
            .await?;
    Ok(Json(partnership))
}
