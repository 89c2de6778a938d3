//! Handlers for the `/integrations` resource.
//!
//! `api_key` is stored as submitted but never appears in history snapshots or
//! change summaries; redaction happens in the history writer.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use opsdesk_core::error::CoreError;
use opsdesk_db::models::{Integration, SaveIntegration};
use opsdesk_db::repositories::crud;

use crate::actor::Actor;
use crate::error::{AppError, AppResult};
use crate::handlers::BulkDeleteRequest;
use crate::response::{DataResponse, DeletedResponse};
use crate::state::AppState;

/// GET /api/v1/integrations
pub async fn list(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Integration>>>> {
    let integrations = crud::list::<Integration>(state.store.as_ref()).await?;
    Ok(Json(DataResponse { data: integrations }))
}

/// POST /api/v1/integrations
pub async fn create(
    State(state): State<AppState>,
    actor: Actor,
    Json(mut input): Json<SaveIntegration>,
) -> AppResult<(StatusCode, Json<Integration>)> {
    input.id = None;
    let integration = crud::save(state.store.as_ref(), input, actor.into_inner()).await?;
    Ok((StatusCode::CREATED, Json(integration)))
}

/// GET /api/v1/integrations/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Integration>> {
    let integration = crud::find_by_id::<Integration>(state.store.as_ref(), &id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Integration",
            id,
        }))?;
    Ok(Json(integration))
}

/// PUT /api/v1/integrations/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    actor: Actor,
    Json(mut input): Json<SaveIntegration>,
) -> AppResult<Json<Integration>> {
    input.id = Some(id);
    let integration = crud::save(state.store.as_ref(), input, actor.into_inner()).await?;
    Ok(Json(integration))
}

/// DELETE /api/v1/integrations/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
    actor: Actor,
) -> AppResult<StatusCode> {
    crud::delete::<Integration>(state.store.as_ref(), &id, actor.into_inner()).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/integrations/bulk
pub async fn bulk_upsert(
    State(state): State<AppState>,
    actor: Actor,
    Json(inputs): Json<Vec<SaveIntegration>>,
) -> AppResult<Json<DataResponse<Vec<Integration>>>> {
    let saved = crud::bulk_upsert(state.store.as_ref(), inputs, actor.into_inner()).await?;
    Ok(Json(DataResponse { data: saved }))
}

/// POST /api/v1/integrations/bulk-delete
pub async fn bulk_delete(
    State(state): State<AppState>,
    actor: Actor,
    Json(input): Json<BulkDeleteRequest>,
) -> AppResult<Json<DeletedResponse>> {
    let deleted =
        crud::bulk_delete::<Integration>(state.store.as_ref(), &input.ids, actor.into_inner())
            .await?;
    Ok(Json(DeletedResponse { deleted }))
}

/// POST /api/v1/integrations/{id}/activate
pub async fn activate(
    State(state): State<AppState>,
    Path(id): Path<String>,
    actor: Actor,
) -> AppResult<Json<Integration>> {
    let integration =
        crud::set_active::<Integration>(state.store.as_ref(), &id, true, actor.into_inner())
            .await?;
    Ok(Json(integration))
}

/// POST /api/v1/integrations/{id}/deactivate
pub async fn deactivate(
    State(state): State<AppState>,
    Path(id): Path<String>,
    actor: Actor,
) -> AppResult<Json<Integration>> {
    let integration =
        crud::set_active::<Integration>(state.store.as_ref(), &id, false, actor.into_inner())
            .await?;
    Ok(Json(integration))
}
