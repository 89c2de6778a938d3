//! Handlers for the `/pages` resource.
//!
//! Pages enforce `external_id` uniqueness in the repository; duplicate
//! submissions surface here as 409 Conflict.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use opsdesk_core::error::CoreError;
use opsdesk_db::models::{Page, SavePage};
use opsdesk_db::repositories::PageRepo;

use crate::actor::Actor;
use crate::error::{AppError, AppResult};
use crate::handlers::BulkDeleteRequest;
use crate::response::{DataResponse, DeletedResponse};
use crate::state::AppState;

/// GET /api/v1/pages
pub async fn list(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<Page>>>> {
    let pages = PageRepo::list(state.store.as_ref()).await?;
    Ok(Json(DataResponse { data: pages }))
}

/// POST /api/v1/pages
pub async fn create(
    State(state): State<AppState>,
    actor: Actor,
    Json(mut input): Json<SavePage>,
) -> AppResult<(StatusCode, Json<Page>)> {
    input.id = None;
    let page = PageRepo::save(state.store.as_ref(), input, actor.into_inner()).await?;
    Ok((StatusCode::CREATED, Json(page)))
}

/// GET /api/v1/pages/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Page>> {
    let page = PageRepo::find_by_id(state.store.as_ref(), &id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Page", id }))?;
    Ok(Json(page))
}

/// PUT /api/v1/pages/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    actor: Actor,
    Json(mut input): Json<SavePage>,
) -> AppResult<Json<Page>> {
    input.id = Some(id);
    let page = PageRepo::save(state.store.as_ref(), input, actor.into_inner()).await?;
    Ok(Json(page))
}

/// DELETE /api/v1/pages/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
    actor: Actor,
) -> AppResult<StatusCode> {
    PageRepo::delete(state.store.as_ref(), &id, actor.into_inner()).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/pages/bulk
pub async fn bulk_upsert(
    State(state): State<AppState>,
    actor: Actor,
    Json(inputs): Json<Vec<SavePage>>,
) -> AppResult<Json<DataResponse<Vec<Page>>>> {
    let saved = PageRepo::bulk_upsert(state.store.as_ref(), inputs, actor.into_inner()).await?;
    Ok(Json(DataResponse { data: saved }))
}

/// POST /api/v1/pages/bulk-delete
pub async fn bulk_delete(
    State(state): State<AppState>,
    actor: Actor,
    Json(input): Json<BulkDeleteRequest>,
) -> AppResult<Json<DeletedResponse>> {
    let deleted =
        PageRepo::bulk_delete(state.store.as_ref(), &input.ids, actor.into_inner()).await?;
    Ok(Json(DeletedResponse { deleted }))
}

/// POST /api/v1/pages/{id}/activate
pub async fn activate(
    State(state): State<AppState>,
    Path(id): Path<String>,
    actor: Actor,
) -> AppResult<Json<Page>> {
    let page = PageRepo::set_active(state.store.as_ref(), &id, true, actor.into_inner()).await?;
    Ok(Json(page))
}

/// POST /api/v1/pages/{id}/deactivate
pub async fn deactivate(
    State(state): State<AppState>,
    Path(id): Path<String>,
    actor: Actor,
) -> AppResult<Json<Page>> {
    let page = PageRepo::set_active(state.store.as_ref(), &id, false, actor.into_inner()).await?;
    Ok(Json(page))
}
