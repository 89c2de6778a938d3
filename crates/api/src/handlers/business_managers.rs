//! Handlers for the `/business-managers` resource.
//!
//! A business manager save is also the app-side edit path for the
//! Project <-> App link; the repository reasserts app ownership after every
//! write here.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use opsdesk_core::error::CoreError;
use opsdesk_db::models::{BusinessManager, SaveBusinessManager};
use opsdesk_db::repositories::BusinessManagerRepo;

use crate::actor::Actor;
use crate::error::{AppError, AppResult};
use crate::handlers::BulkDeleteRequest;
use crate::response::{DataResponse, DeletedResponse};
use crate::state::AppState;

/// GET /api/v1/business-managers
pub async fn list(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<BusinessManager>>>> {
    let bms = BusinessManagerRepo::list(state.store.as_ref()).await?;
    Ok(Json(DataResponse { data: bms }))
}

/// POST /api/v1/business-managers
pub async fn create(
    State(state): State<AppState>,
    actor: Actor,
    Json(mut input): Json<SaveBusinessManager>,
) -> AppResult<(StatusCode, Json<BusinessManager>)> {
    input.id = None;
    let bm = BusinessManagerRepo::save(state.store.as_ref(), input, actor.into_inner()).await?;
    Ok((StatusCode::CREATED, Json(bm)))
}

/// GET /api/v1/business-managers/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<BusinessManager>> {
    let bm = BusinessManagerRepo::find_by_id(state.store.as_ref(), &id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Business Manager",
            id,
        }))?;
    Ok(Json(bm))
}

/// PUT /api/v1/business-managers/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    actor: Actor,
    Json(mut input): Json<SaveBusinessManager>,
) -> AppResult<Json<BusinessManager>> {
    input.id = Some(id);
    let bm = BusinessManagerRepo::save(state.store.as_ref(), input, actor.into_inner()).await?;
    Ok(Json(bm))
}

/// DELETE /api/v1/business-managers/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
    actor: Actor,
) -> AppResult<StatusCode> {
    BusinessManagerRepo::delete(state.store.as_ref(), &id, actor.into_inner()).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/business-managers/bulk
pub async fn bulk_upsert(
    State(state): State<AppState>,
    actor: Actor,
    Json(inputs): Json<Vec<SaveBusinessManager>>,
) -> AppResult<Json<DataResponse<Vec<BusinessManager>>>> {
    let saved =
        BusinessManagerRepo::bulk_upsert(state.store.as_ref(), inputs, actor.into_inner()).await?;
    Ok(Json(DataResponse { data: saved }))
}

/// POST /api/v1/business-managers/bulk-delete
pub async fn bulk_delete(
    State(state): State<AppState>,
    actor: Actor,
    Json(input): Json<BulkDeleteRequest>,
) -> AppResult<Json<DeletedResponse>> {
    let deleted =
        BusinessManagerRepo::bulk_delete(state.store.as_ref(), &input.ids, actor.into_inner())
            .await?;
    Ok(Json(DeletedResponse { deleted }))
}

/// POST /api/v1/business-managers/{id}/activate
pub async fn activate(
    State(state): State<AppState>,
    Path(id): Path<String>,
    actor: Actor,
) -> AppResult<Json<BusinessManager>> {
    let bm =
        BusinessManagerRepo::set_active(state.store.as_ref(), &id, true, actor.into_inner())
            .await?;
    Ok(Json(bm))
}

/// POST /api/v1/business-managers/{id}/deactivate
pub async fn deactivate(
    State(state): State<AppState>,
    Path(id): Path<String>,
    actor: Actor,
) -> AppResult<Json<BusinessManager>> {
    let bm =
        BusinessManagerRepo::set_active(state.store.as_ref(), &id, false, actor.into_inner())
            .await?;
    Ok(Json(bm))
}
