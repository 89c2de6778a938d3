//! Handlers for the `/domains` resource.
//!
//! Domains have no link fields, so the handlers delegate straight to the
//! shared CRUD pipeline.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use opsdesk_core::error::CoreError;
use opsdesk_db::models::{Domain, SaveDomain};
use opsdesk_db::repositories::crud;

use crate::actor::Actor;
use crate::error::{AppError, AppResult};
use crate::handlers::BulkDeleteRequest;
use crate::response::{DataResponse, DeletedResponse};
use crate::state::AppState;

/// GET /api/v1/domains
pub async fn list(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<Domain>>>> {
    let domains = crud::list::<Domain>(state.store.as_ref()).await?;
    Ok(Json(DataResponse { data: domains }))
}

/// POST /api/v1/domains
pub async fn create(
    State(state): State<AppState>,
    actor: Actor,
    Json(mut input): Json<SaveDomain>,
) -> AppResult<(StatusCode, Json<Domain>)> {
    input.id = None;
    let domain = crud::save(state.store.as_ref(), input, actor.into_inner()).await?;
    Ok((StatusCode::CREATED, Json(domain)))
}

/// GET /api/v1/domains/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Domain>> {
    let domain = crud::find_by_id::<Domain>(state.store.as_ref(), &id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Domain",
            id,
        }))?;
    Ok(Json(domain))
}

/// PUT /api/v1/domains/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    actor: Actor,
    Json(mut input): Json<SaveDomain>,
) -> AppResult<Json<Domain>> {
    input.id = Some(id);
    let domain = crud::save(state.store.as_ref(), input, actor.into_inner()).await?;
    Ok(Json(domain))
}

/// DELETE /api/v1/domains/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
    actor: Actor,
) -> AppResult<StatusCode> {
    crud::delete::<Domain>(state.store.as_ref(), &id, actor.into_inner()).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/domains/bulk
pub async fn bulk_upsert(
    State(state): State<AppState>,
    actor: Actor,
    Json(inputs): Json<Vec<SaveDomain>>,
) -> AppResult<Json<DataResponse<Vec<Domain>>>> {
    let saved = crud::bulk_upsert(state.store.as_ref(), inputs, actor.into_inner()).await?;
    Ok(Json(DataResponse { data: saved }))
}

/// POST /api/v1/domains/bulk-delete
pub async fn bulk_delete(
    State(state): State<AppState>,
    actor: Actor,
    Json(input): Json<BulkDeleteRequest>,
) -> AppResult<Json<DeletedResponse>> {
    let deleted =
        crud::bulk_delete::<Domain>(state.store.as_ref(), &input.ids, actor.into_inner()).await?;
    Ok(Json(DeletedResponse { deleted }))
}

/// POST /api/v1/domains/{id}/activate
pub async fn activate(
    State(state): State<AppState>,
    Path(id): Path<String>,
    actor: Actor,
) -> AppResult<Json<Domain>> {
    let domain =
        crud::set_active::<Domain>(state.store.as_ref(), &id, true, actor.into_inner()).await?;
    Ok(Json(domain))
}

/// POST /api/v1/domains/{id}/deactivate
pub async fn deactivate(
    State(state): State<AppState>,
    Path(id): Path<String>,
    actor: Actor,
) -> AppResult<Json<Domain>> {
    let domain =
        crud::set_active::<Domain>(state.store.as_ref(), &id, false, actor.into_inner()).await?;
    Ok(Json(domain))
}
