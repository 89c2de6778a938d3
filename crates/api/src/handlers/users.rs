//! Handlers for the `/users` resource.
//!
//! Saves go through [`UserRepo`] so the email-uniqueness check runs; the rest
//! of the surface delegates to the shared CRUD pipeline.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use opsdesk_core::error::CoreError;
use opsdesk_db::models::{SaveUser, User};
use opsdesk_db::repositories::{crud, UserRepo};

use crate::actor::Actor;
use crate::error::{AppError, AppResult};
use crate::handlers::BulkDeleteRequest;
use crate::response::{DataResponse, DeletedResponse};
use crate::state::AppState;

/// GET /api/v1/users
pub async fn list(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<User>>>> {
    let users = crud::list::<User>(state.store.as_ref()).await?;
    Ok(Json(DataResponse { data: users }))
}

/// POST /api/v1/users
pub async fn create(
    State(state): State<AppState>,
    actor: Actor,
    Json(mut input): Json<SaveUser>,
) -> AppResult<(StatusCode, Json<User>)> {
    input.id = None;
    let user = UserRepo::save(state.store.as_ref(), input, actor.into_inner()).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /api/v1/users/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<User>> {
    let user = crud::find_by_id::<User>(state.store.as_ref(), &id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    Ok(Json(user))
}

/// PUT /api/v1/users/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    actor: Actor,
    Json(mut input): Json<SaveUser>,
) -> AppResult<Json<User>> {
    input.id = Some(id);
    let user = UserRepo::save(state.store.as_ref(), input, actor.into_inner()).await?;
    Ok(Json(user))
}

/// DELETE /api/v1/users/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
    actor: Actor,
) -> AppResult<StatusCode> {
    crud::delete::<User>(state.store.as_ref(), &id, actor.into_inner()).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/users/bulk
pub async fn bulk_upsert(
    State(state): State<AppState>,
    actor: Actor,
    Json(inputs): Json<Vec<SaveUser>>,
) -> AppResult<Json<DataResponse<Vec<User>>>> {
    let saved = UserRepo::bulk_upsert(state.store.as_ref(), inputs, actor.into_inner()).await?;
    Ok(Json(DataResponse { data: saved }))
}

/// POST /api/v1/users/bulk-delete
pub async fn bulk_delete(
    State(state): State<AppState>,
    actor: Actor,
    Json(input): Json<BulkDeleteRequest>,
) -> AppResult<Json<DeletedResponse>> {
    let deleted =
        crud::bulk_delete::<User>(state.store.as_ref(), &input.ids, actor.into_inner()).await?;
    Ok(Json(DeletedResponse { deleted }))
}

/// POST /api/v1/users/{id}/activate
pub async fn activate(
    State(state): State<AppState>,
    Path(id): Path<String>,
    actor: Actor,
) -> AppResult<Json<User>> {
    let user = crud::set_active::<User>(state.store.as_ref(), &id, true, actor.into_inner()).await?;
    Ok(Json(user))
}

/// POST /api/v1/users/{id}/deactivate
pub async fn deactivate(
    State(state): State<AppState>,
    Path(id): Path<String>,
    actor: Actor,
) -> AppResult<Json<User>> {
    let user =
        crud::set_active::<User>(state.store.as_ref(), &id, false, actor.into_inner()).await?;
    Ok(Json(user))
}
