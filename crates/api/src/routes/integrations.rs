use axum::routing::{get, post};
use axum::Router;

use crate::handlers::integrations;
use crate::state::AppState;

/// Routes mounted at `/integrations`.
///
/// ```text
/// GET    /                  -> list
/// POST   /                  -> create
/// GET    /{id}              -> get_by_id
/// PUT    /{id}              -> update
/// DELETE /{id}              -> delete
/// POST   /bulk              -> bulk_upsert
/// POST   /bulk-delete       -> bulk_delete
/// POST   /{id}/activate     -> activate
/// POST   /{id}/deactivate   -> deactivate
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(integrations::list).post(integrations::create))
        .route("/bulk", post(integrations::bulk_upsert))
        .route("/bulk-delete", post(integrations::bulk_delete))
        .route(
            "/{id}",
            get(integrations::get_by_id)
                .put(integrations::update)
                .delete(integrations::delete),
        )
        .route("/{id}/activate", post(integrations::activate))
        .route("/{id}/deactivate", post(integrations::deactivate))
}
