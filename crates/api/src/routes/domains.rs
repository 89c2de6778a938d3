use axum::routing::{get, post};
use axum::Router;

use crate::handlers::domains;
use crate::state::AppState;

/// Routes mounted at `/domains`.
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
        .route("/", get(domains::list).post(domains::create))
        .route("/bulk", post(domains::bulk_upsert))
        .route("/bulk-delete", post(domains::bulk_delete))
        .route(
            "/{id}",
            get(domains::get_by_id)
                .put(domains::update)
                .delete(domains::delete),
        )
        .route("/{id}/activate", post(domains::activate))
        .route("/{id}/deactivate", post(domains::deactivate))
}
