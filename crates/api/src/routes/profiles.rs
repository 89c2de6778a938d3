use axum::routing::{get, post};
use axum::Router;

use crate::handlers::profiles;
use crate::state::AppState;

/// Routes mounted at `/profiles`.
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
        .route("/", get(profiles::list).post(profiles::create))
        .route("/bulk", post(profiles::bulk_upsert))
        .route("/bulk-delete", post(profiles::bulk_delete))
        .route(
            "/{id}",
            get(profiles::get_by_id)
                .put(profiles::update)
                .delete(profiles::delete),
        )
        .route("/{id}/activate", post(profiles::activate))
        .route("/{id}/deactivate", post(profiles::deactivate))
}
