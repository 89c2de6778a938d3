use axum::routing::{get, post};
use axum::Router;

use crate::handlers::partnerships;
use crate::state::AppState;

/// Routes mounted at `/partnerships`.
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
        .route("/", get(partnerships::list).post(partnerships::create))
        .route("/bulk", post(partnerships::bulk_upsert))
        .route("/bulk-delete", post(partnerships::bulk_delete))
        .route(
            "/{id}",
            get(partnerships::get_by_id)
                .put(partnerships::update)
                .delete(partnerships::delete),
        )
        .route("/{id}/activate", post(partnerships::activate))
        .route("/{id}/deactivate", post(partnerships::deactivate))
}
