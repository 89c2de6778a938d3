use axum::routing::{get, post};
use axum::Router;

use crate::handlers::pages;
use crate::state::AppState;

/// Routes mounted at `/pages`.
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
        .route("/", get(pages::list).post(pages::create))
        .route("/bulk", post(pages::bulk_upsert))
        .route("/bulk-delete", post(pages::bulk_delete))
        .route(
            "/{id}",
            get(pages::get_by_id)
                .put(pages::update)
                .delete(pages::delete),
        )
        .route("/{id}/activate", post(pages::activate))
        .route("/{id}/deactivate", post(pages::deactivate))
}
