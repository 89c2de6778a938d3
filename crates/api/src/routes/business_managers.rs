use axum::routing::{get, post};
use axum::Router;

use crate::handlers::business_managers;
use crate::state::AppState;

/// Routes mounted at `/business-managers`.
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
        .route("/", get(business_managers::list).post(business_managers::create))
        .route("/bulk", post(business_managers::bulk_upsert))
        .route("/bulk-delete", post(business_managers::bulk_delete))
        .route(
            "/{id}",
            get(business_managers::get_by_id)
                .put(business_managers::update)
                .delete(business_managers::delete),
        )
        .route("/{id}/activate", post(business_managers::activate))
        .route("/{id}/deactivate", post(business_managers::deactivate))
}
