use axum::routing::get;
use axum::Router;

use crate::handlers::history;
use crate::state::AppState;

/// Routes mounted at `/history`.
///
/// ```text
/// GET / -> list (entity_type, since, limit query params)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(history::list))
}
