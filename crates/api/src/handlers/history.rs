//! Handlers for the read-only `/history` resource.

use axum::extract::{Query, State};
use axum::Json;

use opsdesk_db::models::{HistoryEntry, HistoryQuery};
use opsdesk_db::repositories::HistoryRepo;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/history
///
/// Query params: `entity_type`, `since` (RFC 3339), `limit`.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> AppResult<Json<DataResponse<Vec<HistoryEntry>>>> {
    let entries = HistoryRepo::list(state.store.as_ref(), &query).await?;
    Ok(Json(DataResponse { data: entries }))
}
