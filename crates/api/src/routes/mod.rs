//! Route tree for the API server.

pub mod business_managers;
pub mod domains;
pub mod health;
pub mod history;
pub mod integrations;
pub mod pages;
pub mod partnerships;
pub mod profiles;
pub mod projects;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy (every resource carries the same surface):
///
/// ```text
/// /{resource}                      GET list, POST create
/// /{resource}/{id}                 GET, PUT, DELETE
/// /{resource}/bulk                 POST bulk upsert
/// /{resource}/bulk-delete          POST bulk delete
/// /{resource}/{id}/activate        POST
/// /{resource}/{id}/deactivate      POST
///
/// /history                         GET (read-only audit log)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/profiles", profiles::router())
        .nest("/pages", pages::router())
        .nest("/projects", projects::router())
        .nest("/business-managers", business_managers::router())
        .nest("/domains", domains::router())
        .nest("/partnerships", partnerships::router())
        .nest("/integrations", integrations::router())
        .nest("/users", users::router())
        .nest("/history", history::router())
}
