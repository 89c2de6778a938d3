//! HTTP handlers, one module per resource.
//!
//! Every resource exposes the same surface: list, create, get, update,
//! delete, bulk upsert, bulk delete, and activate/deactivate toggles. The
//! handlers are thin: extract the optional actor, delegate to the repository,
//! and map the result into the response envelope.

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

use serde::Deserialize;

/// Request body for `POST /{resource}/bulk-delete`.
#[derive(Debug, Deserialize)]
pub struct BulkDeleteRequest {
    pub ids: Vec<String>,
}
