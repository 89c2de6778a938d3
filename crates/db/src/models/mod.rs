//! Entity models and save DTOs.
//!
//! Every entity persists as a whole JSON document. [`StoredEntity`] is the
//! seam the shared CRUD pipeline works against; [`SaveDto`] is implemented by
//! each save payload and assembles the authoritative new state from the form
//! submission (plus the prior state for create-time fields).

pub mod business_manager;
pub mod domain;
pub mod history;
pub mod integration;
pub mod page;
pub mod partnership;
pub mod profile;
pub mod project;
pub mod user;

use serde::de::DeserializeOwned;
use serde::Serialize;

use opsdesk_core::types::{EntityId, Timestamp};

pub use business_manager::{AdAccount, App, BusinessManager, SaveBusinessManager};
pub use domain::{Domain, SaveDomain, Subdomain};
pub use history::{HistoryEntry, HistoryQuery, NewHistoryEntry};
pub use integration::{Integration, SaveIntegration};
pub use page::{Page, SavePage};
pub use partnership::{Partnership, SavePartnership};
pub use profile::{Profile, SaveProfile};
pub use project::{Project, SaveProject};
pub use user::{SaveUser, User};

/// Entity status used by the activate/deactivate toggles.
pub const STATUS_ACTIVE: &str = "active";
pub const STATUS_INACTIVE: &str = "inactive";

pub(crate) fn default_status() -> String {
    STATUS_ACTIVE.to_string()
}

/// A top-level business record persisted as one document.
pub trait StoredEntity: Clone + Send + Sync + Serialize + DeserializeOwned {
    /// Store collection holding this entity type.
    const COLLECTION: &'static str;

    /// Display label used in history entries and error messages.
    const KIND: &'static str;

    fn id(&self) -> &str;

    /// Human-readable name recorded in history entries.
    fn display_name(&self) -> String;

    fn status(&self) -> &str;
    fn set_status(&mut self, status: String);
    fn set_updated_at(&mut self, at: Timestamp);
}

/// A save payload: the full intended new state, with an optional id.
///
/// No id means create (the repository assigns one); an id means update.
pub trait SaveDto<E: StoredEntity>: validator::Validate + Send {
    fn id(&self) -> Option<&str>;

    /// Assemble the entity to persist.
    ///
    /// `prior` carries create-time fields (e.g. `created_at`) forward on
    /// updates; it is `None` on create and in the bulk path, which reads no
    /// per-item prior state.
    fn into_entity(self, id: EntityId, prior: Option<&E>, now: Timestamp) -> E;
}
