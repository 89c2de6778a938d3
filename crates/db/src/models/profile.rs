//! Profile entity model and save DTO.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use validator::Validate;

use opsdesk_core::types::{EntityId, Timestamp};

use crate::models::{default_status, SaveDto, StoredEntity};

/// A profile document from the `profiles` collection.
///
/// `page_ids` is the forward side of the Profile <-> Page link; the inverse
/// (`Page.profile_ids`) is maintained by the relationship synchronizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: EntityId,
    pub name: String,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub two_factor_secret: Option<String>,
    #[serde(default)]
    pub recovery_codes: Option<String>,
    #[serde(default)]
    pub page_ids: BTreeSet<EntityId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl StoredEntity for Profile {
    const COLLECTION: &'static str = "profiles";
    const KIND: &'static str = "Profile";

    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> String {
        self.name.clone()
    }

    fn status(&self) -> &str {
        &self.status
    }

    fn set_status(&mut self, status: String) {
        self.status = status;
    }

    fn set_updated_at(&mut self, at: Timestamp) {
        self.updated_at = at;
    }
}

/// Save payload for a profile: the full intended new state.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SaveProfile {
    pub id: Option<EntityId>,
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub two_factor_secret: Option<String>,
    #[serde(default)]
    pub recovery_codes: Option<String>,
    #[serde(default)]
    pub page_ids: BTreeSet<EntityId>,
}

impl SaveDto<Profile> for SaveProfile {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn into_entity(self, id: EntityId, prior: Option<&Profile>, now: Timestamp) -> Profile {
        Profile {
            id,
            name: self.name,
            status: self
                .status
                .unwrap_or_else(|| prior.map(|p| p.status.clone()).unwrap_or_else(default_status)),
            role: self.role,
            email: self.email,
            notes: self.notes,
            password: self.password,
            two_factor_secret: self.two_factor_secret,
            recovery_codes: self.recovery_codes,
            page_ids: self.page_ids,
            created_at: prior.map(|p| p.created_at).unwrap_or(now),
            updated_at: now,
        }
    }
}
