//! Page entity model and save DTO.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use validator::Validate;

use opsdesk_core::types::{EntityId, Timestamp};

use crate::models::{default_status, SaveDto, StoredEntity};

/// A page document from the `pages` collection.
///
/// `profile_ids` is the inverse of `Profile.page_ids`. `external_id` (the id
/// of the page on the external platform) must be unique across pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    pub id: EntityId,
    pub name: String,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub external_id: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub profile_ids: BTreeSet<EntityId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl StoredEntity for Page {
    const COLLECTION: &'static str = "pages";
    const KIND: &'static str = "Page";

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

/// Save payload for a page: the full intended new state.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SavePage {
    pub id: Option<EntityId>,
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub external_id: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub profile_ids: BTreeSet<EntityId>,
}

impl SaveDto<Page> for SavePage {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn into_entity(self, id: EntityId, prior: Option<&Page>, now: Timestamp) -> Page {
        Page {
            id,
            name: self.name,
            status: self
                .status
                .unwrap_or_else(|| prior.map(|p| p.status.clone()).unwrap_or_else(default_status)),
            external_id: self.external_id,
            category: self.category,
            url: self.url,
            profile_ids: self.profile_ids,
            created_at: prior.map(|p| p.created_at).unwrap_or(now),
            updated_at: now,
        }
    }
}
