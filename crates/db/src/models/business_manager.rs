//! Business manager entity model, with nested ad accounts and apps.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use validator::Validate;

use opsdesk_core::types::{EntityId, Timestamp};

use crate::models::{default_status, SaveDto, StoredEntity};

/// An ad account nested in a business manager document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdAccount {
    pub id: EntityId,
    pub name: String,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub currency: Option<String>,
}

/// An app nested in a business manager document.
///
/// `project_ids` is the inverse of `Project.chatbot_id` and is authoritative
/// when the app is edited through the business manager save path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct App {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub project_ids: BTreeSet<EntityId>,
}

/// A business manager document from the `business_managers` collection.
///
/// The nested `ad_accounts` and `apps` lists are maintained through this
/// document's own save path and excluded from top-level change summaries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessManager {
    pub id: EntityId,
    pub name: String,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub ad_accounts: Vec<AdAccount>,
    #[serde(default)]
    pub apps: Vec<App>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl BusinessManager {
    /// Find a nested app by id.
    pub fn app(&self, app_id: &str) -> Option<&App> {
        self.apps.iter().find(|a| a.id == app_id)
    }
}

impl StoredEntity for BusinessManager {
    const COLLECTION: &'static str = "business_managers";
    const KIND: &'static str = "Business Manager";

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

/// Save payload for a business manager, including its nested lists.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SaveBusinessManager {
    pub id: Option<EntityId>,
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub ad_accounts: Vec<AdAccount>,
    #[serde(default)]
    pub apps: Vec<App>,
}

impl SaveDto<BusinessManager> for SaveBusinessManager {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn into_entity(
        self,
        id: EntityId,
        prior: Option<&BusinessManager>,
        now: Timestamp,
    ) -> BusinessManager {
        BusinessManager {
            id,
            name: self.name,
            status: self
                .status
                .unwrap_or_else(|| prior.map(|p| p.status.clone()).unwrap_or_else(default_status)),
            ad_accounts: self.ad_accounts,
            apps: self.apps,
            created_at: prior.map(|p| p.created_at).unwrap_or(now),
            updated_at: now,
        }
    }
}
