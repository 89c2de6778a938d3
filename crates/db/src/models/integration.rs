//! Integration entity model and save DTO.

use serde::{Deserialize, Serialize};
use validator::Validate;

use opsdesk_core::types::{EntityId, Timestamp};

use crate::models::{default_status, SaveDto, StoredEntity};

/// An integration document from the `integrations` collection.
///
/// `api_key` is credential-like: excluded from change summaries and redacted
/// in history snapshots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Integration {
    pub id: EntityId,
    pub name: String,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl StoredEntity for Integration {
    const COLLECTION: &'static str = "integrations";
    const KIND: &'static str = "Integration";

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

/// Save payload for an integration.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SaveIntegration {
    pub id: Option<EntityId>,
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
}

impl SaveDto<Integration> for SaveIntegration {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn into_entity(self, id: EntityId, prior: Option<&Integration>, now: Timestamp) -> Integration {
        Integration {
            id,
            name: self.name,
            status: self
                .status
                .unwrap_or_else(|| prior.map(|p| p.status.clone()).unwrap_or_else(default_status)),
            kind: self.kind,
            api_key: self.api_key,
            created_at: prior.map(|p| p.created_at).unwrap_or(now),
            updated_at: now,
        }
    }
}
