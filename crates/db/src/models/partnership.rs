//! Partnership entity model and save DTO.

use serde::{Deserialize, Serialize};
use validator::Validate;

use opsdesk_core::types::{EntityId, Timestamp};

use crate::models::{default_status, SaveDto, StoredEntity};

/// A partnership document from the `partnerships` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Partnership {
    pub id: EntityId,
    pub name: String,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub contact: Option<String>,
    #[serde(default)]
    pub permissions: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl StoredEntity for Partnership {
    const COLLECTION: &'static str = "partnerships";
    const KIND: &'static str = "Partnership";

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

/// Save payload for a partnership.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SavePartnership {
    pub id: Option<EntityId>,
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub contact: Option<String>,
    #[serde(default)]
    pub permissions: Vec<String>,
}

impl SaveDto<Partnership> for SavePartnership {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn into_entity(self, id: EntityId, prior: Option<&Partnership>, now: Timestamp) -> Partnership {
        Partnership {
            id,
            name: self.name,
            status: self
                .status
                .unwrap_or_else(|| prior.map(|p| p.status.clone()).unwrap_or_else(default_status)),
            contact: self.contact,
            permissions: self.permissions,
            created_at: prior.map(|p| p.created_at).unwrap_or(now),
            updated_at: now,
        }
    }
}
