//! Domain entity model, with nested subdomains.

use serde::{Deserialize, Serialize};
use validator::Validate;

use opsdesk_core::types::{EntityId, Timestamp};

use crate::models::{default_status, SaveDto, StoredEntity};

/// A subdomain nested in a domain document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subdomain {
    pub id: EntityId,
    pub name: String,
}

/// A domain document from the `domains` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Domain {
    pub id: EntityId,
    pub name: String,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub registrar: Option<String>,
    #[serde(default)]
    pub subdomains: Vec<Subdomain>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl StoredEntity for Domain {
    const COLLECTION: &'static str = "domains";
    const KIND: &'static str = "Domain";

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

/// Save payload for a domain.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SaveDomain {
    pub id: Option<EntityId>,
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub registrar: Option<String>,
    #[serde(default)]
    pub subdomains: Vec<Subdomain>,
}

impl SaveDto<Domain> for SaveDomain {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn into_entity(self, id: EntityId, prior: Option<&Domain>, now: Timestamp) -> Domain {
        Domain {
            id,
            name: self.name,
            status: self
                .status
                .unwrap_or_else(|| prior.map(|p| p.status.clone()).unwrap_or_else(default_status)),
            registrar: self.registrar,
            subdomains: self.subdomains,
            created_at: prior.map(|p| p.created_at).unwrap_or(now),
            updated_at: now,
        }
    }
}
