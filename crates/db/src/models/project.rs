//! Project entity model and save DTO.

use serde::{Deserialize, Serialize};
use validator::Validate;

use opsdesk_core::types::{EntityId, Timestamp};

use crate::models::{default_status, SaveDto, StoredEntity};

/// A project document from the `projects` collection.
///
/// `chatbot_id` links to at most one App (nested in a business manager); the
/// inverse (`App.project_ids`) is maintained by the relationship
/// synchronizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: EntityId,
    pub name: String,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub countries: Vec<String>,
    #[serde(default)]
    pub chatbot_id: Option<EntityId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl StoredEntity for Project {
    const COLLECTION: &'static str = "projects";
    const KIND: &'static str = "Project";

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

/// Save payload for a project: the full intended new state.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SaveProject {
    pub id: Option<EntityId>,
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub countries: Vec<String>,
    #[serde(default)]
    pub chatbot_id: Option<EntityId>,
}

impl SaveDto<Project> for SaveProject {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn into_entity(self, id: EntityId, prior: Option<&Project>, now: Timestamp) -> Project {
        Project {
            id,
            name: self.name,
            status: self
                .status
                .unwrap_or_else(|| prior.map(|p| p.status.clone()).unwrap_or_else(default_status)),
            description: self.description,
            countries: self.countries,
            chatbot_id: self.chatbot_id,
            created_at: prior.map(|p| p.created_at).unwrap_or(now),
            updated_at: now,
        }
    }
}
