//! Repository for the `users` collection.
//!
//! Users have no link fields; this only adds the email-uniqueness check in
//! front of the shared pipeline, for single saves and batches alike.

use std::collections::BTreeSet;

use opsdesk_core::error::CoreError;

use crate::error::RepoError;
use crate::models::{SaveUser, User};
use crate::repositories::crud;
use crate::store::DocumentStore;

pub struct UserRepo;

impl UserRepo {
    /// Create or update a user, rejecting duplicate emails before any side
    /// effect.
    pub async fn save(
        store: &dyn DocumentStore,
        dto: SaveUser,
        actor: Option<String>,
    ) -> Result<User, RepoError> {
        crud::ensure_unique_field::<User>(store, "email", &dto.email, dto.id.as_deref()).await?;
        crud::save(store, dto, actor).await
    }

    /// Bulk upsert. Every payload runs the same email check as a single save,
    /// and emails must also be unique within the batch itself; either
    /// conflict rejects the whole batch before anything persists.
    pub async fn bulk_upsert(
        store: &dyn DocumentStore,
        dtos: Vec<SaveUser>,
        actor: Option<String>,
    ) -> Result<Vec<User>, RepoError> {
        let mut seen: BTreeSet<&str> = BTreeSet::new();
        for dto in &dtos {
            crud::ensure_unique_field::<User>(store, "email", &dto.email, dto.id.as_deref())
                .await?;
            if !seen.insert(dto.email.as_str()) {
                return Err(RepoError::Core(CoreError::Conflict(format!(
                    "User with email '{}' appears more than once in the batch",
                    dto.email
                ))));
            }
        }
        crud::bulk_upsert(store, dtos, actor).await
    }
}
