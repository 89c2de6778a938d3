use opsdesk_core::error::CoreError;

use crate::store::StoreError;

/// Error type returned by repository operations.
///
/// Splits domain failures (validation, conflicts, not-found) from store I/O
/// so the API layer can map each to the right status code.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<validator::ValidationErrors> for RepoError {
    fn from(errors: validator::ValidationErrors) -> Self {
        RepoError::Core(CoreError::Validation(errors.to_string()))
    }
}
