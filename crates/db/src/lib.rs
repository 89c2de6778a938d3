//! Opsdesk persistence layer.
//!
//! Exposes the [`store::DocumentStore`] seam (with in-memory and Postgres
//! implementations), the entity models, and the repositories that orchestrate
//! diff computation, relationship synchronization, and history logging around
//! every write.

pub mod error;
pub mod models;
pub mod repositories;
pub mod store;

pub use error::RepoError;
pub use store::{DocumentStore, SharedStore, StoreError};
