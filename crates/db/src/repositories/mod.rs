//! Repositories: the write pipeline around the document store.
//!
//! Every save runs validate -> prior fetch -> persist -> relationship sync ->
//! history append. Validation and primary-write failures propagate before any
//! side effect; sync and history are best-effort and never fail the caller.

pub mod business_manager_repo;
pub mod crud;
pub mod history_repo;
pub mod page_repo;
pub mod profile_repo;
pub mod project_repo;
pub mod sync;
pub mod user_repo;

pub use business_manager_repo::BusinessManagerRepo;
pub use history_repo::HistoryRepo;
pub use page_repo::PageRepo;
pub use profile_repo::ProfileRepo;
pub use project_repo::ProjectRepo;
pub use user_repo::UserRepo;
