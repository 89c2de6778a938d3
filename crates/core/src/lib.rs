//! Opsdesk core: pure domain logic shared by the persistence and API layers.
//!
//! This crate has zero internal dependencies so the diff engine, link-set
//! math, and audit vocabulary can be used from repositories, handlers, and
//! any future CLI tooling alike.

pub mod audit;
pub mod diff;
pub mod error;
pub mod links;
pub mod types;
