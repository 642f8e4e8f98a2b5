//! Repository trait definitions for the domain layer.
//!
//! # Available Repositories
//!
//! - [`UrlMappingRepository`] - Short code to URL mapping storage
//!
//! # Testing
//!
//! Mock implementations are generated via `mockall` under `cfg(test)`. See
//! `tests/repository_url_mapping.rs` for the PostgreSQL contract tests.

pub mod url_mapping_repository;

pub use url_mapping_repository::{UniqueColumn, UrlMappingRepository};

#[cfg(test)]
pub use url_mapping_repository::MockUrlMappingRepository;
