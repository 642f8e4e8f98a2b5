//! Mapping store implementations.
//!
//! # Repositories
//!
//! - [`PgUrlMappingRepository`] - PostgreSQL storage backed by SQLx
//! - [`MemoryUrlMappingRepository`] - In-process storage for development and tests

pub mod memory_url_mapping_repository;
pub mod pg_url_mapping_repository;

pub use memory_url_mapping_repository::MemoryUrlMappingRepository;
pub use pg_url_mapping_repository::PgUrlMappingRepository;
