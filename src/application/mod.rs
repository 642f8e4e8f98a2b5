//! Application layer services implementing business logic.
//!
//! Services consume repository traits and give HTTP handlers and the admin CLI
//! a single entry point for each operation.
//!
//! # Available Services
//!
//! - [`services::allocation_service::AllocationService`] - Short code allocation and resolution

pub mod services;
