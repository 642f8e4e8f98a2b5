//! Business logic services for the application layer.

pub mod allocation_service;

pub use allocation_service::{AllocationService, MAX_ALLOCATION_ATTEMPTS};
