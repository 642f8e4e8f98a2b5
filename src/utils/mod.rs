//! Utility functions for code generation, input validation, and request handling.
//!
//! - [`code_generator`] - Short code generation and validation
//! - [`url_validator`] - Validation of submitted URLs
//! - [`request_origin`] - Public origin resolution for short URLs
//! - [`db_error`] - Database error classification

pub mod code_generator;
pub mod db_error;
pub mod request_origin;
pub mod url_validator;
