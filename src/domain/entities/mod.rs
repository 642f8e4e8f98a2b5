//! Core domain entities.
//!
//! The service has a single entity, [`UrlMapping`], plus the [`NewUrlMapping`]
//! payload used to insert it. Entities are plain data structures; the only
//! behavior they carry is expiry evaluation.

pub mod url_mapping;

pub use url_mapping::{NewUrlMapping, UrlMapping};
