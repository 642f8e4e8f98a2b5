//! Repository trait for URL mapping data access.

use crate::domain::entities::{NewUrlMapping, UrlMapping};
use crate::error::AppError;
use async_trait::async_trait;
use std::fmt;

/// Column whose uniqueness constraint rejected an insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueColumn {
    ShortCode,
    OriginalUrl,
}

impl fmt::Display for UniqueColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShortCode => f.write_str("short_code"),
            Self::OriginalUrl => f.write_str("original_url"),
        }
    }
}

/// Repository interface for the durable short code table.
///
/// Implementations are the sole arbiter of both uniqueness invariants: at most
/// one row per `short_code` and at most one row per `original_url`. Callers may
/// pre-check with the `find_*` methods, but only [`insert`](Self::insert) is
/// authoritative under concurrent writers.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlMappingRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryUrlMappingRepository`] - In-process, non-durable
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlMappingRepository: Send + Sync {
    /// Atomically inserts a new mapping.
    ///
    /// Either the whole row is stored or nothing is.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] carrying the violated [`UniqueColumn`] if
    /// the short code or the original URL is already present.
    ///
    /// Returns [`AppError::StoreUnavailable`] if the store cannot be reached.
    async fn insert(&self, new_mapping: NewUrlMapping) -> Result<UrlMapping, AppError>;

    /// Finds a mapping by its short code, regardless of expiry.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] or [`AppError::Internal`] on store errors.
    async fn find_by_short_code(&self, short_code: &str) -> Result<Option<UrlMapping>, AppError>;

    /// Finds a mapping by its exact original URL.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] or [`AppError::Internal`] on store errors.
    async fn find_by_original_url(
        &self,
        original_url: &str,
    ) -> Result<Option<UrlMapping>, AppError>;

    /// Counts all stored mappings, including expired ones.
    async fn count(&self) -> Result<i64, AppError>;

    /// Lists the most recently created mappings, newest first.
    async fn list_recent(&self, limit: i64) -> Result<Vec<UrlMapping>, AppError>;
}
