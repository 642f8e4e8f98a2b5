//! URL mapping entity representing a short code assigned to an original URL.

use chrono::{DateTime, Utc};

/// A persisted association between a short code and an original URL.
///
/// Mappings are created once and never updated. Expiry is evaluated lazily at
/// resolution time, so an expired mapping stays in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlMapping {
    pub id: i64,
    pub short_code: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
    pub expire_at: Option<DateTime<Utc>>,
}

impl UrlMapping {
    /// Creates a new UrlMapping instance.
    pub fn new(
        id: i64,
        short_code: String,
        original_url: String,
        created_at: DateTime<Utc>,
        expire_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            short_code,
            original_url,
            created_at,
            expire_at,
        }
    }

    /// Returns true if the mapping has expired as of `now`.
    ///
    /// A mapping whose `expire_at` equals `now` is already expired.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expire_at.is_some_and(|expire_at| expire_at <= now)
    }

    /// Returns true if the mapping can be resolved at `now`.
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        !self.is_expired_at(now)
    }

    /// Returns true if the mapping has passed its expiry time.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

/// Input data for inserting a new mapping.
///
/// `created_at` and `id` are assigned by the store on insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUrlMapping {
    pub short_code: String,
    pub original_url: String,
    pub expire_at: Option<DateTime<Utc>>,
}
