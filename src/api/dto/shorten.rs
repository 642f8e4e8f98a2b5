//! DTOs for the shortening endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::UrlMapping;

/// Request to shorten a single URL.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// The original URL to shorten (absolute HTTP/HTTPS).
    #[validate(length(min = 1, max = 2048, message = "URL must be between 1 and 2048 characters"))]
    pub url: String,

    /// Optional expiry timestamp. From this instant on, the code resolves as not found.
    ///
    /// Ignored when the URL is already mapped.
    pub expire_at: Option<DateTime<Utc>>,
}

/// The created (or existing) mapping with its fully-qualified short URL.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub short_code: String,
    pub short_url: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
    pub expire_at: Option<DateTime<Utc>>,
}

impl ShortenResponse {
    pub fn from_mapping(mapping: UrlMapping, short_url: String) -> Self {
        Self {
            short_code: mapping.short_code,
            short_url,
            original_url: mapping.original_url,
            created_at: mapping.created_at,
            expire_at: mapping.expire_at,
        }
    }
}
