//! Short code allocation and resolution service.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use metrics::counter;
use serde_json::json;
use tracing::{debug, error, info, warn};

use crate::domain::entities::{NewUrlMapping, UrlMapping};
use crate::domain::repositories::{UniqueColumn, UrlMappingRepository};
use crate::error::AppError;
use crate::infrastructure::cache::{CacheService, NullCache};
use crate::utils::code_generator::CodeGenerator;

/// Number of candidate codes tried before allocation gives up.
///
/// Both pre-check collisions and insert-time short code conflicts consume an
/// attempt from this budget.
pub const MAX_ALLOCATION_ATTEMPTS: usize = 10;

/// Default TTL for cached resolutions when no cache TTL is configured.
const DEFAULT_CACHE_TTL_SECONDS: u64 = 3600;

/// Service for allocating short codes and resolving them back to URLs.
///
/// # Uniqueness
///
/// The store's uniqueness constraints are the only safety mechanism. The
/// lookups performed before inserting are fast paths that avoid wasted
/// inserts; a conflict reported by the insert itself is handled as follows:
///
/// - `short_code` conflict: treated as a collision and retried
/// - `original_url` conflict: a concurrent caller created the mapping first,
///   so the winning row is fetched and returned
///
/// No in-process locking is involved, so the service is safe to share across
/// tasks behind an `Arc`.
pub struct AllocationService {
    repository: Arc<dyn UrlMappingRepository>,
    generator: Arc<dyn CodeGenerator>,
    cache: Arc<dyn CacheService>,
    cache_ttl_seconds: u64,
}

impl AllocationService {
    /// Creates a new allocation service with caching disabled.
    pub fn new(
        repository: Arc<dyn UrlMappingRepository>,
        generator: Arc<dyn CodeGenerator>,
    ) -> Self {
        Self {
            repository,
            generator,
            cache: Arc::new(NullCache),
            cache_ttl_seconds: DEFAULT_CACHE_TTL_SECONDS,
        }
    }

    /// Enables the redirect cache for [`Self::resolve_original_url`].
    ///
    /// Entries live for at most `ttl_seconds`, and never past the mapping's
    /// `expire_at`.
    pub fn with_cache(mut self, cache: Arc<dyn CacheService>, ttl_seconds: u64) -> Self {
        self.cache = cache;
        self.cache_ttl_seconds = ttl_seconds;
        self
    }

    /// Creates the mapping for `original_url`, or returns the existing one.
    ///
    /// `original_url` must already be validated by the caller (see
    /// [`crate::utils::url_validator::validate_original_url`]).
    ///
    /// # Idempotence
    ///
    /// If the URL is already mapped, the stored mapping is returned unchanged,
    /// including its original `expire_at`, and `expire_at` is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::AllocationExhausted`] if every one of the
    /// [`MAX_ALLOCATION_ATTEMPTS`] candidates collided.
    ///
    /// Store errors other than uniqueness violations propagate unchanged.
    pub async fn create_short_url(
        &self,
        original_url: &str,
        expire_at: Option<DateTime<Utc>>,
    ) -> Result<UrlMapping, AppError> {
        if let Some(existing) = self.repository.find_by_original_url(original_url).await? {
            debug!(short_code = %existing.short_code, "URL already mapped");
            return Ok(existing);
        }

        for attempt in 1..=MAX_ALLOCATION_ATTEMPTS {
            let candidate = self.generator.generate();

            if self
                .repository
                .find_by_short_code(&candidate)
                .await?
                .is_some()
            {
                counter!("short_code_collisions_total", "stage" => "precheck").increment(1);
                debug!(attempt, short_code = %candidate, "Short code collision");
                continue;
            }

            let new_mapping = NewUrlMapping {
                short_code: candidate,
                original_url: original_url.to_string(),
                expire_at,
            };

            match self.repository.insert(new_mapping).await {
                Ok(mapping) => {
                    counter!("url_mappings_created_total").increment(1);
                    info!(
                        short_code = %mapping.short_code,
                        attempt,
                        "Created short URL"
                    );
                    return Ok(mapping);
                }
                Err(AppError::Conflict {
                    column: Some(UniqueColumn::ShortCode),
                    ..
                }) => {
                    counter!("short_code_collisions_total", "stage" => "insert").increment(1);
                    warn!(attempt, "Short code taken by a concurrent insert");
                }
                Err(AppError::Conflict {
                    column: Some(UniqueColumn::OriginalUrl),
                    ..
                }) => {
                    debug!("URL mapped by a concurrent insert, returning existing mapping");
                    return self
                        .repository
                        .find_by_original_url(original_url)
                        .await?
                        .ok_or_else(|| {
                            AppError::internal(
                                "Mapping vanished after uniqueness violation",
                                json!({ "original_url": original_url }),
                            )
                        });
                }
                Err(e) => return Err(e),
            }
        }

        counter!("allocation_exhausted_total").increment(1);
        error!(
            attempts = MAX_ALLOCATION_ATTEMPTS,
            "Short code allocation exhausted; code space may be under pressure"
        );

        Err(AppError::allocation_exhausted(
            "Could not allocate a unique short code",
            json!({ "attempts": MAX_ALLOCATION_ATTEMPTS }),
        ))
    }

    /// Resolves a short code to its original URL if the mapping is live.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(url))` if the code exists and has not expired
    /// - `Ok(None)` if the code does not exist or `expire_at <= now`
    ///
    /// Expired and unknown codes are indistinguishable to callers.
    ///
    /// # Errors
    ///
    /// Propagates store errors. Cache errors fall back to the store.
    pub async fn resolve_original_url(
        &self,
        short_code: &str,
    ) -> Result<Option<String>, AppError> {
        match self.cache.get_url(short_code).await {
            Ok(Some(url)) => return Ok(Some(url)),
            Ok(None) => {}
            Err(e) => warn!("Cache error, falling back to store: {}", e),
        }

        let Some(mapping) = self.repository.find_by_short_code(short_code).await? else {
            debug!(short_code, "Short code not found");
            return Ok(None);
        };

        let now = Utc::now();
        if mapping.is_expired_at(now) {
            debug!(short_code, "Short code expired");
            return Ok(None);
        }

        if let Some(ttl) = self.cache_ttl(&mapping, now)
            && let Err(e) = self
                .cache
                .set_url(&mapping.short_code, &mapping.original_url, Some(ttl))
                .await
        {
            warn!("Failed to cache resolution: {}", e);
        }

        Ok(Some(mapping.original_url))
    }

    /// Looks up a mapping by short code, including expired ones.
    pub async fn find_mapping(&self, short_code: &str) -> Result<Option<UrlMapping>, AppError> {
        self.repository.find_by_short_code(short_code).await
    }

    /// Returns the most recently created mappings, newest first.
    pub async fn recent_mappings(&self, limit: i64) -> Result<Vec<UrlMapping>, AppError> {
        self.repository.list_recent(limit).await
    }

    /// Counts all stored mappings.
    pub async fn count_mappings(&self) -> Result<i64, AppError> {
        self.repository.count().await
    }

    /// TTL for caching `mapping`, or `None` if it expires too soon to cache.
    fn cache_ttl(&self, mapping: &UrlMapping, now: DateTime<Utc>) -> Option<u64> {
        match mapping.expire_at {
            None => Some(self.cache_ttl_seconds),
            Some(expire_at) => {
                let remaining = u64::try_from((expire_at - now).num_seconds()).ok()?;
                (remaining > 0).then(|| remaining.min(self.cache_ttl_seconds))
            }
        }
    }
}
