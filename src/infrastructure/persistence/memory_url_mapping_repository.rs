//! In-process implementation of the URL mapping repository.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::entities::{NewUrlMapping, UrlMapping};
use crate::domain::repositories::{UniqueColumn, UrlMappingRepository};
use crate::error::AppError;

#[derive(Default)]
struct Tables {
    by_code: HashMap<String, UrlMapping>,
    code_by_url: HashMap<String, String>,
    next_id: i64,
}

/// Non-durable mapping store kept in process memory.
///
/// Intended for local development (`STORAGE_BACKEND=memory`) and tests. It
/// enforces the same two uniqueness constraints as the PostgreSQL table: the
/// check and the insert happen under one write lock, so concurrent inserts
/// observe the same conflicts a database would report.
#[derive(Default)]
pub struct MemoryUrlMappingRepository {
    tables: RwLock<Tables>,
}

impl MemoryUrlMappingRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UrlMappingRepository for MemoryUrlMappingRepository {
    async fn insert(&self, new_mapping: NewUrlMapping) -> Result<UrlMapping, AppError> {
        let mut tables = self.tables.write().await;

        if tables.by_code.contains_key(&new_mapping.short_code) {
            return Err(AppError::conflict(
                Some(UniqueColumn::ShortCode),
                "Unique constraint violation",
                json!({ "column": UniqueColumn::ShortCode.to_string() }),
            ));
        }

        if tables.code_by_url.contains_key(&new_mapping.original_url) {
            return Err(AppError::conflict(
                Some(UniqueColumn::OriginalUrl),
                "Unique constraint violation",
                json!({ "column": UniqueColumn::OriginalUrl.to_string() }),
            ));
        }

        tables.next_id += 1;
        let mapping = UrlMapping::new(
            tables.next_id,
            new_mapping.short_code,
            new_mapping.original_url,
            Utc::now(),
            new_mapping.expire_at,
        );

        tables
            .code_by_url
            .insert(mapping.original_url.clone(), mapping.short_code.clone());
        tables
            .by_code
            .insert(mapping.short_code.clone(), mapping.clone());

        Ok(mapping)
    }

    async fn find_by_short_code(&self, short_code: &str) -> Result<Option<UrlMapping>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.by_code.get(short_code).cloned())
    }

    async fn find_by_original_url(
        &self,
        original_url: &str,
    ) -> Result<Option<UrlMapping>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .code_by_url
            .get(original_url)
            .and_then(|code| tables.by_code.get(code))
            .cloned())
    }

    async fn count(&self) -> Result<i64, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.by_code.len() as i64)
    }

    async fn list_recent(&self, limit: i64) -> Result<Vec<UrlMapping>, AppError> {
        let tables = self.tables.read().await;
        let mut mappings: Vec<UrlMapping> = tables.by_code.values().cloned().collect();
        mappings.sort_by(|a, b| b.id.cmp(&a.id));
        mappings.truncate(usize::try_from(limit.max(0)).unwrap_or(0));
        Ok(mappings)
    }
}
