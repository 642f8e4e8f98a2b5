#![allow(dead_code)]

use axum::Router;
use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tinylink::application::services::AllocationService;
use tinylink::domain::entities::{NewUrlMapping, UrlMapping};
use tinylink::domain::repositories::UrlMappingRepository;
use tinylink::infrastructure::cache::NullCache;
use tinylink::infrastructure::persistence::MemoryUrlMappingRepository;
use tinylink::state::AppState;
use tinylink::utils::code_generator::{CodeGenerator, RandomCodeGenerator};
use tinylink::{api, web};

pub const BASE_URL: &str = "http://sho.rt";

/// Replays a fixed list of codes, then falls back to random ones.
pub struct ScriptedCodeGenerator {
    codes: Mutex<VecDeque<String>>,
}

impl ScriptedCodeGenerator {
    pub fn new(codes: &[&str]) -> Self {
        Self {
            codes: Mutex::new(codes.iter().map(|c| c.to_string()).collect()),
        }
    }
}

impl CodeGenerator for ScriptedCodeGenerator {
    fn generate(&self) -> String {
        self.codes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| RandomCodeGenerator.generate())
    }
}

/// Always returns the same code.
pub struct FixedCodeGenerator(pub &'static str);

impl CodeGenerator for FixedCodeGenerator {
    fn generate(&self) -> String {
        self.0.to_string()
    }
}

pub fn create_test_repository() -> Arc<MemoryUrlMappingRepository> {
    Arc::new(MemoryUrlMappingRepository::new())
}

pub fn create_test_state_with(
    repository: Arc<dyn UrlMappingRepository>,
    generator: Arc<dyn CodeGenerator>,
) -> AppState {
    let service = AllocationService::new(repository, generator);

    AppState::new(
        Arc::new(service),
        Arc::new(NullCache::new()),
        Some(BASE_URL.to_string()),
    )
}

pub fn create_test_state(repository: Arc<MemoryUrlMappingRepository>) -> AppState {
    create_test_state_with(repository, Arc::new(RandomCodeGenerator))
}

/// Web and API routes without path normalization or static files.
pub fn create_test_app(state: AppState) -> Router {
    Router::new()
        .merge(web::routes::routes())
        .nest("/api", api::routes::routes())
        .with_state(state)
}

pub async fn insert_mapping(
    repository: &MemoryUrlMappingRepository,
    code: &str,
    url: &str,
    expire_at: Option<DateTime<Utc>>,
) -> UrlMapping {
    repository
        .insert(NewUrlMapping {
            short_code: code.to_string(),
            original_url: url.to_string(),
            expire_at,
        })
        .await
        .unwrap()
}

pub async fn insert_expired_mapping(
    repository: &MemoryUrlMappingRepository,
    code: &str,
    url: &str,
) -> UrlMapping {
    insert_mapping(
        repository,
        code,
        url,
        Some(Utc::now() - chrono::Duration::hours(1)),
    )
    .await
}
