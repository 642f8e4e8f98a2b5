//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::AllocationService;
use crate::infrastructure::cache::CacheService;

/// State shared across request handlers.
///
/// Cloning is cheap: every field is reference-counted. The allocation service
/// holds no mutable in-process state, so all tasks share one instance.
#[derive(Clone)]
pub struct AppState {
    pub allocation_service: Arc<AllocationService>,
    pub cache: Arc<dyn CacheService>,
    /// Base for fully-qualified short URLs; derived per request when `None`.
    pub public_base_url: Option<String>,
}

impl AppState {
    pub fn new(
        allocation_service: Arc<AllocationService>,
        cache: Arc<dyn CacheService>,
        public_base_url: Option<String>,
    ) -> Self {
        Self {
            allocation_service,
            cache,
            public_base_url,
        }
    }
}
