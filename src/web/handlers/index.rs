//! Form page handler.

use axum::{extract::Query, response::IntoResponse};
use serde::Deserialize;

use super::templates::IndexTemplate;

#[derive(Debug, Deserialize)]
pub struct IndexQuery {
    pub error: Option<String>,
}

/// Renders the URL submission form.
///
/// # Endpoint
///
/// `GET /`
///
/// An `error` query parameter (set by the redirect handler for unknown or
/// expired codes) is shown above the form.
pub async fn index_handler(Query(query): Query<IndexQuery>) -> impl IntoResponse {
    IndexTemplate {
        error: query.error.filter(|e| !e.is_empty()),
        url_value: String::new(),
    }
}
