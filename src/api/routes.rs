//! API route configuration.

use crate::api::handlers::{resolve_handler, shorten_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// JSON API routes.
///
/// # Endpoints
///
/// - `POST /shorten`          - Create or fetch the short URL for a long URL
/// - `GET  /resolve/{code}`   - Resolve a live short code without redirecting
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/resolve/{code}", get(resolve_handler))
}
