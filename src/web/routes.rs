//! Browser-facing route configuration.

use crate::state::AppState;
use crate::web::handlers::{index_handler, redirect_handler, shorten_form_handler};
use axum::{
    Router,
    routing::{get, post},
};

/// Public HTML routes.
///
/// # Endpoints
///
/// - `GET  /`        - Submission form
/// - `POST /shorten` - Form submission, renders the result page
/// - `GET  /{code}`  - Redirect to the original URL
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index_handler))
        .route("/shorten", post(shorten_form_handler))
        .route("/{code}", get(redirect_handler))
}
