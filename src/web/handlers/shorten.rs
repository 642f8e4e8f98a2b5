//! Form submission handler.

use axum::{
    extract::{Form, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::warn;

use super::templates::{IndexTemplate, ResultTemplate};
use crate::state::AppState;
use crate::utils::request_origin::{build_short_url, public_origin};
use crate::utils::url_validator::validate_original_url;

#[derive(Debug, Deserialize)]
pub struct ShortenForm {
    #[serde(default)]
    pub url: String,
}

/// Shortens the submitted URL and renders the result page.
///
/// # Endpoint
///
/// `POST /shorten` (`application/x-www-form-urlencoded`, field `url`)
///
/// # Responses
///
/// - 200 with the result page on success
/// - 400 with the form, an error message and the echoed input if the URL is invalid
/// - 503/500 with the form and the error message if allocation fails
pub async fn shorten_form_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<ShortenForm>,
) -> Response {
    let submitted = form.url.trim();

    let original_url = match validate_original_url(submitted) {
        Ok(url) => url,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                IndexTemplate::with_error(e.to_string(), submitted),
            )
                .into_response();
        }
    };

    let origin = match public_origin(state.public_base_url.as_deref(), &headers) {
        Ok(origin) => origin,
        Err(e) => {
            return (
                e.status_code(),
                IndexTemplate::with_error(e.to_string(), submitted),
            )
                .into_response();
        }
    };

    match state
        .allocation_service
        .create_short_url(&original_url, None)
        .await
    {
        Ok(mapping) => {
            let short_url = build_short_url(&origin, &mapping.short_code);
            ResultTemplate::from_mapping(mapping, short_url).into_response()
        }
        Err(e) => {
            warn!("Form shortening failed: {}", e);
            (
                e.status_code(),
                IndexTemplate::with_error(format!("Error: {}", e), submitted),
            )
                .into_response()
        }
    }
}
