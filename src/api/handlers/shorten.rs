//! Handler for the JSON shortening endpoint.

use axum::{Json, extract::State, http::HeaderMap};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::request_origin::{build_short_url, public_origin};
use crate::utils::url_validator::validate_original_url;

/// Creates (or returns the existing) short URL for a long URL.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// {
///   "url": "https://example.com",
///   "expire_at": "2030-01-01T00:00:00Z"   // optional
/// }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "short_code": "aB3dE9",
///   "short_url": "https://sho.rt/aB3dE9",
///   "original_url": "https://example.com",
///   "created_at": "2025-01-01T12:00:00Z",
///   "expire_at": null
/// }
/// ```
///
/// Submitting an already-shortened URL returns the existing mapping.
///
/// # Errors
///
/// - 400 if the URL is empty, malformed, or not HTTP(S)
/// - 503 if no free short code was found or the store is unavailable
pub async fn shorten_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<ShortenRequest>,
) -> Result<Json<ShortenResponse>, AppError> {
    payload.validate()?;

    let original_url = validate_original_url(&payload.url)?;
    let origin = public_origin(state.public_base_url.as_deref(), &headers)?;

    let mapping = state
        .allocation_service
        .create_short_url(&original_url, payload.expire_at)
        .await?;

    let short_url = build_short_url(&origin, &mapping.short_code);

    Ok(Json(ShortenResponse::from_mapping(mapping, short_url)))
}
