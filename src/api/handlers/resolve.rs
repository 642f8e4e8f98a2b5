//! Handler for the JSON resolve endpoint.

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::json;

use crate::api::dto::resolve::ResolveResponse;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::code_generator::is_valid_short_code;

/// Resolves a short code to its original URL without redirecting.
///
/// # Endpoint
///
/// `GET /api/resolve/{code}`
///
/// # Errors
///
/// Returns 404 Not Found if the code is malformed, unknown, or expired. The
/// three cases are indistinguishable.
pub async fn resolve_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<ResolveResponse>, AppError> {
    let not_found = || AppError::not_found("Short URL not found", json!({ "code": code }));

    if !is_valid_short_code(&code) {
        return Err(not_found());
    }

    let original_url = state
        .allocation_service
        .resolve_original_url(&code)
        .await?
        .ok_or_else(not_found)?;

    Ok(Json(ResolveResponse {
        short_code: code,
        original_url,
    }))
}
