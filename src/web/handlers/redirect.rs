//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    response::Redirect,
};

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::code_generator::is_valid_short_code;

/// Where unknown, expired and malformed codes are sent.
pub const NOT_FOUND_REDIRECT: &str = "/?error=Short+URL+not+found";

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Responses
///
/// - 307 Temporary Redirect to the original URL if the code is live
/// - 303 See Other to [`NOT_FOUND_REDIRECT`] otherwise
///
/// # Errors
///
/// Store failures propagate as 503/500.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Redirect, AppError> {
    if !is_valid_short_code(&code) {
        return Ok(Redirect::to(NOT_FOUND_REDIRECT));
    }

    let redirect = match state.allocation_service.resolve_original_url(&code).await? {
        Some(original_url) => Redirect::temporary(&original_url),
        None => Redirect::to(NOT_FOUND_REDIRECT),
    };

    Ok(redirect)
}
