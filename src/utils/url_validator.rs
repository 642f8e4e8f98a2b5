//! Validation of URLs submitted for shortening.
//!
//! The submitted string is stored as-is after trimming. No normalization is
//! applied, so deduplication is by exact string.

use crate::error::AppError;
use serde_json::json;
use url::Url;

/// Longest URL the mapping store accepts.
pub const MAX_URL_LENGTH: usize = 2048;

/// Reasons a submitted URL is rejected.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UrlValidationError {
    #[error("URL cannot be empty")]
    Empty,

    #[error("URL must be at most {MAX_URL_LENGTH} characters")]
    TooLong,

    #[error("Invalid URL format. Please enter a valid URL (e.g., https://example.com)")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS URLs can be shortened")]
    UnsupportedProtocol,
}

impl From<UrlValidationError> for AppError {
    fn from(e: UrlValidationError) -> Self {
        let details = match &e {
            UrlValidationError::InvalidFormat(reason) => json!({ "reason": reason }),
            _ => json!({}),
        };
        AppError::bad_request(e.to_string(), details)
    }
}

/// Validates a submitted URL and returns its trimmed form.
///
/// # Rules
///
/// 1. Surrounding whitespace is trimmed
/// 2. The result must not be empty
/// 3. Length is capped at [`MAX_URL_LENGTH`] characters
/// 4. It must not contain ASCII control characters (tab, CR, LF, ...)
/// 5. It must parse as an absolute URL
/// 6. The scheme must be `http` or `https` with a host
///
/// # Security
///
/// Rejects schemes such as `javascript:`, `data:` and `file:`, which would
/// otherwise turn the redirect endpoint into an injection vector.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(validate_original_url("  https://example.com ").unwrap(), "https://example.com");
/// assert!(validate_original_url("not a url").is_err());
/// ```
pub fn validate_original_url(input: &str) -> Result<String, UrlValidationError> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(UrlValidationError::Empty);
    }

    if trimmed.chars().count() > MAX_URL_LENGTH {
        return Err(UrlValidationError::TooLong);
    }

    // `Url::parse` strips these silently, but the stored string keeps them.
    if trimmed.chars().any(|c| c.is_ascii_control()) {
        return Err(UrlValidationError::InvalidFormat(
            "contains control characters".to_string(),
        ));
    }

    let parsed =
        Url::parse(trimmed).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlValidationError::UnsupportedProtocol),
    }

    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(UrlValidationError::InvalidFormat("missing host".to_string()));
    }

    Ok(trimmed.to_string())
}
