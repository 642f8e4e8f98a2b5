//! Public origin resolution for building fully-qualified short URLs.

use crate::AppError;
use axum::http::{HeaderMap, header};
use serde_json::json;

/// Header set by reverse proxies to report the client-facing scheme.
const FORWARDED_PROTO: &str = "x-forwarded-proto";

/// Determines the public base URL (scheme + authority) for short links.
///
/// A configured base (`PUBLIC_BASE_URL`) always wins. Otherwise the base is
/// derived from the request:
/// - authority from the `Host` header, port included
/// - scheme from `X-Forwarded-Proto` when it is `http` or `https`, else `http`
///
/// # Errors
///
/// Returns [`AppError::Validation`] if no base is configured and the `Host`
/// header is missing or not valid UTF-8.
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert(header::HOST, "sho.rt:8080".parse().unwrap());
///
/// assert_eq!(public_origin(None, &headers).unwrap(), "http://sho.rt:8080");
/// ```
pub fn public_origin(configured: Option<&str>, headers: &HeaderMap) -> Result<String, AppError> {
    if let Some(base) = configured {
        return Ok(base.trim_end_matches('/').to_string());
    }

    let host = headers
        .get(header::HOST)
        .ok_or_else(|| AppError::bad_request("Missing Host header", json!({})))?
        .to_str()
        .map_err(|_| AppError::bad_request("Invalid Host header", json!({})))?;

    let scheme = headers
        .get(FORWARDED_PROTO)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.split(',').next().unwrap_or(v).trim().to_ascii_lowercase())
        .filter(|proto| proto == "http" || proto == "https")
        .unwrap_or_else(|| "http".to_string());

    Ok(format!("{}://{}", scheme, host))
}

/// Joins a public origin and a short code into the fully-qualified short URL.
pub fn build_short_url(origin: &str, short_code: &str) -> String {
    format!("{}/{}", origin.trim_end_matches('/'), short_code)
}
