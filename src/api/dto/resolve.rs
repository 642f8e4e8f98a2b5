//! DTOs for the resolve endpoint.

use serde::Serialize;

/// A live short code and the URL it resolves to.
#[derive(Debug, Serialize)]
pub struct ResolveResponse {
    pub short_code: String,
    pub original_url: String,
}
