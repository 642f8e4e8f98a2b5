//! Askama templates rendered by the web handlers.

use askama::Template;
use askama_web::WebTemplate;
use chrono::{DateTime, Utc};

use crate::domain::entities::UrlMapping;

/// Display format for timestamps on the result page, e.g. `Jan 05, 2025 14:30`.
const DATE_FORMAT: &str = "%b %d, %Y %H:%M";

/// The submission form, optionally with an error and the echoed input.
///
/// Renders `templates/index.html`.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub error: Option<String>,
    pub url_value: String,
}

impl IndexTemplate {
    pub fn with_error(error: impl Into<String>, url_value: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            url_value: url_value.into(),
        }
    }
}

/// The created short link.
///
/// Renders `templates/result.html`. `expire_at` is only shown when set.
#[derive(Template, WebTemplate)]
#[template(path = "result.html")]
pub struct ResultTemplate {
    pub short_code: String,
    pub short_url: String,
    pub original_url: String,
    pub created_at: String,
    pub expire_at: Option<String>,
}

impl ResultTemplate {
    pub fn from_mapping(mapping: UrlMapping, short_url: String) -> Self {
        Self {
            short_code: mapping.short_code,
            short_url,
            original_url: mapping.original_url,
            created_at: format_timestamp(mapping.created_at),
            expire_at: mapping.expire_at.map(format_timestamp),
        }
    }
}

fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.format(DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_timestamp() {
        let ts = Utc.with_ymd_and_hms(2025, 1, 5, 14, 30, 59).unwrap();
        assert_eq!(format_timestamp(ts), "Jan 05, 2025 14:30");
    }

    #[test]
    fn test_result_template_hides_missing_expiry() {
        let created_at = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap();
        let mapping = UrlMapping::new(
            1,
            "aB3dE9".to_string(),
            "https://example.com".to_string(),
            created_at,
            None,
        );

        let page = ResultTemplate::from_mapping(mapping, "http://sho.rt/aB3dE9".to_string());
        let html = page.render().unwrap();

        assert!(html.contains("http://sho.rt/aB3dE9"));
        assert!(html.contains("Mar 01, 2025 09:00"));
        assert!(!html.contains("Expires"));
    }

    #[test]
    fn test_index_template_escapes_echoed_input() {
        let page = IndexTemplate::with_error("Invalid URL format", "<script>x</script>");
        let html = page.render().unwrap();

        assert!(html.contains("Invalid URL format"));
        assert!(!html.contains("<script>x</script>"));
    }
}
