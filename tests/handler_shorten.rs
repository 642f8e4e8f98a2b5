mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use chrono::{DateTime, Duration, Utc};
use serde_json::json;
use tinylink::domain::repositories::UrlMappingRepository;

#[tokio::test]
async fn test_shorten_url_success() {
    let repo = common::create_test_repository();
    let app = common::create_test_app(common::create_test_state(repo.clone()));

    let server = TestServer::new(app).unwrap();

    let response = server
        .post("/api/shorten")
        .json(&json!({ "url": "https://example.com" }))
        .await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    let code = json["short_code"].as_str().unwrap();

    assert_eq!(code.len(), 6);
    assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_eq!(json["short_url"], format!("{}/{}", common::BASE_URL, code));
    assert_eq!(json["original_url"], "https://example.com");
    assert!(json["created_at"].is_string());
    assert!(json["expire_at"].is_null());
    assert_eq!(repo.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_shorten_same_url_twice_returns_same_code() {
    let repo = common::create_test_repository();
    let app = common::create_test_app(common::create_test_state(repo.clone()));

    let server = TestServer::new(app).unwrap();

    let first = server
        .post("/api/shorten")
        .json(&json!({ "url": "https://example.com" }))
        .await
        .json::<serde_json::Value>();

    let second = server
        .post("/api/shorten")
        .json(&json!({ "url": "https://example.com" }))
        .await
        .json::<serde_json::Value>();

    assert_eq!(first["short_code"], second["short_code"]);
    assert_eq!(repo.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_shorten_distinct_urls_get_distinct_codes() {
    let repo = common::create_test_repository();
    let app = common::create_test_app(common::create_test_state(repo.clone()));

    let server = TestServer::new(app).unwrap();

    let a = server
        .post("/api/shorten")
        .json(&json!({ "url": "https://a.com" }))
        .await
        .json::<serde_json::Value>();

    let b = server
        .post("/api/shorten")
        .json(&json!({ "url": "https://b.com" }))
        .await
        .json::<serde_json::Value>();

    assert_ne!(a["short_code"], b["short_code"]);
    assert_eq!(repo.count().await.unwrap(), 2);
}

#[tokio::test]
async fn test_shorten_invalid_url() {
    let repo = common::create_test_repository();
    let app = common::create_test_app(common::create_test_state(repo.clone()));

    let server = TestServer::new(app).unwrap();

    let response = server
        .post("/api/shorten")
        .json(&json!({ "url": "not a url" }))
        .await;

    response.assert_status_bad_request();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "validation_error");
    assert_eq!(repo.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_shorten_rejects_embedded_newline() {
    let repo = common::create_test_repository();
    let app = common::create_test_app(common::create_test_state(repo.clone()));

    let server = TestServer::new(app).unwrap();

    let response = server
        .post("/api/shorten")
        .json(&json!({ "url": "https://example.com/a\nb" }))
        .await;

    response.assert_status_bad_request();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "validation_error");
    assert_eq!(repo.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_shorten_rejects_non_http_scheme() {
    let repo = common::create_test_repository();
    let app = common::create_test_app(common::create_test_state(repo.clone()));

    let server = TestServer::new(app).unwrap();

    let response = server
        .post("/api/shorten")
        .json(&json!({ "url": "ftp://example.com/file" }))
        .await;

    response.assert_status_bad_request();
    assert_eq!(repo.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_shorten_empty_url() {
    let repo = common::create_test_repository();
    let app = common::create_test_app(common::create_test_state(repo));

    let server = TestServer::new(app).unwrap();

    let response = server
        .post("/api/shorten")
        .json(&json!({ "url": "" }))
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_shorten_with_expiry() {
    let repo = common::create_test_repository();
    let app = common::create_test_app(common::create_test_state(repo.clone()));

    let server = TestServer::new(app).unwrap();

    let expire_at = (Utc::now() + Duration::days(7)).to_rfc3339();

    let response = server
        .post("/api/shorten")
        .json(&json!({ "url": "https://example.com/temp", "expire_at": expire_at }))
        .await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    let returned: DateTime<Utc> = json["expire_at"].as_str().unwrap().parse().unwrap();
    let requested: DateTime<Utc> = expire_at.parse().unwrap();
    assert_eq!(returned, requested);

    let stored = repo
        .find_by_original_url("https://example.com/temp")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.expire_at, Some(requested));
}

#[tokio::test]
async fn test_shorten_existing_url_keeps_original_expiry() {
    let repo = common::create_test_repository();
    let app = common::create_test_app(common::create_test_state(repo.clone()));

    let server = TestServer::new(app).unwrap();

    let first = server
        .post("/api/shorten")
        .json(&json!({ "url": "https://example.com" }))
        .await
        .json::<serde_json::Value>();

    let second = server
        .post("/api/shorten")
        .json(&json!({
            "url": "https://example.com",
            "expire_at": (Utc::now() + Duration::days(1)).to_rfc3339()
        }))
        .await
        .json::<serde_json::Value>();

    assert_eq!(first["short_code"], second["short_code"]);
    assert!(second["expire_at"].is_null());
}

#[tokio::test]
async fn test_shorten_exhausted_allocation() {
    let repo = common::create_test_repository();
    common::insert_mapping(&repo, "AAAAAA", "https://taken.com", None).await;

    let state = common::create_test_state_with(
        repo.clone(),
        std::sync::Arc::new(common::FixedCodeGenerator("AAAAAA")),
    );
    let app = common::create_test_app(state);

    let server = TestServer::new(app).unwrap();

    let response = server
        .post("/api/shorten")
        .json(&json!({ "url": "https://new.com" }))
        .await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "allocation_exhausted");
    assert_eq!(repo.count().await.unwrap(), 1);
}
