mod common;

use axum_test::TestServer;
use serde_json::json;
use tinylink::domain::repositories::UrlMappingRepository;

#[tokio::test]
async fn test_index_renders_form() {
    let repo = common::create_test_repository();
    let app = common::create_test_app(common::create_test_state(repo));
    let server = TestServer::new(app).unwrap();

    let response = server.get("/").await;

    response.assert_status_ok();
    response.assert_text_contains(r#"action="/shorten""#);
    response.assert_text_contains(r#"name="url""#);
}

#[tokio::test]
async fn test_form_shorten_success() {
    let repo = common::create_test_repository();
    let app = common::create_test_app(common::create_test_state(repo.clone()));
    let server = TestServer::new(app).unwrap();

    let response = server
        .post("/shorten")
        .form(&json!({ "url": "https://example.com/page" }))
        .await;

    response.assert_status_ok();

    let mapping = repo
        .find_by_original_url("https://example.com/page")
        .await
        .unwrap()
        .unwrap();

    let short_url = format!("{}/{}", common::BASE_URL, mapping.short_code);
    response.assert_text_contains(short_url);
    response.assert_text_contains("https://example.com/page");
    response.assert_text_contains(mapping.created_at.format("%b %d, %Y %H:%M").to_string());
    assert!(!response.text().contains("Expires"));
}

#[tokio::test]
async fn test_form_same_url_twice_shows_same_code() {
    let repo = common::create_test_repository();
    let app = common::create_test_app(common::create_test_state(repo.clone()));
    let server = TestServer::new(app).unwrap();

    for _ in 0..2 {
        server
            .post("/shorten")
            .form(&json!({ "url": "https://example.com" }))
            .await
            .assert_status_ok();
    }

    assert_eq!(repo.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_form_invalid_url_creates_nothing() {
    let repo = common::create_test_repository();
    let app = common::create_test_app(common::create_test_state(repo.clone()));
    let server = TestServer::new(app).unwrap();

    let response = server
        .post("/shorten")
        .form(&json!({ "url": "not a url" }))
        .await;

    response.assert_status_bad_request();
    response.assert_text_contains("Invalid URL format");
    response.assert_text_contains(r#"value="not a url""#);
    assert_eq!(repo.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_form_empty_url() {
    let repo = common::create_test_repository();
    let app = common::create_test_app(common::create_test_state(repo.clone()));
    let server = TestServer::new(app).unwrap();

    let response = server.post("/shorten").form(&json!({ "url": "   " })).await;

    response.assert_status_bad_request();
    response.assert_text_contains("URL cannot be empty");
    assert_eq!(repo.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_form_missing_field_treated_as_empty() {
    let repo = common::create_test_repository();
    let app = common::create_test_app(common::create_test_state(repo));
    let server = TestServer::new(app).unwrap();

    let response = server.post("/shorten").form(&json!({})).await;

    response.assert_status_bad_request();
    response.assert_text_contains("URL cannot be empty");
}
