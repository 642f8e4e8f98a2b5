mod common;

use axum::{Router, http::StatusCode, routing::get};
use axum_test::TestServer;
use tinylink::api::handlers::health_handler;

#[tokio::test]
async fn test_health_check() {
    let repo = common::create_test_repository();
    common::insert_mapping(&repo, "aB3dE9", "https://example.com", None).await;

    let state = common::create_test_state(repo);
    let app = Router::new()
        .route("/health", get(health_handler))
        .with_state(state);

    let server = TestServer::new(app).unwrap();

    let response = server.get("/health").await;

    response.assert_status(StatusCode::OK);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["store"]["status"], "ok");
    assert_eq!(json["checks"]["cache"]["status"], "ok");
    assert!(
        json["checks"]["store"]["message"]
            .as_str()
            .unwrap()
            .contains("1 mappings")
    );
}
