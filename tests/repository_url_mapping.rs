use chrono::{Duration, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use tinylink::domain::entities::NewUrlMapping;
use tinylink::domain::repositories::{UniqueColumn, UrlMappingRepository};
use tinylink::error::AppError;
use tinylink::infrastructure::persistence::PgUrlMappingRepository;

fn new_mapping(code: &str, url: &str) -> NewUrlMapping {
    NewUrlMapping {
        short_code: code.to_string(),
        original_url: url.to_string(),
        expire_at: None,
    }
}

#[sqlx::test]
async fn test_insert_mapping(pool: PgPool) {
    let repo = PgUrlMappingRepository::new(Arc::new(pool));

    let expire_at = Utc::now() + Duration::days(1);
    let mapping = repo
        .insert(NewUrlMapping {
            expire_at: Some(expire_at),
            ..new_mapping("aB3dE9", "https://example.com")
        })
        .await
        .unwrap();

    assert!(mapping.id > 0);
    assert_eq!(mapping.short_code, "aB3dE9");
    assert_eq!(mapping.original_url, "https://example.com");
    assert_eq!(
        mapping.expire_at.map(|ts| ts.timestamp_micros()),
        Some(expire_at.timestamp_micros())
    );
}

#[sqlx::test]
async fn test_find_by_short_code_and_url(pool: PgPool) {
    let repo = PgUrlMappingRepository::new(Arc::new(pool));
    let created = repo
        .insert(new_mapping("aB3dE9", "https://example.com"))
        .await
        .unwrap();

    let by_code = repo.find_by_short_code("aB3dE9").await.unwrap();
    assert_eq!(by_code.map(|m| m.id), Some(created.id));

    let by_url = repo
        .find_by_original_url("https://example.com")
        .await
        .unwrap();
    assert_eq!(by_url.map(|m| m.id), Some(created.id));

    assert!(repo.find_by_short_code("ZZZZZZ").await.unwrap().is_none());
}

#[sqlx::test]
async fn test_short_code_is_case_sensitive(pool: PgPool) {
    let repo = PgUrlMappingRepository::new(Arc::new(pool));
    repo.insert(new_mapping("abcdef", "https://lower.com"))
        .await
        .unwrap();
    repo.insert(new_mapping("ABCDEF", "https://upper.com"))
        .await
        .unwrap();

    let upper = repo.find_by_short_code("ABCDEF").await.unwrap().unwrap();
    assert_eq!(upper.original_url, "https://upper.com");
}

#[sqlx::test]
async fn test_duplicate_short_code_reports_column(pool: PgPool) {
    let repo = PgUrlMappingRepository::new(Arc::new(pool));
    repo.insert(new_mapping("aB3dE9", "https://a.com"))
        .await
        .unwrap();

    let err = repo
        .insert(new_mapping("aB3dE9", "https://b.com"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        AppError::Conflict {
            column: Some(UniqueColumn::ShortCode),
            ..
        }
    ));
}

#[sqlx::test]
async fn test_duplicate_original_url_reports_column(pool: PgPool) {
    let repo = PgUrlMappingRepository::new(Arc::new(pool));
    repo.insert(new_mapping("aB3dE9", "https://a.com"))
        .await
        .unwrap();

    let err = repo
        .insert(new_mapping("Qq1Ww2", "https://a.com"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        AppError::Conflict {
            column: Some(UniqueColumn::OriginalUrl),
            ..
        }
    ));
    assert_eq!(repo.count().await.unwrap(), 1);
}

#[sqlx::test]
async fn test_list_recent(pool: PgPool) {
    let repo = PgUrlMappingRepository::new(Arc::new(pool));
    for (code, url) in [
        ("aaaaa1", "https://1.com"),
        ("aaaaa2", "https://2.com"),
        ("aaaaa3", "https://3.com"),
    ] {
        repo.insert(new_mapping(code, url)).await.unwrap();
    }

    let recent = repo.list_recent(2).await.unwrap();

    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].short_code, "aaaaa3");
    assert_eq!(repo.count().await.unwrap(), 3);
}
