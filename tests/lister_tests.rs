use harvester::db::pretools;
use serde_json::json;
use sqlx::SqlitePool;

async fn test_pool() -> SqlitePool {
    let pool = SqlitePool::connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

#[tokio::test]
async fn test_lister_returns_empty_for_empty_table() {
    let pool = test_pool().await;

    let repositories = pretools::list_github_repositories(&pool)
        .await
        .expect("Failed to list repositories");

    assert!(repositories.is_empty());
}

#[tokio::test]
async fn test_lister_filters_and_deduplicates() {
    let pool = test_pool().await;

    // Two records referencing the same GitHub repository
    for _ in 0..2 {
        pretools::insert_record(
            &pool,
            &json!({
                "data": {
                    "repository": [
                        {"kind": "github", "url": "https://github.com/acme/tool.git"},
                        {"kind": "bitbucket", "url": "https://bitbucket.org/acme/other"}
                    ]
                }
            }),
        )
        .await
        .expect("Failed to insert record");
    }

    // A second GitHub repository
    pretools::insert_record(
        &pool,
        &json!({
            "data": {
                "repository": [
                    {"kind": "github", "url": "https://github.com/acme/helper"}
                ]
            }
        }),
    )
    .await
    .expect("Failed to insert record");

    // A record with no repository entries contributes nothing
    pretools::insert_record(&pool, &json!({"data": {"name": "toolshed"}}))
        .await
        .expect("Failed to insert record");

    let mut repositories = pretools::list_github_repositories(&pool)
        .await
        .expect("Failed to list repositories");
    repositories.sort();

    assert_eq!(
        repositories,
        vec![
            "https://github.com/acme/helper".to_string(),
            "https://github.com/acme/tool.git".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_lister_skips_undecodable_records() {
    let pool = test_pool().await;

    sqlx::query("INSERT INTO pretools (data) VALUES (?)")
        .bind("this is not json")
        .execute(&pool)
        .await
        .expect("Failed to insert raw record");

    pretools::insert_record(
        &pool,
        &json!({
            "data": {
                "repository": [
                    {"kind": "github", "url": "https://github.com/acme/tool"}
                ]
            }
        }),
    )
    .await
    .expect("Failed to insert record");

    let repositories = pretools::list_github_repositories(&pool)
        .await
        .expect("Failed to list repositories");

    assert_eq!(repositories, vec!["https://github.com/acme/tool".to_string()]);
}

#[tokio::test]
async fn test_lister_ignores_entries_without_kind_or_url() {
    let pool = test_pool().await;

    pretools::insert_record(
        &pool,
        &json!({
            "data": {
                "repository": [
                    {"url": "https://github.com/acme/no-kind"},
                    {"kind": "github"}
                ]
            }
        }),
    )
    .await
    .expect("Failed to insert record");

    let repositories = pretools::list_github_repositories(&pool)
        .await
        .expect("Failed to list repositories");

    assert!(repositories.is_empty());
}
