use harvester::config::{DatabaseConfig, GithubConfig, ProvenanceConfig, Settings};
use harvester::db::{alambique, pretools};
use harvester::harvest::Harvester;
use mockito::{Matcher, Server};
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

fn settings_for(server: &Server) -> Settings {
    Settings {
        database: DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 5,
            min_connections: 1,
            connection_timeout_seconds: 30,
            idle_timeout_seconds: 600,
        },
        github: GithubConfig {
            token: Some("test-token".to_string()),
            api_url: server.url(),
            metadata_api_url: format!("{}/metadata/user", server.url()),
        },
        provenance: ProvenanceConfig {
            server_url: Some("https://gitlab.example.org".to_string()),
            project_namespace: Some("research".to_string()),
            project_name: Some("harvester".to_string()),
            commit_sha: Some("abc123".to_string()),
            pipeline_url: Some(
                "https://gitlab.example.org/research/harvester/-/pipelines/42".to_string(),
            ),
        },
    }
}

#[tokio::test]
async fn test_harvest_end_to_end() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/rate_limit")
        .with_status(200)
        .with_body(
            json!({
                "resources": {
                    "core": {"limit": 5000, "used": 1, "remaining": 4999, "reset": 1_700_000_000}
                }
            })
            .to_string(),
        )
        .create_async()
        .await;
    let metadata = server
        .mock("POST", "/metadata/user")
        .match_body(Matcher::Json(json!({
            "owner": "acme",
            "repo": "tool",
            "userToken": "test-token",
            "prepare": false
        })))
        .with_status(200)
        .with_body(json!({"data": {"id": "tool", "description": "A useful tool"}}).to_string())
        .create_async()
        .await;

    let pool = test_pool().await;
    pretools::insert_record(
        &pool,
        &json!({
            "data": {
                "repository": [
                    {"kind": "github", "url": "https://github.com/acme/tool.git"}
                ]
            }
        }),
    )
    .await
    .expect("Failed to seed source record");

    let harvester =
        Harvester::new(&settings_for(&server), pool.clone()).expect("Failed to build harvester");
    let report = harvester.run().await.expect("Harvest failed");

    assert_eq!(report.repositories, 1);
    assert_eq!(report.fetched, 1);
    assert_eq!(report.upserted, 1);
    assert_eq!(report.failed, 0);
    metadata.assert_async().await;

    let stored = alambique::get_document(&pool, "https://github.com/acme/tool.git")
        .await
        .expect("Failed to fetch document")
        .expect("Document not found");

    assert_eq!(stored.id, "https://github.com/acme/tool.git");
    assert_eq!(stored.data_source, "github");
    assert_eq!(stored.data.0["id"], "tool");
    assert_eq!(stored.created_at, stored.last_updated_at);
    assert_eq!(
        stored.created_by.as_deref(),
        Some("https://gitlab.example.org/research/harvester/-/commit/abc123")
    );
}

#[tokio::test]
async fn test_harvest_continues_past_failed_items() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/rate_limit")
        .with_status(200)
        .with_body(
            json!({
                "resources": {
                    "core": {"limit": 5000, "used": 1, "remaining": 4999, "reset": 1_700_000_000}
                }
            })
            .to_string(),
        )
        .create_async()
        .await;
    // Every metadata request fails; the pass must still visit both items
    let metadata = server
        .mock("POST", "/metadata/user")
        .with_status(500)
        .expect(2)
        .create_async()
        .await;

    let pool = test_pool().await;
    pretools::insert_record(
        &pool,
        &json!({
            "data": {
                "repository": [
                    {"kind": "github", "url": "https://github.com/acme/tool"},
                    {"kind": "github", "url": "https://github.com/acme/helper"}
                ]
            }
        }),
    )
    .await
    .expect("Failed to seed source record");

    let harvester =
        Harvester::new(&settings_for(&server), pool.clone()).expect("Failed to build harvester");
    let report = harvester.run().await.expect("Harvest failed");

    assert_eq!(report.repositories, 2);
    assert_eq!(report.fetched, 0);
    assert_eq!(report.upserted, 0);
    assert_eq!(report.failed, 2);
    metadata.assert_async().await;

    let count = alambique::count_documents(&pool)
        .await
        .expect("Failed to count documents");
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_harvest_skips_absent_payloads() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/rate_limit")
        .with_status(200)
        .with_body(
            json!({
                "resources": {
                    "core": {"limit": 5000, "used": 1, "remaining": 4999, "reset": 1_700_000_000}
                }
            })
            .to_string(),
        )
        .create_async()
        .await;
    server
        .mock("POST", "/metadata/user")
        .with_status(200)
        .with_body(json!({"data": null}).to_string())
        .create_async()
        .await;

    let pool = test_pool().await;
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
    .expect("Failed to seed source record");

    let harvester =
        Harvester::new(&settings_for(&server), pool.clone()).expect("Failed to build harvester");
    let report = harvester.run().await.expect("Harvest failed");

    assert_eq!(report.fetched, 0);
    assert_eq!(report.failed, 1);

    let count = alambique::count_documents(&pool)
        .await
        .expect("Failed to count documents");
    assert_eq!(count, 0);
}
