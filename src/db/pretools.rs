use crate::db::models::PretoolRecord;
use crate::db::DbPool;
use crate::error::Result;
use serde_json::Value;
use std::collections::HashSet;
use tracing::warn;

/// List the unique GitHub repository URLs referenced by the source records.
///
/// Flattens the nested `data.repository` arrays across all records, keeps
/// entries whose `kind` is `"github"` and projects their URL. Records with
/// no repository entries contribute nothing; a record whose body fails to
/// decode is skipped. The returned list is deduplicated and unordered.
pub async fn list_github_repositories(pool: &DbPool) -> Result<Vec<String>> {
    let rows: Vec<String> = sqlx::query_scalar("SELECT data FROM pretools")
        .fetch_all(pool)
        .await?;

    let mut repositories = HashSet::new();

    for raw in rows {
        let record: PretoolRecord = match serde_json::from_str(&raw) {
            Ok(record) => record,
            Err(e) => {
                warn!("Skipping undecodable pretools record: {}", e);
                continue;
            }
        };

        for entry in record.data.repository {
            if entry.kind.as_deref() == Some("github") {
                if let Some(url) = entry.url {
                    repositories.insert(url);
                }
            }
        }
    }

    Ok(repositories.into_iter().collect())
}

/// Insert a source record. The body is stored as-is; the lister is the
/// only reader and tolerates arbitrary shapes.
pub async fn insert_record(pool: &DbPool, data: &Value) -> Result<i64> {
    let id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO pretools (data)
        VALUES (?)
        RETURNING id
        "#,
    )
    .bind(data.to_string())
    .fetch_one(pool)
    .await?;

    Ok(id)
}
