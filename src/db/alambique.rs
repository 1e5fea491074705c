use crate::db::models::MetadataDocument;
use crate::db::DbPool;
use crate::error::Result;

/// Get a document by identifier
pub async fn get_document(pool: &DbPool, id: &str) -> Result<Option<MetadataDocument>> {
    let document =
        sqlx::query_as::<_, MetadataDocument>("SELECT * FROM alambique WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await?;

    Ok(document)
}

/// Insert or replace a document, keyed by identifier.
///
/// A single statement: on conflict every field is replaced except the three
/// `created_*` columns, which keep the values written on first insertion.
/// No prior lookup is needed, so there is no read-then-write window.
pub async fn upsert_document(
    pool: &DbPool,
    document: &MetadataDocument,
) -> Result<MetadataDocument> {
    let stored = sqlx::query_as::<_, MetadataDocument>(
        r#"
        INSERT INTO alambique (
            id, created_at, created_by, created_logs,
            last_updated_at, updated_by, updated_logs,
            data, data_source
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT(id) DO UPDATE SET
            last_updated_at = excluded.last_updated_at,
            updated_by = excluded.updated_by,
            updated_logs = excluded.updated_logs,
            data = excluded.data,
            data_source = excluded.data_source
        RETURNING *
        "#,
    )
    .bind(&document.id)
    .bind(document.created_at)
    .bind(&document.created_by)
    .bind(&document.created_logs)
    .bind(document.last_updated_at)
    .bind(&document.updated_by)
    .bind(&document.updated_logs)
    .bind(&document.data)
    .bind(&document.data_source)
    .fetch_one(pool)
    .await?;

    Ok(stored)
}

/// Count documents in the destination table
pub async fn count_documents(pool: &DbPool) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM alambique")
        .fetch_one(pool)
        .await?;

    Ok(count)
}
