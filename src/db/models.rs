use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::types::Json;
use sqlx::FromRow;

/// Enriched document persisted to the `alambique` table.
///
/// Keyed by the repository URL. The three `created_*` fields are written
/// once, on first insertion, and preserved across every later upsert; the
/// `last_updated_at`/`updated_*` fields are overwritten on every write.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MetadataDocument {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<String>,
    pub created_logs: Option<String>,
    pub last_updated_at: DateTime<Utc>,
    pub updated_by: Option<String>,
    pub updated_logs: Option<String>,
    pub data: Json<Value>,
    pub data_source: String,
}

/// Payload envelope wrapped around a fetched metadata body before
/// provenance is stamped on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentEnvelope {
    pub data: Value,
    pub data_source: String,
}

/// Source record from the `pretools` table. The body is an arbitrary JSON
/// document; only the nested repository entries are of interest here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PretoolRecord {
    #[serde(default)]
    pub data: PretoolData,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PretoolData {
    #[serde(default)]
    pub repository: Vec<RepositoryEntry>,
}

/// Nested repository descriptor inside a pretools record.
#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryEntry {
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}
