use crate::config::ProvenanceConfig;
use crate::db::models::{DocumentEnvelope, MetadataDocument};
use chrono::{DateTime, Utc};
use sqlx::types::Json;

/// Provenance stamps derived once from the CI environment
#[derive(Debug, Clone)]
pub struct Provenance {
    /// Link to the commit the running pipeline was started from
    pub commit_url: Option<String>,

    /// Link to the pipeline logs
    pub pipeline_url: Option<String>,
}

impl Provenance {
    pub fn from_config(config: &ProvenanceConfig) -> Self {
        let commit_url = match (
            &config.server_url,
            &config.project_namespace,
            &config.project_name,
            &config.commit_sha,
        ) {
            (Some(server), Some(namespace), Some(project), Some(sha)) => {
                Some(format!("{server}/{namespace}/{project}/-/commit/{sha}"))
            }
            _ => None,
        };

        Self {
            commit_url,
            pipeline_url: config.pipeline_url.clone(),
        }
    }
}

/// Assemble the document to upsert for an identifier.
///
/// Creation and update fields both carry the current stamps; when the
/// document already exists, the upsert keeps the stored creation fields and
/// only the update fields take effect.
pub fn build_document(
    identifier: &str,
    envelope: DocumentEnvelope,
    provenance: &Provenance,
    now: DateTime<Utc>,
) -> MetadataDocument {
    MetadataDocument {
        id: identifier.to_string(),
        created_at: now,
        created_by: provenance.commit_url.clone(),
        created_logs: provenance.pipeline_url.clone(),
        last_updated_at: now,
        updated_by: provenance.commit_url.clone(),
        updated_logs: provenance.pipeline_url.clone(),
        data: Json(envelope.data),
        data_source: envelope.data_source,
    }
}
