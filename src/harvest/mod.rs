pub mod provenance;

use crate::config::Settings;
use crate::db::models::DocumentEnvelope;
use crate::db::{self, DbPool};
use crate::github::MetadataClient;
use crate::Result;
use chrono::Utc;
use provenance::Provenance;
use tracing::{error, info, warn};

/// Source tag stamped onto every document written by this harvester
pub const DATA_SOURCE: &str = "github";

/// One-pass harvester: lists the GitHub repositories referenced by the
/// source records, fetches metadata for each and upserts the enriched
/// documents. Repositories are processed one at a time, start to finish;
/// a failure on one item never stops the pass.
pub struct Harvester {
    client: MetadataClient,
    pool: DbPool,
    provenance: Provenance,
}

/// Outcome counts for a single pass
#[derive(Debug, Clone, Copy, Default)]
pub struct RunReport {
    pub repositories: usize,
    pub fetched: usize,
    pub upserted: usize,
    pub failed: usize,
}

impl Harvester {
    /// Create a new harvester
    pub fn new(settings: &Settings, pool: DbPool) -> Result<Self> {
        if settings.github.token.is_none() {
            warn!("No GITHUB_TOKEN configured; requests run at the anonymous rate limit");
        }

        let client = MetadataClient::new(settings.github.clone())?;
        let provenance = Provenance::from_config(&settings.provenance);

        Ok(Self {
            client,
            pool,
            provenance,
        })
    }

    /// Run one full pass over the source records
    pub async fn run(&self) -> Result<RunReport> {
        let repositories = db::pretools::list_github_repositories(&self.pool).await?;
        info!(
            "Discovered {} unique GitHub repositories",
            repositories.len()
        );

        let mut report = RunReport {
            repositories: repositories.len(),
            ..Default::default()
        };

        for repository_url in &repositories {
            info!("Retrieving metadata for {}", repository_url);

            let payload = match self.client.fetch_repository(repository_url).await {
                Ok(Some(payload)) => payload,
                Ok(None) => {
                    error!("No metadata returned for {}", repository_url);
                    report.failed += 1;
                    continue;
                }
                Err(e) => {
                    error!("Failed to fetch metadata for {}: {}", repository_url, e);
                    report.failed += 1;
                    continue;
                }
            };
            report.fetched += 1;

            let envelope = DocumentEnvelope {
                data: payload,
                data_source: DATA_SOURCE.to_string(),
            };
            let document = provenance::build_document(
                repository_url,
                envelope,
                &self.provenance,
                Utc::now(),
            );

            match db::alambique::upsert_document(&self.pool, &document).await {
                Ok(_) => report.upserted += 1,
                Err(e) => {
                    warn!("Failed to persist document for {}: {}", repository_url, e);
                    report.failed += 1;
                }
            }
        }

        Ok(report)
    }
}
