use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub database: DatabaseConfig,
    pub github: GithubConfig,
    pub provenance: ProvenanceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connection_timeout_seconds: u64,
    pub idle_timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubConfig {
    /// Optional personal access token; also forwarded to the metadata API
    pub token: Option<String>,

    /// Base URL for the GitHub API (rate limit endpoint)
    pub api_url: String,

    /// Full URL of the metadata endpoint
    pub metadata_api_url: String,
}

/// CI values stamped onto every written document.
///
/// All fields are optional: outside a pipeline the documents simply carry
/// null provenance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvenanceConfig {
    pub server_url: Option<String>,
    pub project_namespace: Option<String>,
    pub project_name: Option<String>,
    pub commit_sha: Option<String>,
    pub pipeline_url: Option<String>,
}

impl Settings {
    /// Load settings from environment variables
    pub fn from_env() -> Result<Self> {
        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite:./data/harvester.db".to_string());

        let max_connections = std::env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "5".to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid DATABASE_MAX_CONNECTIONS value".to_string()))?;

        let min_connections = std::env::var("DATABASE_MIN_CONNECTIONS")
            .unwrap_or_else(|_| "1".to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid DATABASE_MIN_CONNECTIONS value".to_string()))?;

        let connection_timeout_seconds = std::env::var("DATABASE_CONNECTION_TIMEOUT")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid DATABASE_CONNECTION_TIMEOUT value".to_string()))?;

        let idle_timeout_seconds = std::env::var("DATABASE_IDLE_TIMEOUT")
            .unwrap_or_else(|_| "600".to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid DATABASE_IDLE_TIMEOUT value".to_string()))?;

        let api_url =
            std::env::var("GITHUB_API_URL").unwrap_or_else(|_| "https://api.github.com".to_string());

        let metadata_api_url = std::env::var("METADATA_API_URL").unwrap_or_else(|_| {
            "https://observatory.openebench.bsc.es/github-metadata-api/metadata/user".to_string()
        });

        Ok(Settings {
            database: DatabaseConfig {
                url: database_url,
                max_connections,
                min_connections,
                connection_timeout_seconds,
                idle_timeout_seconds,
            },
            github: GithubConfig {
                token: std::env::var("GITHUB_TOKEN").ok(),
                api_url,
                metadata_api_url,
            },
            provenance: ProvenanceConfig {
                server_url: std::env::var("CI_SERVER_URL").ok(),
                project_namespace: std::env::var("CI_PROJECT_NAMESPACE").ok(),
                project_name: std::env::var("CI_PROJECT_NAME").ok(),
                commit_sha: std::env::var("CI_COMMIT_SHA").ok(),
                pipeline_url: std::env::var("CI_PIPELINE_URL").ok(),
            },
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.database.url.is_empty() {
            return Err(Error::Config("Database URL must not be empty".to_string()));
        }

        if self.database.max_connections == 0 {
            return Err(Error::Config(
                "Database max connections must be non-zero".to_string(),
            ));
        }

        if self.github.api_url.is_empty() || self.github.metadata_api_url.is_empty() {
            return Err(Error::Config("API URLs must not be empty".to_string()));
        }

        Ok(())
    }
}
