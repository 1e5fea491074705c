use crate::config::GithubConfig;
use crate::github::{
    models::{MetadataRequest, MetadataResponse, RateLimitResponse},
    parser::parse_repository_url,
    rate_limit,
};
use crate::{Error, Result};
use reqwest::{header, Client, Response, StatusCode};
use serde_json::Value;
use tracing::{debug, error};

/// Client for the repository metadata API and the GitHub rate limit
/// endpoint. Holds one reqwest client for the whole run; connections are
/// reused across requests.
#[derive(Clone)]
pub struct MetadataClient {
    client: Client,
    config: GithubConfig,
}

impl MetadataClient {
    /// Create a new metadata client
    pub fn new(config: GithubConfig) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static("Harvester/0.1"),
        );
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            header::HeaderValue::from_static("2022-11-28"),
        );

        // Add authentication if token is provided
        if let Some(token) = &config.token {
            let auth_value = format!("Bearer {token}");
            headers.insert(
                header::AUTHORIZATION,
                header::HeaderValue::from_str(&auth_value)
                    .map_err(|e| Error::Config(format!("Invalid GitHub token: {e}")))?,
            );
        }

        let client = Client::builder()
            .default_headers(headers)
            .connect_timeout(std::time::Duration::from_secs(10))
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(Error::Http)?;

        Ok(Self { client, config })
    }

    /// Query the current rate limit status. Always fetched fresh; the
    /// remote counter is the single source of truth.
    pub async fn rate_limit(&self) -> Result<crate::github::RateLimit> {
        let url = format!("{}/rate_limit", self.config.api_url);
        debug!("Rate limit request: GET {}", url);

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            error!("Rate limit query failed: {}", status);
            return Err(Error::UnexpectedStatus(status));
        }

        let body: RateLimitResponse = response
            .json()
            .await
            .map_err(|e| Error::Decode(format!("Invalid rate limit response: {e}")))?;

        Ok(body.resources.core)
    }

    /// Fetch the metadata payload for a repository URL.
    ///
    /// Waits out the rate limit window first if it is exhausted. A 403
    /// response is retried exactly once, with the full original parameters,
    /// after waiting for the reset time advertised in its headers. Returns
    /// `Ok(None)` when the endpoint answers without a payload.
    pub async fn fetch_repository(&self, repository_url: &str) -> Result<Option<Value>> {
        let info = parse_repository_url(repository_url)?;

        let limit = self.rate_limit().await?;
        if limit.remaining == 0 {
            rate_limit::wait_for_reset(limit.reset).await;
        }

        let response = self.post_metadata(&info.owner, &info.repo).await?;

        let response = match response.status() {
            StatusCode::OK => response,
            StatusCode::FORBIDDEN => {
                // Rate limited mid-window: wait for the reset advertised in
                // the response headers, then retry once
                let reset = Self::reset_from_headers(&response)?;
                rate_limit::wait_for_reset(reset).await;

                let retry = self.post_metadata(&info.owner, &info.repo).await?;
                if retry.status() != StatusCode::OK {
                    return Err(Error::UnexpectedStatus(retry.status()));
                }
                retry
            }
            status => return Err(Error::UnexpectedStatus(status)),
        };

        let body: MetadataResponse = response
            .json()
            .await
            .map_err(|e| Error::Decode(format!("Invalid metadata response: {e}")))?;

        Ok(body.data)
    }

    async fn post_metadata(&self, owner: &str, repo: &str) -> Result<Response> {
        debug!(
            "Metadata request: POST {} ({}/{})",
            self.config.metadata_api_url, owner, repo
        );

        let body = MetadataRequest {
            owner,
            repo,
            user_token: self.config.token.as_deref(),
            prepare: false,
        };

        let response = self
            .client
            .post(&self.config.metadata_api_url)
            .json(&body)
            .send()
            .await?;

        Ok(response)
    }

    fn reset_from_headers(response: &Response) -> Result<i64> {
        response
            .headers()
            .get("x-ratelimit-reset")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| {
                Error::Decode("403 response without a usable X-RateLimit-Reset header".to_string())
            })
    }
}
