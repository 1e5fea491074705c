use serde::{Deserialize, Serialize};
use serde_json::Value;

/// GitHub API rate limit information
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RateLimit {
    pub remaining: u32,
    pub reset: i64,
}

/// Envelope returned by the rate limit endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitResponse {
    pub resources: RateLimitResources,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitResources {
    pub core: RateLimit,
}

/// Request body for the metadata endpoint
#[derive(Debug, Clone, Serialize)]
pub struct MetadataRequest<'a> {
    pub owner: &'a str,
    pub repo: &'a str,
    #[serde(rename = "userToken")]
    pub user_token: Option<&'a str>,
    pub prepare: bool,
}

/// Response body from the metadata endpoint. The payload under `data` is an
/// opaque structure owned by the collaborator; a missing or null `data`
/// field means no metadata was produced.
#[derive(Debug, Clone, Deserialize)]
pub struct MetadataResponse {
    #[serde(default)]
    pub data: Option<Value>,
}
