use crate::{Error, Result};

/// Parsed GitHub repository information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryInfo {
    pub owner: String,
    pub repo: String,
}

/// Extract owner and repository name from a repository URL.
///
/// Strips a trailing `.git` suffix and trailing slashes, then takes the
/// last two `/`-delimited path segments. Accepts:
/// - https://github.com/owner/repo
/// - https://github.com/owner/repo/
/// - https://github.com/owner/repo.git
/// - owner/repo
pub fn parse_repository_url(url: &str) -> Result<RepositoryInfo> {
    let url = url.trim();

    // Remove .git suffix and trailing slashes
    let url = url.trim_end_matches('/').trim_end_matches(".git");
    let url = url.trim_end_matches('/');

    let segments: Vec<&str> = url.split('/').collect();

    if segments.len() < 2 {
        return Err(Error::MalformedUrl(format!(
            "cannot extract owner and repository from '{url}'"
        )));
    }

    let owner = segments[segments.len() - 2].trim();
    let repo = segments[segments.len() - 1].trim();

    if owner.is_empty() || repo.is_empty() {
        return Err(Error::MalformedUrl(format!(
            "empty owner or repository segment in '{url}'"
        )));
    }

    Ok(RepositoryInfo {
        owner: owner.to_string(),
        repo: repo.to_string(),
    })
}
