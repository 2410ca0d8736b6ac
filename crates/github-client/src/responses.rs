use serde::Deserialize;

// GitHub's wire format is snake_case, so these map without renames.

/// The envelope of `GET /search/commits`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchCommitsResponse {
    #[serde(default)]
    pub items: Vec<SearchCommitItem>,
}

/// One commit hit from the search endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchCommitItem {
    pub sha: String,
    pub commit: CommitInfo,
    pub html_url: String,
    /// The API URL of the commit itself, used for the detail request.
    pub url: String,
    #[serde(default)]
    pub repository: Option<RepositoryInfo>,
    // There are more fields, but these are the only ones we consume.
}

/// The nested `commit` object carrying authorship and the message.
#[derive(Debug, Clone, Deserialize)]
pub struct CommitInfo {
    pub author: CommitAuthorInfo,
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommitAuthorInfo {
    pub name: String,
    pub email: String,
    /// ISO 8601 author timestamp.
    pub date: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryInfo {
    pub name: String,
    pub full_name: String,
}

/// The response of a per-commit detail request (`GET {item.url}`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommitDetailsResponse {
    #[serde(default)]
    pub repository: Option<RepositoryInfo>,
    #[serde(default)]
    pub branch: Option<String>,
}

/// Represents an error response from the GitHub API.
#[derive(Debug, Clone, Deserialize)]
pub struct GithubErrorResponse {
    pub message: String,
}
