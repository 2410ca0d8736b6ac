use crate::responses::{
    CommitDetailsResponse, GithubErrorResponse, SearchCommitItem, SearchCommitsResponse,
};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use configuration::GithubConfig;
use core_types::{Commit, CommitAuthor, RepoRef};
use futures::future::join_all;
use std::sync::Arc;

pub mod error;
pub mod responses;
pub mod token;

// --- Public API ---
pub use error::GithubError;
pub use token::{BackendTokenProvider, StaticTokenProvider, TokenProvider};

/// The generic, abstract interface for a source of commit activity.
/// This trait is the contract the CLI and engine callers use, allowing the
/// underlying implementation (live or mock) to be swapped out.
#[async_trait]
pub trait CommitSource: Send + Sync {
    /// Fetches the user's commits from the last `lookback_days` days,
    /// newest first.
    async fn fetch_commits(
        &self,
        username: &str,
        lookback_days: u32,
    ) -> Result<Vec<Commit>, GithubError>;
}

/// A concrete implementation of `CommitSource` for the GitHub REST API.
pub struct GitHubClient {
    client: reqwest::Client,
    api_base_url: String,
    max_commit_details: usize,
    token_provider: Arc<dyn TokenProvider>,
}

impl GitHubClient {
    pub fn new(config: &GithubConfig, token_provider: Arc<dyn TokenProvider>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base_url: config.api_base_url.clone(),
            max_commit_details: config.max_commit_details,
            token_provider,
        }
    }

    /// Runs the commit search for `username` over the lookback window.
    async fn search_commits(
        &self,
        token: &str,
        username: &str,
        lookback_days: u32,
    ) -> Result<Vec<SearchCommitItem>, GithubError> {
        let since = (Utc::now() - Duration::days(i64::from(lookback_days))).date_naive();
        let query = format!("author:{username} committer-date:>{since}");
        let url = format!("{}/search/commits", self.api_base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", query.as_str()),
                ("sort", "committer-date"),
                ("order", "desc"),
            ])
            .header("Authorization", format!("token {token}"))
            // Commit search still sits behind the cloak preview media type.
            .header("Accept", "application/vnd.github.cloak-preview")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<GithubErrorResponse>(&text)
                .map(|e| e.message)
                .unwrap_or(text);
            return Err(GithubError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let search = response
            .json::<SearchCommitsResponse>()
            .await
            .map_err(|e| GithubError::Deserialization(e.to_string()))?;
        Ok(search.items)
    }

    /// Fetches repository/branch details for one commit.
    ///
    /// A failure here degrades to the bare search item rather than failing
    /// the whole batch.
    async fn fetch_details(&self, token: &str, item: &SearchCommitItem) -> CommitDetailsResponse {
        let result = async {
            self.client
                .get(&item.url)
                .header("Authorization", format!("token {token}"))
                .send()
                .await?
                .error_for_status()?
                .json::<CommitDetailsResponse>()
                .await
        }
        .await;

        match result {
            Ok(details) => details,
            Err(error) => {
                tracing::warn!(sha = %item.sha, %error, "Failed to fetch commit details.");
                CommitDetailsResponse::default()
            }
        }
    }
}

/// Merges a search hit with its (possibly empty) detail response into the
/// domain commit record. The detail repository wins over the search one.
fn merge_commit(item: SearchCommitItem, details: CommitDetailsResponse) -> Commit {
    let repository = details
        .repository
        .or(item.repository)
        .map(|repo| RepoRef {
            name: repo.name,
            full_name: repo.full_name,
        });

    Commit {
        sha: item.sha,
        author: CommitAuthor {
            name: item.commit.author.name,
            email: item.commit.author.email,
            date: item.commit.author.date,
        },
        message: item.commit.message,
        html_url: item.html_url,
        repository,
        branch: details.branch,
    }
}

#[async_trait]
impl CommitSource for GitHubClient {
    async fn fetch_commits(
        &self,
        username: &str,
        lookback_days: u32,
    ) -> Result<Vec<Commit>, GithubError> {
        let token = self.token_provider.github_token().await?;
        let items = self.search_commits(&token, username, lookback_days).await?;
        tracing::debug!(count = items.len(), username, "Commit search complete.");

        // Only the newest results get the extra detail round-trip.
        let detail_count = items.len().min(self.max_commit_details);
        let detail_futures = items[..detail_count]
            .iter()
            .map(|item| self.fetch_details(&token, item));
        let mut details = join_all(detail_futures).await;
        details.resize_with(items.len(), CommitDetailsResponse::default);

        Ok(items
            .into_iter()
            .zip(details)
            .map(|(item, details)| merge_commit(item, details))
            .collect())
    }
}
