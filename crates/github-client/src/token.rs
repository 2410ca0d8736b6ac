use crate::error::GithubError;
use async_trait::async_trait;
use configuration::BackendConfig;
use serde::Deserialize;

/// The abstract source of a GitHub API token.
///
/// The live implementation exchanges the backend session for the user's
/// stored GitHub token; tests can substitute a fixed token.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn github_token(&self) -> Result<String, GithubError>;
}

/// The payload of `GET /api/github/token`.
///
/// `githubToken` is null when the user never linked a GitHub account, which
/// is a distinct condition from the request failing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GithubTokenResponse {
    github_token: Option<String>,
}

/// Exchanges the backend session token for the user's GitHub token.
pub struct BackendTokenProvider {
    client: reqwest::Client,
    base_url: String,
    session_token: Option<String>,
}

impl BackendTokenProvider {
    pub fn new(config: &BackendConfig, session_token: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.clone(),
            session_token,
        }
    }
}

#[async_trait]
impl TokenProvider for BackendTokenProvider {
    async fn github_token(&self) -> Result<String, GithubError> {
        let session = self
            .session_token
            .as_deref()
            .ok_or(GithubError::Unauthenticated)?;

        let url = format!("{}/api/github/token", self.base_url);
        let response = self.client.get(&url).bearer_auth(session).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GithubError::TokenExchange {
                status: status.as_u16(),
                body,
            });
        }

        let payload = response
            .json::<GithubTokenResponse>()
            .await
            .map_err(|e| GithubError::Deserialization(e.to_string()))?;

        payload.github_token.ok_or(GithubError::NotLinked)
    }
}

/// A fixed-token provider for tests and for users supplying a personal
/// access token directly (no backend round-trip).
pub struct StaticTokenProvider {
    token: String,
}

impl StaticTokenProvider {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn github_token(&self) -> Result<String, GithubError> {
        Ok(self.token.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_payload_distinguishes_unlinked_from_present() {
        let linked: GithubTokenResponse =
            serde_json::from_str(r#"{"githubToken": "gho_abc"}"#).unwrap();
        assert_eq!(linked.github_token.as_deref(), Some("gho_abc"));

        let unlinked: GithubTokenResponse =
            serde_json::from_str(r#"{"githubToken": null}"#).unwrap();
        assert!(unlinked.github_token.is_none());
    }

    #[tokio::test]
    async fn missing_session_token_is_unauthenticated() {
        let provider =
            BackendTokenProvider::new(&BackendConfig::default(), None);
        let result = provider.github_token().await;
        assert!(matches!(result, Err(GithubError::Unauthenticated)));
    }

    #[tokio::test]
    async fn static_provider_returns_its_token() {
        let provider = StaticTokenProvider::new("gho_fixed");
        assert_eq!(provider.github_token().await.unwrap(), "gho_fixed");
    }
}
