use crate::error::ConfigError;
use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub backend: BackendConfig,
    pub github: GithubConfig,
    pub store: StoreConfig,
}

/// Where the first-party CodeQuest backend lives.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub base_url: String,
}

/// Parameters for talking to the GitHub API.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GithubConfig {
    pub api_base_url: String,
    /// How far back the commit search looks, in days.
    pub lookback_days: u32,
    /// Cap on per-commit detail requests after a search. GitHub's search
    /// response omits repository/branch info, so the client enriches the
    /// newest results with follow-up calls up to this limit.
    pub max_commit_details: usize,
}

/// Where the persisted user profile document lives.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub path: PathBuf,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
        }
    }
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.github.com".to_string(),
            lookback_days: 365,
            max_commit_details: 50,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
        }
    }
}

/// The platform data directory, falling back to the working directory when
/// the platform reports no home (e.g. bare containers).
fn default_store_path() -> PathBuf {
    directories::ProjectDirs::from("", "", "codequest")
        .map(|dirs| dirs.data_dir().join("profile.json"))
        .unwrap_or_else(|| PathBuf::from("codequest-profile.json"))
}

impl Config {
    /// Rejects configurations that would make every request fail later.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.backend.base_url.trim().is_empty() {
            return Err(ConfigError::Validation(
                "backend.base_url must not be empty".to_string(),
            ));
        }
        if self.github.api_base_url.trim().is_empty() {
            return Err(ConfigError::Validation(
                "github.api_base_url must not be empty".to_string(),
            ));
        }
        if self.github.lookback_days == 0 {
            return Err(ConfigError::Validation(
                "github.lookback_days must be at least 1".to_string(),
            ));
        }
        if self.github.max_commit_details == 0 {
            return Err(ConfigError::Validation(
                "github.max_commit_details must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
