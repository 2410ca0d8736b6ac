use crate::error::BackendError;
use configuration::BackendConfig;
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use streak::StreakReport;

pub mod error;
pub mod responses;

// --- Public API ---
pub use responses::{NewTask, Session, Task};

/// The payload for the login endpoint.
#[derive(Debug, Serialize)]
struct LoginPayload<'a> {
    email: &'a str,
    password: &'a str,
}

/// A client for the first-party CodeQuest backend REST API.
///
/// All endpoints except login require the session token obtained at login;
/// calling them without one fails with `Unauthenticated` before any request
/// is sent.
pub struct BackendClient {
    client: Client,
    base_url: String,
    session_token: Option<String>,
}

impl BackendClient {
    pub fn new(config: &BackendConfig, session_token: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url.clone(),
            session_token,
        }
    }

    /// Authenticates with email and password, returning the profile and the
    /// session token the other endpoints need.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, BackendError> {
        let url = format!("{}/api/auth/login", self.base_url);
        let payload = LoginPayload { email, password };
        let response = self.client.post(&url).json(&payload).send().await?;
        let session: Session = decode(response).await?;
        tracing::debug!(username = %session.user.username, "Login successful.");
        Ok(session)
    }

    /// Fetches all of the user's tasks.
    pub async fn fetch_tasks(&self) -> Result<Vec<Task>, BackendError> {
        self.get_authed("/api/tasks").await
    }

    /// Creates a new task.
    pub async fn create_task(&self, new_task: &NewTask) -> Result<Task, BackendError> {
        let token = self.session()?;
        let url = format!("{}/api/tasks", self.base_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(new_task)
            .send()
            .await?;
        decode(response).await
    }

    /// Marks a task complete. The backend owns the XP/HP bookkeeping that
    /// follows, so there is nothing useful in the response body.
    pub async fn complete_task(&self, task_id: &str) -> Result<(), BackendError> {
        let token = self.session()?;
        let url = format!("{}/api/tasks/{task_id}/complete", self.base_url);
        let response = self
            .client
            .patch(&url)
            .bearer_auth(token)
            .json(&serde_json::json!({}))
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }

    /// Asks the backend to recompute the user's streak from its own view of
    /// the commit history and persist it server-side.
    pub async fn refresh_streak(&self) -> Result<StreakReport, BackendError> {
        let token = self.session()?;
        let url = format!("{}/api/github/update-streak", self.base_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(&serde_json::json!({}))
            .send()
            .await?;
        decode(response).await
    }

    async fn get_authed<T: DeserializeOwned>(&self, path: &str) -> Result<T, BackendError> {
        let token = self.session()?;
        let url = format!("{}{path}", self.base_url);
        let response = self.client.get(&url).bearer_auth(token).send().await?;
        decode(response).await
    }

    fn session(&self) -> Result<&str, BackendError> {
        self.session_token
            .as_deref()
            .ok_or(BackendError::Unauthenticated)
    }
}

/// Maps a non-2xx response to `Api`, passing 2xx through.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        let body = response.text().await.unwrap_or_default();
        Err(BackendError::Api {
            status: status.as_u16(),
            body,
        })
    }
}

/// Checks the status, then deserializes the body.
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, BackendError> {
    let response = check_status(response).await?;
    let text = response.text().await?;
    serde_json::from_str::<T>(&text).map_err(|e| BackendError::Deserialization(e.to_string()))
}
