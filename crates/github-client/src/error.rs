use thiserror::Error;

#[derive(Error, Debug)]
pub enum GithubError {
    #[error("No backend session token; log in first.")]
    Unauthenticated,

    #[error("No GitHub account is linked to this user.")]
    NotLinked,

    #[error("Failed to send the HTTP request: {0}")]
    Request(#[from] reqwest::Error),

    #[error("The GitHub API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("The backend token exchange returned {status}: {body}")]
    TokenExchange { status: u16, body: String },

    #[error("Failed to deserialize the API response: {0}")]
    Deserialization(String),
}
