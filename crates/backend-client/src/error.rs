use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("No backend session token; log in first.")]
    Unauthenticated,

    #[error("Failed to send the HTTP request: {0}")]
    Request(#[from] reqwest::Error),

    #[error("The backend returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Failed to deserialize the backend response: {0}")]
    Deserialization(String),
}
