use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("The profile store has not been hydrated yet.")]
    NotHydrated,

    #[error("No profile is stored; log in first.")]
    NoProfile,

    #[error("Failed to read or write the profile document: {0}")]
    Io(#[from] std::io::Error),

    #[error("The profile document is not valid JSON: {0}")]
    Serialization(#[from] serde_json::Error),
}
