pub mod enums;
pub mod error;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::{GithubLink, TaskDifficulty};
pub use error::CoreError;
pub use structs::{Commit, CommitAuthor, RepoRef, UserProfile};
