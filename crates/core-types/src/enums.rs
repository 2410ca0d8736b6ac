use crate::error::CoreError;
use serde::{Deserialize, Serialize};

/// Whether the user has linked a GitHub account.
///
/// Modeled as an explicit state rather than an optional string so that
/// "no account linked" cannot be confused with a failed lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GithubLink {
    Linked {
        login: String,
    },
    #[default]
    NotLinked,
}

impl GithubLink {
    /// Returns the linked GitHub login, if any.
    pub fn login(&self) -> Option<&str> {
        match self {
            GithubLink::Linked { login } => Some(login),
            GithubLink::NotLinked => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskDifficulty {
    Easy,
    Medium,
    Hard,
}

impl TaskDifficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskDifficulty::Easy => "easy",
            TaskDifficulty::Medium => "medium",
            TaskDifficulty::Hard => "hard",
        }
    }
}

impl std::str::FromStr for TaskDifficulty {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(TaskDifficulty::Easy),
            "medium" => Ok(TaskDifficulty::Medium),
            "hard" => Ok(TaskDifficulty::Hard),
            other => Err(CoreError::InvalidInput(
                "difficulty".to_string(),
                other.to_string(),
            )),
        }
    }
}
