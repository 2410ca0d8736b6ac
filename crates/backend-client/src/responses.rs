use chrono::NaiveDate;
use core_types::{TaskDifficulty, UserProfile};
use serde::{Deserialize, Serialize};

// Using `#[serde(rename_all = "camelCase")]` to automatically map from JSON camelCase to Rust snake_case.

/// The response from a successful `POST /api/auth/login` request.
#[derive(Debug, Clone, Deserialize)]
pub struct Session {
    pub user: UserProfile,
    pub token: String,
}

/// A task as stored by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub due_date: NaiveDate,
    pub difficulty: TaskDifficulty,
    pub is_completed: bool,
    pub user_id: String,
}

/// The payload for creating a task. The backend assigns the id, the owner,
/// and the initial completion state.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,
    pub due_date: NaiveDate,
    pub difficulty: TaskDifficulty,
}
