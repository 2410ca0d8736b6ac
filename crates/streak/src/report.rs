use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The standardized result of a streak computation.
///
/// This struct is the final output of the `StreakEngine` and serves as the
/// data transfer object for contribution metrics throughout the system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakReport {
    /// Consecutive active days ending today or yesterday (UTC).
    pub current_streak: u32,
    /// The longest run of consecutive active days anywhere in history.
    pub longest_streak: u32,
    /// Number of distinct active days.
    pub total_contributions: usize,
    /// The most recent active day, if any activity exists.
    pub last_commit_date: Option<NaiveDate>,
    /// Every distinct active day, ascending. Feeds the calendar view.
    pub commit_dates: Vec<NaiveDate>,
}

impl StreakReport {
    /// Creates a new, zeroed-out report.
    /// This is the result for an empty commit set.
    pub fn new() -> Self {
        Self {
            current_streak: 0,
            longest_streak: 0,
            total_contributions: 0,
            last_commit_date: None,
            commit_dates: Vec::new(),
        }
    }
}

impl Default for StreakReport {
    fn default() -> Self {
        Self::new()
    }
}
