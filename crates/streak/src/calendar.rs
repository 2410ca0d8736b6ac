use crate::engine::StreakEngine;
use chrono::NaiveDate;
use core_types::Commit;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One cell of the contribution calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub count: usize,
}

impl CalendarDay {
    /// Maps the commit count to a display intensity bucket (0..=4).
    pub fn intensity(&self) -> u8 {
        match self.count {
            0 => 0,
            1..=3 => 1,
            4..=6 => 2,
            7..=9 => 3,
            _ => 4,
        }
    }
}

/// The per-day contribution grid over a trailing window.
///
/// Every day in the window is materialized, including zero-count days, so
/// consumers can render a dense grid without filling gaps themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityCalendar {
    /// One entry per day in the window, oldest first.
    pub days: Vec<CalendarDay>,
}

impl ActivityCalendar {
    /// Buckets commits by UTC day over the `window_days` ending at `today`.
    ///
    /// Uses the same timestamp normalization as the streak engine; commits
    /// with unparseable author dates are skipped. A `window_days` of 365
    /// covers `today` and the 364 days before it.
    pub fn build(commits: &[Commit], today: NaiveDate, window_days: u32) -> Self {
        let mut counts: HashMap<NaiveDate, usize> = HashMap::new();
        for commit in commits {
            match StreakEngine::activity_day(&commit.author.date) {
                Ok(day) => *counts.entry(day).or_insert(0) += 1,
                Err(error) => {
                    tracing::warn!(
                        sha = %commit.sha,
                        %error,
                        "Skipping commit with unparseable author date."
                    );
                }
            }
        }

        let days = (0..window_days)
            .rev()
            .filter_map(|offset| today.checked_sub_days(chrono::Days::new(u64::from(offset))))
            .map(|date| CalendarDay {
                date,
                count: counts.get(&date).copied().unwrap_or(0),
            })
            .collect();

        Self { days }
    }

    /// Days in the window with at least one commit.
    pub fn active_days(&self) -> usize {
        self.days.iter().filter(|d| d.count > 0).count()
    }

    /// Total commits across the window.
    pub fn total_pushes(&self) -> usize {
        self.days.iter().map(|d| d.count).sum()
    }

    /// The busiest single day's commit count, 0 for an empty window.
    pub fn max_daily_pushes(&self) -> usize {
        self.days.iter().map(|d| d.count).max().unwrap_or(0)
    }
}
