use crate::error::StreakError;
use crate::report::StreakReport;
use chrono::{DateTime, NaiveDate, Utc};
use core_types::Commit;
use std::collections::BTreeSet;

/// A stateless calculator for deriving streak metrics from commit activity.
#[derive(Debug, Default)]
pub struct StreakEngine {}

impl StreakEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// The main entry point for computing streak metrics.
    ///
    /// # Arguments
    ///
    /// * `commits` - The raw commits to analyze, in any order, duplicates allowed.
    /// * `today` - The current UTC calendar date. Injected by the caller so the
    ///   computation is deterministic and testable without mocking the clock.
    ///
    /// # Returns
    ///
    /// A `StreakReport`. An empty commit set yields the zeroed report.
    /// Commits whose author timestamp cannot be parsed are skipped and logged;
    /// they never abort the computation.
    pub fn compute(&self, commits: &[Commit], today: NaiveDate) -> StreakReport {
        let mut report = StreakReport::new();

        let days = self.normalize(commits);
        if days.is_empty() {
            return report;
        }

        report.total_contributions = days.len();
        report.last_commit_date = days.iter().next_back().copied();
        report.longest_streak = self.longest_streak(&days);
        report.current_streak = self.current_streak(&days, today);
        report.commit_dates = days.into_iter().collect();

        report
    }

    /// Parses a single ISO 8601 timestamp into its UTC calendar day.
    pub fn activity_day(raw: &str) -> Result<NaiveDate, StreakError> {
        let instant = DateTime::parse_from_rfc3339(raw).map_err(|source| {
            StreakError::InvalidTimestamp {
                raw: raw.to_string(),
                source,
            }
        })?;
        Ok(instant.with_timezone(&Utc).date_naive())
    }

    /// Collapses commits to the set of distinct UTC activity days.
    ///
    /// Two commits on the same UTC calendar day dedupe to one entry even when
    /// their raw offset strings differ. Unparseable timestamps are skipped.
    fn normalize(&self, commits: &[Commit]) -> BTreeSet<NaiveDate> {
        let mut days = BTreeSet::new();
        for commit in commits {
            match Self::activity_day(&commit.author.date) {
                Ok(day) => {
                    days.insert(day);
                }
                Err(error) => {
                    tracing::warn!(
                        sha = %commit.sha,
                        %error,
                        "Skipping commit with unparseable author date."
                    );
                }
            }
        }
        days
    }

    /// Scans the sorted day set for the longest run of consecutive days.
    fn longest_streak(&self, days: &BTreeSet<NaiveDate>) -> u32 {
        let mut longest = 0u32;
        let mut run = 0u32;
        let mut prev: Option<NaiveDate> = None;

        for &day in days {
            run = match prev {
                // Consecutive (prev -> day = +1 day) extends the run; a gap resets it.
                Some(p) if (day - p).num_days() == 1 => run + 1,
                _ => 1,
            };
            if run > longest {
                longest = run;
            }
            prev = Some(day);
        }

        longest
    }

    /// Walks backwards from today (or yesterday) while consecutive days exist.
    ///
    /// A streak is still "current" if the most recent active day is yesterday:
    /// the user has until the end of today to extend it.
    fn current_streak(&self, days: &BTreeSet<NaiveDate>, today: NaiveDate) -> u32 {
        let mut anchor = if days.contains(&today) {
            today
        } else {
            match today.pred_opt() {
                Some(yesterday) if days.contains(&yesterday) => yesterday,
                _ => return 0,
            }
        };

        // The anchor day itself counts as 1.
        let mut current = 1u32;
        while let Some(prev) = anchor.pred_opt() {
            if !days.contains(&prev) {
                break;
            }
            current += 1;
            anchor = prev;
        }

        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::CommitAuthor;

    fn commit(timestamp: &str) -> Commit {
        Commit {
            sha: format!("sha-{timestamp}"),
            author: CommitAuthor {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                date: timestamp.to_string(),
            },
            message: "work".to_string(),
            html_url: "https://example.com/commit".to_string(),
            repository: None,
            branch: None,
        }
    }

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn empty_input_yields_zeroed_report() {
        let report = StreakEngine::new().compute(&[], day("2024-01-03"));
        assert_eq!(report, StreakReport::new());
        assert_eq!(report.last_commit_date, None);
    }

    #[test]
    fn three_consecutive_days_ending_today() {
        let commits = vec![
            commit("2024-01-01T09:00:00Z"),
            commit("2024-01-02T12:30:00Z"),
            commit("2024-01-03T23:59:59Z"),
        ];
        let report = StreakEngine::new().compute(&commits, day("2024-01-03"));
        assert_eq!(report.current_streak, 3);
        assert_eq!(report.longest_streak, 3);
        assert_eq!(report.total_contributions, 3);
        assert_eq!(report.last_commit_date, Some(day("2024-01-03")));
    }

    #[test]
    fn gap_resets_both_streaks() {
        let commits = vec![
            commit("2024-01-01T10:00:00Z"),
            commit("2024-01-03T10:00:00Z"),
        ];
        let report = StreakEngine::new().compute(&commits, day("2024-01-03"));
        assert_eq!(report.current_streak, 1);
        assert_eq!(report.longest_streak, 1);
        assert_eq!(report.total_contributions, 2);
    }

    #[test]
    fn streak_older_than_yesterday_is_not_current() {
        let commits: Vec<Commit> = (1..=5)
            .map(|d| commit(&format!("2024-01-0{d}T08:00:00Z")))
            .collect();
        let report = StreakEngine::new().compute(&commits, day("2024-01-07"));
        assert_eq!(report.current_streak, 0);
        assert_eq!(report.longest_streak, 5);
        assert_eq!(report.total_contributions, 5);
        assert_eq!(report.last_commit_date, Some(day("2024-01-05")));
    }

    #[test]
    fn run_ending_yesterday_still_counts_as_current() {
        let commits = vec![
            commit("2024-01-01T07:00:00Z"),
            commit("2024-01-02T07:00:00Z"),
            commit("2024-01-03T07:00:00Z"),
        ];
        let report = StreakEngine::new().compute(&commits, day("2024-01-04"));
        assert_eq!(report.current_streak, 3);
    }

    #[test]
    fn result_is_order_independent() {
        let mut commits = vec![
            commit("2024-01-03T01:00:00Z"),
            commit("2024-01-01T02:00:00Z"),
            commit("2024-01-02T03:00:00Z"),
        ];
        let engine = StreakEngine::new();
        let sorted = engine.compute(&commits, day("2024-01-03"));
        commits.reverse();
        let reversed = engine.compute(&commits, day("2024-01-03"));
        assert_eq!(sorted, reversed);
    }

    #[test]
    fn duplicate_commits_do_not_change_the_result() {
        let engine = StreakEngine::new();
        let base = vec![
            commit("2024-01-01T10:00:00Z"),
            commit("2024-01-02T10:00:00Z"),
        ];
        let mut padded = base.clone();
        padded.push(commit("2024-01-02T10:00:00Z"));
        padded.push(commit("2024-01-02T18:45:00Z"));

        assert_eq!(
            engine.compute(&base, day("2024-01-02")),
            engine.compute(&padded, day("2024-01-02"))
        );
    }

    #[test]
    fn computation_is_idempotent_for_a_fixed_today() {
        let commits = vec![
            commit("2024-01-01T10:00:00Z"),
            commit("2024-01-02T10:00:00Z"),
        ];
        let engine = StreakEngine::new();
        assert_eq!(
            engine.compute(&commits, day("2024-01-02")),
            engine.compute(&commits, day("2024-01-02"))
        );
    }

    #[test]
    fn offsets_resolving_to_the_same_utc_day_dedupe() {
        // 2024-01-02T00:10:00+01:00 is 2024-01-01T23:10:00Z.
        let commits = vec![
            commit("2024-01-01T23:30:00Z"),
            commit("2024-01-02T00:10:00+01:00"),
        ];
        let report = StreakEngine::new().compute(&commits, day("2024-01-01"));
        assert_eq!(report.total_contributions, 1);
        assert_eq!(report.commit_dates, vec![day("2024-01-01")]);
    }

    #[test]
    fn offset_pushes_commit_into_the_next_utc_day() {
        // 23:30-02:00 is 01:30Z the following day.
        let commits = vec![commit("2024-01-01T23:30:00-02:00")];
        let report = StreakEngine::new().compute(&commits, day("2024-01-02"));
        assert_eq!(report.last_commit_date, Some(day("2024-01-02")));
        assert_eq!(report.current_streak, 1);
    }

    #[test]
    fn malformed_timestamps_are_skipped_not_fatal() {
        let commits = vec![
            commit("not-a-date"),
            commit("2024-01-02T10:00:00Z"),
            commit("2024-13-45T99:00:00Z"),
        ];
        let report = StreakEngine::new().compute(&commits, day("2024-01-02"));
        assert_eq!(report.total_contributions, 1);
        assert_eq!(report.current_streak, 1);
    }

    #[test]
    fn longest_streak_never_below_current_streak() {
        let cases: Vec<(Vec<Commit>, &str)> = vec![
            (vec![commit("2024-01-01T00:00:00Z")], "2024-01-01"),
            (
                vec![
                    commit("2023-12-30T00:00:00Z"),
                    commit("2023-12-31T00:00:00Z"),
                    commit("2024-01-01T00:00:00Z"),
                ],
                "2024-01-01",
            ),
            (
                vec![
                    commit("2023-11-01T00:00:00Z"),
                    commit("2023-11-02T00:00:00Z"),
                    commit("2023-11-03T00:00:00Z"),
                    commit("2024-01-01T00:00:00Z"),
                ],
                "2024-01-01",
            ),
        ];

        let engine = StreakEngine::new();
        for (commits, today) in cases {
            let report = engine.compute(&commits, day(today));
            assert!(report.longest_streak >= report.current_streak);
            assert_eq!(report.total_contributions, report.commit_dates.len());
        }
    }

    #[test]
    fn longest_streak_found_in_the_middle_of_history() {
        let commits = vec![
            commit("2024-01-01T00:00:00Z"),
            commit("2024-02-10T00:00:00Z"),
            commit("2024-02-11T00:00:00Z"),
            commit("2024-02-12T00:00:00Z"),
            commit("2024-02-13T00:00:00Z"),
            commit("2024-03-01T00:00:00Z"),
        ];
        let report = StreakEngine::new().compute(&commits, day("2024-03-01"));
        assert_eq!(report.longest_streak, 4);
        assert_eq!(report.current_streak, 1);
    }

    #[test]
    fn streak_crosses_a_month_boundary() {
        let commits = vec![
            commit("2024-01-31T10:00:00Z"),
            commit("2024-02-01T10:00:00Z"),
        ];
        let report = StreakEngine::new().compute(&commits, day("2024-02-01"));
        assert_eq!(report.current_streak, 2);
        assert_eq!(report.longest_streak, 2);
    }

    #[test]
    fn commit_dates_are_sorted_ascending() {
        let commits = vec![
            commit("2024-02-01T10:00:00Z"),
            commit("2024-01-01T10:00:00Z"),
            commit("2024-01-15T10:00:00Z"),
        ];
        let report = StreakEngine::new().compute(&commits, day("2024-02-01"));
        assert_eq!(
            report.commit_dates,
            vec![day("2024-01-01"), day("2024-01-15"), day("2024-02-01")]
        );
    }
}
