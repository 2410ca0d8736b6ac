//! # CodeQuest Streak Engine
//!
//! This crate derives contribution-streak metrics from raw commit activity.
//! It is the "scorekeeper" of the system.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of
//!   external systems. It depends only on `core-types` (Layer 0).
//! - **Stateless Calculation:** The `StreakEngine` is a stateless calculator.
//!   It takes raw commits and an injected "today" as input and produces a
//!   `StreakReport` as output. No clock reads, no I/O, which makes it
//!   deterministic and easy to test.
//! - **UTC Everywhere:** Commit timestamps are normalized to UTC calendar
//!   days before any arithmetic, so the same commit set yields the same
//!   result regardless of the host timezone.
//!
//! ## Public API
//!
//! - `StreakEngine`: The main struct that contains the calculation logic.
//! - `StreakReport`: The standardized struct that holds the streak metrics.
//! - `ActivityCalendar`: The per-day contribution grid behind the calendar view.
//! - `StreakError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod calendar;
pub mod engine;
pub mod error;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use calendar::{ActivityCalendar, CalendarDay};
pub use engine::StreakEngine;
pub use error::StreakError;
pub use report::StreakReport;
