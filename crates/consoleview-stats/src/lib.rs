//! Task statistics derivation for consoleview.
//!
//! Turns raw runtime samples into typed, display-ready metrics:
//! - [`derive_stats`]: raw sample → [`TaskStats`] (total and idle for
//!   terminated tasks)
//! - [`percent`]: busy/scheduled/idle shares of the elapsed reference
//! - [`TaskSummary`]: formatted per-task table row
//! - [`field`]: task field names, values and source-location labels
//! - [`TaskRecord`]: a task's identity joined with its derived metrics

mod error;
pub mod field;
pub mod percent;
pub mod raw;
mod stats;
mod summary;
mod task;

pub use error::StatsError;
pub use percent::{elapsed_reference, percent_of, TimeBuckets, TimeShares};
pub use raw::{RawPollStats, RawTaskStats, RawTime};
pub use stats::{derive_stats, Lifetime, TaskStats};
pub use summary::{TaskSummary, SUMMARY_HEADERS};
pub use task::{sort_records, RawTask, Snapshot, TaskRecord};
