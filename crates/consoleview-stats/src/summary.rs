//! Per-task summary rows for the task table.

use consoleview_core::format::{format_duration, format_optional_duration, format_percentage};
use consoleview_core::{Duration, Timestamp};
use serde::Serialize;

use crate::error::StatsError;
use crate::percent::{TimeBuckets, TimeShares};
use crate::stats::TaskStats;

/// Column headers matching [`TaskSummary::cells`].
pub const SUMMARY_HEADERS: [&str; 10] = [
    "POLLS", "TOTAL", "BUSY", "SCHED", "IDLE", "BUSY%", "SCHED%", "IDLE%", "WAKERS", "WOKEN",
];

/// Display-ready metrics for one task as of a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskSummary {
    pub polls: u64,
    /// Whether the task had terminated at the snapshot.
    pub completed: bool,
    pub buckets: TimeBuckets,
    pub shares: TimeShares,
    pub busy_percentage: String,
    pub scheduled_percentage: String,
    pub idle_percentage: String,
    pub wakes: u64,
    pub waker_clones: u64,
    pub waker_drops: u64,
    pub self_wakes: u64,
    pub last_wake: Option<Timestamp>,
    /// Live wakers: clones minus drops.
    pub waker_count: u64,
    /// Time from the last wake to `last_updated_at`.
    pub last_woken: Option<Duration>,
}

impl TaskSummary {
    /// Summarize `stats` as of the snapshot taken at `last_updated_at`.
    pub fn new(stats: &TaskStats, last_updated_at: Timestamp) -> Result<Self, StatsError> {
        let buckets = TimeBuckets::new(stats, last_updated_at)?;
        let shares = buckets.shares();
        let last_woken = stats
            .last_wake
            .map(|wake| last_updated_at.checked_duration_since(wake))
            .transpose()?;

        Ok(Self {
            polls: stats.polls,
            completed: stats.is_completed(),
            buckets,
            shares,
            busy_percentage: format_percentage(shares.busy),
            scheduled_percentage: format_percentage(shares.scheduled),
            idle_percentage: format_percentage(shares.idle),
            wakes: stats.wakes,
            waker_clones: stats.waker_clones,
            waker_drops: stats.waker_drops,
            self_wakes: stats.self_wakes,
            last_wake: stats.last_wake,
            // clones and drops are sampled independently; a drop can be seen first
            waker_count: stats.waker_clones.saturating_sub(stats.waker_drops),
            last_woken,
        })
    }

    /// Row cells in [`SUMMARY_HEADERS`] order.
    #[must_use]
    pub fn cells(&self, precision: usize) -> [String; 10] {
        [
            self.polls.to_string(),
            format_duration(self.buckets.elapsed, precision),
            format_duration(self.buckets.busy, precision),
            format_duration(self.buckets.scheduled, precision),
            format_duration(self.buckets.idle, precision),
            self.busy_percentage.clone(),
            self.scheduled_percentage.clone(),
            self.idle_percentage.clone(),
            self.waker_count.to_string(),
            format_optional_duration(self.last_woken, precision),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raw::{RawPollStats, RawTaskStats, RawTime};
    use crate::stats::derive_stats;

    fn raw() -> RawTaskStats {
        RawTaskStats {
            created_at: Some(RawTime::new(1_000, 0)),
            poll_stats: Some(RawPollStats {
                polls: 7,
                busy_time: Some(RawTime::new(4, 0)),
                ..RawPollStats::default()
            }),
            scheduled_time: Some(RawTime::new(1, 0)),
            wakes: 9,
            waker_clones: 5,
            waker_drops: 3,
            self_wakes: 2,
            last_wake: Some(RawTime::new(1_008, 500_000_000)),
            ..RawTaskStats::default()
        }
    }

    #[test]
    fn test_summary_completed_task() {
        let mut raw = raw();
        raw.dropped_at = Some(RawTime::new(1_010, 0));
        let stats = derive_stats(&raw).unwrap();
        let summary = TaskSummary::new(&stats, Timestamp::new(1_010, 0)).unwrap();

        assert!(summary.completed);
        assert_eq!(summary.busy_percentage, "40.00%");
        assert_eq!(summary.scheduled_percentage, "10.00%");
        assert_eq!(summary.idle_percentage, "50.00%");
        assert_eq!(summary.waker_count, 2);
        assert_eq!(summary.last_woken, Some(Duration::new(1, 500_000_000)));
    }

    #[test]
    fn test_summary_running_task() {
        let stats = derive_stats(&raw()).unwrap();
        let summary = TaskSummary::new(&stats, Timestamp::new(1_020, 0)).unwrap();

        assert!(!summary.completed);
        assert_eq!(summary.buckets.elapsed, Duration::from_secs(20));
        assert_eq!(summary.busy_percentage, "20.00%");
        assert_eq!(summary.idle_percentage, "75.00%");
    }

    #[test]
    fn test_waker_count_saturates() {
        let mut raw = raw();
        raw.waker_clones = 1;
        raw.waker_drops = 4;
        let stats = derive_stats(&raw).unwrap();
        let summary = TaskSummary::new(&stats, Timestamp::new(1_020, 0)).unwrap();
        assert_eq!(summary.waker_count, 0);
    }

    #[test]
    fn test_cells_follow_headers() {
        let mut raw = raw();
        raw.last_wake = None;
        raw.dropped_at = Some(RawTime::new(1_065, 0));
        let stats = derive_stats(&raw).unwrap();
        let cells = TaskSummary::new(&stats, Timestamp::new(1_070, 0))
            .unwrap()
            .cells(2);

        assert_eq!(cells.len(), SUMMARY_HEADERS.len());
        assert_eq!(cells[0], "7");
        assert_eq!(cells[1], "1m 5s");
        assert_eq!(cells[2], "4.00s");
        assert_eq!(cells[3], "1.00s");
        assert_eq!(cells[4], "1m");
        assert_eq!(cells[9], "-");
    }
}
