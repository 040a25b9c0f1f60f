//! Time-bucket shares of a task's elapsed time.

use consoleview_core::{Duration, TimeError, Timestamp};
use serde::Serialize;

use crate::stats::TaskStats;

/// Share of `elapsed` taken by `part`, in percent.
///
/// Returns `0.0` when `elapsed` is zero rather than NaN or infinity.
#[must_use]
pub fn percent_of(part: Duration, elapsed: Duration) -> f64 {
    let elapsed_us = elapsed.as_micros_f64();
    if elapsed_us == 0.0 {
        return 0.0;
    }
    part.as_micros_f64() / elapsed_us * 100.0
}

/// Denominator for a task's percentages.
///
/// The total lifetime for a terminated task, otherwise the span from creation
/// up to `last_updated_at`.
pub fn elapsed_reference(
    stats: &TaskStats,
    last_updated_at: Timestamp,
) -> Result<Duration, TimeError> {
    match stats.total() {
        Some(total) => Ok(total),
        None => last_updated_at.checked_duration_since(stats.created_at),
    }
}

/// Busy, scheduled and idle time of a task against its elapsed reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeBuckets {
    pub elapsed: Duration,
    pub busy: Duration,
    pub scheduled: Duration,
    /// Derived idle for terminated tasks; `elapsed - busy - scheduled` so
    /// far for running ones.
    pub idle: Duration,
}

impl TimeBuckets {
    /// Bucket a task's time as of `last_updated_at`.
    pub fn new(stats: &TaskStats, last_updated_at: Timestamp) -> Result<Self, TimeError> {
        let elapsed = elapsed_reference(stats, last_updated_at)?;
        let idle = match stats.idle() {
            Some(idle) => idle,
            None => elapsed.checked_sub(stats.busy)?.checked_sub(stats.scheduled)?,
        };
        Ok(Self {
            elapsed,
            busy: stats.busy,
            scheduled: stats.scheduled,
            idle,
        })
    }

    /// Percent shares of each bucket.
    #[must_use]
    pub fn shares(&self) -> TimeShares {
        TimeShares {
            busy: percent_of(self.busy, self.elapsed),
            scheduled: percent_of(self.scheduled, self.elapsed),
            idle: percent_of(self.idle, self.elapsed),
        }
    }
}

/// Percent of elapsed time spent in each bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimeShares {
    pub busy: f64,
    pub scheduled: f64,
    pub idle: f64,
}
