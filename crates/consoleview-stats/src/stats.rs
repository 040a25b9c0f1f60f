//! Typed task statistics derived from one raw sample.

use consoleview_core::{Duration, Timestamp};
use serde::Serialize;

use crate::error::StatsError;
use crate::raw::{RawTaskStats, RawTime};

/// Timing of a terminated task.
///
/// `dropped_at`, `total` and `idle` only exist together, so they are grouped
/// here and computed in one place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Lifetime {
    dropped_at: Timestamp,
    total: Duration,
    idle: Duration,
}

impl Lifetime {
    /// Compute the lifetime of a task dropped at `dropped_at`.
    ///
    /// `idle` is `total - busy - scheduled` and is not clamped: under sampling
    /// skew the accumulated busy and scheduled time can exceed the wall-clock
    /// span, and the negative result is passed through.
    pub fn new(
        created_at: Timestamp,
        dropped_at: Timestamp,
        busy: Duration,
        scheduled: Duration,
    ) -> Result<Self, StatsError> {
        let total = dropped_at.checked_duration_since(created_at)?;
        let idle = total.checked_sub(busy)?.checked_sub(scheduled)?;
        Ok(Self {
            dropped_at,
            total,
            idle,
        })
    }

    #[must_use]
    pub const fn dropped_at(&self) -> Timestamp {
        self.dropped_at
    }

    /// `dropped_at - created_at`.
    #[must_use]
    pub const fn total(&self) -> Duration {
        self.total
    }

    /// Lifetime not accounted for by busy or scheduled time. May be negative.
    #[must_use]
    pub const fn idle(&self) -> Duration {
        self.idle
    }
}

/// Statistics for one task at one sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStats {
    pub polls: u64,
    pub created_at: Timestamp,
    /// Present once the task has terminated.
    pub lifetime: Option<Lifetime>,
    pub busy: Duration,
    pub scheduled: Duration,
    pub last_poll_started: Option<Timestamp>,
    pub last_poll_ended: Option<Timestamp>,

    // === waker stats ===
    /// Times the task has been woken over its lifetime.
    pub wakes: u64,
    /// Times the task's waker has been cloned.
    pub waker_clones: u64,
    /// Times the task's waker has been dropped.
    pub waker_drops: u64,
    pub last_wake: Option<Timestamp>,
    /// Times the task has woken itself.
    pub self_wakes: u64,
}

impl TaskStats {
    #[must_use]
    pub fn dropped_at(&self) -> Option<Timestamp> {
        self.lifetime.map(|l| l.dropped_at())
    }

    #[must_use]
    pub fn total(&self) -> Option<Duration> {
        self.lifetime.map(|l| l.total())
    }

    #[must_use]
    pub fn idle(&self) -> Option<Duration> {
        self.lifetime.map(|l| l.idle())
    }

    /// Check if the task has terminated.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.lifetime.is_some()
    }
}

impl TryFrom<&RawTaskStats> for TaskStats {
    type Error = StatsError;

    fn try_from(raw: &RawTaskStats) -> Result<Self, Self::Error> {
        derive_stats(raw)
    }
}

fn timestamp(raw: RawTime) -> Result<Timestamp, StatsError> {
    Ok(Timestamp::try_new(raw.seconds, i64::from(raw.nanos))?)
}

fn duration(raw: RawTime) -> Result<Duration, StatsError> {
    Ok(Duration::try_new(raw.seconds, i64::from(raw.nanos))?)
}

fn optional_timestamp(raw: Option<RawTime>) -> Result<Option<Timestamp>, StatsError> {
    raw.map(timestamp).transpose()
}

/// Derive typed statistics from a raw sample.
///
/// Absent optional times stay absent; absent `busy`/`scheduled` accumulations
/// default to zero. `total` and `idle` are computed only for dropped tasks.
///
/// # Errors
///
/// Returns [`StatsError::MissingField`] if `created_at` is absent and
/// [`StatsError::Time`] if any value overflows.
pub fn derive_stats(raw: &RawTaskStats) -> Result<TaskStats, StatsError> {
    let created_at = raw
        .created_at
        .ok_or(StatsError::MissingField("created_at"))
        .and_then(timestamp)?;
    let poll_stats = raw.poll_stats.unwrap_or_default();

    let busy = poll_stats.busy_time.map_or(Ok(Duration::ZERO), duration)?;
    let scheduled = raw.scheduled_time.map_or(Ok(Duration::ZERO), duration)?;

    let lifetime = optional_timestamp(raw.dropped_at)?
        .map(|dropped_at| Lifetime::new(created_at, dropped_at, busy, scheduled))
        .transpose()?;

    if let Some(lifetime) = lifetime {
        if lifetime.idle().is_negative() {
            tracing::debug!(
                total = %lifetime.total(),
                busy = %busy,
                scheduled = %scheduled,
                "busy and scheduled time exceed task lifetime"
            );
        }
    }

    let stats = TaskStats {
        polls: poll_stats.polls,
        created_at,
        lifetime,
        busy,
        scheduled,
        last_poll_started: optional_timestamp(poll_stats.last_poll_started)?,
        last_poll_ended: optional_timestamp(poll_stats.last_poll_ended)?,
        wakes: raw.wakes,
        waker_clones: raw.waker_clones,
        waker_drops: raw.waker_drops,
        last_wake: optional_timestamp(raw.last_wake)?,
        self_wakes: raw.self_wakes,
    };
    tracing::trace!(
        polls = stats.polls,
        completed = stats.is_completed(),
        "derived task stats"
    );
    Ok(stats)
}
