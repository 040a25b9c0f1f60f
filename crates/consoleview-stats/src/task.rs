//! Task records: a task's identity and labels joined with its derived stats.

use consoleview_core::{SortColumn, Timestamp};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::error::StatsError;
use crate::field::{find_field, format_location, Field, FieldName};
use crate::raw::{Location, Metadata, RawField, RawTaskStats, RawTime};
use crate::stats::{derive_stats, TaskStats};
use crate::summary::TaskSummary;

/// One task as delivered by the wire-decoding layer.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawTask {
    pub id: u64,
    pub metadata_id: Option<u64>,
    pub fields: Vec<RawField>,
    pub location: Option<Location>,
    pub stats: RawTaskStats,
}

/// A recorded set of task samples and the time they were taken.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Snapshot {
    pub last_updated_at: RawTime,
    pub metadata: Vec<Metadata>,
    pub tasks: Vec<RawTask>,
}

impl Snapshot {
    /// Time the snapshot was taken.
    pub fn last_updated_at(&self) -> Result<Timestamp, StatsError> {
        let raw = self.last_updated_at;
        Ok(Timestamp::try_new(raw.seconds, i64::from(raw.nanos))?)
    }

    /// Build records for every task, skipping those that fail to derive.
    pub fn records(&self) -> Result<Vec<TaskRecord>, StatsError> {
        let last_updated_at = self.last_updated_at()?;
        let records = self
            .tasks
            .iter()
            .filter_map(|task| {
                match TaskRecord::new(task, &self.metadata, last_updated_at) {
                    Ok(record) => Some(record),
                    Err(e) => {
                        tracing::warn!(task_id = task.id, error = %e, "skipping task");
                        None
                    }
                }
            })
            .collect();
        Ok(records)
    }
}

/// A task's identity, labels and derived metrics as of one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    pub id: u64,
    pub name: Option<String>,
    pub location: String,
    pub fields: Vec<Field>,
    pub stats: TaskStats,
    pub summary: TaskSummary,
    pub last_updated_at: Timestamp,
}

impl TaskRecord {
    /// Resolve labels and derive stats for `task`.
    pub fn new(
        task: &RawTask,
        metadata: &[Metadata],
        last_updated_at: Timestamp,
    ) -> Result<Self, StatsError> {
        // without metadata only inline-named fields resolve
        let empty = Metadata::default();
        let meta = task
            .metadata_id
            .and_then(|id| metadata.iter().find(|meta| meta.id == id))
            .unwrap_or(&empty);
        let fields: Vec<Field> = task
            .fields
            .iter()
            .filter_map(|raw| Field::from_raw(raw, meta))
            .collect();

        let name = find_field(&fields, FieldName::Name).map(ToString::to_string);
        let location = find_field(&fields, FieldName::SpawnLocation).map_or_else(
            || format_location(task.location.as_ref()),
            ToString::to_string,
        );

        let stats = derive_stats(&task.stats)?;
        let summary = TaskSummary::new(&stats, last_updated_at)?;

        Ok(Self {
            id: task.id,
            name,
            location,
            fields,
            stats,
            summary,
            last_updated_at,
        })
    }

    /// Compare two records by `column`, ascending, with the task id as tiebreak.
    ///
    /// Durations compare exactly on `(seconds, nanos)`.
    #[must_use]
    pub fn cmp_by(&self, other: &Self, column: SortColumn) -> Ordering {
        let (a, b) = (&self.summary.buckets, &other.summary.buckets);
        let primary = match column {
            SortColumn::Id => Ordering::Equal,
            SortColumn::Polls => self.summary.polls.cmp(&other.summary.polls),
            SortColumn::Total => a.elapsed.cmp(&b.elapsed),
            SortColumn::Busy => a.busy.cmp(&b.busy),
            SortColumn::Scheduled => a.scheduled.cmp(&b.scheduled),
            SortColumn::Idle => a.idle.cmp(&b.idle),
        };
        primary.then_with(|| self.id.cmp(&other.id))
    }
}

/// Sort records by `column`.
pub fn sort_records(records: &mut [TaskRecord], column: SortColumn, descending: bool) {
    records.sort_by(|a, b| {
        let ordering = a.cmp_by(b, column);
        if descending {
            ordering.reverse()
        } else {
            ordering
        }
    });
}
