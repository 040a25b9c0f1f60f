//! Raw sample shapes as produced by the wire-decoding layer.
//!
//! Field names follow the runtime's instrumentation protocol in camelCase
//! JSON. Every time value is an unnormalized `{ seconds, nanos }` pair.

use serde::{Deserialize, Serialize};

/// A `{ seconds, nanos }` pair, used for both timestamps and durations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RawTime {
    pub seconds: i64,
    #[serde(default)]
    pub nanos: i32,
}

impl RawTime {
    #[must_use]
    pub const fn new(seconds: i64, nanos: i32) -> Self {
        Self { seconds, nanos }
    }
}

/// Poll counters and timings reported for one task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawPollStats {
    /// Total number of times the task has been polled.
    pub polls: u64,
    pub last_poll_started: Option<RawTime>,
    pub last_poll_ended: Option<RawTime>,
    /// Accumulated time spent inside `poll`.
    pub busy_time: Option<RawTime>,
}

/// One task's raw stats sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawTaskStats {
    /// When the task was spawned. Always reported by the runtime.
    pub created_at: Option<RawTime>,
    /// When the task was dropped, once it has terminated.
    pub dropped_at: Option<RawTime>,
    pub wakes: u64,
    pub waker_clones: u64,
    pub waker_drops: u64,
    pub last_wake: Option<RawTime>,
    pub poll_stats: Option<RawPollStats>,
    /// Number of times the task woke itself from inside `poll`.
    pub self_wakes: u64,
    /// Accumulated time spent runnable but not running.
    pub scheduled_time: Option<RawTime>,
}

/// How a field's name is carried: inline, or as an index into its metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RawFieldName {
    StrName(String),
    NameIdx(u64),
}

/// A field value as recorded by the instrumentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RawFieldValue {
    #[serde(rename = "debugVal")]
    Debug(String),
    #[serde(rename = "strVal")]
    Str(String),
    #[serde(rename = "u64Val")]
    U64(u64),
    #[serde(rename = "i64Val")]
    I64(i64),
    #[serde(rename = "boolVal")]
    Bool(bool),
}

/// One key/value field attached to a task span.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawField {
    pub name: Option<RawFieldName>,
    pub value: Option<RawFieldValue>,
    /// Metadata the name index refers into.
    pub metadata_id: Option<u64>,
}

/// Call-site metadata: the field names a `NameIdx` indexes into.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Metadata {
    pub id: u64,
    pub field_names: Vec<String>,
}

/// A source location as reported by the instrumentation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Location {
    pub file: Option<String>,
    pub module_path: Option<String>,
    pub line: Option<u32>,
    pub column: Option<u32>,
}
