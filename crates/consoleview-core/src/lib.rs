//! Core time types for consoleview.
//!
//! This crate provides the fixed-point values task telemetry is expressed in:
//! - [`Duration`]: a signed span, `seconds` plus a nanosecond remainder
//! - [`Timestamp`]: a point in time with the same representation
//! - [`format`]: deterministic rendering of durations and percentages
//! - [`ViewConfig`]: presentation settings loaded from TOML

pub mod config;
mod duration;
mod error;
pub mod format;
mod timestamp;

pub use config::{ConfigError, SortColumn, ViewConfig};
pub use duration::{Duration, DEFAULT_PRECISION};
pub use error::TimeError;
pub use timestamp::Timestamp;
