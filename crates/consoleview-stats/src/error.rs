//! Error types for stats derivation.

use consoleview_core::TimeError;
use thiserror::Error;

/// Errors that can occur while deriving task statistics from a raw sample.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatsError {
    /// A field the runtime always reports was absent.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// Time arithmetic left the representable range.
    #[error(transparent)]
    Time(#[from] TimeError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use consoleview_core::Duration;

    #[test]
    fn test_missing_field_display() {
        let err = StatsError::MissingField("created_at");
        assert_eq!(err.to_string(), "missing required field: created_at");
    }

    #[test]
    fn test_time_error_from() {
        let time_err = Duration::try_new(i64::MAX, 1_000_000_000).unwrap_err();
        let err: StatsError = time_err.into();
        assert!(matches!(err, StatsError::Time(_)));
        assert_eq!(err.to_string(), "arithmetic overflow in construct");
    }
}
