//! Error types for time arithmetic.

use thiserror::Error;

/// Errors produced by checked [`Duration`](crate::Duration) and
/// [`Timestamp`](crate::Timestamp) arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TimeError {
    /// The whole-seconds counter left the `i64` range.
    #[error("arithmetic overflow in {operation}")]
    ArithmeticOverflow {
        /// Operation that overflowed (e.g. `"add"`).
        operation: &'static str,
    },
}

impl TimeError {
    pub(crate) const fn overflow(operation: &'static str) -> Self {
        Self::ArithmeticOverflow { operation }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overflow_display() {
        let err = TimeError::overflow("subtract");
        assert_eq!(err.to_string(), "arithmetic overflow in subtract");
    }

    #[test]
    fn test_overflow_debug() {
        let debug_str = format!("{:?}", TimeError::overflow("add"));
        assert!(debug_str.contains("ArithmeticOverflow"));
    }
}
