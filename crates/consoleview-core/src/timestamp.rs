//! Points in time, sharing the normalized representation of [`Duration`].

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::duration::{normalize, Duration, Parts};
use crate::error::TimeError;

/// A point in time, epoch- or process-relative depending on the source.
///
/// Subtracting two timestamps yields a [`Duration`]; adding a duration to a
/// timestamp yields a timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "Parts", into = "Parts")]
pub struct Timestamp {
    seconds: i64,
    nanos: i32,
}

impl Timestamp {
    /// The zero point of the clock the timestamp was taken from.
    pub const EPOCH: Self = Self {
        seconds: 0,
        nanos: 0,
    };

    /// Create a normalized timestamp.
    ///
    /// # Panics
    ///
    /// Panics if carrying `nanos` into `seconds` overflows `i64`.
    #[must_use]
    pub fn new(seconds: i64, nanos: i32) -> Self {
        Self::try_new(seconds, i64::from(nanos)).expect("overflow in Timestamp::new")
    }

    /// Create a normalized timestamp, reporting seconds overflow as an error.
    pub fn try_new(seconds: i64, nanos: i64) -> Result<Self, TimeError> {
        let (seconds, nanos) = normalize(seconds, nanos, "construct")?;
        Ok(Self { seconds, nanos })
    }

    /// Wall-clock time now, at millisecond resolution.
    #[must_use]
    pub fn now() -> Self {
        Self::from_system_time(SystemTime::now())
    }

    /// Timestamp from milliseconds since the Unix epoch.
    #[must_use]
    pub fn from_epoch_millis(millis: i64) -> Self {
        let offset = Duration::from_millis(millis);
        Self {
            seconds: offset.seconds(),
            nanos: offset.nanos(),
        }
    }

    /// Timestamp from a system clock reading, truncated to milliseconds.
    #[must_use]
    pub fn from_system_time(time: SystemTime) -> Self {
        let millis = match time.duration_since(UNIX_EPOCH) {
            Ok(after) => i64::try_from(after.as_millis()).unwrap_or(i64::MAX),
            Err(before) => i64::try_from(before.duration().as_millis())
                .map_or(i64::MIN, |ms| -ms),
        };
        Self::from_epoch_millis(millis)
    }

    #[must_use]
    pub const fn seconds(&self) -> i64 {
        self.seconds
    }

    #[must_use]
    pub const fn nanos(&self) -> i32 {
        self.nanos
    }

    /// Offset of this timestamp from [`Timestamp::EPOCH`].
    #[must_use]
    pub fn since_epoch(&self) -> Duration {
        Duration::new(self.seconds, self.nanos)
    }

    /// Span from `earlier` to `self`; negative if `earlier` is later.
    pub fn checked_duration_since(self, earlier: Self) -> Result<Duration, TimeError> {
        self.since_epoch().checked_sub(earlier.since_epoch())
    }

    pub fn checked_add(self, offset: Duration) -> Result<Self, TimeError> {
        let moved = self.since_epoch().checked_add(offset)?;
        Ok(Self {
            seconds: moved.seconds(),
            nanos: moved.nanos(),
        })
    }

    pub fn checked_sub(self, offset: Duration) -> Result<Self, TimeError> {
        let moved = self.since_epoch().checked_sub(offset)?;
        Ok(Self {
            seconds: moved.seconds(),
            nanos: moved.nanos(),
        })
    }
}

impl Sub for Timestamp {
    type Output = Duration;

    fn sub(self, rhs: Self) -> Self::Output {
        self.checked_duration_since(rhs)
            .expect("overflow when subtracting timestamps")
    }
}

impl Add<Duration> for Timestamp {
    type Output = Self;

    fn add(self, rhs: Duration) -> Self::Output {
        self.checked_add(rhs)
            .expect("overflow when adding duration to timestamp")
    }
}

impl Sub<Duration> for Timestamp {
    type Output = Self;

    fn sub(self, rhs: Duration) -> Self::Output {
        self.checked_sub(rhs)
            .expect("overflow when subtracting duration from timestamp")
    }
}

impl TryFrom<Parts> for Timestamp {
    type Error = TimeError;

    fn try_from(parts: Parts) -> Result<Self, Self::Error> {
        Self::try_new(parts.seconds, parts.nanos)
    }
}

impl From<Timestamp> for Parts {
    fn from(t: Timestamp) -> Self {
        Self {
            seconds: t.seconds,
            nanos: i64::from(t.nanos),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_difference_is_duration() {
        let created = Timestamp::new(100, 750_000_000);
        let dropped = Timestamp::new(110, 250_000_000);
        assert_eq!(dropped - created, Duration::new(9, 500_000_000));
        assert_eq!(created - dropped, Duration::new(-10, 500_000_000));
    }

    #[test]
    fn test_timestamp_plus_duration() {
        let t = Timestamp::new(10, 900_000_000) + Duration::new(0, 200_000_000);
        assert_eq!(t, Timestamp::new(11, 100_000_000));
        assert_eq!(t - Duration::new(1, 0), Timestamp::new(10, 100_000_000));
    }

    #[test]
    fn test_from_epoch_millis() {
        let t = Timestamp::from_epoch_millis(1_700_000_000_123);
        assert_eq!(t.seconds(), 1_700_000_000);
        assert_eq!(t.nanos(), 123_000_000);
    }

    #[test]
    fn test_from_epoch_millis_before_epoch() {
        let t = Timestamp::from_epoch_millis(-1_500);
        assert_eq!(t.seconds(), -2);
        assert_eq!(t.nanos(), 500_000_000);
    }

    #[test]
    fn test_from_system_time_truncates_to_millis() {
        let time = UNIX_EPOCH + std::time::Duration::new(5, 123_456_789);
        assert_eq!(Timestamp::from_system_time(time), Timestamp::new(5, 123_000_000));
    }

    #[test]
    fn test_now_is_after_2020() {
        assert!(Timestamp::now() > Timestamp::new(1_577_836_800, 0));
    }

    #[test]
    fn test_checked_duration_since_overflow() {
        let late = Timestamp::new(i64::MAX, 0);
        let early = Timestamp::new(-1, 0);
        assert!(late.checked_duration_since(early).is_err());
    }
}
