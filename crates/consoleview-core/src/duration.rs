//! Fixed-point time span: whole seconds plus a nanosecond remainder.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

use crate::error::TimeError;
use crate::format::to_fixed;

pub(crate) const NANOS_PER_SEC: i64 = 1_000_000_000;

/// Precision used by `Display` when none is given with `{:.N}`.
pub const DEFAULT_PRECISION: usize = 2;

/// Fold a nanosecond count of any sign into `[0, 1e9)`, carrying whole seconds.
///
/// The sign of the span ends up entirely in `seconds`: `(0, -500_000_000)`
/// becomes `(-1, 500_000_000)`.
pub(crate) fn normalize(
    seconds: i64,
    nanos: i64,
    operation: &'static str,
) -> Result<(i64, i32), TimeError> {
    let carry = nanos.div_euclid(NANOS_PER_SEC);
    let nanos = nanos.rem_euclid(NANOS_PER_SEC);
    let seconds = seconds
        .checked_add(carry)
        .ok_or(TimeError::overflow(operation))?;
    Ok((seconds, nanos as i32))
}

/// Wire shape shared by [`Duration`] and [`Timestamp`](crate::Timestamp).
///
/// Deserialization goes through the normalizing constructor, so a value read
/// back from JSON always satisfies the nanos invariant.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub(crate) struct Parts {
    pub(crate) seconds: i64,
    pub(crate) nanos: i64,
}

/// A signed span of time with nanosecond resolution.
///
/// `nanos` is always in `[0, 1_000_000_000)`; the sign lives in `seconds`.
/// Ordering is lexicographic on `(seconds, nanos)`, which the field order of
/// the derive provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "Parts", into = "Parts")]
pub struct Duration {
    seconds: i64,
    nanos: i32,
}

impl Duration {
    /// Zero-length span.
    pub const ZERO: Self = Self {
        seconds: 0,
        nanos: 0,
    };

    /// Create a normalized duration.
    ///
    /// # Panics
    ///
    /// Panics if carrying `nanos` into `seconds` overflows `i64`. Use
    /// [`Duration::try_new`] for untrusted input.
    #[must_use]
    pub fn new(seconds: i64, nanos: i32) -> Self {
        Self::try_new(seconds, i64::from(nanos)).expect("overflow in Duration::new")
    }

    /// Create a normalized duration, reporting seconds overflow as an error.
    pub fn try_new(seconds: i64, nanos: i64) -> Result<Self, TimeError> {
        let (seconds, nanos) = normalize(seconds, nanos, "construct")?;
        Ok(Self { seconds, nanos })
    }

    /// Create a duration from a whole number of seconds.
    #[must_use]
    pub const fn from_secs(seconds: i64) -> Self {
        Self { seconds, nanos: 0 }
    }

    /// Create a duration from milliseconds (floor division).
    #[must_use]
    pub fn from_millis(millis: i64) -> Self {
        Self {
            seconds: millis.div_euclid(1_000),
            nanos: (millis.rem_euclid(1_000) * 1_000_000) as i32,
        }
    }

    /// Create a duration from nanoseconds (floor division).
    #[must_use]
    pub fn from_nanos(nanos: i64) -> Self {
        Self {
            seconds: nanos.div_euclid(NANOS_PER_SEC),
            nanos: nanos.rem_euclid(NANOS_PER_SEC) as i32,
        }
    }

    /// Create a duration from a nanosecond count wider than `i64`.
    pub fn try_from_nanos(nanos: i128) -> Result<Self, TimeError> {
        let per_sec = i128::from(NANOS_PER_SEC);
        let seconds = i64::try_from(nanos.div_euclid(per_sec))
            .map_err(|_| TimeError::overflow("from_nanos"))?;
        Ok(Self {
            seconds,
            nanos: nanos.rem_euclid(per_sec) as i32,
        })
    }

    /// Whole seconds, carrying the sign of the span.
    #[must_use]
    pub const fn seconds(&self) -> i64 {
        self.seconds
    }

    /// Sub-second remainder in `[0, 1_000_000_000)`.
    #[must_use]
    pub const fn nanos(&self) -> i32 {
        self.nanos
    }

    /// Check if the span is below zero.
    #[must_use]
    pub const fn is_negative(&self) -> bool {
        self.seconds < 0
    }

    /// Check if the span is exactly zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.seconds == 0 && self.nanos == 0
    }

    /// Sum of two spans.
    pub fn checked_add(self, rhs: Self) -> Result<Self, TimeError> {
        let seconds = self
            .seconds
            .checked_add(rhs.seconds)
            .ok_or(TimeError::overflow("add"))?;
        let (seconds, nanos) = normalize(
            seconds,
            i64::from(self.nanos) + i64::from(rhs.nanos),
            "add",
        )?;
        Ok(Self { seconds, nanos })
    }

    /// Difference of two spans.
    pub fn checked_sub(self, rhs: Self) -> Result<Self, TimeError> {
        let seconds = self
            .seconds
            .checked_sub(rhs.seconds)
            .ok_or(TimeError::overflow("subtract"))?;
        let (seconds, nanos) = normalize(
            seconds,
            i64::from(self.nanos) - i64::from(rhs.nanos),
            "subtract",
        )?;
        Ok(Self { seconds, nanos })
    }

    /// Days, ignoring the sub-second remainder.
    #[must_use]
    pub fn as_days(&self) -> f64 {
        self.seconds as f64 / 86_400.0
    }

    /// Hours, ignoring the sub-second remainder.
    #[must_use]
    pub fn as_hours(&self) -> f64 {
        self.seconds as f64 / 3_600.0
    }

    /// Minutes, ignoring the sub-second remainder.
    #[must_use]
    pub fn as_minutes(&self) -> f64 {
        self.seconds as f64 / 60.0
    }

    #[must_use]
    pub fn as_secs_f64(&self) -> f64 {
        self.seconds as f64 + f64::from(self.nanos) / 1e9
    }

    #[must_use]
    pub fn as_millis_f64(&self) -> f64 {
        self.seconds as f64 * 1_000.0 + f64::from(self.nanos) / 1e6
    }

    #[must_use]
    pub fn as_micros_f64(&self) -> f64 {
        self.seconds as f64 * 1e6 + f64::from(self.nanos) / 1_000.0
    }

    /// Magnitude in microseconds, used as a column sort key by table views.
    ///
    /// Lossy past ~2^53 µs (about 285 years); use `Ord` where exact ordering
    /// matters.
    #[must_use]
    pub fn sort_key(&self) -> f64 {
        self.as_micros_f64()
    }

    /// Render with the given number of decimals on the leading unit.
    ///
    /// Spans of a minute or more print up to two whole units (`"1m 5s"`);
    /// shorter spans print the most significant unit with `precision`
    /// decimals (`"125.00ms"`), rounding exact ties away from zero.
    #[must_use]
    pub fn to_string_with_precision(&self, precision: usize) -> String {
        let total_seconds = self.as_secs_f64();
        let ladder = [
            (self.as_days(), "d"),
            (self.as_hours() % 24.0, "h"),
            (self.as_minutes() % 60.0, "m"),
            (total_seconds % 60.0, "s"),
            (self.as_millis_f64() % 1_000.0, "ms"),
            (self.as_micros_f64() % 1_000.0, "µs"),
            (f64::from(self.nanos), "ns"),
        ];

        if total_seconds >= 60.0 {
            let parts: Vec<String> = ladder
                .iter()
                .filter(|(value, _)| value.floor() > 0.0)
                .take(2)
                .map(|(value, unit)| format!("{}{unit}", value.floor() as i64))
                .collect();
            if !parts.is_empty() {
                return parts.join(" ");
            }
        } else if let Some((value, unit)) = ladder.iter().find(|(value, _)| value.floor() > 0.0) {
            return format!("{}{unit}", to_fixed(*value, precision));
        }

        format!("{}ns", self.nanos)
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f.precision().unwrap_or(DEFAULT_PRECISION);
        f.write_str(&self.to_string_with_precision(precision))
    }
}

impl Add for Duration {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        self.checked_add(rhs).expect("overflow when adding durations")
    }
}

impl Sub for Duration {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self.checked_sub(rhs)
            .expect("overflow when subtracting durations")
    }
}

impl TryFrom<std::time::Duration> for Duration {
    type Error = TimeError;

    fn try_from(d: std::time::Duration) -> Result<Self, Self::Error> {
        let seconds = i64::try_from(d.as_secs()).map_err(|_| TimeError::overflow("convert"))?;
        Ok(Self {
            seconds,
            nanos: d.subsec_nanos() as i32,
        })
    }
}

impl TryFrom<Parts> for Duration {
    type Error = TimeError;

    fn try_from(parts: Parts) -> Result<Self, Self::Error> {
        Self::try_new(parts.seconds, parts.nanos)
    }
}

impl From<Duration> for Parts {
    fn from(d: Duration) -> Self {
        Self {
            seconds: d.seconds,
            nanos: i64::from(d.nanos),
        }
    }
}
