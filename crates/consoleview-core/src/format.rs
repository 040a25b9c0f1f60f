//! Formatting utilities for task tables.
//!
//! All output is ASCII digits with fixed separators, independent of locale.

use crate::Duration;

/// Placeholder for a cell whose value has not been reported.
pub const ABSENT: &str = "-";

/// Render `value` with `precision` decimals, rounding exact ties away from zero.
///
/// `{:.N}` rounds a value that sits exactly halfway between two candidates to
/// the even one; table cells round it up in magnitude instead, so `1.125`
/// renders as `1.13` and `2.5` at precision 0 as `3`. Only values whose binary
/// expansion ends exactly on the tie digit are affected.
///
/// # Examples
///
/// ```
/// use consoleview_core::format::to_fixed;
///
/// assert_eq!(to_fixed(1.125, 2), "1.13");
/// assert_eq!(to_fixed(2.5, 0), "3");
/// assert_eq!(to_fixed(-0.125, 2), "-0.13");
/// assert_eq!(to_fixed(100.0 / 3.0, 2), "33.33");
/// ```
#[must_use]
pub fn to_fixed(value: f64, precision: usize) -> String {
    if !is_exact_tie(value, precision) {
        return format!("{value:.precision$}");
    }

    // one more digit is exact and ends in 5; drop it and carry upward
    let mut digits = format!("{:.*}", precision + 1, value.abs());
    digits.pop();
    if digits.ends_with('.') {
        digits.pop();
    }
    let rounded = increment_last_digit(&digits);
    if value.is_sign_negative() {
        format!("-{rounded}")
    } else {
        rounded
    }
}

/// Whether `value * 10^precision` lies exactly halfway between two integers.
fn is_exact_tie(value: f64, precision: usize) -> bool {
    const MANTISSA_BITS: u64 = 52;
    const EXPONENT_BIAS: i64 = 1_075;
    // no f64 has more than 1074 fractional binary digits
    if !value.is_finite() || precision >= 1_074 {
        return false;
    }

    let bits = value.to_bits();
    let biased = ((bits >> MANTISSA_BITS) & 0x7ff) as i64;
    let fraction = bits & ((1 << MANTISSA_BITS) - 1);
    let (mantissa, exponent) = if biased == 0 {
        (fraction, 1 - EXPONENT_BIAS)
    } else {
        (fraction | (1 << MANTISSA_BITS), biased - EXPONENT_BIAS)
    };
    if mantissa == 0 || exponent >= 0 {
        return false;
    }

    // value = mantissa * 2^exponent; value * 10^p * 2 is an odd integer exactly
    // when the factors of two in mantissa * 2^(p+1) cancel 2^-exponent
    i64::from(mantissa.trailing_zeros()) + precision as i64 + 1 == -exponent
}

/// Add one unit in the last place of a plain decimal string.
fn increment_last_digit(digits: &str) -> String {
    let mut bytes = digits.as_bytes().to_vec();
    for byte in bytes.iter_mut().rev() {
        match *byte {
            b'.' => {}
            b'9' => *byte = b'0',
            _ => {
                *byte += 1;
                return String::from_utf8_lossy(&bytes).into_owned();
            }
        }
    }
    format!("1{}", String::from_utf8_lossy(&bytes))
}

/// Format a percentage with two decimals.
///
/// # Examples
///
/// ```
/// use consoleview_core::format::format_percentage;
///
/// assert_eq!(format_percentage(40.0), "40.00%");
/// assert_eq!(format_percentage(100.0 / 3.0), "33.33%");
/// assert_eq!(format_percentage(0.125), "0.13%");
/// ```
#[must_use]
pub fn format_percentage(value: f64) -> String {
    format!("{}%", to_fixed(value, 2))
}

/// Format a duration with `precision` decimals on its leading unit.
///
/// # Examples
///
/// ```
/// use consoleview_core::{format::format_duration, Duration};
///
/// assert_eq!(format_duration(Duration::new(0, 125_000_000), 2), "125.00ms");
/// assert_eq!(format_duration(Duration::from_secs(65), 2), "1m 5s");
/// ```
#[must_use]
pub fn format_duration(duration: Duration, precision: usize) -> String {
    duration.to_string_with_precision(precision)
}

/// Format an optional duration, rendering absence as [`ABSENT`].
#[must_use]
pub fn format_optional_duration(duration: Option<Duration>, precision: usize) -> String {
    duration.map_or_else(|| ABSENT.to_string(), |d| format_duration(d, precision))
}

/// Pad string to fixed width (left-aligned), counting characters.
#[must_use]
pub fn pad_left(s: &str, width: usize) -> String {
    format!("{s:<width$}")
}

/// Pad string to fixed width (right-aligned), counting characters.
#[must_use]
pub fn pad_right(s: &str, width: usize) -> String {
    format!("{s:>width$}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_percentage_two_decimals() {
        assert_eq!(format_percentage(40.0), "40.00%");
        assert_eq!(format_percentage(100.0), "100.00%");
        assert_eq!(format_percentage(0.0), "0.00%");
    }

    #[test]
    fn test_to_fixed_rounds_ties_away_from_zero() {
        assert_eq!(to_fixed(1.125, 2), "1.13");
        assert_eq!(to_fixed(0.5, 0), "1");
        assert_eq!(to_fixed(-2.5, 0), "-3");
        assert_eq!(to_fixed(1.005, 2), "1.00"); // stored just below the tie
        assert_eq!(to_fixed(99.5, 0), "100");
        assert_eq!(to_fixed(0.0625, 3), "0.063");
    }

    #[test]
    fn test_to_fixed_matches_std_off_tie() {
        for value in [0.0, 1.0, 40.0, 2.345_678_901, 100.0 / 3.0, -7.25, 1e-7] {
            for precision in 0..=6 {
                if !is_exact_tie(value, precision) {
                    assert_eq!(to_fixed(value, precision), format!("{value:.precision$}"));
                }
            }
        }
    }

    #[test]
    fn test_is_exact_tie() {
        assert!(is_exact_tie(1.125, 2));
        assert!(!is_exact_tie(1.125, 3));
        assert!(!is_exact_tie(1.125, 1));
        assert!(is_exact_tie(2.5, 0));
        assert!(!is_exact_tie(3.0, 0));
        assert!(!is_exact_tie(0.0, 2));
        assert!(!is_exact_tie(f64::NAN, 2));
        assert!(!is_exact_tie(0.105, 2));
    }

    #[test]
    fn test_format_percentage_tie_rounds_up() {
        assert_eq!(format_percentage(0.125), "0.13%");
        assert_eq!(format_percentage(12.5), "12.50%");
    }

    #[test]
    fn test_format_percentage_negative() {
        assert_eq!(format_percentage(-12.5), "-12.50%");
    }

    #[test]
    fn test_format_duration_precision() {
        let d = Duration::new(2, 345_678_901);
        assert_eq!(format_duration(d, 2), "2.35s");
        assert_eq!(format_duration(d, 4), "2.3457s");
    }

    #[test]
    fn test_format_optional_duration_absent() {
        assert_eq!(format_optional_duration(None, 2), "-");
        assert_eq!(
            format_optional_duration(Some(Duration::from_secs(125)), 2),
            "2m 5s"
        );
    }

    #[test]
    fn test_pad_counts_chars_not_bytes() {
        // "µ" is two bytes but one column
        assert_eq!(pad_left("1.00µs", 8), "1.00µs  ");
        assert_eq!(pad_right("1.00µs", 8), "  1.00µs");
    }

    #[test]
    fn test_pad_never_truncates() {
        assert_eq!(pad_right("123456", 3), "123456");
    }
}
