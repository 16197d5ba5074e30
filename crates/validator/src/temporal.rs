//! Duration syntax and time layouts
//!
//! Durations use the compact unit syntax (`"1h30m"`, `"5.5s"`, `"-300ms"`,
//! `"2us"`, `"0"`). Valid units are `ns`, `us` (or `µs`), `ms`, `s`, `m`
//! and `h`. A duration must fit in a signed 64-bit nanosecond count.
//!
//! ```rust
//! use chrono::TimeDelta;
//! use rulechain::temporal::{format_duration, parse_duration};
//!
//! let d = parse_duration("1h30m").unwrap();
//! assert_eq!(d, TimeDelta::minutes(90));
//! assert_eq!(format_duration(d), "1h30m0s");
//! assert_eq!(format_duration(TimeDelta::milliseconds(1500)), "1.5s");
//! ```

use std::fmt::{self, Write as _};

use chrono::{Datelike, DateTime, FixedOffset, NaiveDate, NaiveDateTime, SecondsFormat, TimeDelta};

use crate::foundation::Render;

const NANOS_PER_SECOND: i128 = 1_000_000_000;

// ============================================================================
// DURATION SYNTAX
// ============================================================================

/// Why a duration string was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DurationSyntaxError {
    /// The string does not follow the grammar.
    #[error("malformed duration")]
    Malformed,
    /// The value does not fit in 64-bit nanoseconds.
    #[error("duration overflows 64-bit nanoseconds")]
    Overflow,
}

/// Total signed nanoseconds of a duration.
pub fn total_nanos(d: TimeDelta) -> i128 {
    i128::from(d.num_seconds()) * NANOS_PER_SECOND + i128::from(d.subsec_nanos())
}

/// Builds a duration from nanoseconds, if it fits in `i64` nanoseconds.
pub fn from_nanos(nanos: i128) -> Option<TimeDelta> {
    i64::try_from(nanos).ok().map(TimeDelta::nanoseconds)
}

fn unit_nanos(unit: &str) -> Option<u128> {
    Some(match unit {
        "ns" => 1,
        "us" | "µs" | "μs" => 1_000,
        "ms" => 1_000_000,
        "s" => 1_000_000_000,
        "m" => 60 * 1_000_000_000,
        "h" => 3_600 * 1_000_000_000,
        _ => return None,
    })
}

/// Parses the compact duration syntax.
pub fn parse_duration(src: &str) -> Result<TimeDelta, DurationSyntaxError> {
    use DurationSyntaxError::{Malformed, Overflow};

    let (negative, mut rest) = match src.as_bytes().first() {
        Some(b'-') => (true, &src[1..]),
        Some(b'+') => (false, &src[1..]),
        _ => (false, src),
    };
    if rest == "0" {
        return Ok(TimeDelta::zero());
    }
    if rest.is_empty() {
        return Err(Malformed);
    }

    let mut total: u128 = 0;
    while !rest.is_empty() {
        let int_end = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
        let (int_digits, after_int) = rest.split_at(int_end);

        let (frac_digits, after_frac) = match after_int.strip_prefix('.') {
            Some(tail) => {
                let end = tail.find(|c: char| !c.is_ascii_digit()).unwrap_or(tail.len());
                tail.split_at(end)
            }
            None => ("", after_int),
        };
        if int_digits.is_empty() && frac_digits.is_empty() {
            return Err(Malformed);
        }

        let unit_end = after_frac
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(after_frac.len());
        let (unit, tail) = after_frac.split_at(unit_end);
        let scale = unit_nanos(unit).ok_or(Malformed)?;

        let whole = int_digits.chars().try_fold(0_u128, |acc, c| {
            acc.checked_mul(10)?.checked_add(u128::from(c.to_digit(10)?))
        });
        let mut nanos = whole.and_then(|w| w.checked_mul(scale)).ok_or(Overflow)?;

        // Digits beyond nanosecond resolution of the largest unit are ignored.
        let mut place = scale;
        for c in frac_digits.chars().take(13) {
            place /= 10;
            let digit = u128::from(c.to_digit(10).ok_or(Malformed)?);
            nanos = nanos.checked_add(digit * place).ok_or(Overflow)?;
        }

        total = total.checked_add(nanos).ok_or(Overflow)?;
        rest = tail;
    }

    let signed = i128::try_from(total).map_err(|_| Overflow)?;
    let signed = if negative { -signed } else { signed };
    from_nanos(signed).ok_or(Overflow)
}

/// Writes `value / 10^precision` with trailing fractional zeros trimmed.
fn write_scaled(out: &mut String, value: u128, precision: u32) {
    let div = 10_u128.pow(precision);
    let whole = value / div;
    let frac = value % div;
    let _ = write!(out, "{whole}");
    if frac != 0 {
        let digits = format!("{frac:0width$}", width = precision as usize);
        out.push('.');
        out.push_str(digits.trim_end_matches('0'));
    }
}

/// Formats a duration in the compact syntax, e.g. `1h30m0s`, `1.5ms`, `0s`.
pub fn format_duration(d: TimeDelta) -> String {
    let nanos = total_nanos(d);
    let magnitude = nanos.unsigned_abs();
    let mut out = String::new();
    if nanos < 0 {
        out.push('-');
    }

    if magnitude == 0 {
        return "0s".into();
    }
    if magnitude < 1_000 {
        let _ = write!(out, "{magnitude}ns");
        return out;
    }
    if magnitude < 1_000_000 {
        write_scaled(&mut out, magnitude, 3);
        out.push_str("µs");
        return out;
    }
    if magnitude < 1_000_000_000 {
        write_scaled(&mut out, magnitude, 6);
        out.push_str("ms");
        return out;
    }

    let seconds = magnitude / 1_000_000_000;
    let hours = seconds / 3_600;
    let minutes = (seconds / 60) % 60;
    if hours > 0 {
        let _ = write!(out, "{hours}h");
    }
    if hours > 0 || minutes > 0 {
        let _ = write!(out, "{minutes}m");
    }
    write_scaled(&mut out, magnitude % 60_000_000_000, 9);
    out.push('s');
    out
}

impl Render for TimeDelta {
    fn render(&self) -> String {
        format_duration(*self)
    }
}

// ============================================================================
// TIME LAYOUTS
// ============================================================================

/// A textual time representation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Layout {
    /// `2006-01-02T15:04:05Z07:00`
    Rfc3339,
    /// `Mon, 02 Jan 2006 15:04:05 -0700`
    Rfc2822,
    /// A `strftime` format. Without an offset the time is taken as UTC;
    /// without a time of day it is midnight.
    Format(String),
}

impl Layout {
    /// A custom `strftime` layout.
    pub fn format(spec: impl Into<String>) -> Self {
        Self::Format(spec.into())
    }

    /// Parses `src` with this layout.
    pub fn parse(&self, src: &str) -> Option<DateTime<FixedOffset>> {
        match self {
            Self::Rfc3339 => DateTime::parse_from_rfc3339(src).ok(),
            Self::Rfc2822 => DateTime::parse_from_rfc2822(src).ok(),
            Self::Format(spec) => DateTime::parse_from_str(src, spec)
                .ok()
                .or_else(|| {
                    NaiveDateTime::parse_from_str(src, spec)
                        .ok()
                        .map(|naive| naive.and_utc().fixed_offset())
                })
                .or_else(|| {
                    NaiveDate::parse_from_str(src, spec)
                        .ok()
                        .and_then(|date| date.and_hms_opt(0, 0, 0))
                        .map(|naive| naive.and_utc().fixed_offset())
                }),
        }
    }

    /// Appends `time` formatted with this layout.
    ///
    /// Fails for RFC 2822 when the year falls outside `0..=9999`.
    pub fn write(&self, time: &DateTime<FixedOffset>, out: &mut String) -> fmt::Result {
        match self {
            Self::Rfc3339 => {
                out.push_str(&time.to_rfc3339_opts(SecondsFormat::AutoSi, true));
                Ok(())
            }
            Self::Rfc2822 => {
                if !(0..=9999).contains(&time.year()) {
                    return Err(fmt::Error);
                }
                out.push_str(&time.to_rfc2822());
                Ok(())
            }
            Self::Format(spec) => write!(out, "{}", time.format(spec)),
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rfc3339 => f.write_str("RFC3339"),
            Self::Rfc2822 => f.write_str("RFC2822"),
            Self::Format(spec) => write!(f, "{spec:?}"),
        }
    }
}

impl Render for Layout {
    fn render(&self) -> String {
        self.to_string()
    }
}

impl Render for DateTime<FixedOffset> {
    fn render(&self) -> String {
        self.to_rfc3339_opts(SecondsFormat::AutoSi, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("0", TimeDelta::zero())]
    #[case("5.5s", TimeDelta::milliseconds(5_500))]
    #[case("1h30m", TimeDelta::minutes(90))]
    #[case("-300ms", TimeDelta::milliseconds(-300))]
    #[case("2us", TimeDelta::microseconds(2))]
    #[case("2µs", TimeDelta::microseconds(2))]
    #[case("+1m", TimeDelta::minutes(1))]
    #[case(".5s", TimeDelta::milliseconds(500))]
    #[case("1.000000001s", TimeDelta::nanoseconds(1_000_000_001))]
    #[case("1h1m1s1ms1us1ns", TimeDelta::nanoseconds(3_661_001_001_001))]
    fn parses_valid_durations(#[case] src: &str, #[case] expected: TimeDelta) {
        assert_eq!(parse_duration(src), Ok(expected));
    }

    #[rstest]
    #[case("")]
    #[case("-")]
    #[case("5")]
    #[case("5x")]
    #[case("s")]
    #[case(".s")]
    #[case("1h-30m")]
    fn rejects_malformed_durations(#[case] src: &str) {
        assert_eq!(parse_duration(src), Err(DurationSyntaxError::Malformed));
    }

    #[test]
    fn rejects_overflowing_durations() {
        assert_eq!(
            parse_duration("9999999999h"),
            Err(DurationSyntaxError::Overflow)
        );
        assert_eq!(
            parse_duration("99999999999999999999999999999999999999999h"),
            Err(DurationSyntaxError::Overflow)
        );
    }

    #[rstest]
    #[case(TimeDelta::zero(), "0s")]
    #[case(TimeDelta::nanoseconds(100), "100ns")]
    #[case(TimeDelta::nanoseconds(1_500), "1.5µs")]
    #[case(TimeDelta::microseconds(1_500), "1.5ms")]
    #[case(TimeDelta::milliseconds(5_500), "5.5s")]
    #[case(TimeDelta::minutes(90), "1h30m0s")]
    #[case(TimeDelta::milliseconds(-60_500), "-1m0.5s")]
    #[case(TimeDelta::hours(2), "2h0m0s")]
    fn formats_durations(#[case] d: TimeDelta, #[case] expected: &str) {
        assert_eq!(format_duration(d), expected);
    }

    #[test]
    fn layouts_parse_and_write() {
        let rfc = Layout::Rfc3339.parse("2024-03-01T10:00:00Z").unwrap();
        let mut out = String::new();
        Layout::Rfc3339.write(&rfc, &mut out).unwrap();
        assert_eq!(out, "2024-03-01T10:00:00Z");

        let date_only = Layout::format("%Y-%m-%d").parse("2024-03-01").unwrap();
        assert_eq!(date_only, Layout::Rfc3339.parse("2024-03-01T00:00:00Z").unwrap());

        let naive = Layout::format("%Y-%m-%d %H:%M").parse("2024-03-01 10:00").unwrap();
        assert_eq!(naive, rfc);

        assert!(Layout::Rfc2822.parse("2024-03-01").is_none());
    }

    #[test]
    fn layout_display_tokens() {
        assert_eq!(Layout::Rfc3339.to_string(), "RFC3339");
        assert_eq!(Layout::format("%Y").to_string(), r#""%Y""#);
    }
}
