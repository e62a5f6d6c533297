//! Fixed-point lengths of time with nanosecond precision.

use std::fmt;
use std::ops::Add;
use std::str::FromStr;

use crate::parse::{parse_duration_parts, DurationParseError};


/// A raw signed nanosecond count, used as the input unit when constructing
/// a [`Duration`].
///
/// Extents are ordinary numbers, so they can be produced with plain
/// arithmetic on the unit constants:
///
/// ```
/// use civil_time::{Duration, MINUTE, SECOND};
///
/// let d = Duration::of(90 * MINUTE + 30 * SECOND);
/// assert_eq!(d.as_minutes(), 90.5);
/// ```
///
/// Overflowing an `Extent` in that arithmetic (say, `i64::MAX * SECOND`) is
/// a precondition violation on the caller's side, not a failure mode of
/// `Duration::of`.
pub type Extent = i64;

pub const NANOSECOND: Extent = 1;
pub const MICROSECOND: Extent = 1_000;
pub const MILLISECOND: Extent = 1_000_000;
pub const SECOND: Extent = 1_000_000_000;
pub const MINUTE: Extent = 60 * SECOND;
pub const HOUR: Extent = 3_600 * SECOND;

const NANOS_PER_SEC: i128 = 1_000_000_000;
const NANOS_PER_MINUTE: i128 = 60 * NANOS_PER_SEC;
const NANOS_PER_HOUR: i128 = 3_600 * NANOS_PER_SEC;

const MIN_NANOS: i128 = i64::MIN as i128 * NANOS_PER_SEC - 999_999_999;
const MAX_NANOS: i128 = i64::MAX as i128 * NANOS_PER_SEC + 999_999_999;


/// A **duration** is a signed length of elapsed time, irrespective of time
/// zone or calendar format, with nanosecond precision.
///
/// Internally this is a whole number of seconds (truncated toward zero),
/// the fractional second as a nanosecond magnitude in `0..1_000_000_000`,
/// and the sign of the whole value. The sign flag only carries information
/// when the seconds field is zero; everywhere else it agrees with the sign
/// of the seconds field. Every constructor normalizes, so two equal
/// durations are structurally equal.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub struct Duration {
    secs: i64,
    nsec: u32,
    neg: bool,
}

/// Selects which unit absorbs the fractional carry when formatting a
/// duration with an exclusive set of designators.
///
/// See [`Duration::format`].
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum Designator {
    Hours,
    Minutes,
    Seconds,
}

impl Duration {

    /// The smallest representable duration.
    pub const MIN: Duration = Duration { secs: i64::MIN, nsec: 999_999_999, neg: true };

    /// The largest representable duration.
    pub const MAX: Duration = Duration { secs: i64::MAX, nsec: 999_999_999, neg: false };

    /// Creates a new duration from the given extent of nanoseconds.
    pub fn of(extent: Extent) -> Duration {
        Duration::from_nanos(extent as i128)
    }

    /// Builds the normalized form from a total nanosecond count. All
    /// construction funnels through here; callers guarantee the total is
    /// within `MIN..=MAX`.
    fn from_nanos(total: i128) -> Duration {
        Duration {
            secs: (total / NANOS_PER_SEC) as i64,
            nsec: (total % NANOS_PER_SEC).abs() as u32,
            neg: total < 0,
        }
    }

    /// Assembles a duration from the scanner's accumulated magnitude and
    /// sign. The magnitude always fits: `secs` is non-negative.
    pub(crate) fn from_parts(secs: i64, nsec: u32, neg: bool) -> Duration {
        let total = secs as i128 * NANOS_PER_SEC + nsec as i128;
        Duration::from_nanos(if neg { -total } else { total })
    }

    fn total_nanos(&self) -> i128 {
        let whole = self.secs as i128 * NANOS_PER_SEC;
        if self.neg {
            whole - self.nsec as i128
        }
        else {
            whole + self.nsec as i128
        }
    }

    /// The exact duration expressed in nanoseconds.
    pub fn as_nanoseconds(&self) -> f64 {
        self.total_nanos() as f64
    }

    /// The exact duration expressed in microseconds.
    pub fn as_microseconds(&self) -> f64 {
        self.total_nanos() as f64 / MICROSECOND as f64
    }

    /// The exact duration expressed in milliseconds.
    pub fn as_milliseconds(&self) -> f64 {
        self.total_nanos() as f64 / MILLISECOND as f64
    }

    /// The exact duration expressed in seconds.
    pub fn as_seconds(&self) -> f64 {
        self.total_nanos() as f64 / SECOND as f64
    }

    /// The exact duration expressed in minutes.
    pub fn as_minutes(&self) -> f64 {
        self.total_nanos() as f64 / MINUTE as f64
    }

    /// The exact duration expressed in hours.
    pub fn as_hours(&self) -> f64 {
        self.total_nanos() as f64 / HOUR as f64
    }

    /// Returns whether `self + other` stays within `MIN..=MAX`. Agrees
    /// exactly with `checked_add` returning `Some`.
    pub fn can_add(self, other: Duration) -> bool {
        self.checked_add(other).is_some()
    }

    /// Adds two durations, returning `None` if the result would fall
    /// outside the representable range.
    pub fn checked_add(self, other: Duration) -> Option<Duration> {
        let total = self.total_nanos() + other.total_nanos();
        if total < MIN_NANOS || total > MAX_NANOS {
            None
        }
        else {
            Some(Duration::from_nanos(total))
        }
    }

    fn is_zero(&self) -> bool {
        self.secs == 0 && self.nsec == 0
    }

    /// Parses the time portion of an ISO 8601 duration, such as
    /// `"PT1H30M"`. A period component (years, months, weeks, or days) in
    /// the input is an error; use [`parse_duration`](crate::parse_duration)
    /// to read both halves.
    pub fn parse(input: &str) -> Result<Duration, DurationParseError> {
        let parts = parse_duration_parts(input, false, true)?;
        Ok(parts.to_duration())
    }

    /// Formats the duration according to ISO 8601, as hours, minutes, and
    /// seconds.
    ///
    /// With an empty `exclusive` slice, every unit from hours down to
    /// seconds appears if it is nonzero, and a zero unit also appears when
    /// it sits between two present units (`PT12H0M30.5S`, never
    /// `PT12H30.5S`). A zero duration renders as `PT0S`.
    ///
    /// With a non-empty slice, only the listed designators appear: units
    /// coarser than the largest listed designator fold down into it, and
    /// the smallest listed designator absorbs everything finer as a decimal
    /// fraction, trimmed of trailing zeros.
    ///
    /// ```
    /// use civil_time::{Designator, Duration, HOUR, MILLISECOND, MINUTE, SECOND};
    ///
    /// let d = Duration::of(HOUR + 15 * MINUTE + 30 * SECOND + 600 * MILLISECOND);
    /// assert_eq!(d.format(&[]), "PT1H15M30.6S");
    /// assert_eq!(d.format(&[Designator::Minutes]), "PT75.51M");
    /// ```
    pub fn format(&self, exclusive: &[Designator]) -> String {
        let mut out = String::new();
        if self.neg && !self.is_zero() {
            out.push('-');
        }
        out.push('P');
        out.push_str(&self.format_time_component(exclusive));
        out
    }

    /// Renders the `T…` half on its own, without the leading `P` or sign.
    /// Shared between `format` and `format_duration`.
    pub(crate) fn format_time_component(&self, exclusive: &[Designator]) -> String {
        let total = self.total_nanos().abs();
        let mut out = String::from("T");

        if exclusive.is_empty() {
            let hours = total / NANOS_PER_HOUR;
            let minutes = total % NANOS_PER_HOUR / NANOS_PER_MINUTE;
            let secs = total % NANOS_PER_MINUTE / NANOS_PER_SEC;
            let nanos = total % NANOS_PER_SEC;

            let with_hours = hours != 0;
            let with_secs = secs != 0 || nanos != 0;
            // An interior zero is kept so the smaller unit stays anchored.
            let with_minutes = minutes != 0 || (with_hours && with_secs);

            if with_hours {
                out.push_str(&format!("{}H", hours));
            }
            if with_minutes {
                out.push_str(&format!("{}M", minutes));
            }
            if with_secs {
                out.push_str(&format!("{}S", secs as f64 + nanos as f64 / NANOS_PER_SEC as f64));
            }
            if !with_hours && !with_minutes && !with_secs {
                out.push_str("0S");
            }
            return out;
        }

        let mut wanted = [false; 3];
        for d in exclusive {
            wanted[*d as usize] = true;
        }
        let smallest = match wanted {
            [_, _, true] => Designator::Seconds,
            [_, true, _] => Designator::Minutes,
            _ => Designator::Hours,
        };

        let mut remainder = total;
        let units = [
            (Designator::Hours, NANOS_PER_HOUR, 'H'),
            (Designator::Minutes, NANOS_PER_MINUTE, 'M'),
            (Designator::Seconds, NANOS_PER_SEC, 'S'),
        ];
        for &(designator, unit, letter) in units.iter() {
            if !wanted[designator as usize] {
                continue;
            }
            if designator == smallest {
                out.push_str(&format!("{}{}", remainder as f64 / unit as f64, letter));
            }
            else {
                out.push_str(&format!("{}{}", remainder / unit, letter));
                remainder %= unit;
            }
        }
        out
    }
}

impl Add for Duration {
    type Output = Duration;

    /// Panics when the sum leaves the representable range; check `can_add`
    /// or use `checked_add` first when the operands are not known to fit.
    fn add(self, rhs: Duration) -> Duration {
        match self.checked_add(rhs) {
            Some(d) => d,
            None => panic!("duration addition out of range"),
        }
    }
}

impl PartialOrd for Duration {
    fn partial_cmp(&self, other: &Duration) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Duration {
    fn cmp(&self, other: &Duration) -> std::cmp::Ordering {
        self.total_nanos().cmp(&other.total_nanos())
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.format(&[]))
    }
}

impl FromStr for Duration {
    type Err = DurationParseError;

    fn from_str(input: &str) -> Result<Duration, Self::Err> {
        Duration::parse(input)
    }
}


#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn normalizes_negative_fractions() {
        let d = Duration::of(-500 * MILLISECOND);
        assert_eq!(d.as_milliseconds(), -500.0);
        assert_eq!(d.as_seconds(), -0.5);
    }

    #[test]
    fn truncates_toward_zero() {
        let d = Duration::of(-(SECOND + 500 * MILLISECOND));
        assert_eq!(d.as_seconds(), -1.5);
    }

    #[test]
    fn zero_is_canonical() {
        assert_eq!(Duration::of(0), Duration::of(1) + Duration::of(-1));
    }

    #[test]
    fn extremes_round_trip() {
        assert_eq!(Duration::MIN.checked_add(Duration::of(0)), Some(Duration::MIN));
        assert_eq!(Duration::MAX.checked_add(Duration::of(0)), Some(Duration::MAX));
    }

    #[test]
    fn ordering_is_by_value() {
        assert!(Duration::of(-1) < Duration::of(0));
        assert!(Duration::of(HOUR) > Duration::of(MINUTE));
        assert!(Duration::MIN < Duration::MAX);
    }

    mod formatting {
        use super::*;

        macro_rules! test {
            ($name:ident: $extent:expr, $exclusive:expr => $result:expr) => {
                #[test]
                fn $name() {
                    assert_eq!(Duration::of($extent).format(&$exclusive), $result);
                }
            };
        }

        test!(zero: 0, [] => "PT0S");
        test!(negative: -(30 * SECOND), [] => "-PT30S");
        test!(interior_zero_minutes: 12 * HOUR + 30 * SECOND + 500 * MILLISECOND, [] => "PT12H0M30.5S");
        test!(fraction_trimmed: 30 * SECOND + 500 * MILLISECOND, [] => "PT30.5S");
        test!(whole_seconds_have_no_point: 30 * SECOND, [] => "PT30S");
        test!(exclusive_minutes: HOUR + 15 * MINUTE + 30 * SECOND + 600 * MILLISECOND,
              [Designator::Minutes] => "PT75.51M");
        test!(exclusive_hours: HOUR + 30 * MINUTE + 36 * SECOND + 36 * MILLISECOND,
              [Designator::Hours] => "PT1.51001H");
        test!(exclusive_zero: 0, [Designator::Seconds] => "PT0S");
    }
}
