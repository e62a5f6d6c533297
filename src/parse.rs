//! Parsing ISO 8601 durations and periods.
//!
//! One scanner serves both halves of the grammar
//! `['+'|'-'] 'P' (period term)* ['T' (time term)*]`, where a period term
//! is a number followed by `Y`, `M`, `W`, or `D`, and a time term is a
//! number followed by `H`, `M`, or `S`. The letter `M` means months before
//! the `T` separator and minutes after it; the scanner tracks which side it
//! is on rather than looking ahead. Callers choose which halves are legal,
//! so the same walk backs [`Period::parse`](crate::Period::parse),
//! [`Duration::parse`](crate::Duration::parse), and
//! [`parse_duration`](crate::parse_duration).

use std::error::Error as ErrorTrait;
use std::fmt;

use crate::duration::Duration;
use crate::period::Period;


/// Something went wrong while scanning an ISO 8601 duration or period.
#[derive(PartialEq, Debug, Clone)]
pub enum DurationParseError {

    /// The input was the empty string.
    Empty,

    /// The input does not begin with `P` (or a sign).
    ExpectingP,

    /// A character appeared somewhere the grammar does not allow it.
    UnexpectedCharacter { c: char, expecting: &'static str },

    /// A numeric run could not be read as a decimal number.
    InvalidNumber(String),

    /// The accumulated seconds went past the `i64` range.
    SecondsOverflow,

    /// The accumulated seconds went below the `i64` range.
    SecondsUnderflow,

    /// The input contained no unit at all.
    NoUnits,

    /// A year/month/week/day term appeared while parsing a time-only
    /// duration.
    PeriodUnitsNotAllowed,

    /// An hour/minute/second term appeared while parsing a period.
    TimeUnitsNotAllowed,
}

impl fmt::Display for DurationParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            DurationParseError::Empty => {
                write!(f, "empty string")
            }
            DurationParseError::ExpectingP => {
                write!(f, "expecting 'P'")
            }
            DurationParseError::UnexpectedCharacter { c, expecting } => {
                write!(f, "unexpected {:?}, expecting {}", c, expecting)
            }
            DurationParseError::InvalidNumber(ref num) => {
                write!(f, "invalid number {:?}", num)
            }
            DurationParseError::SecondsOverflow => {
                write!(f, "seconds overflow")
            }
            DurationParseError::SecondsUnderflow => {
                write!(f, "seconds underflow")
            }
            DurationParseError::NoUnits => {
                write!(f, "expecting at least one unit")
            }
            DurationParseError::PeriodUnitsNotAllowed => {
                write!(f, "year, month, week, and day units are not valid in a time-only duration")
            }
            DurationParseError::TimeUnitsNotAllowed => {
                write!(f, "hour, minute, and second units are not valid in a period")
            }
        }
    }
}

impl ErrorTrait for DurationParseError {
}


/// Everything one scan can produce: the four period components and the
/// accumulated time-half magnitude. The sign applies to the whole value.
pub(crate) struct ParsedDurationParts {
    pub(crate) years: f32,
    pub(crate) months: f32,
    pub(crate) weeks: f32,
    pub(crate) days: f32,
    pub(crate) secs: i64,
    pub(crate) nsec: u32,
    pub(crate) neg: bool,
}

impl ParsedDurationParts {
    pub(crate) fn to_duration(&self) -> Duration {
        Duration::from_parts(self.secs, self.nsec, self.neg)
    }

    pub(crate) fn to_period(&self) -> Period {
        Period {
            years: self.years,
            months: self.months,
            weeks: self.weeks,
            days: self.days,
        }
    }
}


/// Scans `s` left to right exactly once. `parse_period` and `parse_time`
/// select which grammar halves are legal; a term from a disallowed half is
/// a hard error rather than being skipped.
///
/// Deliberate leniencies, matching the observed behavior of the wire
/// format's reference scanner: a repeated unit letter is legal (its whole
/// seconds accumulate; the sub-second remainder is kept from the latest
/// fractional term), a trailing digit run with no unit letter is dropped,
/// and after an explicit leading sign the `P` position is skipped without
/// inspection.
pub(crate) fn parse_duration_parts(
    s: &str,
    parse_period: bool,
    parse_time: bool,
) -> Result<ParsedDurationParts, DurationParseError> {
    if s.is_empty() {
        return Err(DurationParseError::Empty);
    }

    let bytes = s.as_bytes();
    let mut parts = ParsedDurationParts {
        years: 0.0,
        months: 0.0,
        weeks: 0.0,
        days: 0.0,
        secs: 0,
        nsec: 0,
        neg: false,
    };

    let mut offset = 1;
    if bytes[0] == b'+' {
        offset += 1;
    }
    else if bytes[0] == b'-' {
        parts.neg = true;
        offset += 1;
    }
    else if bytes[0] != b'P' {
        return Err(DurationParseError::ExpectingP);
    }

    // Byte index where the pending numeric run began; 0 means no run is
    // pending, which is unambiguous because index 0 always holds the sign
    // or the `P`.
    let mut run_start = 0;
    let mut on_time = false;
    let mut have_unit = false;

    for i in offset..bytes.len() {
        let b = bytes[i];
        let digit = (b'0'..=b'9').contains(&b) || b == b'.' || b == b',';

        if run_start == 0 {
            if digit {
                run_start = i;
            }
            else if b == b'T' {
                if on_time {
                    return Err(unexpected(s, i, "digit"));
                }
                on_time = true;
            }
            else {
                return Err(unexpected(s, i, "digit or 'T'"));
            }
        }
        else if !digit {
            if !on_time {
                if !parse_period {
                    return Err(DurationParseError::PeriodUnitsNotAllowed);
                }

                let v = parse_decimal(&s[run_start..i])? as f32;
                match b {
                    b'Y' => parts.years = v,
                    b'M' => parts.months = v,
                    b'W' => parts.weeks = v,
                    b'D' => parts.days = v,
                    _ => return Err(unexpected(s, i, "'Y', 'M', 'W', or 'D'")),
                }
            }
            else {
                if !parse_time {
                    return Err(DurationParseError::TimeUnitsNotAllowed);
                }

                let v = parse_decimal(&s[run_start..i])?;
                let (whole_secs, rem_nanos) = match b {
                    b'H' => {
                        let w = (v * 3_600.0).floor();
                        (w, v * 3.6e12 - w * 1e9)
                    }
                    b'M' => {
                        let w = (v * 60.0).floor();
                        (w, v * 6e10 - w * 1e9)
                    }
                    b'S' => {
                        let w = v.floor();
                        (w, v * 1e9 - w * 1e9)
                    }
                    _ => return Err(unexpected(s, i, "'H', 'M' or 'S'")),
                };

                if whole_secs < i64::MIN as f64 {
                    return Err(DurationParseError::SecondsUnderflow);
                }
                else if whole_secs > i64::MAX as f64 {
                    return Err(DurationParseError::SecondsOverflow);
                }

                let term_nanos = if rem_nanos < 0.0 { 0 } else { rem_nanos as u64 };
                parts.secs = accumulate(parts.secs, whole_secs as i64)?;
                parts.secs = accumulate(parts.secs, (term_nanos / 1_000_000_000) as i64)?;
                parts.nsec = (term_nanos % 1_000_000_000) as u32;
            }

            run_start = 0;
            have_unit = true;
        }
    }

    if !have_unit {
        return Err(DurationParseError::NoUnits);
    }
    Ok(parts)
}

fn parse_decimal(run: &str) -> Result<f64, DurationParseError> {
    run.replace(',', ".")
       .parse()
       .map_err(|_| DurationParseError::InvalidNumber(run.to_string()))
}

fn accumulate(total: i64, term: i64) -> Result<i64, DurationParseError> {
    match total.checked_add(term) {
        Some(sum) => Ok(sum),
        None if term < 0 => Err(DurationParseError::SecondsUnderflow),
        None => Err(DurationParseError::SecondsOverflow),
    }
}

fn unexpected(s: &str, at: usize, expecting: &'static str) -> DurationParseError {
    // `at` is always a character boundary: the scanner stops at the first
    // byte that fails its ASCII checks.
    let c = s[at..].chars().next().unwrap_or('\u{fffd}');
    DurationParseError::UnexpectedCharacter { c, expecting }
}
