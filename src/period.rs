//! Calendar periods of years, months, weeks, and days.

use std::fmt;
use std::str::FromStr;

use crate::duration::{Designator, Duration};
use crate::parse::{parse_duration_parts, DurationParseError};


/// A **period** is an amount of calendar time in years, months, weeks, and
/// days.
///
/// Unlike a [`Duration`], a period is not a measurable quantity: the length
/// of a month or a year depends on where in the calendar it is applied, so
/// a period is never converted to elapsed time and its components are never
/// normalized into each other. Each component keeps its own sign.
#[derive(PartialEq, Debug, Clone, Copy, Default)]
pub struct Period {
    pub years: f32,
    pub months: f32,
    pub weeks: f32,
    pub days: f32,
}

impl Period {

    /// Parses the period portion of an ISO 8601 duration, such as
    /// `"P3Y6M4D"`.
    ///
    /// Weeks may appear in combination with the other components
    /// (`"P3W1D"`), as allowed by the ISO 8601-2 extension, and a sign
    /// character may precede the string. A time component (`T…`) in the
    /// input is an error; use [`parse_duration`] to read both halves.
    pub fn parse(input: &str) -> Result<Period, DurationParseError> {
        let parts = parse_duration_parts(input, true, false)?;
        Ok(parts.to_period())
    }

    fn is_zero(&self) -> bool {
        self.years == 0.0 && self.months == 0.0 && self.weeks == 0.0 && self.days == 0.0
    }
}

/// Renders the period according to ISO 8601. Only the period component is
/// produced — never a time component. Component magnitudes are rendered
/// without their signs, and the zero period renders as `P0D`.
impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "P0D");
        }

        write!(f, "P")?;
        if self.years != 0.0 {
            write!(f, "{}Y", self.years.abs())?;
        }
        if self.months != 0.0 {
            write!(f, "{}M", self.months.abs())?;
        }
        if self.weeks != 0.0 {
            write!(f, "{}W", self.weeks.abs())?;
        }
        if self.days != 0.0 {
            write!(f, "{}D", self.days.abs())?;
        }
        Ok(())
    }
}

impl FromStr for Period {
    type Err = DurationParseError;

    fn from_str(input: &str) -> Result<Period, Self::Err> {
        Period::parse(input)
    }
}


/// Formats a combined period and duration as a complete ISO 8601 duration,
/// such as `"P3Y6M4DT12H30M5S"`.
///
/// The `exclusive` designators behave as in [`Duration::format`]. When the
/// duration half is zero only the period text is produced (and vice versa);
/// when both halves are zero the result is `"PT0S"`. A negative duration
/// puts a single leading `-` in front of the whole string.
pub fn format_duration(period: Period, duration: Duration, exclusive: &[Designator]) -> String {
    let zero = Duration::of(0);
    if duration == zero {
        if period.is_zero() {
            return duration.format(exclusive);
        }
        return period.to_string();
    }
    if period.is_zero() {
        return duration.format(exclusive);
    }

    let mut out = String::new();
    if duration < zero {
        out.push('-');
    }
    out.push_str(&period.to_string());
    out.push_str(&duration.format_time_component(exclusive));
    out
}

/// Parses a complete ISO 8601 duration into its period and duration
/// halves.
///
/// The two halves are returned separately and never merged: calendar
/// components cannot be reduced to elapsed time. A leading sign applies to
/// the duration half.
pub fn parse_duration(input: &str) -> Result<(Period, Duration), DurationParseError> {
    let parts = parse_duration_parts(input, true, true)?;
    Ok((parts.to_period(), parts.to_duration()))
}


#[cfg(test)]
mod test {
    use super::*;
    use crate::duration::{HOUR, MINUTE, SECOND};

    macro_rules! test {
        ($name:ident: $period:expr => $result:expr) => {
            #[test]
            fn $name() {
                assert_eq!($period.to_string(), $result);
            }
        };
    }

    test!(zero: Period::default() => "P0D");
    test!(all_components: Period { years: 1.0, months: 2.0, weeks: 3.0, days: 4.0 } => "P1Y2M3W4D");
    test!(fractional: Period { years: 2.5, ..Period::default() } => "P2.5Y");
    test!(weeks_alone: Period { weeks: 3.0, ..Period::default() } => "P3W");
    test!(signs_are_not_rendered: Period { months: -6.0, ..Period::default() } => "P6M");

    #[test]
    fn equality_is_component_wise() {
        let twelve_months = Period { months: 12.0, ..Period::default() };
        let one_year = Period { years: 1.0, ..Period::default() };
        assert_ne!(twelve_months, one_year);
    }

    #[test]
    fn parses_its_own_rendering() {
        let period = Period { years: 1.0, months: 2.0, weeks: 3.0, days: 4.5 };
        assert_eq!(Period::parse(&period.to_string()), Ok(period));
    }

    #[test]
    fn combined_rendering() {
        let period = Period { years: 3.0, months: 6.0, days: 4.0, ..Period::default() };
        let duration = Duration::of(12 * HOUR + 30 * MINUTE + 5 * SECOND);
        assert_eq!(format_duration(period, duration, &[]), "P3Y6M4DT12H30M5S");
    }

    #[test]
    fn combined_rendering_of_half_zero_values() {
        let period = Period { years: 3.0, ..Period::default() };
        assert_eq!(format_duration(period, Duration::of(0), &[]), "P3Y");
        assert_eq!(format_duration(Period::default(), Duration::of(HOUR), &[]), "PT1H");
        assert_eq!(format_duration(Period::default(), Duration::of(0), &[]), "PT0S");
    }

    #[test]
    fn combined_parsing() {
        let (period, duration) = parse_duration("P3Y6M4DT12H30M5S").unwrap();
        assert_eq!(period, Period { years: 3.0, months: 6.0, weeks: 0.0, days: 4.0 });
        assert_eq!(duration, Duration::of(12 * HOUR + 30 * MINUTE + 5 * SECOND));
    }

    #[test]
    fn combined_parsing_applies_the_sign_to_the_duration() {
        let (period, duration) = parse_duration("-P1YT1H").unwrap();
        assert_eq!(period.years, 1.0);
        assert_eq!(duration, Duration::of(-HOUR));
    }
}
