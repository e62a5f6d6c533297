//! ISO-8601 date and time calculations, which use years, months, days,
//! hours, minutes, and seconds.

pub(crate) mod datetime;
pub(crate) mod fmt;

use self::datetime::{LocalDate, Month, Weekday, Year};


/// The **date piece** trait is used for date and time values that have
/// date components of years, months, and days.
pub trait DatePiece {

    /// The year, in absolute terms.
    /// This is in human-readable format, so the year 2014 actually has a
    /// year value of 2014, rather than 14 or 114 or anything like that.
    fn year(&self) -> i64;

    /// The month of the year.
    fn month(&self) -> Month;

    /// The day of the month, from 1 to 31.
    fn day(&self) -> i8;

    /// The day of the year, from 1 to 366.
    fn yearday(&self) -> i16;

    /// The day of the week.
    fn weekday(&self) -> Weekday;

    /// The number of years into the century, from 0 to 99.
    /// For years in the common era this is the same as the last two digits
    /// of the year.
    fn year_of_century(&self) -> i64 {
        self.year().rem_euclid(100)
    }

    /// The ISO-8601 week-date decomposition of this date, as a (week-year,
    /// week number) pair with weeks numbered from 1.
    ///
    /// The week-year can differ from the calendar year by one in either
    /// direction for dates that fall early in week 1 or late in week 52 or
    /// 53 of the adjacent year.
    fn iso_week(&self) -> (i64, i64) {
        let iso_weekday = self.weekday().days_from_monday_as_one() as i64;
        let week = (self.yearday() as i64 - iso_weekday + 10) / 7;

        if week < 1 {
            let previous = self.year() - 1;
            (previous, weeks_in_year(previous))
        }
        else if week > weeks_in_year(self.year()) {
            (self.year() + 1, 1)
        }
        else {
            (self.year(), week)
        }
    }
}


/// The **time piece** trait is used for date and time values that have
/// time components of hours, minutes, and seconds.
pub trait TimePiece {

    /// The hour of the day.
    fn hour(&self) -> i8;

    /// The minute of the hour.
    fn minute(&self) -> i8;

    /// The second of the minute.
    fn second(&self) -> i8;

    /// The nanosecond of the second.
    fn nanosecond(&self) -> u32;
}


/// The number of weeks in the given year’s ISO week calendar: 53 when
/// January the 1st falls on a Thursday, or on a Wednesday of a leap year,
/// and 52 otherwise.
pub(crate) fn weeks_in_year(year: i64) -> i64 {
    // January the 1st is a valid date in every year.
    let jan_1 = LocalDate::ymd(year, Month::January, 1).unwrap().weekday();

    if jan_1 == Weekday::Thursday
    || (jan_1 == Weekday::Wednesday && Year(year).is_leap_year()) {
        53
    }
    else {
        52
    }
}


#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn long_and_short_week_years() {
        assert_eq!(weeks_in_year(2019), 52);
        assert_eq!(weeks_in_year(2015), 53);  // Jan 1st is a Thursday
        assert_eq!(weeks_in_year(2020), 53);  // leap, Jan 1st is a Wednesday
    }

    #[test]
    fn week_in_the_middle_of_a_year() {
        let date = LocalDate::ymd(807, Month::February, 9).unwrap();
        assert_eq!(date.iso_week(), (807, 6));
    }

    #[test]
    fn week_belonging_to_the_previous_year() {
        let date = LocalDate::ymd(2021, Month::January, 1).unwrap();
        assert_eq!(date.iso_week(), (2020, 53));
    }

    #[test]
    fn week_belonging_to_the_next_year() {
        let date = LocalDate::ymd(2019, Month::December, 31).unwrap();
        assert_eq!(date.iso_week(), (2020, 1));
    }
}
