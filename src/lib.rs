#![warn(missing_copy_implementations)]
#![warn(missing_debug_implementations)]

#![warn(trivial_casts, trivial_numeric_casts)]
#![warn(unused_qualifications)]
#![warn(unused_results)]

//! Library for [civil dates and times](https://crates.io/crates/civil-time):
//! ISO 8601 durations and periods, and layout-driven formatting and parsing.
//!
//! # Examples
//!
//! Durations and periods travel as ISO 8601 text:
//!
//! ```
//! use civil_time::{parse_duration, Duration, HOUR, MINUTE};
//!
//! let (period, duration) = parse_duration("P3YT12H30M").unwrap();
//! assert_eq!(period.years, 3.0);
//! assert_eq!(duration, Duration::of(12 * HOUR + 30 * MINUTE));
//! assert_eq!(duration.format(&[]), "PT12H30M");
//! ```
//!
//! Civil values format and parse through layout strings:
//!
//! ```
//! use civil_time::{DatePiece, LocalDate, Month};
//!
//! let date = LocalDate::parse("%Y-%m-%d", "2015-06-26").unwrap();
//! assert_eq!(date.month(), Month::June);
//! assert_eq!(date.format("%d %B %Y"), "26 June 2015");
//! ```

pub mod cal;
pub mod duration;
pub mod parse;
pub mod period;
mod util;

pub use crate::cal::datetime::{Error, LocalDate, LocalDateTime, LocalTime, Month, Weekday, Year};
pub use crate::cal::fmt::{ParseError, ParseOptions};
pub use crate::cal::fmt::{ISO8601_DATE, ISO8601_DATETIME, ISO8601_TIME};
pub use crate::cal::fmt::{ISO8601_DATE_EXTENDED, ISO8601_DATETIME_EXTENDED, ISO8601_TIME_EXTENDED};
pub use crate::cal::{DatePiece, TimePiece};
pub use crate::duration::{Designator, Duration, Extent};
pub use crate::duration::{HOUR, MICROSECOND, MILLISECOND, MINUTE, NANOSECOND, SECOND};
pub use crate::parse::DurationParseError;
pub use crate::period::{format_duration, parse_duration, Period};
