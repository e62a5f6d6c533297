//! Turning datetime values into text and back.

pub(crate) mod custom;
pub(crate) mod iso;

pub use self::custom::{ParseError, ParseOptions};


/// The basic ISO-8601 calendar date layout, `20220618`.
pub const ISO8601_DATE: &str = "%Y%m%d";

/// The extended ISO-8601 calendar date layout, `2022-06-18`.
pub const ISO8601_DATE_EXTENDED: &str = "%Y-%m-%d";

/// The basic ISO-8601 time layout with its `T` prefix, `T210530`.
pub const ISO8601_TIME: &str = "T%H%M%S";

/// The extended ISO-8601 time layout, `T21:05:30`.
pub const ISO8601_TIME_EXTENDED: &str = "T%H:%M:%S";

/// The basic ISO-8601 date-time layout, `20220618T210530`.
pub const ISO8601_DATETIME: &str = "%Y%m%dT%H%M%S";

/// The extended ISO-8601 date-time layout, `2022-06-18T21:05:30`.
pub const ISO8601_DATETIME_EXTENDED: &str = "%Y-%m-%dT%H:%M:%S";
