//! Layout-driven formatting and parsing.
//!
//! A layout is a string of literal text and `%` specifiers, in the
//! `strftime` tradition: `"%Y-%m-%d"` formats and parses dates like
//! `2020-03-18`. One specifier table drives both directions, so a value
//! formatted with a layout can always be read back with the same layout.
//!
//! Every specifier applies to the date half or the time half of a value.
//! Formatting a value with a specifier for a half it does not have — a
//! date with `%H`, say — is a programming error and panics. Parsing is
//! deliberately looser: any value type accepts any layout, and fields the
//! target type cannot hold are scanned and discarded. This lets one layout
//! with both halves serve [`LocalDate`], [`LocalTime`], and
//! [`LocalDateTime`] alike.
//!
//! Parsing is two-pass: the layout walk collects raw field values into an
//! accumulator, then a resolver turns the accumulated fields into a value
//! in one step, applying epoch defaults (1970, January the 1st, midnight),
//! century inference, era and 12-hour-clock adjustment, and cross-field
//! validation.

use std::error::Error as ErrorTrait;
use std::fmt::{self, Display};
use std::str::FromStr;

use num_traits::PrimInt;
use pad::{Alignment, PadStr};

use crate::cal::datetime::{Error as DateError, LocalDate, LocalDateTime, LocalTime, Month, Weekday};
use crate::cal::fmt::{ISO8601_DATE_EXTENDED, ISO8601_DATETIME_EXTENDED, ISO8601_TIME_EXTENDED};
use crate::cal::{DatePiece, TimePiece};


/// Caller-supplied parsing configuration.
///
/// The default options leave the century pivot unset, which makes parsing
/// a two-digit year (`%y`) fail: the library has no business guessing
/// which century the caller means.
///
/// ```
/// use civil_time::{DatePiece, LocalDate, ParseOptions};
///
/// let options = ParseOptions::new().century_pivot(1970);
/// let date = LocalDate::parse_with("%y", "80", options).unwrap();
/// assert_eq!(date.year(), 1980);
///
/// assert!(LocalDate::parse("%y", "80").is_err());
/// ```
#[derive(PartialEq, Eq, Debug, Clone, Copy, Default)]
pub struct ParseOptions {
    century_pivot: Option<i64>,
}

impl ParseOptions {

    /// Creates options with nothing configured.
    pub fn new() -> ParseOptions {
        ParseOptions::default()
    }

    /// Anchors two-digit years to the century window around the given
    /// year: a parsed value resolves to the year with those final two
    /// digits that lies within fifty years of the pivot.
    pub fn century_pivot(mut self, year: i64) -> ParseOptions {
        self.century_pivot = Some(year);
        self
    }
}


/// Something went wrong while parsing a value against a layout.
#[derive(PartialEq, Debug, Clone)]
pub enum ParseError {

    /// The input text did not match the layout. The positions point at the
    /// layout segment that failed and the input it was matched against.
    CannotParse { input: String, layout: String, input_at: usize, layout_at: usize },

    /// Input text remained after the whole layout was consumed.
    ExtraText { input: String, at: usize },

    /// The layout contains a `%` token this library does not know.
    UnknownSpecifier(char),

    /// The layout contains `%y` or `%Ey`, but no century pivot was
    /// configured. See [`ParseOptions::century_pivot`].
    MissingCenturyPivot,

    /// A parsed field value lies outside its legal range.
    OutOfRange { field: &'static str },

    /// A parsed field disagrees with the date resolved from the other
    /// fields.
    Mismatch { field: &'static str },

    /// The parsed fields do not form a valid date or time.
    Date(DateError),
}

impl Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ParseError::CannotParse { ref input, ref layout, input_at, layout_at } => {
                write!(f, "parsing time {:?} as {:?}: cannot parse {:?} as {:?}",
                       input, layout, &input[input_at..], &layout[layout_at..])
            }
            ParseError::ExtraText { ref input, at } => {
                write!(f, "parsing time {:?}: extra text: {:?}", input, &input[at..])
            }
            ParseError::UnknownSpecifier(c) => {
                write!(f, "unknown specifier %{}", c)
            }
            ParseError::MissingCenturyPivot => {
                write!(f, "two-digit years need a century pivot to be configured")
            }
            ParseError::OutOfRange { field } => {
                write!(f, "{} out of range", field)
            }
            ParseError::Mismatch { field } => {
                write!(f, "invalid {}", field)
            }
            ParseError::Date(ref error) => {
                write!(f, "parsing resulted in an invalid date: {}", error)
            }
        }
    }
}

impl ErrorTrait for ParseError {
    fn source(&self) -> Option<&(dyn ErrorTrait + 'static)> {
        match *self {
            ParseError::Date(ref error) => Some(error),
            _ => None,
        }
    }
}


/// One entry of the specifier table. Each variant knows which half of a
/// value it reads, how wide its numeric form is, how to render a field,
/// and how to consume one from input text.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
enum Specifier {
    Year { era: bool, padded: bool },
    YearOfCentury { padded: bool },
    EraName,
    MonthNumber { padded: bool },
    MonthName { long: bool },
    DayOfMonth { padded: bool },
    DayOfYear { padded: bool },
    IsoWeekday,
    WeekdayName { long: bool },
    IsoWeekYear { padded: bool },
    IsoWeekNumber { padded: bool },
    Hour { padded: bool },
    Hour12 { padded: bool },
    Minute { padded: bool },
    Second { padded: bool },
    AmPm { upper: bool },
    Fraction { digits: u8 },
}

/// A layout splits into literal runs and specifiers. Literal runs are
/// slices of the layout itself, which also serves `%%`: its segment is a
/// one-character slice of the second `%`.
#[derive(PartialEq, Debug, Clone, Copy)]
enum Segment<'a> {
    Literal(&'a str),
    Specifier(Specifier),
}

/// Walks a layout string from left to right, handing out segments.
struct LayoutParser<'a> {
    layout: &'a str,
    pos: usize,
}

impl<'a> LayoutParser<'a> {
    fn new(layout: &'a str) -> LayoutParser<'a> {
        LayoutParser { layout, pos: 0 }
    }

    /// Returns the next segment and its starting position, or the
    /// offending character of an unknown specifier. `self.pos` always ends
    /// up past whatever was scanned, so `layout[start..self.pos]` is the
    /// segment's token text.
    fn next_segment(&mut self) -> Option<(usize, Result<Segment<'a>, char>)> {
        let start = self.pos;
        let rest = &self.layout[start..];
        if rest.is_empty() {
            return None;
        }

        if !rest.starts_with('%') {
            let end = match rest.find('%') {
                Some(offset) => start + offset,
                None => self.layout.len(),
            };
            self.pos = end;
            return Some((start, Ok(Segment::Literal(&self.layout[start..end]))));
        }

        let (consumed, result) = scan_specifier(rest);
        self.pos = start + consumed;
        Some((start, result))
    }
}

/// Scans one `%` token at the start of `rest`, returning how many bytes it
/// spans along with the segment, or the offending character if the token
/// is not one this library knows.
fn scan_specifier(rest: &str) -> (usize, Result<Segment, char>) {
    let mut chars = rest.chars();
    let _ = chars.next();  // the '%' itself
    let mut consumed = 1;

    let mut c = match chars.next() {
        Some(c) => c,
        None => return (1, Err('%')),
    };
    consumed += c.len_utf8();

    // A second '%' is the escape for a literal percent sign.
    if c == '%' {
        return (2, Ok(Segment::Literal(&rest[1..2])));
    }

    let mut padded = true;
    if c == '-' {
        padded = false;
        c = match chars.next() {
            Some(c) => c,
            None => return (consumed, Err('-')),
        };
        consumed += c.len_utf8();
    }

    let mut era = false;
    let mut fraction_digits = 0;
    if c == 'E' {
        era = true;
    }
    else if c == '3' || c == '6' || c == '9' {
        fraction_digits = c as u8 - b'0';
    }
    if era || fraction_digits != 0 {
        let flag = c;
        c = match chars.next() {
            Some(c) => c,
            None => return (consumed, Err(flag)),
        };
        consumed += c.len_utf8();
    }

    let specifier = if era {
        match c {
            'Y' => Specifier::Year { era: true, padded },
            'y' => Specifier::YearOfCentury { padded },
            'C' if padded => Specifier::EraName,
            _ => return (consumed, Err(c)),
        }
    }
    else if fraction_digits != 0 {
        match c {
            'f' if padded => Specifier::Fraction { digits: fraction_digits },
            _ => return (consumed, Err(c)),
        }
    }
    else {
        match c {
            'Y' => Specifier::Year { era: false, padded },
            'y' => Specifier::YearOfCentury { padded },
            'm' => Specifier::MonthNumber { padded },
            'B' if padded => Specifier::MonthName { long: true },
            'b' if padded => Specifier::MonthName { long: false },
            'd' => Specifier::DayOfMonth { padded },
            'j' => Specifier::DayOfYear { padded },
            'u' => Specifier::IsoWeekday,
            'A' if padded => Specifier::WeekdayName { long: true },
            'a' if padded => Specifier::WeekdayName { long: false },
            'G' => Specifier::IsoWeekYear { padded },
            'V' => Specifier::IsoWeekNumber { padded },
            'H' => Specifier::Hour { padded },
            'I' => Specifier::Hour12 { padded },
            'M' => Specifier::Minute { padded },
            'S' => Specifier::Second { padded },
            'p' if padded => Specifier::AmPm { upper: true },
            'P' if padded => Specifier::AmPm { upper: false },
            'f' if padded => Specifier::Fraction { digits: 6 },
            _ => return (consumed, Err(c)),
        }
    };

    (consumed, Ok(Segment::Specifier(specifier)))
}


/// The era of a year: at or before 1 BCE, or from 1 CE onwards.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
enum Era {
    Ce,
    Bce,
}

/// Years at or below zero belong to the before-common era, displayed
/// one-based: year 0 is 1 BCE, year -1 is 2 BCE.
fn era_year(year: i64) -> (i64, Era) {
    if year > 0 {
        (year, Era::Ce)
    }
    else {
        (1 - year, Era::Bce)
    }
}

#[derive(PartialEq, Eq, Debug, Clone, Copy)]
enum AmPm {
    Am,
    Pm,
}


/// How a format call views its subject: an optional date half and an
/// optional time half. A specifier aimed at an absent half is a caller
/// error.
pub(crate) struct Pieces<'a> {
    pub(crate) date: Option<&'a dyn DatePiece>,
    pub(crate) time: Option<&'a dyn TimePiece>,
}

/// The English month and weekday name tables, as the `locale` crate ships
/// them. Indices follow the calendar types: months from January, days from
/// Sunday.
fn names() -> locale::Time {
    locale::Time::english()
}

/// Renders a non-negative number, zero-padding it to `width` digits unless
/// padding is suppressed; a minus sign goes before the padding.
fn render_number<N: PrimInt + Display>(out: &mut String, number: N, width: usize, padded: bool) {
    if number < N::zero() {
        out.push('-');
        render_number(out, N::zero() - number, width, padded);
    }
    else if padded {
        out.push_str(&number.to_string().pad(width, '0', Alignment::Right, false));
    }
    else {
        out.push_str(&number.to_string());
    }
}

pub(crate) fn format_layout(layout: &str, pieces: Pieces) -> String {
    let mut out = String::new();
    let mut parser = LayoutParser::new(layout);

    while let Some((start, segment)) = parser.next_segment() {
        let token = &layout[start..parser.pos];
        match segment {
            Err(_) => panic!("unknown specifier {:?} in layout {:?}", token, layout),
            Ok(Segment::Literal(text)) => out.push_str(text),
            Ok(Segment::Specifier(specifier)) => specifier.render(&mut out, token, &pieces),
        }
    }
    out
}

impl Specifier {

    fn render(self, out: &mut String, token: &str, pieces: &Pieces) {
        let date = || match pieces.date {
            Some(date) => date,
            None => panic!("cannot format a time-only value with date specifier {:?}", token),
        };
        let time = || match pieces.time {
            Some(time) => time,
            None => panic!("cannot format a date-only value with time specifier {:?}", token),
        };

        match self {
            Specifier::Year { era: true, padded } => {
                render_number(out, era_year(date().year()).0, 4, padded);
            }
            Specifier::Year { era: false, padded } => {
                render_number(out, date().year(), 4, padded);
            }
            Specifier::YearOfCentury { padded } => {
                render_number(out, date().year_of_century(), 2, padded);
            }
            Specifier::EraName => {
                out.push_str(match era_year(date().year()).1 {
                    Era::Ce => "CE",
                    Era::Bce => "BCE",
                });
            }
            Specifier::MonthNumber { padded } => {
                render_number(out, date().month() as i8, 2, padded);
            }
            Specifier::MonthName { long } => {
                let index = date().month().months_from_january();
                out.push_str(&if long { names().long_month_name(index) }
                              else { names().short_month_name(index) });
            }
            Specifier::DayOfMonth { padded } => {
                render_number(out, date().day(), 2, padded);
            }
            Specifier::DayOfYear { padded } => {
                render_number(out, date().yearday(), 3, padded);
            }
            Specifier::IsoWeekday => {
                render_number(out, date().weekday().days_from_monday_as_one(), 1, true);
            }
            Specifier::WeekdayName { long } => {
                let index = date().weekday() as usize;
                out.push_str(&if long { names().long_day_name(index) }
                              else { names().short_day_name(index) });
            }
            Specifier::IsoWeekYear { padded } => {
                render_number(out, date().iso_week().0, 4, padded);
            }
            Specifier::IsoWeekNumber { padded } => {
                render_number(out, date().iso_week().1, 2, padded);
            }
            Specifier::Hour { padded } => {
                render_number(out, time().hour(), 2, padded);
            }
            Specifier::Hour12 { padded } => {
                let hour = time().hour();
                let hour12 = match hour {
                    0 => 12,
                    1..=12 => hour,
                    _ => hour - 12,
                };
                render_number(out, hour12, 2, padded);
            }
            Specifier::Minute { padded } => {
                render_number(out, time().minute(), 2, padded);
            }
            Specifier::Second { padded } => {
                render_number(out, time().second(), 2, padded);
            }
            Specifier::AmPm { upper } => {
                let pm = time().hour() >= 12;
                out.push_str(match (pm, upper) {
                    (false, true)  => "AM",
                    (false, false) => "am",
                    (true, true)   => "PM",
                    (true, false)  => "pm",
                });
            }
            Specifier::Fraction { digits } => {
                // Round the nanosecond field to the requested precision,
                // clamped so the result keeps its width.
                let scale = 10u32.pow(9 - digits as u32);
                let rounded = (time().nanosecond() + scale / 2) / scale;
                let max = 10u32.pow(digits as u32) - 1;
                render_number(out, rounded.min(max), digits as usize, true);
            }
        }
    }
}


/// One optional slot per semantic field. The layout walk fills slots in;
/// the resolvers read them out exactly once.
#[derive(PartialEq, Debug, Clone, Copy, Default)]
pub(crate) struct ParsedFields {
    year: Option<i64>,
    year_of_century: Option<i64>,
    era: Option<Era>,
    month: Option<Month>,
    day: Option<i8>,
    yearday: Option<i64>,
    weekday: Option<Weekday>,
    iso_week_year: Option<i64>,
    iso_week: Option<i64>,
    hour: Option<i8>,
    hour12: Option<i8>,
    am_pm: Option<AmPm>,
    minute: Option<i8>,
    second: Option<i8>,
    nanosecond: Option<u32>,
}

/// Walks the layout and the input in lock step, returning the accumulated
/// fields. Fails on a literal or specifier the input does not match, on an
/// unknown specifier, and on input left over after the layout ends.
pub(crate) fn parse_layout(layout: &str, input: &str) -> Result<ParsedFields, ParseError> {
    let mut fields = ParsedFields::default();
    let mut pos = 0;
    let mut parser = LayoutParser::new(layout);

    while let Some((start, segment)) = parser.next_segment() {
        match segment {
            Err(c) => return Err(ParseError::UnknownSpecifier(c)),
            Ok(Segment::Literal(text)) => {
                if input[pos..].starts_with(text) {
                    pos += text.len();
                }
                else {
                    return Err(cannot_parse(input, layout, pos, start));
                }
            }
            Ok(Segment::Specifier(specifier)) => {
                pos = specifier.consume(input, pos, layout, start, &mut fields)?;
            }
        }
    }

    if pos < input.len() {
        return Err(ParseError::ExtraText { input: input.to_string(), at: pos });
    }
    Ok(fields)
}

fn cannot_parse(input: &str, layout: &str, input_at: usize, layout_at: usize) -> ParseError {
    ParseError::CannotParse {
        input: input.to_string(),
        layout: layout.to_string(),
        input_at,
        layout_at,
    }
}

/// Consumes a digit run at `pos`: greedily up to `max_digits` of them,
/// requiring at least one.
fn take_number(input: &str, pos: usize, max_digits: usize) -> Option<(i64, usize)> {
    let bytes = input.as_bytes();
    let mut end = pos;
    while end < bytes.len() && end - pos < max_digits && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == pos {
        return None;
    }
    Some((input[pos..end].parse().ok()?, end))
}

/// Like `take_number`, with an optional leading sign.
fn take_signed_number(input: &str, pos: usize, max_digits: usize) -> Option<(i64, usize)> {
    match input.as_bytes().get(pos) {
        Some(b'-') => take_number(input, pos + 1, max_digits).map(|(v, end)| (-v, end)),
        Some(b'+') => take_number(input, pos + 1, max_digits).map(|(v, end)| (v, end)),
        _ => take_number(input, pos, max_digits),
    }
}

/// Case-insensitive match of any of `candidates` at `pos`, preferring the
/// longest; returns the matched index and the new position.
fn take_name(input: &str, pos: usize, candidates: &[String]) -> Option<(usize, usize)> {
    let rest = &input[pos..];
    let mut best: Option<(usize, usize)> = None;

    for (index, candidate) in candidates.iter().enumerate() {
        if let Some(prefix) = rest.get(..candidate.len()) {
            if prefix.eq_ignore_ascii_case(candidate)
            && best.map_or(true, |(_, length)| candidate.len() > length) {
                best = Some((index, candidate.len()));
            }
        }
    }
    best.map(|(index, length)| (index, pos + length))
}

/// The number of digits a variable-width (`%-`) number may span. Eighteen
/// digits always fit in an i64.
const VARIABLE_WIDTH: usize = 18;

impl Specifier {

    /// The width cap for this specifier's digit run.
    fn digit_cap(padded: bool, width: usize) -> usize {
        if padded { width } else { VARIABLE_WIDTH }
    }

    fn consume(
        self,
        input: &str,
        pos: usize,
        layout: &str,
        layout_at: usize,
        fields: &mut ParsedFields,
    ) -> Result<usize, ParseError> {
        let fail = || cannot_parse(input, layout, pos, layout_at);

        match self {
            Specifier::Year { era, padded } => {
                // An era year is always unsigned; a plain year may carry
                // its own sign.
                let (value, end) = if era {
                    take_number(input, pos, Specifier::digit_cap(padded, 4)).ok_or_else(fail)?
                }
                else {
                    take_signed_number(input, pos, Specifier::digit_cap(padded, 4)).ok_or_else(fail)?
                };
                fields.year = Some(value);
                Ok(end)
            }
            Specifier::YearOfCentury { padded } => {
                let (value, end) = take_number(input, pos, Specifier::digit_cap(padded, 2)).ok_or_else(fail)?;
                fields.year_of_century = Some(value);
                Ok(end)
            }
            Specifier::EraName => {
                let eras = [String::from("BCE"), String::from("CE")];
                let (index, end) = take_name(input, pos, &eras).ok_or_else(fail)?;
                fields.era = Some(if index == 0 { Era::Bce } else { Era::Ce });
                Ok(end)
            }
            Specifier::MonthNumber { padded } => {
                let (value, end) = take_number(input, pos, Specifier::digit_cap(padded, 2)).ok_or_else(fail)?;
                fields.month = Some(Month::from_one(value as i8).map_err(ParseError::Date)?);
                Ok(end)
            }
            Specifier::MonthName { long } => {
                let table = names();
                let candidates = (0..12).map(|index| {
                    if long { table.long_month_name(index) } else { table.short_month_name(index) }
                }).collect::<Vec<_>>();

                let (index, end) = take_name(input, pos, &candidates).ok_or_else(fail)?;
                // The index came from the table above, so it’s within range.
                fields.month = Some(Month::from_zero(index as i8).unwrap());
                Ok(end)
            }
            Specifier::DayOfMonth { padded } => {
                let (value, end) = take_number(input, pos, Specifier::digit_cap(padded, 2)).ok_or_else(fail)?;
                fields.day = Some(value as i8);
                Ok(end)
            }
            Specifier::DayOfYear { padded } => {
                let (value, end) = take_number(input, pos, Specifier::digit_cap(padded, 3)).ok_or_else(fail)?;
                fields.yearday = Some(value);
                Ok(end)
            }
            Specifier::IsoWeekday => {
                let (value, end) = take_number(input, pos, 1).ok_or_else(fail)?;
                let weekday = Weekday::from_one(value as i8)
                    .map_err(|_| ParseError::OutOfRange { field: "day of week" })?;
                fields.weekday = Some(weekday);
                Ok(end)
            }
            Specifier::WeekdayName { long } => {
                let table = names();
                let candidates = (0..7).map(|index| {
                    if long { table.long_day_name(index) } else { table.short_day_name(index) }
                }).collect::<Vec<_>>();

                let (index, end) = take_name(input, pos, &candidates).ok_or_else(fail)?;
                fields.weekday = Some(Weekday::from_zero(index as i8).unwrap());
                Ok(end)
            }
            Specifier::IsoWeekYear { padded } => {
                let (value, end) = take_signed_number(input, pos, Specifier::digit_cap(padded, 4)).ok_or_else(fail)?;
                fields.iso_week_year = Some(value);
                Ok(end)
            }
            Specifier::IsoWeekNumber { padded } => {
                let (value, end) = take_number(input, pos, Specifier::digit_cap(padded, 2)).ok_or_else(fail)?;
                fields.iso_week = Some(value);
                Ok(end)
            }
            Specifier::Hour { padded } => {
                let (value, end) = take_number(input, pos, Specifier::digit_cap(padded, 2)).ok_or_else(fail)?;
                fields.hour = Some(value as i8);
                Ok(end)
            }
            Specifier::Hour12 { padded } => {
                let (value, end) = take_number(input, pos, Specifier::digit_cap(padded, 2)).ok_or_else(fail)?;
                fields.hour12 = Some(value as i8);
                Ok(end)
            }
            Specifier::Minute { padded } => {
                let (value, end) = take_number(input, pos, Specifier::digit_cap(padded, 2)).ok_or_else(fail)?;
                fields.minute = Some(value as i8);
                Ok(end)
            }
            Specifier::Second { padded } => {
                let (value, end) = take_number(input, pos, Specifier::digit_cap(padded, 2)).ok_or_else(fail)?;
                fields.second = Some(value as i8);
                Ok(end)
            }
            Specifier::AmPm { .. } => {
                let halves = [String::from("am"), String::from("pm")];
                let (index, end) = take_name(input, pos, &halves).ok_or_else(fail)?;
                fields.am_pm = Some(if index == 0 { AmPm::Am } else { AmPm::Pm });
                Ok(end)
            }
            Specifier::Fraction { digits } => {
                // A fraction is the one fixed-width field even in spirit:
                // its digit count decides its scale.
                let (value, end) = take_number(input, pos, digits as usize).ok_or_else(fail)?;
                if end - pos != digits as usize {
                    return Err(fail());
                }
                let scale = 10u32.pow(9 - digits as u32);
                fields.nanosecond = Some(value as u32 * scale);
                Ok(end)
            }
        }
    }
}

/// Resolves a two-digit year against the pivot: the result is the year
/// with those final two digits that lies in the half-open window
/// `(pivot - 50, pivot + 50]`.
fn resolve_century(pivot: i64, two_digits: i64) -> i64 {
    let century = pivot - pivot.rem_euclid(100);
    let mut year = century + two_digits;
    if year > pivot + 50 {
        year -= 100;
    }
    else if year <= pivot - 50 {
        year += 100;
    }
    year
}

impl ParsedFields {

    /// Turns the accumulated date fields into a `LocalDate`, in one pass:
    /// century inference, era adjustment, defaults, construction, and
    /// cross-field validation all happen here and nowhere else.
    pub(crate) fn resolve_date(&self, options: ParseOptions) -> Result<LocalDate, ParseError> {
        let mut year = match (self.year, self.year_of_century) {
            (Some(year), _) => Some(year),
            (None, Some(two_digits)) => {
                let pivot = options.century_pivot.ok_or(ParseError::MissingCenturyPivot)?;
                Some(resolve_century(pivot, two_digits))
            }
            (None, None) => None,
        };
        if let (Some(Era::Bce), Some(y)) = (self.era, year) {
            year = Some(1 - y);
        }

        // A parsed weekday is informational: it can pick the day within an
        // ISO week, but it never shifts a date on its own, and checking it
        // needs at least one real date field to check against.
        let explicit = year.is_some() || self.month.is_some() || self.day.is_some()
            || self.yearday.is_some() || self.iso_week_year.is_some() || self.iso_week.is_some();

        let year = year.unwrap_or(1970);

        let date = if self.month.is_some() || self.day.is_some()
            || (self.yearday.is_none() && self.iso_week_year.is_none() && self.iso_week.is_none())
        {
            let month = self.month.unwrap_or(Month::January);
            let date = LocalDate::ymd(year, month, self.day.unwrap_or(1)).map_err(ParseError::Date)?;
            self.check_against(&date)?;
            date
        }
        else if let Some(yearday) = self.yearday {
            let date = LocalDate::yd(year, yearday).map_err(ParseError::Date)?;
            self.check_against(&date)?;
            date
        }
        else {
            // Only ISO week fields were given; the weekday, when present,
            // takes part in construction rather than being checked.
            let weekday = self.weekday.unwrap_or(Weekday::Monday);
            let week_year = self.iso_week_year.unwrap_or(year);
            return LocalDate::ywd(week_year, self.iso_week.unwrap_or(1), weekday)
                .map_err(ParseError::Date);
        };

        if explicit {
            if let Some(weekday) = self.weekday {
                if date.weekday() != weekday {
                    return Err(ParseError::Mismatch { field: "day of week" });
                }
            }
        }
        Ok(date)
    }

    /// Rejects redundant fields that disagree with the resolved date.
    fn check_against(&self, date: &LocalDate) -> Result<(), ParseError> {
        if let Some(yearday) = self.yearday {
            if date.yearday() as i64 != yearday {
                return Err(ParseError::Mismatch { field: "day of year" });
            }
        }
        if self.iso_week_year.is_some() || self.iso_week.is_some() {
            let (week_year, week) = date.iso_week();
            if let Some(expected) = self.iso_week_year {
                if expected != week_year {
                    return Err(ParseError::Mismatch { field: "ISO week year" });
                }
            }
            if let Some(expected) = self.iso_week {
                if expected != week {
                    return Err(ParseError::Mismatch { field: "ISO week" });
                }
            }
        }
        Ok(())
    }

    /// Turns the accumulated time fields into a `LocalTime`, resolving the
    /// 12-hour clock against the am/pm half.
    pub(crate) fn resolve_time(&self) -> Result<LocalTime, ParseError> {
        let hour = match self.hour12 {
            Some(hour12) => {
                if !(1..=12).contains(&hour12) {
                    return Err(ParseError::OutOfRange { field: "12-hour clock hour" });
                }
                // Without an am/pm field the morning is assumed, so noon
                // parses back to hour 12 only via pm.
                let hour = match self.am_pm {
                    Some(AmPm::Pm) => hour12 % 12 + 12,
                    _ => hour12 % 12,
                };
                if let Some(hour24) = self.hour {
                    if hour24 != hour {
                        return Err(ParseError::Mismatch { field: "hour" });
                    }
                }
                hour
            }
            None => self.hour.unwrap_or(0),
        };

        LocalTime::hms_ns(hour, self.minute.unwrap_or(0), self.second.unwrap_or(0),
                          self.nanosecond.unwrap_or(0))
            .map_err(ParseError::Date)
    }
}


impl LocalDate {

    /// Formats this date according to the given layout.
    ///
    /// ### Panics
    ///
    /// Panics if the layout contains a time specifier or a specifier this
    /// library does not know: a layout is part of the program, not of its
    /// input, so a bad one is a bug at the call site.
    pub fn format(&self, layout: &str) -> String {
        format_layout(layout, Pieces { date: Some(self), time: None })
    }

    /// Parses a date from `input` according to the given layout, with
    /// default options.
    ///
    /// Time fields in the layout are scanned and discarded. Fields the
    /// layout never mentions fall back to the epoch date: year 1970,
    /// January the 1st.
    pub fn parse(layout: &str, input: &str) -> Result<LocalDate, ParseError> {
        LocalDate::parse_with(layout, input, ParseOptions::default())
    }

    /// Parses a date from `input` according to the given layout and
    /// options.
    pub fn parse_with(layout: &str, input: &str, options: ParseOptions) -> Result<LocalDate, ParseError> {
        parse_layout(layout, input)?.resolve_date(options)
    }
}

impl LocalTime {

    /// Formats this time according to the given layout.
    ///
    /// ### Panics
    ///
    /// Panics if the layout contains a date specifier or a specifier this
    /// library does not know.
    pub fn format(&self, layout: &str) -> String {
        format_layout(layout, Pieces { date: None, time: Some(self) })
    }

    /// Parses a time from `input` according to the given layout.
    ///
    /// Date fields in the layout are scanned and discarded; unmentioned
    /// time fields default to zero, i.e. midnight.
    pub fn parse(layout: &str, input: &str) -> Result<LocalTime, ParseError> {
        parse_layout(layout, input)?.resolve_time()
    }
}

impl LocalDateTime {

    /// Formats this date-time according to the given layout.
    ///
    /// ### Panics
    ///
    /// Panics if the layout contains a specifier this library does not
    /// know. Both halves are present, so every known specifier is fair
    /// game.
    pub fn format(&self, layout: &str) -> String {
        format_layout(layout, Pieces { date: Some(self), time: Some(self) })
    }

    /// Parses a date-time from `input` according to the given layout, with
    /// default options. Unmentioned fields fall back to the epoch:
    /// midnight, January the 1st, 1970.
    pub fn parse(layout: &str, input: &str) -> Result<LocalDateTime, ParseError> {
        LocalDateTime::parse_with(layout, input, ParseOptions::default())
    }

    /// Parses a date-time from `input` according to the given layout and
    /// options.
    pub fn parse_with(layout: &str, input: &str, options: ParseOptions) -> Result<LocalDateTime, ParseError> {
        let fields = parse_layout(layout, input)?;
        Ok(LocalDateTime::new(fields.resolve_date(options)?, fields.resolve_time()?))
    }
}


impl FromStr for LocalDate {
    type Err = ParseError;

    /// Parses the extended ISO-8601 date form, `2015-06-26`.
    fn from_str(input: &str) -> Result<LocalDate, Self::Err> {
        LocalDate::parse(ISO8601_DATE_EXTENDED, input)
    }
}

impl FromStr for LocalTime {
    type Err = ParseError;

    /// Parses the extended ISO-8601 time form with its `T` prefix,
    /// `T21:05:30`.
    fn from_str(input: &str) -> Result<LocalTime, Self::Err> {
        LocalTime::parse(ISO8601_TIME_EXTENDED, input)
    }
}

impl FromStr for LocalDateTime {
    type Err = ParseError;

    /// Parses the extended ISO-8601 date-time form,
    /// `2015-06-26T21:05:30`.
    fn from_str(input: &str) -> Result<LocalDateTime, Self::Err> {
        LocalDateTime::parse(ISO8601_DATETIME_EXTENDED, input)
    }
}


#[cfg(test)]
mod test {
    use super::*;

    mod century {
        use super::*;

        #[test]
        fn around_an_early_medieval_pivot() {
            assert_eq!(resolve_century(800, 7), 807);
            assert_eq!(resolve_century(800, 80), 780);
        }

        #[test]
        fn around_the_epoch() {
            assert_eq!(resolve_century(1970, 80), 1980);
            assert_eq!(resolve_century(1970, 10), 2010);
            assert_eq!(resolve_century(1970, 70), 1970);
        }

        #[test]
        fn window_edges() {
            // The window is half-open: (pivot - 50, pivot + 50].
            assert_eq!(resolve_century(2000, 50), 2050);
            assert_eq!(resolve_century(2000, 49), 2049);
            assert_eq!(resolve_century(2000, 51), 1951);
        }
    }

    mod eras {
        use super::*;

        #[test]
        fn year_zero_is_one_bce() {
            assert_eq!(era_year(0), (1, Era::Bce));
        }

        #[test]
        fn common_era_years_are_unchanged() {
            assert_eq!(era_year(2022), (2022, Era::Ce));
        }

        #[test]
        fn bce_years_are_one_based() {
            assert_eq!(era_year(-2021), (2022, Era::Bce));
        }
    }

    mod numbers {
        use super::*;

        #[test]
        fn padded_runs_stop_at_their_cap() {
            assert_eq!(take_number("20220618", 0, 4), Some((2022, 4)));
            assert_eq!(take_number("20220618", 4, 2), Some((6, 6)));
        }

        #[test]
        fn short_runs_are_accepted() {
            assert_eq!(take_number("1 BCE", 0, 4), Some((1, 1)));
        }

        #[test]
        fn a_run_must_have_at_least_one_digit() {
            assert_eq!(take_number("abc", 0, 4), None);
            assert_eq!(take_number("", 0, 4), None);
        }

        #[test]
        fn signs() {
            assert_eq!(take_signed_number("-0753", 0, 4), Some((-753, 5)));
            assert_eq!(take_signed_number("+10601", 0, 18), Some((10601, 6)));
        }
    }

    mod name_matching {
        use super::*;

        #[test]
        fn longest_match_wins() {
            let candidates = [String::from("CE"), String::from("BCE")];
            assert_eq!(take_name("BCE", 0, &candidates), Some((1, 3)));
        }

        #[test]
        fn matching_ignores_case() {
            let candidates = [String::from("February")];
            assert_eq!(take_name("february etc", 0, &candidates), Some((0, 8)));
        }

        #[test]
        fn non_ascii_input_is_rejected_cleanly() {
            let candidates = [String::from("am")];
            assert_eq!(take_name("号m", 0, &candidates), None);
        }
    }

    mod layouts {
        use super::*;

        fn segments(layout: &str) -> Vec<Segment> {
            let mut parser = LayoutParser::new(layout);
            let mut out = Vec::new();
            while let Some((_, segment)) = parser.next_segment() {
                out.push(segment.unwrap());
            }
            out
        }

        #[test]
        fn literals_and_specifiers() {
            assert_eq!(segments("%Y-%m"), vec![
                Segment::Specifier(Specifier::Year { era: false, padded: true }),
                Segment::Literal("-"),
                Segment::Specifier(Specifier::MonthNumber { padded: true }),
            ]);
        }

        #[test]
        fn escaped_percent() {
            assert_eq!(segments("100%%"), vec![
                Segment::Literal("100"),
                Segment::Literal("%"),
            ]);
        }

        #[test]
        fn flags() {
            assert_eq!(segments("%-EY%3f"), vec![
                Segment::Specifier(Specifier::Year { era: true, padded: false }),
                Segment::Specifier(Specifier::Fraction { digits: 3 }),
            ]);
        }

        #[test]
        fn unknown_specifiers_are_reported() {
            let mut parser = LayoutParser::new("%Z");
            assert_eq!(parser.next_segment(), Some((0, Err('Z'))));
        }
    }
}
