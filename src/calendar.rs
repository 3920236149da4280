//! Calendar lexer: proleptic-Gregorian date-times in four fixed layouts.
//!
//! | format      | layout                                   | bytes      |
//! |-------------|------------------------------------------|------------|
//! | `R`, `l`    | `Sun, 06 Nov 1994 08:49:37 GMT`          | 29         |
//! | `O`         | `1994-11-06T08:49:37.0000000[Z\|±HH:MM]` | 27, 28, 33 |
//! | `G`         | `11/06/1994 08:49:37`                    | 19         |
//! | default     | `G`, plus ` ±HH:MM` for [`DateTimeOffset`] | 19, 26   |
//!
//! Every layout is positional. Fields are range-checked together (year
//! 1..=9999, day within the month, 24-hour clock) and combined into a linear
//! count of 100 ns ticks since 0001-01-01T00:00:00.

use core::fmt;

use tracing::{debug, trace};

use crate::duration::TimeSpan;
use crate::format::{DateTimeFormat, FormatSymbol};
use crate::integer::{Integer, parse_digit_field};
use crate::result::ParseResult;

const TICKS_PER_SECOND: u64 = TimeSpan::TICKS_PER_SECOND as u64;
const TICKS_PER_MINUTE: u64 = TimeSpan::TICKS_PER_MINUTE as u64;
const TICKS_PER_HOUR: u64 = TimeSpan::TICKS_PER_HOUR as u64;
const TICKS_PER_DAY: u64 = TimeSpan::TICKS_PER_DAY as u64;

/// Cumulative days before each month, common year.
const DAYS_TO_MONTH_365: [u16; 13] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334, 365];
/// Cumulative days before each month, leap year.
const DAYS_TO_MONTH_366: [u16; 13] = [0, 31, 60, 91, 121, 152, 182, 213, 244, 274, 305, 335, 366];

const WEEKDAY_TOKENS: [&[u8; 3]; 7] = [b"sun", b"mon", b"tue", b"wed", b"thu", b"fri", b"sat"];
const MONTH_TOKENS: [&[u8; 3]; 12] = [
    b"jan", b"feb", b"mar", b"apr", b"may", b"jun", b"jul", b"aug", b"sep", b"oct", b"nov", b"dec",
];

/// Largest offset from UTC, in minutes.
const MAX_OFFSET_MINUTES: i16 = 14 * 60;

/// Gregorian leap-year rule.
#[inline]
pub fn is_leap_year(year: u16) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Days in `month` of `year`; 0 when `month` is outside 1..=12.
pub fn days_in_month(year: u16, month: u8) -> u8 {
    let table = month_table(year);
    let month = usize::from(month);
    match (table.get(month.wrapping_sub(1)), table.get(month)) {
        (Some(&start), Some(&end)) => (end - start) as u8,
        _ => 0,
    }
}

#[inline]
fn month_table(year: u16) -> &'static [u16; 13] {
    if is_leap_year(year) {
        &DAYS_TO_MONTH_366
    } else {
        &DAYS_TO_MONTH_365
    }
}

/// Days from 0001-01-01 to January 1st of `year`.
#[inline]
fn days_before_year(year: u16) -> u64 {
    let y = u64::from(year) - 1;
    y * 365 + y / 4 - y / 100 + y / 400
}

/// How a [`DateTime`] relates to UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DateTimeKind {
    #[default]
    Unspecified,
    Utc,
    Local,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum DayOfWeek {
    Sunday = 0,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl DayOfWeek {
    const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Sunday,
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
    ];

    /// Weekday of a day number counted from 0001-01-01, which was a Monday.
    #[inline]
    fn from_day_number(days: u64) -> Self {
        Self::ALL[((days + 1) % 7) as usize]
    }

    /// Days since Sunday.
    #[inline]
    pub fn index(self) -> u8 {
        self as u8
    }
}

/// A calendar date and time of day at 100 ns resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DateTime {
    ticks: u64,
    kind: DateTimeKind,
}

impl DateTime {
    /// Ticks at 9999-12-31T23:59:59.9999999.
    pub const MAX_TICKS: u64 = 3_155_378_975_999_999_999;

    pub const MIN: DateTime = DateTime {
        ticks: 0,
        kind: DateTimeKind::Unspecified,
    };

    pub const MAX: DateTime = DateTime {
        ticks: Self::MAX_TICKS,
        kind: DateTimeKind::Unspecified,
    };

    pub fn from_ticks(ticks: u64, kind: DateTimeKind) -> Option<Self> {
        (ticks <= Self::MAX_TICKS).then_some(Self { ticks, kind })
    }

    /// Builds a value from validated calendar fields.
    pub fn new(
        year: u16,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
        kind: DateTimeKind,
    ) -> Option<Self> {
        let fields = DateComponents {
            year,
            month,
            day,
            hour,
            minute,
            second,
            fraction: 0,
        };
        Some(Self {
            ticks: fields.to_ticks()?,
            kind,
        })
    }

    /// Replaces the sub-second part; `fraction_ticks` must be below one second.
    pub fn with_fraction_ticks(self, fraction_ticks: u32) -> Option<Self> {
        let fraction_ticks = u64::from(fraction_ticks);
        if fraction_ticks >= TICKS_PER_SECOND {
            return None;
        }
        Some(Self {
            ticks: self.ticks - self.ticks % TICKS_PER_SECOND + fraction_ticks,
            kind: self.kind,
        })
    }

    #[inline]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    #[inline]
    pub fn kind(&self) -> DateTimeKind {
        self.kind
    }

    #[inline]
    fn day_number(&self) -> u64 {
        self.ticks / TICKS_PER_DAY
    }

    /// Year, month and day via Hinnant's civil-from-days, with the epoch moved
    /// to 0000-03-01 (306 days before 0001-01-01).
    fn civil(&self) -> (u16, u8, u8) {
        let z = self.day_number() + 306;
        let era = z / 146_097;
        let doe = z - era * 146_097;
        let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
        let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
        let mp = (5 * doy + 2) / 153;
        let day = doy - (153 * mp + 2) / 5 + 1;
        let month = if mp < 10 { mp + 3 } else { mp - 9 };
        let year = yoe + era * 400 + u64::from(month <= 2);
        (year as u16, month as u8, day as u8)
    }

    pub fn year(&self) -> u16 {
        self.civil().0
    }

    pub fn month(&self) -> u8 {
        self.civil().1
    }

    pub fn day(&self) -> u8 {
        self.civil().2
    }

    pub fn hour(&self) -> u8 {
        (self.ticks % TICKS_PER_DAY / TICKS_PER_HOUR) as u8
    }

    pub fn minute(&self) -> u8 {
        (self.ticks % TICKS_PER_HOUR / TICKS_PER_MINUTE) as u8
    }

    pub fn second(&self) -> u8 {
        (self.ticks % TICKS_PER_MINUTE / TICKS_PER_SECOND) as u8
    }

    /// Sub-second part in ticks (0..10_000_000).
    pub fn fraction_ticks(&self) -> u32 {
        (self.ticks % TICKS_PER_SECOND) as u32
    }

    pub fn day_of_week(&self) -> DayOfWeek {
        DayOfWeek::from_day_number(self.day_number())
    }

    /// Elapsed time since midnight.
    pub fn time_of_day(&self) -> TimeSpan {
        TimeSpan::from_ticks((self.ticks % TICKS_PER_DAY) as i64)
    }
}

/// `yyyy-MM-ddTHH:mm:ss.fffffff`
impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (year, month, day) = self.civil();
        write!(
            f,
            "{year:04}-{month:02}-{day:02}T{:02}:{:02}:{:02}.{:07}",
            self.hour(),
            self.minute(),
            self.second(),
            self.fraction_ticks()
        )
    }
}

/// A wall-clock date-time paired with its offset from UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DateTimeOffset {
    date_time: DateTime,
    offset_minutes: i16,
}

impl DateTimeOffset {
    /// Returns `None` when the offset exceeds ±14:00 or the UTC instant falls
    /// outside the representable range.
    pub fn new(date_time: DateTime, offset_minutes: i16) -> Option<Self> {
        if offset_minutes.unsigned_abs() > MAX_OFFSET_MINUTES as u16 {
            return None;
        }
        let shift = u64::from(offset_minutes.unsigned_abs()) * TICKS_PER_MINUTE;
        let utc = if offset_minutes >= 0 {
            date_time.ticks.checked_sub(shift)?
        } else {
            date_time.ticks + shift
        };
        if utc > DateTime::MAX_TICKS {
            return None;
        }
        Some(Self {
            date_time: DateTime {
                ticks: date_time.ticks,
                kind: DateTimeKind::Unspecified,
            },
            offset_minutes,
        })
    }

    /// Local wall-clock time.
    #[inline]
    pub fn date_time(&self) -> DateTime {
        self.date_time
    }

    #[inline]
    pub fn offset_minutes(&self) -> i16 {
        self.offset_minutes
    }

    pub fn utc_ticks(&self) -> u64 {
        let shift = i64::from(self.offset_minutes) * TimeSpan::TICKS_PER_MINUTE;
        self.date_time.ticks.wrapping_sub(shift as u64)
    }

    /// The same instant as a UTC [`DateTime`].
    pub fn utc_date_time(&self) -> DateTime {
        DateTime {
            ticks: self.utc_ticks(),
            kind: DateTimeKind::Utc,
        }
    }
}

/// Raw calendar fields, validated as a whole.
#[derive(Debug, Clone, Copy, Default)]
struct DateComponents {
    year: u16,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
    fraction: u32,
}

impl DateComponents {
    fn to_ticks(&self) -> Option<u64> {
        if !(1..=9999).contains(&self.year) || !(1..=12).contains(&self.month) {
            return None;
        }
        if self.day == 0 || self.day > days_in_month(self.year, self.month) {
            return None;
        }
        if self.hour > 23 || self.minute > 59 || self.second > 59 {
            return None;
        }
        if u64::from(self.fraction) >= TICKS_PER_SECOND {
            return None;
        }

        let days = days_before_year(self.year)
            + u64::from(month_table(self.year)[usize::from(self.month - 1)])
            + u64::from(self.day - 1);
        Some(
            days * TICKS_PER_DAY
                + u64::from(self.hour) * TICKS_PER_HOUR
                + u64::from(self.minute) * TICKS_PER_MINUTE
                + u64::from(self.second) * TICKS_PER_SECOND
                + u64::from(self.fraction),
        )
    }
}

/// Zone information carried by a layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Zone {
    Unspecified,
    Utc,
    Local,
    Offset(i16),
}

/// A validated date-time read from one layout.
#[derive(Debug, Clone, Copy)]
struct Stamp {
    ticks: u64,
    zone: Zone,
    consumed: usize,
}

#[inline]
fn field<T: Integer>(text: &[u8], at: usize, width: usize) -> Option<T> {
    parse_digit_field(text.get(at..at + width)?)
}

#[inline]
fn literal(text: &[u8], at: usize, expected: &[u8]) -> Option<()> {
    (text.get(at..at + expected.len())? == expected).then_some(())
}

#[inline]
fn token(text: &[u8], at: usize, table: &[&[u8; 3]]) -> Option<usize> {
    let word = text.get(at..at + 3)?;
    table.iter().position(|t| word.eq_ignore_ascii_case(&t[..]))
}

/// `HH:mm:ss` at `at`.
fn clock(text: &[u8], at: usize, fields: &mut DateComponents) -> Option<()> {
    fields.hour = field(text, at, 2)?;
    literal(text, at + 2, b":")?;
    fields.minute = field(text, at + 3, 2)?;
    literal(text, at + 5, b":")?;
    fields.second = field(text, at + 6, 2)?;
    Some(())
}

/// `±HH:MM` at `at`, in signed minutes.
fn utc_offset(text: &[u8], at: usize) -> Option<i16> {
    let negative = match text.get(at)? {
        b'+' => false,
        b'-' => true,
        _ => return None,
    };
    let hours: i16 = field(text, at + 1, 2)?;
    literal(text, at + 3, b":")?;
    let minutes: i16 = field(text, at + 4, 2)?;
    if hours > 14 || minutes > 59 || (hours == 14 && minutes != 0) {
        return None;
    }
    let total = hours * 60 + minutes;
    Some(if negative { -total } else { total })
}

/// `Www, dd Mmm yyyy HH:mm:ss GMT`; the weekday must match the date.
fn scan_rfc1123(source: &[u8]) -> Option<Stamp> {
    let text = source.get(..29)?;
    let weekday = token(text, 0, &WEEKDAY_TOKENS)?;
    literal(text, 3, b", ")?;

    let mut fields = DateComponents {
        day: field(text, 5, 2)?,
        ..Default::default()
    };
    literal(text, 7, b" ")?;
    fields.month = token(text, 8, &MONTH_TOKENS)? as u8 + 1;
    literal(text, 11, b" ")?;
    fields.year = field(text, 12, 4)?;
    literal(text, 16, b" ")?;
    clock(text, 17, &mut fields)?;
    if !text.get(25..29)?.eq_ignore_ascii_case(b" gmt") {
        return None;
    }

    let ticks = fields.to_ticks()?;
    let actual = DayOfWeek::from_day_number(ticks / TICKS_PER_DAY);
    if usize::from(actual.index()) != weekday {
        debug!(?actual, parsed = weekday, "RFC 1123 weekday does not match date");
        return None;
    }
    Some(Stamp {
        ticks,
        zone: Zone::Unspecified,
        consumed: 29,
    })
}

/// `yyyy-MM-ddTHH:mm:ss.fffffff` with an optional `Z` or `±HH:MM` suffix.
fn scan_round_trip(source: &[u8]) -> Option<Stamp> {
    let mut fields = DateComponents {
        year: field(source, 0, 4)?,
        ..Default::default()
    };
    literal(source, 4, b"-")?;
    fields.month = field(source, 5, 2)?;
    literal(source, 7, b"-")?;
    fields.day = field(source, 8, 2)?;
    literal(source, 10, b"T")?;
    clock(source, 11, &mut fields)?;
    literal(source, 19, b".")?;
    fields.fraction = field(source, 20, 7)?;

    let (zone, consumed) = match source.get(27) {
        Some(b'Z') => (Zone::Utc, 28),
        Some(b'+' | b'-') => (Zone::Offset(utc_offset(source, 27)?), 33),
        _ => (Zone::Unspecified, 27),
    };
    Some(Stamp {
        ticks: fields.to_ticks()?,
        zone,
        consumed,
    })
}

/// `MM/dd/yyyy HH:mm:ss`, two columns each for month and day.
fn scan_general(source: &[u8]) -> Option<Stamp> {
    let mut fields = DateComponents {
        month: field(source, 0, 2)?,
        ..Default::default()
    };
    literal(source, 2, b"/")?;
    fields.day = field(source, 3, 2)?;
    literal(source, 5, b"/")?;
    fields.year = field(source, 6, 4)?;
    literal(source, 10, b" ")?;
    clock(source, 11, &mut fields)?;
    Some(Stamp {
        ticks: fields.to_ticks()?,
        zone: Zone::Local,
        consumed: 19,
    })
}

/// `MM/dd/yyyy HH:mm:ss ±HH:MM`
fn scan_general_with_offset(source: &[u8]) -> Option<Stamp> {
    let stamp = scan_general(source)?;
    literal(source, 19, b" ")?;
    Some(Stamp {
        zone: Zone::Offset(utc_offset(source, 20)?),
        consumed: 26,
        ..stamp
    })
}

/// Parse a [`DateTime`] in the given layout.
///
/// `R` yields an unspecified kind, `O` follows its suffix (`Z` is UTC, an
/// explicit offset is local wall-clock time) and `G` is local.
pub fn parse_date_time(source: &[u8], format: DateTimeFormat) -> ParseResult<DateTime> {
    let stamp = match format {
        DateTimeFormat::Rfc1123 => scan_rfc1123(source),
        DateTimeFormat::RoundTrip => scan_round_trip(source),
        DateTimeFormat::General | DateTimeFormat::Default => scan_general(source),
    };
    let scanned = stamp.map(|s| {
        let kind = match s.zone {
            Zone::Unspecified => DateTimeKind::Unspecified,
            Zone::Utc => DateTimeKind::Utc,
            Zone::Local | Zone::Offset(_) => DateTimeKind::Local,
        };
        (DateTime { ticks: s.ticks, kind }, s.consumed)
    });

    let result = ParseResult::from_option(scanned);
    if !result.is_ok() {
        trace!(target_type = "DateTime", ?format, len = source.len(), "date-time rejected");
    }
    result
}

/// Parse a [`DateTimeOffset`] in the given layout.
///
/// Layouts without an explicit offset yield offset zero; no time-zone database
/// is consulted.
pub fn parse_date_time_offset(
    source: &[u8],
    format: DateTimeFormat,
) -> ParseResult<DateTimeOffset> {
    let stamp = match format {
        DateTimeFormat::Rfc1123 => scan_rfc1123(source),
        DateTimeFormat::RoundTrip => scan_round_trip(source),
        DateTimeFormat::General => scan_general(source),
        DateTimeFormat::Default => scan_general_with_offset(source),
    };
    let scanned = stamp.and_then(|s| {
        let offset = match s.zone {
            Zone::Offset(minutes) => minutes,
            Zone::Unspecified | Zone::Utc | Zone::Local => 0,
        };
        let date_time = DateTime {
            ticks: s.ticks,
            kind: DateTimeKind::Unspecified,
        };
        Some((DateTimeOffset::new(date_time, offset)?, s.consumed))
    });

    let result = ParseResult::from_option(scanned);
    if !result.is_ok() {
        trace!(target_type = "DateTimeOffset", ?format, len = source.len(), "date-time rejected");
    }
    result
}

/// Parse a [`DateTime`] using a date-time format letter (`R`, `l`, `O`, `G` or `0`).
///
/// # Example
/// ```
/// # use utf8_primitive_parsers::*;
/// let stamp = read_date_time(b"Sun, 06 Nov 1994 08:49:37 GMT", b'R').value();
/// assert_eq!((stamp.year(), stamp.month(), stamp.day()), (1994, 11, 6));
/// assert_eq!(stamp.day_of_week(), DayOfWeek::Sunday);
///
/// let utc = read_date_time(b"2009-06-15T13:45:30.0000000Z", b'O');
/// assert_eq!(utc.consumed(), 28);
/// assert_eq!(utc.value().kind(), DateTimeKind::Utc);
/// ```
#[track_caller]
#[inline]
pub fn read_date_time(source: &[u8], format: u8) -> ParseResult<DateTime> {
    parse_date_time(source, DateTimeFormat::from_symbol(format))
}

/// Parse a [`DateTimeOffset`] using a date-time format letter.
///
/// # Example
/// ```
/// # use utf8_primitive_parsers::read_date_time_offset;
/// let stamp = read_date_time_offset(b"06/15/2009 13:45:30 -07:00", 0);
/// assert_eq!(stamp.consumed(), 26);
/// assert_eq!(stamp.value().offset_minutes(), -420);
/// assert_eq!(stamp.value().utc_date_time().hour(), 20);
/// ```
#[track_caller]
#[inline]
pub fn read_date_time_offset(source: &[u8], format: u8) -> ParseResult<DateTimeOffset> {
    parse_date_time_offset(source, DateTimeFormat::from_symbol(format))
}

#[cfg(feature = "chrono")]
mod chrono_support {
    use super::*;
    use chrono::{FixedOffset, NaiveDateTime, Offset, TimeDelta, Utc};

    /// Ticks at 1970-01-01T00:00:00.
    const UNIX_EPOCH_TICKS: i64 = 621_355_968_000_000_000;

    impl From<DateTime> for NaiveDateTime {
        fn from(value: DateTime) -> Self {
            let since_epoch = TimeSpan::from_ticks(value.ticks() as i64 - UNIX_EPOCH_TICKS);
            chrono::DateTime::<Utc>::UNIX_EPOCH.naive_utc() + TimeDelta::from(since_epoch)
        }
    }

    impl From<DateTimeOffset> for chrono::DateTime<FixedOffset> {
        fn from(value: DateTimeOffset) -> Self {
            let offset = FixedOffset::east_opt(i32::from(value.offset_minutes()) * 60)
                .unwrap_or_else(|| Utc.fix());
            chrono::DateTime::from_naive_utc_and_offset(value.utc_date_time().into(), offset)
        }
    }
}
