//! Duration lexer and the [`TimeSpan`] value.
//!
//! All three layouts share one component splitter: after optional leading
//! blanks and a `-` sign, up to five unsigned numbers are read, separated by
//! `:` or `.`. The separators are packed into a tag (`:` = 1, `.` = 2, first
//! separator in the high byte) and each format accepts a fixed set of tags:
//!
//! | tag          | `c`         | `g`         | `G`         |
//! |--------------|-------------|-------------|-------------|
//! | `0x00000000` | `d`         | `d`         |             |
//! | `0x01000000` | `h:m`       | `h:m`       |             |
//! | `0x01010000` | `h:m:s`     | `h:m:s`     |             |
//! | `0x01010200` | `h:m:s.f`   | `h:m:s.f`   |             |
//! | `0x02010000` | `d.h:m`     |             |             |
//! | `0x02010100` | `d.h:m:s`   |             |             |
//! | `0x02010102` | `d.h:m:s.f` |             |             |
//! | `0x01010100` |             | `d:h:m:s`   |             |
//! | `0x01010102` |             | `d:h:m:s.f` | `d:h:m:s.f` |
//!
//! A `.` after the second or later component introduces a fraction of 1 to 7
//! digits; after the first component it separates the day count.

use core::fmt;

use tracing::trace;

use crate::format::{FormatSymbol, TimeSpanFormat};
use crate::integer::{parse_fraction_ticks, parse_unsigned_digits};
use crate::result::ParseResult;

const COLON: u32 = 1;
const PERIOD: u32 = 2;
const MAX_COMPONENTS: usize = 5;

/// A signed length of time in 100 ns ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct TimeSpan {
    ticks: i64,
}

impl TimeSpan {
    pub const TICKS_PER_MILLISECOND: i64 = 10_000;
    pub const TICKS_PER_SECOND: i64 = 10_000_000;
    pub const TICKS_PER_MINUTE: i64 = 600_000_000;
    pub const TICKS_PER_HOUR: i64 = 36_000_000_000;
    pub const TICKS_PER_DAY: i64 = 864_000_000_000;

    pub const ZERO: TimeSpan = TimeSpan { ticks: 0 };
    pub const MIN: TimeSpan = TimeSpan { ticks: i64::MIN };
    pub const MAX: TimeSpan = TimeSpan { ticks: i64::MAX };

    #[inline]
    pub const fn from_ticks(ticks: i64) -> Self {
        Self { ticks }
    }

    #[inline]
    pub fn ticks(&self) -> i64 {
        self.ticks
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        self.ticks < 0
    }

    /// Whole days; the remaining components carry the same sign.
    pub fn days(&self) -> i64 {
        self.ticks / Self::TICKS_PER_DAY
    }

    pub fn hours(&self) -> i64 {
        self.ticks / Self::TICKS_PER_HOUR % 24
    }

    pub fn minutes(&self) -> i64 {
        self.ticks / Self::TICKS_PER_MINUTE % 60
    }

    pub fn seconds(&self) -> i64 {
        self.ticks / Self::TICKS_PER_SECOND % 60
    }

    pub fn milliseconds(&self) -> i64 {
        self.ticks / Self::TICKS_PER_MILLISECOND % 1000
    }

    /// Sub-second part in ticks.
    pub fn fraction_ticks(&self) -> i64 {
        self.ticks % Self::TICKS_PER_SECOND
    }

    /// Whole seconds, truncated toward zero.
    pub fn total_seconds(&self) -> i64 {
        self.ticks / Self::TICKS_PER_SECOND
    }

    /// Whole milliseconds, truncated toward zero.
    pub fn total_milliseconds(&self) -> i64 {
        self.ticks / Self::TICKS_PER_MILLISECOND
    }
}

/// Constant layout: `[-][d.]hh:mm:ss[.fffffff]`.
impl fmt::Display for TimeSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ticks = self.ticks.unsigned_abs();
        let per_second = Self::TICKS_PER_SECOND as u64;
        let seconds = ticks / per_second;
        let fraction = ticks % per_second;
        let (days, hours) = (seconds / 86_400, seconds / 3_600 % 24);
        let (minutes, seconds) = (seconds / 60 % 60, seconds % 60);

        if self.ticks < 0 {
            f.write_str("-")?;
        }
        if days > 0 {
            write!(f, "{days}.")?;
        }
        write!(f, "{hours:02}:{minutes:02}:{seconds:02}")?;
        if fraction > 0 {
            write!(f, ".{fraction:07}")?;
        }
        Ok(())
    }
}

/// Which components a separator tag carries besides hours and minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Shape {
    days: bool,
    fraction: bool,
}

const CLOCK: Shape = Shape {
    days: false,
    fraction: false,
};
const CLOCK_FRACTION: Shape = Shape {
    days: false,
    fraction: true,
};
/// Leading day count, with or without a clock.
const DAYS: Shape = Shape {
    days: true,
    fraction: false,
};
const DAYS_FRACTION: Shape = Shape {
    days: true,
    fraction: true,
};

const CONSTANT_SHAPES: [(u32, Shape); 7] = [
    (0x0000_0000, DAYS),
    (0x0100_0000, CLOCK),
    (0x0101_0000, CLOCK),
    (0x0101_0200, CLOCK_FRACTION),
    (0x0201_0000, DAYS),
    (0x0201_0100, DAYS),
    (0x0201_0102, DAYS_FRACTION),
];

const SHORT_GENERAL_SHAPES: [(u32, Shape); 6] = [
    (0x0000_0000, DAYS),
    (0x0100_0000, CLOCK),
    (0x0101_0000, CLOCK),
    (0x0101_0200, CLOCK_FRACTION),
    (0x0101_0100, DAYS),
    (0x0101_0102, DAYS_FRACTION),
];

const LONG_GENERAL_SHAPES: [(u32, Shape); 1] = [(0x0101_0102, DAYS_FRACTION)];

/// Numbers and separators read by the splitter. A fraction is stored in ticks.
#[derive(Debug, Clone, Copy, Default)]
struct DurationComponents {
    values: [u32; MAX_COMPONENTS],
    count: usize,
    tag: u32,
    negative: bool,
    consumed: usize,
}

impl DurationComponents {
    fn split(source: &[u8]) -> Option<Self> {
        let mut parts = Self::default();
        let mut index = source
            .iter()
            .take_while(|&&b| b == b' ' || b == b'\t')
            .count();
        if source.get(index) == Some(&b'-') {
            parts.negative = true;
            index += 1;
        }

        let mut separator = 0;
        loop {
            let rest = source.get(index..)?;
            let component = if separator == PERIOD && parts.count >= 2 {
                parse_fraction_ticks(rest)
            } else {
                parse_unsigned_digits::<u32>(rest)
            };
            let (value, n) = component.into_option()?;
            *parts.values.get_mut(parts.count)? = value;
            parts.count += 1;
            index += n;

            separator = match source.get(index) {
                Some(b':') => COLON,
                Some(b'.') => PERIOD,
                _ => break,
            };
            if parts.count == MAX_COMPONENTS {
                return None;
            }
            parts.tag |= separator << (8 * (4 - parts.count));
            index += 1;
        }

        parts.consumed = index;
        Some(parts)
    }

    fn to_time_span(&self, format: TimeSpanFormat) -> Option<TimeSpan> {
        let shapes: &[(u32, Shape)] = match format {
            TimeSpanFormat::Constant => &CONSTANT_SHAPES,
            TimeSpanFormat::ShortGeneral => &SHORT_GENERAL_SHAPES,
            TimeSpanFormat::LongGeneral => &LONG_GENERAL_SHAPES,
        };
        let shape = shapes
            .iter()
            .find(|(tag, _)| *tag == self.tag)
            .map(|&(_, shape)| shape)?;

        let values = self.values.get(..self.count)?;
        let (days, rest) = match values.split_first() {
            Some((&days, rest)) if shape.days => (days, rest),
            _ => (0, values),
        };
        let (fraction, clock) = match rest.split_last() {
            Some((&fraction, clock)) if shape.fraction => (fraction, clock),
            _ => (0, rest),
        };
        let (hours, minutes, seconds) = match *clock {
            [] => (0, 0, 0),
            [h, m] => (h, m, 0),
            [h, m, s] => (h, m, s),
            _ => return None,
        };
        if hours > 23 || minutes > 59 || seconds > 59 {
            return None;
        }

        let limit = i64::MAX as u64 + u64::from(self.negative);
        let ticks = u64::from(days)
            .checked_mul(TimeSpan::TICKS_PER_DAY as u64)?
            .checked_add(u64::from(hours) * TimeSpan::TICKS_PER_HOUR as u64)?
            .checked_add(u64::from(minutes) * TimeSpan::TICKS_PER_MINUTE as u64)?
            .checked_add(u64::from(seconds) * TimeSpan::TICKS_PER_SECOND as u64)?
            .checked_add(u64::from(fraction))?;
        if ticks > limit {
            return None;
        }

        let ticks = if self.negative {
            (ticks as i64).wrapping_neg()
        } else {
            ticks as i64
        };
        Some(TimeSpan { ticks })
    }
}

/// Parse a [`TimeSpan`] in the given layout.
pub fn parse_time_span(source: &[u8], format: TimeSpanFormat) -> ParseResult<TimeSpan> {
    let scanned = DurationComponents::split(source)
        .and_then(|parts| Some((parts.to_time_span(format)?, parts.consumed)));

    let result = ParseResult::from_option(scanned);
    if !result.is_ok() {
        trace!(target_type = "TimeSpan", ?format, len = source.len(), "time span rejected");
    }
    result
}

/// Parse a [`TimeSpan`] using a duration format letter (`c`, `t`, `T`, `g`, `G` or `0`).
///
/// # Example
/// ```
/// # use utf8_primitive_parsers::read_time_span;
/// let span = read_time_span(b"1.02:03:04.5", b'c').value();
/// assert_eq!((span.days(), span.hours(), span.minutes(), span.seconds()), (1, 2, 3, 4));
/// assert_eq!(span.milliseconds(), 500);
///
/// assert_eq!(read_time_span(b"-0:30", b'g').value().total_seconds(), -1800);
/// assert!(!read_time_span(b"1.02:03:04", b'g').is_ok());
/// ```
#[track_caller]
#[inline]
pub fn read_time_span(source: &[u8], format: u8) -> ParseResult<TimeSpan> {
    parse_time_span(source, TimeSpanFormat::from_symbol(format))
}

#[cfg(feature = "chrono")]
impl From<TimeSpan> for chrono::TimeDelta {
    fn from(value: TimeSpan) -> Self {
        let seconds = value.ticks.div_euclid(TimeSpan::TICKS_PER_SECOND);
        let fraction = value.ticks.rem_euclid(TimeSpan::TICKS_PER_SECOND);
        chrono::TimeDelta::seconds(seconds) + chrono::TimeDelta::nanoseconds(fraction * 100)
    }
}
