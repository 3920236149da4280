//! Real-number lexer for `f32`, `f64` and [`Decimal`].
//!
//! Grammar: `[+-]? [0-9]* ('.' [0-9]*)? ([eE] [+-]? [0-9]+)?`, with at least one
//! digit on either side of the point. The exponent is only part of the grammar
//! for the `G` and `E` formats; `E` requires it, and an `e` under `F` rejects the
//! input. When the grammar does not match, float targets also accept the
//! literals `Infinity`, `-Infinity` and `NaN` (case-sensitive) under every format.
//!
//! Digits are collected into a [`DigitAccumulator`] of 50 significant digits
//! and a decimal scale. Floats are then produced by core's correctly rounded
//! decimal conversion from a stack-rendered digit string; [`Decimal`] rounds
//! half to even at 28 fractional places.

use core::fmt::{self, Write};

use tracing::trace;

use crate::decimal::Decimal;
use crate::format::{FormatSymbol, RealFormat};
use crate::integer::parse_unsigned_digits;
use crate::is_digit;
use crate::result::ParseResult;

/// Significant digits kept by the accumulator.
pub const MAX_SIGNIFICANT_DIGITS: usize = 50;

/// Significand of a scanned real number: `0.d1d2d3... * 10^scale`.
///
/// Leading zeros are never stored. Digits past [`MAX_SIGNIFICANT_DIGITS`] are
/// dropped, but integer-part digits still advance the scale and any non-zero
/// dropped digit is remembered for rounding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DigitAccumulator {
    digits: [u8; MAX_SIGNIFICANT_DIGITS],
    len: usize,
    scale: i32,
    negative: bool,
    nonzero_tail: bool,
}

impl DigitAccumulator {
    const fn new(negative: bool) -> Self {
        Self {
            digits: [0; MAX_SIGNIFICANT_DIGITS],
            len: 0,
            scale: 0,
            negative,
            nonzero_tail: false,
        }
    }

    #[inline(always)]
    fn push(&mut self, digit: u8) {
        if let Some(slot) = self.digits.get_mut(self.len) {
            *slot = digit;
            self.len += 1;
        } else {
            self.nonzero_tail |= digit != 0;
        }
    }

    /// Stored digit values (0-9), most significant first.
    #[inline]
    pub fn digits(&self) -> &[u8] {
        &self.digits[..self.len]
    }

    #[inline]
    pub fn scale(&self) -> i32 {
        self.scale
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// Whether non-zero digits were dropped past the capacity.
    #[inline]
    pub fn has_nonzero_tail(&self) -> bool {
        self.nonzero_tail
    }
}

/// Literal values accepted when the numeric grammar fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecialValue {
    PositiveInfinity,
    NegativeInfinity,
    NaN,
}

/// A target of the real-number lexer.
pub trait Real: Copy + Default {
    const NAME: &'static str;

    /// Converts a scanned significand; `None` when it is out of range.
    fn from_significand(significand: &DigitAccumulator) -> Option<Self>;

    /// Converts a special literal; `None` when the type has no such value.
    fn from_special(special: SpecialValue) -> Option<Self>;
}

/// Digit string rendered on the stack for core's float parser.
///
/// Sign, 50 digits, a sticky digit, `e` and an `i64` exponent fit in 80 bytes.
struct StackText {
    buf: [u8; 80],
    len: usize,
}

impl StackText {
    fn new() -> Self {
        Self {
            buf: [0; 80],
            len: 0,
        }
    }

    fn as_str(&self) -> Option<&str> {
        core::str::from_utf8(&self.buf[..self.len]).ok()
    }
}

impl Write for StackText {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let end = self.len + s.len();
        let dst = self.buf.get_mut(self.len..end).ok_or(fmt::Error)?;
        dst.copy_from_slice(s.as_bytes());
        self.len = end;
        Ok(())
    }
}

/// Renders `d1d2...dn e(scale - n)`, appending a sticky `1` when non-zero
/// digits were dropped so that rounding sees an inexact tail.
fn render_significand(significand: &DigitAccumulator) -> Option<StackText> {
    let mut text = StackText::new();
    if significand.negative {
        text.write_char('-').ok()?;
    }
    let digits = significand.digits();
    if digits.is_empty() {
        text.write_char('0').ok()?;
    }
    for &digit in digits {
        text.write_char(char::from(b'0' + digit)).ok()?;
    }
    let mut written = digits.len() as i64;
    if significand.nonzero_tail {
        text.write_char('1').ok()?;
        written += 1;
    }
    let exponent = i64::from(significand.scale) - written;
    write!(text, "e{exponent}").ok()?;
    Some(text)
}

impl Real for f64 {
    const NAME: &'static str = "f64";

    fn from_significand(significand: &DigitAccumulator) -> Option<Self> {
        render_significand(significand)?.as_str()?.parse().ok()
    }

    fn from_special(special: SpecialValue) -> Option<Self> {
        Some(match special {
            SpecialValue::PositiveInfinity => f64::INFINITY,
            SpecialValue::NegativeInfinity => f64::NEG_INFINITY,
            SpecialValue::NaN => f64::NAN,
        })
    }
}

impl Real for f32 {
    const NAME: &'static str = "f32";

    fn from_significand(significand: &DigitAccumulator) -> Option<Self> {
        render_significand(significand)?.as_str()?.parse().ok()
    }

    fn from_special(special: SpecialValue) -> Option<Self> {
        Some(match special {
            SpecialValue::PositiveInfinity => f32::INFINITY,
            SpecialValue::NegativeInfinity => f32::NEG_INFINITY,
            SpecialValue::NaN => f32::NAN,
        })
    }
}

impl Real for Decimal {
    const NAME: &'static str = "decimal";

    fn from_significand(significand: &DigitAccumulator) -> Option<Self> {
        Decimal::from_significand(significand)
    }

    fn from_special(_special: SpecialValue) -> Option<Self> {
        None
    }
}

/// Scans sign, digits, fraction and exponent into a significand.
fn scan_significand(source: &[u8], format: RealFormat) -> Option<(DigitAccumulator, usize)> {
    let mut index = 0;
    let negative = match source.first()? {
        b'-' => {
            index += 1;
            true
        }
        b'+' => {
            index += 1;
            false
        }
        _ => false,
    };
    let mut significand = DigitAccumulator::new(negative);

    // Integer part: leading zeros are dropped, every other digit counts toward the scale
    let integer_start = index;
    while source.get(index) == Some(&b'0') {
        index += 1;
    }
    while let Some(&b) = source.get(index) {
        if !is_digit(b) {
            break;
        }
        significand.push(b - b'0');
        significand.scale = significand.scale.saturating_add(1);
        index += 1;
    }
    let integer_digits = index - integer_start;

    // Fraction: zeros ahead of the first stored digit only lower the scale
    let mut fraction_digits = 0;
    if source.get(index) == Some(&b'.') {
        index += 1;
        let fraction_start = index;
        while let Some(&b) = source.get(index) {
            if !is_digit(b) {
                break;
            }
            if b == b'0' && significand.len == 0 {
                significand.scale = significand.scale.saturating_sub(1);
            } else {
                significand.push(b - b'0');
            }
            index += 1;
        }
        fraction_digits = index - fraction_start;
    }

    if integer_digits == 0 && fraction_digits == 0 {
        return None;
    }

    if !matches!(source.get(index), Some(b'e' | b'E')) {
        return match format {
            RealFormat::Exponent => None,
            _ => Some((significand, index)),
        };
    }
    if !format.allows_exponent() {
        return None;
    }
    index += 1;

    let negative_exponent = match source.get(index) {
        Some(b'-') => {
            index += 1;
            true
        }
        Some(b'+') => {
            index += 1;
            false
        }
        _ => false,
    };
    let (magnitude, n) = parse_unsigned_digits::<u32>(source.get(index..)?).into_option()?;
    index += n;

    let scale = i64::from(significand.scale);
    let magnitude = i64::from(magnitude);
    significand.scale = if negative_exponent {
        // Far below any representable value; pin and let conversion produce zero
        i32::try_from(scale - magnitude).unwrap_or(i32::MIN)
    } else {
        i32::try_from(scale + magnitude).ok()?
    };

    Some((significand, index))
}

fn scan_special(source: &[u8]) -> Option<(SpecialValue, usize)> {
    const LITERALS: [(&[u8], SpecialValue); 3] = [
        (b"Infinity", SpecialValue::PositiveInfinity),
        (b"-Infinity", SpecialValue::NegativeInfinity),
        (b"NaN", SpecialValue::NaN),
    ];
    LITERALS
        .iter()
        .find(|(literal, _)| source.starts_with(literal))
        .map(|&(literal, special)| (special, literal.len()))
}

/// Parse a real number of type `T` with the given format.
///
/// # Example
/// ```
/// # use utf8_primitive_parsers::*;
/// let parsed: ParseResult<f64> = parse_real(b"-1.5e3", RealFormat::General);
/// assert_eq!(parsed.parts(), (true, -1500.0, 6));
/// let parsed: ParseResult<f64> = parse_real(b"-1.5e3", RealFormat::Fixed);
/// assert!(!parsed.is_ok());
/// let parsed: ParseResult<f32> = parse_real(b"Infinity", RealFormat::Fixed);
/// assert_eq!(parsed.value(), f32::INFINITY);
/// ```
pub fn parse_real<T: Real>(source: &[u8], format: RealFormat) -> ParseResult<T> {
    let numeric = scan_significand(source, format)
        .and_then(|(significand, n)| Some((T::from_significand(&significand)?, n)));
    let scanned = numeric.or_else(|| {
        let (special, n) = scan_special(source)?;
        Some((T::from_special(special)?, n))
    });

    let result = ParseResult::from_option(scanned);
    if !result.is_ok() {
        trace!(target_type = T::NAME, ?format, len = source.len(), "real number rejected");
    }
    result
}

/// Parse an f32 using a real-number format letter (`G`, `E`, `F`).
#[track_caller]
#[inline]
pub fn read_f32(source: &[u8], format: u8) -> ParseResult<f32> {
    parse_real(source, RealFormat::from_symbol(format))
}

/// Parse an f64 using a real-number format letter (`G`, `E`, `F`).
///
/// # Example
/// ```
/// # use utf8_primitive_parsers::read_f64;
/// assert_eq!(read_f64(b"123.456", 0).parts(), (true, 123.456, 7));
/// assert_eq!(read_f64(b"2.5E-3", b'E').value(), 0.0025);
/// assert!(!read_f64(b"2.5", b'E').is_ok());
/// assert!(read_f64(b"NaN", b'F').value().is_nan());
/// ```
#[track_caller]
#[inline]
pub fn read_f64(source: &[u8], format: u8) -> ParseResult<f64> {
    parse_real(source, RealFormat::from_symbol(format))
}

/// Parse a [`Decimal`] using a real-number format letter (`G`, `E`, `F`).
///
/// # Example
/// ```
/// # use utf8_primitive_parsers::read_decimal;
/// let price = read_decimal(b"123.4500", 0).value();
/// assert_eq!((price.mantissa(), price.scale()), (1_234_500, 4));
/// ```
#[track_caller]
#[inline]
pub fn read_decimal(source: &[u8], format: u8) -> ParseResult<Decimal> {
    parse_real(source, RealFormat::from_symbol(format))
}
