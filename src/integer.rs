//! Integer lexers for every fixed width, signed and unsigned.
//!
//! Three grammars are supported (see [`IntegerFormat`]):
//!
//! - **Decimal** (`G`/`D`/default): `[+-]? [0-9]+`
//! - **Grouped** (`N`): `[+-]? [0-9] [0-9,]* ('.' '0'*)?` or `[+-]? '.' '0'+`
//! - **Hex** (`X`): `[0-9A-Fa-f]+`, reinterpreted as the width's bit pattern
//!
//! All grammars are maximal-munch. Overflow is detected before each
//! multiply-add, against a per-width, per-sign limit, so the accumulator never
//! wraps: a digit that would cross the limit rejects the whole input rather than
//! truncating it. `-` is only part of the grammar for signed widths.
//!
//! # Example
//! ```
//! # use utf8_primitive_parsers::*;
//! assert_eq!(read_i32(b"-2147483648", 0).parts(), (true, i32::MIN, 11));
//! assert!(!read_i32(b"2147483648", 0).is_ok());
//! assert_eq!(read_u32(b"1,234,567.00", b'N').value(), 1_234_567);
//! assert_eq!(read_i16(b"FFFF", b'X').value(), -1);
//! ```

use tracing::trace;

use crate::format::{FormatSymbol, IntegerFormat};
use crate::result::ParseResult;
use crate::{HEX_LOOKUP, NOT_HEX, is_digit};

/// Digits in a tick-resolution fraction (100 ns).
pub(crate) const FRACTION_DIGITS: usize = 7;

/// A fixed-width integer the lexers can produce.
///
/// Magnitudes are accumulated in a `u64`; each width supplies its limits and
/// the narrowing conversions.
pub trait Integer: Copy + Default + core::fmt::Debug {
    const NAME: &'static str;
    const SIGNED: bool;
    /// `Self::MAX` widened to `u64`.
    const MAX_MAGNITUDE: u64;
    /// Every bit of the width set.
    const MASK: u64;

    /// Applies the sign to an in-range magnitude.
    fn from_magnitude(magnitude: u64, negative: bool) -> Self;

    /// Reinterprets the low bits of `bits` as this width.
    fn from_bits(bits: u64) -> Self;
}

macro_rules! impl_integer {
    ($($ty:ty => $bits:ty, $signed:literal);* $(;)?) => {$(
        impl Integer for $ty {
            const NAME: &'static str = stringify!($ty);
            const SIGNED: bool = $signed;
            const MAX_MAGNITUDE: u64 = <$ty>::MAX as u64;
            const MASK: u64 = <$bits>::MAX as u64;

            #[inline(always)]
            fn from_magnitude(magnitude: u64, negative: bool) -> Self {
                if negative {
                    // MIN has magnitude MAX + 1; wrapping_neg maps it onto itself
                    (magnitude as i64).wrapping_neg() as $ty
                } else {
                    magnitude as $ty
                }
            }

            #[inline(always)]
            fn from_bits(bits: u64) -> Self {
                bits as $bits as $ty
            }
        }
    )*};
}

impl_integer! {
    u8 => u8, false;
    u16 => u16, false;
    u32 => u32, false;
    u64 => u64, false;
    i8 => u8, true;
    i16 => u16, true;
    i32 => u32, true;
    i64 => u64, true;
}

/// Largest magnitude representable for the given sign.
#[inline(always)]
fn magnitude_limit<T: Integer>(negative: bool) -> u64 {
    if negative {
        T::MAX_MAGNITUDE + 1
    } else {
        T::MAX_MAGNITUDE
    }
}

/// `acc * 10 + digit`, or `None` when the result would exceed `limit`.
///
/// For a 32-bit signed positive limit the boundary is 214748364 and the last
/// accepted digit at the boundary is 7 (8 when negative).
#[inline(always)]
fn push_digit(acc: u64, digit: u8, limit: u64) -> Option<u64> {
    let boundary = limit / 10;
    let digit = u64::from(digit);
    if acc > boundary || (acc == boundary && digit > limit % 10) {
        return None;
    }
    Some(acc * 10 + digit)
}

/// Maximal run of decimal digits starting at `start`.
#[inline(always)]
fn scan_digits(source: &[u8], start: usize, limit: u64) -> Option<(u64, usize)> {
    let mut acc: u64 = 0;
    let mut index = start;
    while let Some(&b) = source.get(index) {
        if !is_digit(b) {
            break;
        }
        acc = push_digit(acc, b - b'0', limit)?;
        index += 1;
    }
    (index > start).then_some((acc, index))
}

/// Decimal digits with `,` separators and an optional all-zero fraction.
fn scan_grouped(source: &[u8], start: usize, limit: u64) -> Option<(u64, usize)> {
    let mut acc: u64 = 0;
    let mut index = start;

    match source.get(index) {
        // ".000" needs at least one zero when no integral digit precedes it
        Some(b'.') => {
            if source.get(index + 1) != Some(&b'0') {
                return None;
            }
        }
        Some(&b) if is_digit(b) => {
            acc = u64::from(b - b'0');
            index += 1;
            while let Some(&b) = source.get(index) {
                match b {
                    b',' => index += 1,
                    b'0'..=b'9' => {
                        acc = push_digit(acc, b - b'0', limit)?;
                        index += 1;
                    }
                    _ => break,
                }
            }
            if source.get(index) != Some(&b'.') {
                return Some((acc, index));
            }
        }
        _ => return None,
    }

    // Fractional tail: zeros only
    index += 1;
    while source.get(index) == Some(&b'0') {
        index += 1;
    }
    match source.get(index) {
        Some(&b) if is_digit(b) => None,
        _ => Some((acc, index)),
    }
}

/// Maximal run of hex digits, rejected once a further nibble would not fit `mask`.
#[inline(always)]
fn scan_hex(source: &[u8], mask: u64) -> Option<(u64, usize)> {
    let mut acc: u64 = 0;
    let mut index = 0;
    while let Some(&b) = source.get(index) {
        let nibble = HEX_LOOKUP[b as usize];
        if nibble == NOT_HEX {
            break;
        }
        if acc > mask >> 4 {
            return None;
        }
        acc = (acc << 4) | u64::from(nibble);
        index += 1;
    }
    (index > 0).then_some((acc, index))
}

/// Parse an integer of width `T` with the given grammar.
///
/// # Example
/// ```
/// # use utf8_primitive_parsers::*;
/// let parsed: ParseResult<u64> = parse_integer(b"18446744073709551615", IntegerFormat::Decimal);
/// assert_eq!(parsed.value(), u64::MAX);
/// let parsed: ParseResult<u8> = parse_integer(b"1FF", IntegerFormat::Hex);
/// assert!(!parsed.is_ok());
/// ```
pub fn parse_integer<T: Integer>(source: &[u8], format: IntegerFormat) -> ParseResult<T> {
    let result = ParseResult::from_option(scan_integer::<T>(source, format));
    if !result.is_ok() {
        trace!(target_type = T::NAME, ?format, len = source.len(), "integer rejected");
    }
    result
}

fn scan_integer<T: Integer>(source: &[u8], format: IntegerFormat) -> Option<(T, usize)> {
    if format == IntegerFormat::Hex {
        let (bits, n) = scan_hex(source, T::MASK)?;
        return Some((T::from_bits(bits), n));
    }

    let (negative, start) = match source.first() {
        Some(b'-') if !T::SIGNED => return None,
        Some(b'-') => (true, 1),
        Some(b'+') => (false, 1),
        _ => (false, 0),
    };
    let limit = magnitude_limit::<T>(negative);
    let (magnitude, n) = if format == IntegerFormat::Grouped {
        scan_grouped(source, start, limit)?
    } else {
        scan_digits(source, start, limit)?
    };
    Some((T::from_magnitude(magnitude, negative), n))
}

/// Unsigned decimal digits with no sign, the leaf shared by the other lexers.
#[inline]
pub(crate) fn parse_unsigned_digits<T: Integer>(source: &[u8]) -> ParseResult<T> {
    ParseResult::from_option(
        scan_digits(source, 0, T::MAX_MAGNITUDE).map(|(m, n)| (T::from_magnitude(m, false), n)),
    )
}

/// A fixed-position decimal field: every byte of `field` must be a digit.
#[inline]
pub(crate) fn parse_digit_field<T: Integer>(field: &[u8]) -> Option<T> {
    parse_unsigned_digits::<T>(field).exact(field.len()).ok()
}

/// A fixed-position hex field: every byte of `field` must be a hex digit.
#[inline]
pub(crate) fn parse_hex_field<T: Integer>(field: &[u8]) -> Option<T> {
    ParseResult::from_option(scan_hex(field, T::MASK).map(|(bits, n)| (T::from_bits(bits), n)))
        .exact(field.len())
        .ok()
}

/// 1 to 7 fraction digits scaled up to tick resolution.
///
/// `"5"` is 5_000_000 ticks; an eighth digit rejects the input.
pub(crate) fn parse_fraction_ticks(source: &[u8]) -> ParseResult<u32> {
    let mut fraction: u32 = 0;
    let mut count = 0;
    while let Some(&b) = source.get(count) {
        if !is_digit(b) {
            break;
        }
        if count == FRACTION_DIGITS {
            return ParseResult::failure();
        }
        fraction = fraction * 10 + u32::from(b - b'0');
        count += 1;
    }
    if count == 0 {
        return ParseResult::failure();
    }
    fraction *= 10u32.pow((FRACTION_DIGITS - count) as u32);
    ParseResult::success(fraction, count)
}

/// Parse a u8 using an integer format letter.
///
/// # Panics
/// Panics if `format` is not an integer format letter.
#[track_caller]
#[inline]
pub fn read_u8(source: &[u8], format: u8) -> ParseResult<u8> {
    parse_integer(source, IntegerFormat::from_symbol(format))
}

/// Parse a u16 using an integer format letter.
///
/// # Example
/// ```
/// # use utf8_primitive_parsers::read_u16;
/// assert_eq!(read_u16(b"65535", 0).value(), 65535);
/// assert!(!read_u16(b"65536", 0).is_ok());
/// assert_eq!(read_u16(b"123abc", 0).consumed(), 3);
/// ```
#[track_caller]
#[inline]
pub fn read_u16(source: &[u8], format: u8) -> ParseResult<u16> {
    parse_integer(source, IntegerFormat::from_symbol(format))
}

/// Parse a u32 using an integer format letter.
#[track_caller]
#[inline]
pub fn read_u32(source: &[u8], format: u8) -> ParseResult<u32> {
    parse_integer(source, IntegerFormat::from_symbol(format))
}

/// Parse a u64 using an integer format letter.
#[track_caller]
#[inline]
pub fn read_u64(source: &[u8], format: u8) -> ParseResult<u64> {
    parse_integer(source, IntegerFormat::from_symbol(format))
}

/// Parse an i8 using an integer format letter.
#[track_caller]
#[inline]
pub fn read_i8(source: &[u8], format: u8) -> ParseResult<i8> {
    parse_integer(source, IntegerFormat::from_symbol(format))
}

/// Parse an i16 using an integer format letter.
#[track_caller]
#[inline]
pub fn read_i16(source: &[u8], format: u8) -> ParseResult<i16> {
    parse_integer(source, IntegerFormat::from_symbol(format))
}

/// Parse an i32 using an integer format letter.
///
/// Handles i32::MIN, whose magnitude is one larger than i32::MAX.
///
/// # Example
/// ```
/// # use utf8_primitive_parsers::read_i32;
/// assert_eq!(read_i32(b"2147483647", 0).parts(), (true, i32::MAX, 10));
/// assert_eq!(read_i32(b"-2147483648", 0).parts(), (true, i32::MIN, 11));
/// assert_eq!(read_i32(b"-2147483649", 0).parts(), (false, 0, 0));
/// ```
#[track_caller]
#[inline]
pub fn read_i32(source: &[u8], format: u8) -> ParseResult<i32> {
    parse_integer(source, IntegerFormat::from_symbol(format))
}

/// Parse an i64 using an integer format letter.
#[track_caller]
#[inline]
pub fn read_i64(source: &[u8], format: u8) -> ParseResult<i64> {
    parse_integer(source, IntegerFormat::from_symbol(format))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_read_u32_decimal() {
        assert_eq!(read_u32(b"0", 0).parts(), (true, 0, 1));
        assert_eq!(read_u32(b"123456789", 0).parts(), (true, 123456789, 9));
        assert_eq!(read_u32(b"4294967295", 0).parts(), (true, u32::MAX, 10));
        assert_eq!(read_u32(b"4294967296", 0).parts(), (false, 0, 0));
        assert_eq!(read_u32(b"123abc", b'D').parts(), (true, 123, 3));
        assert_eq!(read_u32(b"+7", b'G').parts(), (true, 7, 2));
        assert_eq!(read_u32(b"-7", 0).parts(), (false, 0, 0));
        assert_eq!(read_u32(b"", 0).parts(), (false, 0, 0));
        assert_eq!(read_u32(b"abc", 0).parts(), (false, 0, 0));
    }

    #[test]
    fn test_read_i32_boundaries() {
        assert_eq!(read_i32(b"2147483647", 0).parts(), (true, i32::MAX, 10));
        assert_eq!(read_i32(b"2147483648", 0).parts(), (false, 0, 0));
        assert_eq!(read_i32(b"-2147483648", 0).parts(), (true, i32::MIN, 11));
        assert_eq!(read_i32(b"-2147483649", 0).parts(), (false, 0, 0));
        assert_eq!(read_i32(b"+2147483647", 0).parts(), (true, i32::MAX, 11));
        // overflow is a failure, not a truncated success
        assert_eq!(read_i32(b"21474836470", 0).parts(), (false, 0, 0));
    }

    #[test]
    fn test_leading_zeros() {
        assert_eq!(read_u8(b"000000255", 0).parts(), (true, 255, 9));
        assert_eq!(read_i8(b"-00000128", 0).parts(), (true, -128, 9));
        assert_eq!(read_u64(b"0000", 0).parts(), (true, 0, 4));
    }

    #[test]
    fn test_sign_without_digits() {
        assert_eq!(read_i16(b"-", 0).parts(), (false, 0, 0));
        assert_eq!(read_i16(b"+", 0).parts(), (false, 0, 0));
        assert_eq!(read_i16(b"-x", 0).parts(), (false, 0, 0));
        assert_eq!(read_i16(b"--1", 0).parts(), (false, 0, 0));
    }

    #[test]
    fn test_width_boundaries() {
        assert_eq!(read_u8(b"255", 0).value(), u8::MAX);
        assert!(!read_u8(b"256", 0).is_ok());
        assert_eq!(read_i8(b"127", 0).value(), i8::MAX);
        assert!(!read_i8(b"128", 0).is_ok());
        assert_eq!(read_i8(b"-128", 0).value(), i8::MIN);
        assert_eq!(read_u16(b"65535", 0).value(), u16::MAX);
        assert!(!read_u16(b"65536", 0).is_ok());
        assert_eq!(read_i16(b"-32768", 0).value(), i16::MIN);
        assert!(!read_i16(b"32768", 0).is_ok());
        assert_eq!(read_u64(b"18446744073709551615", 0).value(), u64::MAX);
        assert!(!read_u64(b"18446744073709551616", 0).is_ok());
        assert!(!read_u64(b"18446744073709551619", 0).is_ok());
        assert_eq!(read_i64(b"9223372036854775807", 0).value(), i64::MAX);
        assert_eq!(read_i64(b"-9223372036854775808", 0).value(), i64::MIN);
        assert!(!read_i64(b"9223372036854775808", 0).is_ok());
        assert!(!read_i64(b"-9223372036854775809", 0).is_ok());
    }

    #[test]
    fn test_read_grouped() {
        assert_eq!(read_i32(b"1,234,567", b'N').parts(), (true, 1234567, 9));
        assert_eq!(read_i32(b"-1,234.000", b'N').parts(), (true, -1234, 10));
        assert_eq!(read_u32(b"12,,3,", b'N').parts(), (true, 123, 6));
        assert_eq!(read_u32(b"5.", b'n').parts(), (true, 5, 2));
        assert_eq!(read_u32(b".00", b'N').parts(), (true, 0, 3));
        assert_eq!(read_u32(b"7.00x", b'N').parts(), (true, 7, 4));
        assert_eq!(read_u32(b"1.50", b'N').parts(), (false, 0, 0));
        assert_eq!(read_u32(b".5", b'N').parts(), (false, 0, 0));
        assert_eq!(read_u32(b".", b'N').parts(), (false, 0, 0));
        assert_eq!(read_u32(b",1", b'N').parts(), (false, 0, 0));
        assert_eq!(read_i8(b"-1,28", b'N').parts(), (true, -128, 5));
        assert_eq!(read_i8(b"1,28", b'N').parts(), (false, 0, 0));
    }

    #[test]
    fn test_read_hex() {
        assert_eq!(read_u8(b"FF", b'X').parts(), (true, 255, 2));
        assert_eq!(read_u8(b"1FF", b'X').parts(), (false, 0, 0));
        assert_eq!(read_u8(b"00000ff", b'x').parts(), (true, 255, 7));
        assert_eq!(read_u32(b"DeadBeefz", b'X').parts(), (true, 0xDEAD_BEEF, 8));
        assert_eq!(read_i8(b"80", b'X').value(), i8::MIN);
        assert_eq!(read_i32(b"FFFFFFFF", b'X').value(), -1);
        assert_eq!(read_i64(b"7FFFFFFFFFFFFFFF", b'X').value(), i64::MAX);
        assert_eq!(read_u64(b"10000000000000000", b'X').parts(), (false, 0, 0));
        assert_eq!(read_u16(b"-1", b'X').parts(), (false, 0, 0));
        assert_eq!(read_u16(b"", b'X').parts(), (false, 0, 0));
    }

    #[test]
    fn test_parse_fraction_ticks() {
        assert_eq!(parse_fraction_ticks(b"5").parts(), (true, 5_000_000, 1));
        assert_eq!(parse_fraction_ticks(b"0000001").parts(), (true, 1, 7));
        assert_eq!(parse_fraction_ticks(b"123:").parts(), (true, 1_230_000, 3));
        assert_eq!(parse_fraction_ticks(b"12345678").parts(), (false, 0, 0));
        assert_eq!(parse_fraction_ticks(b"x").parts(), (false, 0, 0));
    }

    #[test]
    fn test_fixed_fields() {
        assert_eq!(parse_digit_field::<u16>(b"1994"), Some(1994));
        assert_eq!(parse_digit_field::<u16>(b"19 4"), None);
        assert_eq!(parse_digit_field::<u16>(b"+994"), None);
        assert_eq!(parse_hex_field::<u32>(b"0000beef"), Some(0xBEEF));
        assert_eq!(parse_hex_field::<u16>(b"12-4"), None);
    }

    #[test]
    #[should_panic(expected = "not supported for integer")]
    fn test_unknown_format_panics() {
        let _ = read_u32(b"1", b'Q');
    }

    proptest! {
        #[test]
        fn decimal_agrees_with_std_i64(value in any::<i64>()) {
            let text = value.to_string();
            prop_assert_eq!(read_i64(text.as_bytes(), 0).parts(), (true, value, text.len()));
        }

        #[test]
        fn decimal_overflow_matches_std_u8(text in "[0-9]{1,6}") {
            let expected = text.parse::<u8>().ok();
            prop_assert_eq!(read_u8(text.as_bytes(), 0).exact(text.len()).ok(), expected);
        }

        #[test]
        fn decimal_overflow_matches_std_i16(text in "-?[0-9]{1,7}") {
            let expected = text.parse::<i16>().ok();
            prop_assert_eq!(read_i16(text.as_bytes(), 0).exact(text.len()).ok(), expected);
        }

        #[test]
        fn hex_agrees_with_formatting(value in any::<u32>()) {
            let upper = format!("{value:X}");
            let lower = format!("{value:08x}");
            prop_assert_eq!(read_u32(upper.as_bytes(), b'X').value(), value);
            prop_assert_eq!(read_u32(lower.as_bytes(), b'x').parts(), (true, value, 8));
        }

        #[test]
        fn grouped_agrees_with_plain(value in any::<u32>()) {
            let plain = value.to_string();
            let mut grouped = String::new();
            for (i, c) in plain.chars().enumerate() {
                if i > 0 && (plain.len() - i) % 3 == 0 {
                    grouped.push(',');
                }
                grouped.push(c);
            }
            prop_assert_eq!(read_u32(grouped.as_bytes(), b'N').parts(), (true, value, grouped.len()));
        }
    }
}
