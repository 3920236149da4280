//! # utf8-primitive-parsers
//!
//! Zero-allocation parsers that read primitive values straight out of ASCII/UTF-8
//! byte buffers: booleans, integers of every width, `f32`/`f64`, a 96-bit
//! [`Decimal`], [`Guid`]s, calendar [`DateTime`]s and [`TimeSpan`] durations.
//!
//! Every parser takes an immutable byte slice and a single format specifier and
//! returns a [`ParseResult`]: whether the input matched, the decoded value, and
//! how many bytes were consumed. Numeric grammars are maximal-munch; the GUID,
//! date-time and duration layouts are positional.
//!
//! ## Error Model
//!
//! - Input that does not match the grammar (or overflows the target type) is an
//!   ordinary outcome: the result reports failure with zero bytes consumed.
//! - A format specifier the target type does not support is a caller bug and
//!   panics with a [`FormatError`] message.
//!
//! Partial-prefix success is deliberate: `read_u32(b"12ab", 0)` succeeds after 2
//! bytes. Use [`ParseResult::exact`] when the whole buffer must match.
//!
//! # Example
//!
//! ```rust
//! use utf8_primitive_parsers::*;
//!
//! let port = read_u16(b"8080", 0);
//! assert_eq!(port.parts(), (true, 8080, 4));
//!
//! let mask = read_u32(b"FFFF0000", b'X');
//! assert_eq!(mask.value(), 0xFFFF_0000);
//!
//! let stamp = read_date_time(b"Sun, 06 Nov 1994 08:49:37 GMT", b'R');
//! assert_eq!(stamp.value().year(), 1994);
//!
//! let timeout = read_time_span(b"00:00:30", b'c');
//! assert_eq!(timeout.value().total_seconds(), 30);
//!
//! assert!(read_i8(b"128", 0).exact(3).is_err());
//! ```

pub mod boolean;
pub mod calendar;
pub mod decimal;
pub mod duration;
pub mod errors;
pub mod format;
pub mod guid;
pub mod integer;
pub mod real;
pub mod result;

// Re-export all public items for convenience
pub use boolean::*;
pub use calendar::*;
pub use decimal::*;
pub use duration::*;
pub use errors::*;
pub use format::*;
pub use guid::*;
pub use integer::*;
pub use real::*;
pub use result::*;

/// Sentinel stored in [`HEX_LOOKUP`] for bytes that are not hex digits.
pub(crate) const NOT_HEX: u8 = 0xFF;

/// Nibble value for every byte; [`NOT_HEX`] for non-hex bytes.
pub(crate) const HEX_LOOKUP: [u8; 256] = build_hex_lookup();

const fn build_hex_lookup() -> [u8; 256] {
    let mut table = [NOT_HEX; 256];
    let mut i = 0;
    while i < 10 {
        table[b'0' as usize + i] = i as u8;
        i += 1;
    }
    let mut i = 0;
    while i < 6 {
        table[b'a' as usize + i] = 10 + i as u8;
        table[b'A' as usize + i] = 10 + i as u8;
        i += 1;
    }
    table
}

/// Fast check if a byte is an ASCII digit
#[inline(always)]
pub(crate) fn is_digit(b: u8) -> bool {
    b.is_ascii_digit()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_lookup() {
        assert_eq!(HEX_LOOKUP[b'0' as usize], 0);
        assert_eq!(HEX_LOOKUP[b'9' as usize], 9);
        assert_eq!(HEX_LOOKUP[b'a' as usize], 10);
        assert_eq!(HEX_LOOKUP[b'F' as usize], 15);
        assert_eq!(HEX_LOOKUP[b'g' as usize], NOT_HEX);
        assert_eq!(HEX_LOOKUP[b'/' as usize], NOT_HEX);
        assert_eq!(HEX_LOOKUP[0xFF], NOT_HEX);
        let hex_count = HEX_LOOKUP.iter().filter(|&&n| n != NOT_HEX).count();
        assert_eq!(hex_count, 22);
    }

    #[test]
    fn test_is_digit() {
        assert!(is_digit(b'0'));
        assert!(is_digit(b'9'));
        assert!(!is_digit(b'a'));
        assert!(!is_digit(b'/'));
        assert!(!is_digit(b':'));
    }
}
