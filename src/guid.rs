//! GUID lexer for the `D`, `B`, `P` and `N` layouts.
//!
//! Layouts are positional: the buffer must hold at least the layout's byte
//! count, separators sit at fixed offsets and every other byte is a hex digit
//! (either case). Exactly [`GuidFormat::byte_len`] bytes are consumed.

use core::fmt;

use tracing::trace;

use crate::format::{FormatSymbol, GuidFormat};
use crate::integer::parse_hex_field;
use crate::result::ParseResult;

/// A 128-bit globally unique identifier in the four-field layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Guid {
    pub data1: u32,
    pub data2: u16,
    pub data3: u16,
    pub data4: [u8; 8],
}

impl Guid {
    /// All-zero GUID.
    pub const NIL: Guid = Guid {
        data1: 0,
        data2: 0,
        data3: 0,
        data4: [0; 8],
    };

    pub const fn from_fields(data1: u32, data2: u16, data3: u16, data4: [u8; 8]) -> Self {
        Self {
            data1,
            data2,
            data3,
            data4,
        }
    }

    /// Canonical 16-byte layout: the first three fields little-endian, then `data4`.
    pub fn to_bytes_le(&self) -> [u8; 16] {
        let mut bytes = [0u8; 16];
        bytes[0..4].copy_from_slice(&self.data1.to_le_bytes());
        bytes[4..6].copy_from_slice(&self.data2.to_le_bytes());
        bytes[6..8].copy_from_slice(&self.data3.to_le_bytes());
        bytes[8..16].copy_from_slice(&self.data4);
        bytes
    }

    /// Inverse of [`Guid::to_bytes_le`].
    pub fn from_bytes_le(bytes: [u8; 16]) -> Self {
        let [a0, a1, a2, a3, b0, b1, c0, c1, d @ ..] = bytes;
        Self {
            data1: u32::from_le_bytes([a0, a1, a2, a3]),
            data2: u16::from_le_bytes([b0, b1]),
            data3: u16::from_le_bytes([c0, c1]),
            data4: d,
        }
    }
}

/// Lower-case `D` layout: `xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx`.
impl fmt::Display for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = &self.data4;
        write!(
            f,
            "{:08x}-{:04x}-{:04x}-{:02x}{:02x}-{:02x}{:02x}{:02x}{:02x}{:02x}{:02x}",
            self.data1, self.data2, self.data3, d[0], d[1], d[2], d[3], d[4], d[5], d[6], d[7]
        )
    }
}

/// Start offsets of data1, data2, data3 and the two data4 groups.
const HYPHENATED_FIELDS: [usize; 5] = [0, 9, 14, 19, 24];
const DIGIT_FIELDS: [usize; 5] = [0, 8, 12, 16, 20];
const HYPHEN_OFFSETS: [usize; 4] = [8, 13, 18, 23];

fn decode_fields(body: &[u8], offsets: [usize; 5]) -> Option<Guid> {
    let [o1, o2, o3, o4a, o4b] = offsets;
    let mut data4 = [0u8; 8];
    for (i, byte) in data4.iter_mut().enumerate() {
        let start = if i < 2 { o4a + i * 2 } else { o4b + (i - 2) * 2 };
        *byte = parse_hex_field(body.get(start..start + 2)?)?;
    }
    Some(Guid {
        data1: parse_hex_field(body.get(o1..o1 + 8)?)?,
        data2: parse_hex_field(body.get(o2..o2 + 4)?)?,
        data3: parse_hex_field(body.get(o3..o3 + 4)?)?,
        data4,
    })
}

fn decode_hyphenated(body: &[u8]) -> Option<Guid> {
    if HYPHEN_OFFSETS.iter().any(|&i| body.get(i) != Some(&b'-')) {
        return None;
    }
    decode_fields(body, HYPHENATED_FIELDS)
}

fn scan_guid(source: &[u8], format: GuidFormat) -> Option<Guid> {
    let text = source.get(..format.byte_len())?;
    match format {
        GuidFormat::Hyphenated => decode_hyphenated(text),
        GuidFormat::Braces => decode_hyphenated(text.strip_prefix(b"{")?.strip_suffix(b"}")?),
        GuidFormat::Parentheses => {
            decode_hyphenated(text.strip_prefix(b"(")?.strip_suffix(b")")?)
        }
        GuidFormat::Digits => decode_fields(text, DIGIT_FIELDS),
    }
}

/// Parse a GUID in the given layout.
pub fn parse_guid(source: &[u8], format: GuidFormat) -> ParseResult<Guid> {
    let result =
        ParseResult::from_option(scan_guid(source, format).map(|g| (g, format.byte_len())));
    if !result.is_ok() {
        trace!(target_type = "Guid", ?format, len = source.len(), "GUID rejected");
    }
    result
}

/// Parse a GUID using a GUID format letter (`D`, `B`, `P`, `N` or `0`).
///
/// # Example
/// ```
/// # use utf8_primitive_parsers::read_guid;
/// let id = read_guid(b"{6F9619FF-8B86-D011-B42D-00C04FC964FF}", b'B');
/// assert_eq!(id.consumed(), 38);
/// assert_eq!(id.value().data1, 0x6F9619FF);
/// assert_eq!(id.value().to_string(), "6f9619ff-8b86-d011-b42d-00c04fc964ff");
/// ```
#[track_caller]
#[inline]
pub fn read_guid(source: &[u8], format: u8) -> ParseResult<Guid> {
    parse_guid(source, GuidFormat::from_symbol(format))
}
