//! Format specifiers accepted by each parser family.
//!
//! A specifier is a single byte; `0` selects the family's default grammar.
//! Conversion through [`TryFrom<u8>`] reports unknown letters as a
//! [`FormatError`]; [`FormatSymbol::from_symbol`] treats them as a caller bug and
//! panics.

use crate::errors::FormatError;

/// Byte-to-format conversion shared by every specifier enum.
pub trait FormatSymbol: TryFrom<u8, Error = FormatError> {
    /// Converts a specifier byte, panicking on letters the family does not define.
    ///
    /// # Panics
    /// Panics with the [`FormatError`] message for an unsupported letter.
    #[track_caller]
    #[inline]
    fn from_symbol(symbol: u8) -> Self {
        match Self::try_from(symbol) {
            Ok(format) => format,
            Err(err) => panic!("{err}"),
        }
    }
}

/// Integer grammars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IntegerFormat {
    /// `G`, `D` or default: optional sign and decimal digits.
    #[default]
    Decimal,
    /// `N`: decimal digits with `,` group separators and an all-zero fraction.
    Grouped,
    /// `X`: hexadecimal digits, no sign.
    Hex,
}

impl TryFrom<u8> for IntegerFormat {
    type Error = FormatError;

    fn try_from(symbol: u8) -> Result<Self, Self::Error> {
        match symbol {
            0 | b'G' | b'g' | b'D' | b'd' => Ok(Self::Decimal),
            b'N' | b'n' => Ok(Self::Grouped),
            b'X' | b'x' => Ok(Self::Hex),
            _ => Err(FormatError {
                symbol,
                target: "integer",
            }),
        }
    }
}

impl FormatSymbol for IntegerFormat {}

/// Real-number grammars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RealFormat {
    /// `G` or default: exponent allowed.
    #[default]
    General,
    /// `E`: exponent required.
    Exponent,
    /// `F`: no exponent.
    Fixed,
}

impl RealFormat {
    #[inline(always)]
    pub(crate) fn allows_exponent(self) -> bool {
        !matches!(self, Self::Fixed)
    }
}

impl TryFrom<u8> for RealFormat {
    type Error = FormatError;

    fn try_from(symbol: u8) -> Result<Self, Self::Error> {
        match symbol {
            0 | b'G' | b'g' => Ok(Self::General),
            b'E' | b'e' => Ok(Self::Exponent),
            b'F' | b'f' => Ok(Self::Fixed),
            _ => Err(FormatError {
                symbol,
                target: "real number",
            }),
        }
    }
}

impl FormatSymbol for RealFormat {}

/// Boolean grammar; `G`, `l` and default all read `true`/`false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BooleanFormat {
    #[default]
    Keyword,
}

impl TryFrom<u8> for BooleanFormat {
    type Error = FormatError;

    fn try_from(symbol: u8) -> Result<Self, Self::Error> {
        match symbol {
            0 | b'G' | b'l' => Ok(Self::Keyword),
            _ => Err(FormatError {
                symbol,
                target: "boolean",
            }),
        }
    }
}

impl FormatSymbol for BooleanFormat {}

/// GUID layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GuidFormat {
    /// `D` or default: `xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx`
    #[default]
    Hyphenated,
    /// `B`: hyphenated layout wrapped in `{}`
    Braces,
    /// `P`: hyphenated layout wrapped in `()`
    Parentheses,
    /// `N`: 32 contiguous hex digits
    Digits,
}

impl GuidFormat {
    /// Total byte length of the layout.
    pub const fn byte_len(self) -> usize {
        match self {
            Self::Hyphenated => 36,
            Self::Braces | Self::Parentheses => 38,
            Self::Digits => 32,
        }
    }
}

impl TryFrom<u8> for GuidFormat {
    type Error = FormatError;

    fn try_from(symbol: u8) -> Result<Self, Self::Error> {
        match symbol {
            0 | b'D' => Ok(Self::Hyphenated),
            b'B' => Ok(Self::Braces),
            b'P' => Ok(Self::Parentheses),
            b'N' => Ok(Self::Digits),
            _ => Err(FormatError {
                symbol,
                target: "GUID",
            }),
        }
    }
}

impl FormatSymbol for GuidFormat {}

/// Date-time layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DateTimeFormat {
    /// Default: `G` for [`DateTime`](crate::DateTime), `G` plus ` ±HH:MM` for
    /// [`DateTimeOffset`](crate::DateTimeOffset).
    #[default]
    Default,
    /// `R` or `l`: RFC 1123, `Sun, 06 Nov 1994 08:49:37 GMT`
    Rfc1123,
    /// `O`: round-trip, `1994-11-06T08:49:37.0000000` with optional `Z` or `±HH:MM`
    RoundTrip,
    /// `G`: `11/06/1994 08:49:37`
    General,
}

impl TryFrom<u8> for DateTimeFormat {
    type Error = FormatError;

    fn try_from(symbol: u8) -> Result<Self, Self::Error> {
        match symbol {
            0 => Ok(Self::Default),
            b'R' | b'l' => Ok(Self::Rfc1123),
            b'O' => Ok(Self::RoundTrip),
            b'G' => Ok(Self::General),
            _ => Err(FormatError {
                symbol,
                target: "date-time",
            }),
        }
    }
}

impl FormatSymbol for DateTimeFormat {}

/// Duration layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TimeSpanFormat {
    /// `c`, `t`, `T` or default: `[-][d.]hh:mm[:ss[.fffffff]]`
    #[default]
    Constant,
    /// `g`: `[-][d:]h:mm[:ss[.fffffff]]`
    ShortGeneral,
    /// `G`: `[-]d:hh:mm:ss.fffffff`
    LongGeneral,
}

impl TryFrom<u8> for TimeSpanFormat {
    type Error = FormatError;

    fn try_from(symbol: u8) -> Result<Self, Self::Error> {
        match symbol {
            0 | b'c' | b't' | b'T' => Ok(Self::Constant),
            b'g' => Ok(Self::ShortGeneral),
            b'G' => Ok(Self::LongGeneral),
            _ => Err(FormatError {
                symbol,
                target: "time span",
            }),
        }
    }
}

impl FormatSymbol for TimeSpanFormat {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_symbols() {
        for symbol in [0, b'G', b'g', b'D', b'd'] {
            assert_eq!(IntegerFormat::try_from(symbol), Ok(IntegerFormat::Decimal));
        }
        assert_eq!(IntegerFormat::from_symbol(b'n'), IntegerFormat::Grouped);
        assert_eq!(IntegerFormat::from_symbol(b'X'), IntegerFormat::Hex);
        assert_eq!(
            IntegerFormat::try_from(b'E'),
            Err(FormatError {
                symbol: b'E',
                target: "integer"
            })
        );
    }

    #[test]
    fn test_real_symbols() {
        assert_eq!(RealFormat::from_symbol(0), RealFormat::General);
        assert_eq!(RealFormat::from_symbol(b'e'), RealFormat::Exponent);
        assert_eq!(RealFormat::from_symbol(b'F'), RealFormat::Fixed);
        assert!(RealFormat::Exponent.allows_exponent());
        assert!(!RealFormat::Fixed.allows_exponent());
        assert!(RealFormat::try_from(b'X').is_err());
    }

    #[test]
    fn test_case_sensitive_families() {
        assert!(GuidFormat::try_from(b'd').is_err());
        assert!(BooleanFormat::try_from(b'g').is_err());
        assert_eq!(DateTimeFormat::from_symbol(b'l'), DateTimeFormat::Rfc1123);
        assert!(DateTimeFormat::try_from(b'r').is_err());
        assert_eq!(TimeSpanFormat::from_symbol(b'T'), TimeSpanFormat::Constant);
        assert_eq!(TimeSpanFormat::from_symbol(b'G'), TimeSpanFormat::LongGeneral);
        assert_eq!(TimeSpanFormat::from_symbol(b'g'), TimeSpanFormat::ShortGeneral);
    }

    #[test]
    fn test_guid_lengths() {
        assert_eq!(GuidFormat::Hyphenated.byte_len(), 36);
        assert_eq!(GuidFormat::Braces.byte_len(), 38);
        assert_eq!(GuidFormat::Parentheses.byte_len(), 38);
        assert_eq!(GuidFormat::Digits.byte_len(), 32);
    }

    #[test]
    #[should_panic(expected = "format specifier 'Z' is not supported for GUID")]
    fn test_from_symbol_panics() {
        let _ = GuidFormat::from_symbol(b'Z');
    }
}
