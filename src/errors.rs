//! Error types for primitive parsing.
//!
//! Two disjoint classes exist. [`FormatError`] is a contract violation (the
//! caller asked for a format letter the target type does not define) and is
//! raised as a panic by the `read_*` entry points. [`ReadError`] describes
//! untrusted input that did not fully match and is only produced by the strict
//! [`ParseResult::exact`](crate::ParseResult::exact) helper.

/// An unsupported format specifier was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("format specifier {} is not supported for {target}", symbol_text(.symbol))]
pub struct FormatError {
    /// The rejected specifier byte.
    pub symbol: u8,
    /// Name of the type family being parsed.
    pub target: &'static str,
}

fn symbol_text(symbol: &u8) -> String {
    match *symbol {
        0 => "'\\0'".to_string(),
        s if s.is_ascii_graphic() => format!("'{}'", s as char),
        s => format!("0x{s:02X}"),
    }
}

/// Strict full-buffer parse failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ReadError {
    /// The input did not match the grammar or was out of range.
    #[error("input does not match the expected grammar")]
    Rejected,
    /// The grammar matched a prefix but bytes were left over.
    #[error("value ended after {consumed} of {len} bytes")]
    TrailingBytes {
        /// Bytes the grammar matched
        consumed: usize,
        /// Bytes the caller required
        len: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_error_display() {
        let error = FormatError {
            symbol: b'Q',
            target: "integer",
        };
        assert_eq!(
            error.to_string(),
            "format specifier 'Q' is not supported for integer"
        );
    }

    #[test]
    fn test_format_error_display_unprintable() {
        let error = FormatError {
            symbol: 0x07,
            target: "GUID",
        };
        assert_eq!(
            error.to_string(),
            "format specifier 0x07 is not supported for GUID"
        );
        let error = FormatError {
            symbol: 0,
            target: "boolean",
        };
        assert!(error.to_string().contains("'\\0'"));
    }

    #[test]
    fn test_read_error_display() {
        assert_eq!(
            ReadError::Rejected.to_string(),
            "input does not match the expected grammar"
        );
        assert_eq!(
            ReadError::TrailingBytes {
                consumed: 2,
                len: 5
            }
            .to_string(),
            "value ended after 2 of 5 bytes"
        );
    }
}
