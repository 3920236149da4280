//! Boolean lexer: `true` or `false`, ASCII case-insensitive.

use tracing::trace;

use crate::format::{BooleanFormat, FormatSymbol};
use crate::result::ParseResult;

const TRUE: &[u8] = b"true";
const FALSE: &[u8] = b"false";

/// Parse a boolean keyword at the start of `source`.
///
/// Exactly the keyword's bytes are consumed; whatever follows is left to the
/// caller.
pub fn parse_bool(source: &[u8], format: BooleanFormat) -> ParseResult<bool> {
    let scanned = if starts_with_keyword(source, TRUE) {
        Some((true, TRUE.len()))
    } else if starts_with_keyword(source, FALSE) {
        Some((false, FALSE.len()))
    } else {
        None
    };

    let result = ParseResult::from_option(scanned);
    if !result.is_ok() {
        trace!(target_type = "bool", ?format, len = source.len(), "boolean rejected");
    }
    result
}

#[inline(always)]
fn starts_with_keyword(source: &[u8], keyword: &[u8]) -> bool {
    source
        .get(..keyword.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(keyword))
}

/// Parse a boolean using a boolean format letter (`G`, `l` or `0`).
///
/// # Example
/// ```
/// # use utf8_primitive_parsers::read_bool;
/// assert_eq!(read_bool(b"True", 0).parts(), (true, true, 4));
/// assert_eq!(read_bool(b"FALSE,", b'G').parts(), (true, false, 5));
/// assert!(!read_bool(b"yes", 0).is_ok());
/// ```
#[track_caller]
#[inline]
pub fn read_bool(source: &[u8], format: u8) -> ParseResult<bool> {
    parse_bool(source, BooleanFormat::from_symbol(format))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_true_any_case() {
        for text in [&b"true"[..], b"TRUE", b"True", b"tRuE"] {
            assert_eq!(read_bool(text, 0).parts(), (true, true, 4));
        }
    }

    #[test]
    fn test_false_any_case() {
        for text in [&b"false"[..], b"FALSE", b"False"] {
            assert_eq!(read_bool(text, b'l').parts(), (true, false, 5));
        }
    }

    #[test]
    fn test_prefix_match() {
        assert_eq!(read_bool(b"truex", 0).parts(), (true, true, 4));
        assert_eq!(read_bool(b"false\r\n", 0).parts(), (true, false, 5));
    }

    #[test]
    fn test_rejects() {
        assert_eq!(read_bool(b"tru", 0).parts(), (false, false, 0));
        assert_eq!(read_bool(b"fals", 0).parts(), (false, false, 0));
        assert_eq!(read_bool(b"", 0).parts(), (false, false, 0));
        assert_eq!(read_bool(b" true", 0).parts(), (false, false, 0));
        assert_eq!(read_bool(b"1", 0).parts(), (false, false, 0));
    }

    #[test]
    #[should_panic(expected = "not supported for boolean")]
    fn test_unknown_format_panics() {
        let _ = read_bool(b"true", b'L');
    }
}
