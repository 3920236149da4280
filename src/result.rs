//! The outcome of a single parse call.

use crate::errors::ReadError;

/// Outcome of a parse: success flag, decoded value and bytes consumed.
///
/// On failure `value` is `T::default()` and `consumed` is 0. A successful
/// result always consumed at least one byte; it may have stopped before the
/// end of the buffer, which callers check with [`ParseResult::exact`] when a
/// full-buffer match is required.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[must_use]
pub struct ParseResult<T> {
    success: bool,
    value: T,
    consumed: usize,
}

impl<T: Default> ParseResult<T> {
    /// A successful parse of `value` spanning the first `consumed` bytes.
    #[inline(always)]
    pub fn success(value: T, consumed: usize) -> Self {
        debug_assert!(consumed > 0);
        Self {
            success: true,
            value,
            consumed,
        }
    }

    /// A rejected parse.
    #[inline(always)]
    pub fn failure() -> Self {
        Self {
            success: false,
            value: T::default(),
            consumed: 0,
        }
    }

    /// Builds a result from an inner scanner that returns `(value, consumed)`.
    #[inline(always)]
    pub(crate) fn from_option(scanned: Option<(T, usize)>) -> Self {
        match scanned {
            Some((value, consumed)) => Self::success(value, consumed),
            None => Self::failure(),
        }
    }
}

impl<T> ParseResult<T> {
    #[inline(always)]
    pub fn is_ok(&self) -> bool {
        self.success
    }

    /// Number of bytes the grammar matched; 0 on failure.
    #[inline(always)]
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// `(success, value, consumed)`
    #[inline(always)]
    pub fn parts(self) -> (bool, T, usize) {
        (self.success, self.value, self.consumed)
    }

    #[inline(always)]
    pub fn into_option(self) -> Option<(T, usize)> {
        self.success.then_some((self.value, self.consumed))
    }

    /// Accepts the value only when the parse covered exactly `len` bytes.
    ///
    /// # Example
    /// ```
    /// # use utf8_primitive_parsers::{read_u32, ReadError};
    /// let source = b"42";
    /// assert_eq!(read_u32(source, 0).exact(source.len()), Ok(42));
    ///
    /// let source = b"42ms";
    /// assert_eq!(
    ///     read_u32(source, 0).exact(source.len()),
    ///     Err(ReadError::TrailingBytes { consumed: 2, len: 4 })
    /// );
    /// ```
    pub fn exact(self, len: usize) -> Result<T, ReadError> {
        if !self.success {
            return Err(ReadError::Rejected);
        }
        if self.consumed != len {
            return Err(ReadError::TrailingBytes {
                consumed: self.consumed,
                len,
            });
        }
        Ok(self.value)
    }
}

impl<T: Copy> ParseResult<T> {
    /// The decoded value; `T::default()` when the parse failed.
    #[inline(always)]
    pub fn value(&self) -> T {
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_parts() {
        let result = ParseResult::success(7u8, 1);
        assert!(result.is_ok());
        assert_eq!(result.value(), 7);
        assert_eq!(result.consumed(), 1);
        assert_eq!(result.parts(), (true, 7, 1));
        assert_eq!(result.into_option(), Some((7, 1)));
    }

    #[test]
    fn test_failure_is_default() {
        let result = ParseResult::<i64>::failure();
        assert_eq!(result.parts(), (false, 0, 0));
        assert_eq!(result.into_option(), None);
        assert_eq!(result, ParseResult::default());
    }

    #[test]
    fn test_exact() {
        assert_eq!(ParseResult::success(5u16, 3).exact(3), Ok(5));
        assert_eq!(
            ParseResult::success(5u16, 2).exact(3),
            Err(ReadError::TrailingBytes {
                consumed: 2,
                len: 3
            })
        );
        assert_eq!(ParseResult::<u16>::failure().exact(3), Err(ReadError::Rejected));
    }

    #[test]
    fn test_from_option() {
        assert_eq!(ParseResult::from_option(Some((1u32, 4))), ParseResult::success(1, 4));
        assert_eq!(ParseResult::<u32>::from_option(None), ParseResult::failure());
    }
}
