//! 96-bit fixed-point decimal value produced by [`read_decimal`](crate::read_decimal).

use core::fmt;

use crate::real::DigitAccumulator;

/// Largest mantissa: 2^96 - 1.
pub const MAX_MANTISSA: u128 = (1 << 96) - 1;

/// Largest number of fractional digits.
pub const MAX_SCALE: u8 = 28;

/// Decimal digits in [`MAX_MANTISSA`].
const MAX_PRECISION: i64 = 29;

/// A base-10 fixed-point number: `mantissa / 10^scale` with a sign.
///
/// Equality is structural, so `1.0` and `1.00` (scale 1 vs 2) compare unequal.
/// Zero is always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Decimal {
    mantissa: u128,
    scale: u8,
    negative: bool,
}

impl Decimal {
    pub const ZERO: Decimal = Decimal {
        mantissa: 0,
        scale: 0,
        negative: false,
    };

    pub const MAX: Decimal = Decimal {
        mantissa: MAX_MANTISSA,
        scale: 0,
        negative: false,
    };

    pub const MIN: Decimal = Decimal {
        mantissa: MAX_MANTISSA,
        scale: 0,
        negative: true,
    };

    /// Returns `None` when the mantissa exceeds 96 bits or the scale exceeds 28.
    pub fn new(mantissa: u128, scale: u8, negative: bool) -> Option<Self> {
        if mantissa > MAX_MANTISSA || scale > MAX_SCALE {
            return None;
        }
        Some(Self {
            mantissa,
            scale,
            negative: negative && mantissa != 0,
        })
    }

    #[inline]
    pub fn mantissa(&self) -> u128 {
        self.mantissa
    }

    #[inline]
    pub fn scale(&self) -> u8 {
        self.scale
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.mantissa == 0
    }

    /// Rounds the significand to at most 29 digits and 28 fractional places,
    /// half to even. Returns `None` on overflow.
    pub(crate) fn from_significand(significand: &DigitAccumulator) -> Option<Self> {
        let digits = significand.digits();
        let mut exponent = i64::from(significand.scale());
        // Zero keeps its fractional places but never overflows
        if digits.is_empty() {
            exponent = exponent.min(0);
        }
        if exponent > MAX_PRECISION {
            return None;
        }

        let mut mantissa: u128 = 0;
        let mut index = 0;
        while exponent > 0 || (index < digits.len() && exponent > -i64::from(MAX_SCALE)) {
            let digit = digits.get(index).copied().unwrap_or(0);
            let next = mantissa * 10 + u128::from(digit);
            if next > MAX_MANTISSA {
                break;
            }
            mantissa = next;
            index += 1;
            exponent -= 1;
        }
        if exponent > 0 {
            return None;
        }
        // Every significant digit lies beyond the 28th place
        if exponent < -i64::from(MAX_SCALE) {
            return Some(Self {
                mantissa: 0,
                scale: MAX_SCALE,
                negative: false,
            });
        }

        let rest = digits.get(index..).unwrap_or(&[]);
        if let Some((&next, tail)) = rest.split_first() {
            let exactly_half = tail.iter().all(|&d| d == 0) && !significand.has_nonzero_tail();
            if next > 5 || (next == 5 && (!exactly_half || mantissa & 1 == 1)) {
                mantissa += 1;
                if mantissa > MAX_MANTISSA {
                    mantissa = (MAX_MANTISSA + 1 + 5) / 10;
                    exponent += 1;
                    if exponent > 0 {
                        return None;
                    }
                }
            }
        }

        Self::new(
            mantissa,
            (-exponent) as u8,
            significand.is_negative(),
        )
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            f.write_str("-")?;
        }
        let divisor = 10u128.pow(u32::from(self.scale));
        write!(f, "{}", self.mantissa / divisor)?;
        if self.scale > 0 {
            write!(
                f,
                ".{:0width$}",
                self.mantissa % divisor,
                width = self.scale as usize
            )?;
        }
        Ok(())
    }
}
