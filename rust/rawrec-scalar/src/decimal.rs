//! Exact fixed-point decimal values.

use std::fmt;

use arrow_buffer::i256;

/// A fixed-precision decimal: `unscaled / 10^scale`.
///
/// The unscaled value is kept as a 256-bit two's-complement integer, which covers both
/// 128-bit and 256-bit decimal columns. No arithmetic is performed on the value, so the
/// textual form produced by `Display` is exact.
///
/// `precision` only records the declared digit count; it is not enforced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Decimal {
    unscaled: i256,
    precision: u8,
    scale: i8,
}

impl Decimal {
    pub fn new(unscaled: i256, precision: u8, scale: i8) -> Decimal {
        Decimal {
            unscaled,
            precision,
            scale,
        }
    }

    pub fn from_i128(unscaled: i128, precision: u8, scale: i8) -> Decimal {
        Decimal::new(i256::from_i128(unscaled), precision, scale)
    }

    /// The stored two's-complement integer.
    pub fn unscaled(&self) -> i256 {
        self.unscaled
    }

    /// The stored integer, if it fits into 128 bits.
    pub fn unscaled_i128(&self) -> Option<i128> {
        self.unscaled.to_i128()
    }

    pub fn precision(&self) -> u8 {
        self.precision
    }

    pub fn scale(&self) -> i8 {
        self.scale
    }

    pub fn is_negative(&self) -> bool {
        self.unscaled < i256::ZERO
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self.unscaled.to_string();
        let (sign, digits) = match text.strip_prefix('-') {
            Some(digits) => ("-", digits),
            None => ("", text.as_str()),
        };

        if self.scale <= 0 {
            f.write_str(sign)?;
            f.write_str(digits)?;
            if digits != "0" {
                for _ in 0..self.scale.unsigned_abs() {
                    f.write_str("0")?;
                }
            }
            return Ok(());
        }

        let scale = self.scale as usize;
        if digits.len() > scale {
            let (int_part, frac_part) = digits.split_at(digits.len() - scale);
            write!(f, "{sign}{int_part}.{frac_part}")
        } else {
            write!(f, "{sign}0.{digits:0>scale$}")
        }
    }
}
