//! Exact decimal digits of a floating point value
//!
//! Values are taken from the shortest round-trip representation of the `f64`
//! so that `1.005` rounds as the decimal `1.005` rather than as its binary
//! approximation.

use crate::types::{Remainder, RoundingMode};

/// Decimal digit string with a power-of-ten position
///
/// The value is `sum(digits[i] * 10^(magnitude - i))`. Digits carry no leading
/// or trailing zeros; an empty digit list is zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecimalQuantity {
    digits: Vec<u8>,
    magnitude: i32,
    negative: bool,
}

impl DecimalQuantity {
    /// Capture the digits of a finite value
    ///
    /// Non-finite input yields zero; callers render NaN and infinity separately.
    pub fn from_f64(value: f64) -> Self {
        let negative = value.is_sign_negative();
        let zero = Self {
            digits: Vec::new(),
            magnitude: 0,
            negative,
        };
        if !value.is_finite() || value == 0.0 {
            return zero;
        }

        let repr = format!("{:e}", value.abs());
        let Some((mantissa, exponent)) = repr.split_once('e') else {
            return zero;
        };
        let Ok(exponent) = exponent.parse::<i32>() else {
            return zero;
        };

        let mut quantity = Self {
            digits: mantissa
                .bytes()
                .filter(u8::is_ascii_digit)
                .map(|b| b - b'0')
                .collect(),
            magnitude: exponent,
            negative,
        };
        quantity.normalize();
        quantity
    }

    pub fn is_zero(&self) -> bool {
        self.digits.is_empty()
    }

    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// Power of ten of the most significant digit (zero for a zero value)
    pub fn magnitude(&self) -> i32 {
        self.magnitude
    }

    /// Power of ten of the least significant non-zero digit
    pub fn lowest_position(&self) -> i32 {
        self.magnitude - self.digits.len() as i32 + 1
    }

    /// Digit at a power-of-ten position
    pub fn digit_at(&self, position: i32) -> u8 {
        if self.is_zero() || position > self.magnitude || position < self.lowest_position() {
            return 0;
        }
        self.digits[(self.magnitude - position) as usize]
    }

    /// Divide by `10^power`
    pub fn scale_down(&mut self, power: i32) {
        if !self.is_zero() {
            self.magnitude -= power;
        }
    }

    /// Round so that no digit remains below `position`
    pub fn round_to_position(&mut self, position: i32, mode: RoundingMode) {
        if self.is_zero() || self.lowest_position() >= position {
            return;
        }

        // Number of digits at or above `position`; may be zero or negative.
        let keep = self.magnitude - position + 1;
        let (first_dropped, rest_non_zero) = if keep < 0 {
            (0, true)
        } else {
            let keep = keep as usize;
            let rest = self.digits[keep + 1..].iter().any(|&d| d != 0);
            (self.digits[keep], rest)
        };
        let remainder = match first_dropped.cmp(&5) {
            std::cmp::Ordering::Less => Remainder::BelowHalf,
            std::cmp::Ordering::Greater => Remainder::AboveHalf,
            std::cmp::Ordering::Equal if rest_non_zero => Remainder::AboveHalf,
            std::cmp::Ordering::Equal => Remainder::Half,
        };
        let last_kept_odd = keep > 0 && self.digits[keep as usize - 1] % 2 == 1;
        let away = mode.rounds_away_from_zero(self.negative, remainder, last_kept_odd);

        self.digits.truncate(keep.max(0) as usize);
        if away {
            self.increment_at(position);
        } else if self.digits.is_empty() {
            self.magnitude = 0;
        }
        self.normalize();
    }

    /// Round to a number of significant digits
    pub fn round_to_significant(&mut self, significant: u8, mode: RoundingMode) {
        if self.is_zero() {
            return;
        }
        let position = self.magnitude - i32::from(significant) + 1;
        self.round_to_position(position, mode);
    }

    /// Integer digits, zero-padded on the left to `min_digits`
    pub fn integer_digits(&self, min_digits: usize) -> String {
        let top = if self.is_zero() || self.magnitude < 0 {
            0
        } else {
            self.magnitude
        };
        let digits: String = (0..=top)
            .rev()
            .map(|position| char::from(b'0' + self.digit_at(position)))
            .collect();
        format!("{digits:0>min_digits$}")
    }

    /// Fraction digits, zero-padded on the right to `min_digits`
    pub fn fraction_digits(&self, min_digits: usize) -> String {
        let lowest = if self.is_zero() {
            0
        } else {
            self.lowest_position()
        };
        let digits: String = (lowest..0)
            .rev()
            .map(|position| char::from(b'0' + self.digit_at(position)))
            .collect();
        format!("{digits:0<min_digits$}")
    }

    fn increment_at(&mut self, position: i32) {
        if self.digits.is_empty() {
            self.digits.push(1);
            self.magnitude = position;
            return;
        }

        // Digits cover `magnitude..=position` exactly after truncation.
        for digit in self.digits.iter_mut().rev() {
            if *digit == 9 {
                *digit = 0;
            } else {
                *digit += 1;
                return;
            }
        }
        self.digits.insert(0, 1);
        self.magnitude += 1;
    }

    fn normalize(&mut self) {
        let leading = self.digits.iter().take_while(|&&d| d == 0).count();
        if leading > 0 {
            self.digits.drain(..leading);
            self.magnitude -= leading as i32;
        }
        while self.digits.last() == Some(&0) {
            self.digits.pop();
        }
        if self.digits.is_empty() {
            self.magnitude = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rounded(value: f64, position: i32, mode: RoundingMode) -> String {
        let mut quantity = DecimalQuantity::from_f64(value);
        quantity.round_to_position(position, mode);
        let fraction = quantity.fraction_digits(0);
        let sign = if quantity.is_negative() { "-" } else { "" };
        if fraction.is_empty() {
            format!("{sign}{}", quantity.integer_digits(1))
        } else {
            format!("{sign}{}.{fraction}", quantity.integer_digits(1))
        }
    }

    #[test]
    fn test_shortest_digits() {
        let quantity = DecimalQuantity::from_f64(1234.1234567899);
        assert_eq!(quantity.magnitude(), 3);
        assert_eq!(quantity.integer_digits(1), "1234");
        assert_eq!(quantity.fraction_digits(0), "1234567899");

        let small = DecimalQuantity::from_f64(0.00012);
        assert_eq!(small.magnitude(), -4);
        assert_eq!(small.integer_digits(1), "0");
        assert_eq!(small.fraction_digits(0), "00012");
    }

    #[test]
    fn test_zero_and_padding() {
        let zero = DecimalQuantity::from_f64(0.0);
        assert!(zero.is_zero());
        assert_eq!(zero.integer_digits(3), "000");
        assert_eq!(zero.fraction_digits(2), "00");
        assert_eq!(DecimalQuantity::from_f64(1234.5).integer_digits(6), "001234");
    }

    #[test]
    fn test_directed_modes() {
        assert_eq!(rounded(1234.1234567899, -8, RoundingMode::Floor), "1234.12345678");
        assert_eq!(rounded(1234.1234567899, -2, RoundingMode::Ceil), "1234.13");
        assert_eq!(rounded(-1.21, -1, RoundingMode::Ceil), "-1.2");
        assert_eq!(rounded(-1.21, -1, RoundingMode::Floor), "-1.3");
        assert_eq!(rounded(-1.21, -1, RoundingMode::Expand), "-1.3");
        assert_eq!(rounded(1.29, -1, RoundingMode::Trunc), "1.2");
    }

    #[test]
    fn test_half_modes() {
        assert_eq!(rounded(2.5, 0, RoundingMode::HalfExpand), "3");
        assert_eq!(rounded(-2.5, 0, RoundingMode::HalfExpand), "-3");
        assert_eq!(rounded(2.5, 0, RoundingMode::HalfTrunc), "2");
        assert_eq!(rounded(2.5, 0, RoundingMode::HalfEven), "2");
        assert_eq!(rounded(3.5, 0, RoundingMode::HalfEven), "4");
        assert_eq!(rounded(2.5, 0, RoundingMode::HalfOdd), "3");
        assert_eq!(rounded(3.5, 0, RoundingMode::HalfOdd), "3");
        assert_eq!(rounded(-2.5, 0, RoundingMode::HalfCeil), "-2");
        assert_eq!(rounded(-2.5, 0, RoundingMode::HalfFloor), "-3");
        assert_eq!(rounded(2.51, 0, RoundingMode::HalfTrunc), "3");
        assert_eq!(rounded(1.005, -2, RoundingMode::HalfExpand), "1.01");
        assert_eq!(rounded(1234.1234567899, -4, RoundingMode::HalfFloor), "1234.1235");
    }

    #[test]
    fn test_carry_and_vanishing_digits() {
        assert_eq!(rounded(9.999, -2, RoundingMode::HalfExpand), "10");
        assert_eq!(rounded(0.004, -2, RoundingMode::HalfExpand), "0");
        assert_eq!(rounded(0.004, -2, RoundingMode::Expand), "0.01");
        assert_eq!(rounded(0.0004, -2, RoundingMode::Ceil), "0.01");
        assert_eq!(rounded(0.0004, -2, RoundingMode::HalfExpand), "0");
    }

    #[test]
    fn test_significant_digits() {
        let mut quantity = DecimalQuantity::from_f64(1234.1234567899);
        quantity.round_to_significant(2, RoundingMode::Expand);
        assert_eq!(quantity.integer_digits(1), "1300");
        assert_eq!(quantity.fraction_digits(0), "");

        let mut quantity = DecimalQuantity::from_f64(0.012345);
        quantity.round_to_significant(3, RoundingMode::HalfExpand);
        assert_eq!(quantity.fraction_digits(0), "0123");
    }

    #[test]
    fn test_scale_down() {
        let mut quantity = DecimalQuantity::from_f64(1234567890.1234567899);
        quantity.scale_down(9);
        quantity.round_to_significant(2, RoundingMode::HalfFloor);
        assert_eq!(quantity.integer_digits(1), "1");
        assert_eq!(quantity.fraction_digits(0), "2");
    }
}
