//! Arbitrary precision decimal numbers using dashu
//!
//! Magnitudes are kept as base-10 floats (`DBig`) so catalog factors such as
//! 0.3048 or 0.45359237 are exact and display rounding never suffers from
//! binary representation error.

use dashu_float::DBig;
use dashu_int::IBig;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Error type for number operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NumberError {
    #[error("Invalid number format: {0}")]
    ParseError(String),

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Overflow: result too large")]
    Overflow,
}

/// Working precision for calculations (decimal digits)
const WORK_PRECISION: usize = 50;

/// Arbitrary precision decimal number
///
/// Always finite: there is no NaN or infinity representation.
#[derive(Debug, Clone)]
pub struct Number {
    inner: DBig,
}

impl Number {
    // ========== Construction ==========

    fn with_work_precision(val: DBig) -> DBig {
        val.with_precision(WORK_PRECISION).value()
    }

    /// Parse a decimal literal: "123", "3.14", "-42", "1.5e10", "602214076e15"
    pub fn from_str(s: &str) -> Result<Self, NumberError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(NumberError::ParseError(s.to_string()));
        }

        // Leading '+' is accepted by users but not by the DBig parser
        let s = s.strip_prefix('+').unwrap_or(s);

        // Integer mantissa with exponent: parse exactly instead of via the float path
        if (s.contains('e') || s.contains('E')) && !s.contains('.') {
            let lower = s.to_lowercase();
            if let Some((mantissa, exp)) = lower.split_once('e') {
                let mantissa: IBig = mantissa
                    .parse()
                    .map_err(|_| NumberError::ParseError(s.to_string()))?;
                let exp: isize = exp
                    .parse()
                    .map_err(|_| NumberError::ParseError(s.to_string()))?;
                return Ok(Self {
                    inner: Self::with_work_precision(DBig::from_parts(mantissa, exp)),
                });
            }
        }

        let inner: DBig = s
            .parse()
            .map_err(|_| NumberError::ParseError(s.to_string()))?;

        Ok(Self { inner: Self::with_work_precision(inner) })
    }

    /// Create from i64 with working precision
    pub fn from_i64(n: i64) -> Self {
        Self { inner: Self::with_work_precision(DBig::from(n)) }
    }

    /// Exact decimal `significand * 10^exponent`, e.g. `decimal(3048, -4)` is 0.3048
    pub fn decimal(significand: i64, exponent: isize) -> Self {
        Self {
            inner: Self::with_work_precision(DBig::from_parts(IBig::from(significand), exponent)),
        }
    }

    /// Create from ratio; a zero denominator yields zero
    pub fn from_ratio(num: i64, den: i64) -> Self {
        if den == 0 {
            return Self::from_i64(0);
        }
        Self { inner: Self::from_i64(num).inner / Self::from_i64(den).inner }
    }

    // ========== Predicates ==========

    pub fn is_zero(&self) -> bool {
        self.inner == DBig::ZERO
    }

    pub fn is_negative(&self) -> bool {
        self.inner < DBig::ZERO
    }

    pub fn is_one(&self) -> bool {
        self.inner == DBig::ONE
    }

    // ========== Arithmetic ==========

    pub fn add(&self, other: &Self) -> Self {
        Self { inner: &self.inner + &other.inner }
    }

    pub fn sub(&self, other: &Self) -> Self {
        Self { inner: &self.inner - &other.inner }
    }

    pub fn mul(&self, other: &Self) -> Self {
        Self { inner: &self.inner * &other.inner }
    }

    /// Safe division (returns Result, never panics)
    pub fn checked_div(&self, other: &Self) -> Result<Self, NumberError> {
        if other.is_zero() {
            Err(NumberError::DivisionByZero)
        } else {
            Ok(Self { inner: &self.inner / &other.inner })
        }
    }

    /// Integer power by repeated squaring
    pub fn pow(&self, exp: i32) -> Result<Self, NumberError> {
        let mut result = Self::from_i64(1);
        let mut base = self.clone();
        let mut remaining = exp.unsigned_abs();
        while remaining > 0 {
            if remaining & 1 == 1 {
                result = result.mul(&base);
            }
            remaining >>= 1;
            if remaining > 0 {
                base = base.mul(&base);
            }
        }

        if exp < 0 {
            Self::from_i64(1).checked_div(&result)
        } else {
            Ok(result)
        }
    }

    /// Round to `places` digits after the decimal point, ties away from zero
    pub fn round_to(&self, places: u32) -> Self {
        let scale = Self::decimal(1, places as isize);
        let scaled = (&self.inner * &scale.inner).round();
        // Dividing by a power of ten is exact in base 10
        Self { inner: scaled / scale.inner }
    }

    // ========== Display ==========

    /// Fixed number of decimal places, trailing zeros removed ("3.05", "10", "0.5")
    pub fn as_trimmed(&self, places: u32) -> String {
        let fixed = self.as_decimal(places);
        let trimmed = if fixed.contains('.') {
            fixed.trim_end_matches('0').trim_end_matches('.')
        } else {
            fixed.as_str()
        };

        // "-0" after rounding a small negative value
        if trimmed == "-0" {
            "0".to_string()
        } else {
            trimmed.to_string()
        }
    }

    /// Render with exactly `places` decimal places, digit for digit
    pub fn as_decimal(&self, places: u32) -> String {
        let (significand, exponent) = self.round_to(places).inner.into_repr().into_parts();
        let places = places as usize;

        let text = significand.to_string();
        let (sign, digits) = match text.strip_prefix('-') {
            Some(rest) => ("-", rest),
            None => ("", text.as_str()),
        };

        let (int_part, frac_part) = if exponent >= 0 {
            (format!("{}{}", digits, "0".repeat(exponent as usize)), String::new())
        } else {
            let frac_len = exponent.unsigned_abs();
            let padded = format!("{:0>width$}", digits, width = frac_len + 1);
            let (int_part, frac_part) = padded.split_at(padded.len() - frac_len);
            (int_part.to_string(), frac_part.to_string())
        };

        let mut out = format!("{}{}", sign, int_part);
        if places > 0 {
            out.push('.');
            out.push_str(&frac_part);
            for _ in frac_part.len()..places {
                out.push('0');
            }
            // Digits past `places` are zeros once rounded
            out.truncate(sign.len() + int_part.len() + 1 + places);
        }
        out
    }
}

// ========== Trait Implementations ==========

impl std::fmt::Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_trimmed(10))
    }
}

impl Serialize for Number {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Number {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl Eq for Number {}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Number {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.inner.partial_cmp(&other.inner).unwrap_or(std::cmp::Ordering::Equal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_forms() {
        assert_eq!(Number::from_str("123").unwrap(), Number::from_i64(123));
        assert_eq!(Number::from_str("+7").unwrap(), Number::from_i64(7));
        assert_eq!(Number::from_str("1.5e2").unwrap(), Number::from_i64(150));
        assert_eq!(Number::from_str("12e2").unwrap(), Number::from_i64(1200));
        assert_eq!(Number::from_str("0.0254").unwrap(), Number::decimal(254, -4));
    }

    #[test]
    fn test_from_str_rejects_garbage() {
        assert!(Number::from_str("").is_err());
        assert!(Number::from_str("abc").is_err());
        assert!(Number::from_str("1.2.3").is_err());
    }

    #[test]
    fn test_checked_div_by_zero() {
        let result = Number::from_i64(1).checked_div(&Number::from_i64(0));
        assert_eq!(result, Err(NumberError::DivisionByZero));
    }

    #[test]
    fn test_pow() {
        assert_eq!(Number::from_i64(10).pow(3).unwrap(), Number::from_i64(1000));
        assert_eq!(Number::from_i64(10).pow(-2).unwrap(), Number::decimal(1, -2));
        assert_eq!(Number::from_i64(5).pow(0).unwrap(), Number::from_i64(1));
        assert_eq!(Number::from_i64(2).pow(10).unwrap(), Number::from_i64(1024));
        assert_eq!(Number::decimal(3048, -4).pow(3).unwrap(), Number::from_str("0.028316846592").unwrap());
        assert_eq!(Number::from_i64(0).pow(-1), Err(NumberError::DivisionByZero));
    }

    #[test]
    fn test_round_to() {
        assert_eq!(Number::decimal(3048, -3).round_to(2), Number::decimal(305, -2));
        assert_eq!(Number::decimal(2675, -3).round_to(2), Number::decimal(268, -2));
        assert_eq!(Number::decimal(9996, -4).round_to(2), Number::from_i64(1));
        assert_eq!(Number::decimal(-1234, -3).round_to(1), Number::decimal(-12, -1));
        assert_eq!(Number::decimal(4, -1).round_to(0), Number::from_i64(0));
    }

    #[test]
    fn test_as_trimmed() {
        assert_eq!(Number::decimal(305, -2).as_trimmed(2), "3.05");
        assert_eq!(Number::from_i64(10).as_trimmed(2), "10");
        assert_eq!(Number::decimal(5, -1).as_trimmed(2), "0.5");
        assert_eq!(Number::from_i64(100).as_trimmed(0), "100");
        assert_eq!(Number::decimal(-1, -3).round_to(2).as_trimmed(2), "0");
    }

    #[test]
    fn test_as_decimal_pads_fraction() {
        assert_eq!(Number::decimal(5, -1).as_decimal(3), "0.500");
        assert_eq!(Number::decimal(-15, -1).as_decimal(2), "-1.50");
        assert_eq!(Number::decimal(1, -3).as_decimal(2), "0.00");
        assert_eq!(Number::decimal(12, 3).as_decimal(1), "12000.0");
        assert_eq!(Number::decimal(-7, -2).as_decimal(2), "-0.07");
        assert_eq!(Number::decimal(2675, -3).as_decimal(0), "3");
    }

    #[test]
    fn test_display_keeps_every_digit() {
        let big = Number::from_str("123456789012345678901").unwrap();
        assert_eq!(big.as_trimmed(2), "123456789012345678901");
        assert_eq!(big.to_string(), "123456789012345678901");

        let long = Number::from_str("98765432109876543210.125").unwrap();
        assert_eq!(long.as_decimal(3), "98765432109876543210.125");
        assert_eq!(long.as_trimmed(2), "98765432109876543210.13");
    }

    #[test]
    fn test_from_ratio() {
        let third = Number::from_ratio(1, 3);
        assert_eq!(third.round_to(4), Number::decimal(3333, -4));
        assert!(Number::from_ratio(1, 0).is_zero());
    }

    #[test]
    fn test_ordering() {
        assert!(Number::from_i64(-1) < Number::from_i64(0));
        assert!(Number::from_i64(-1).is_negative());
        assert!(Number::from_i64(1).is_one());
    }
}
