//! Unit and quantity parsing - expressions like "km/h", "m^2" or "28 g"

use crate::units::UNITS;
use crate::{Quantity, Unit};
use mensura_core::{MensuraError, Number, Result};
use regex::Regex;
use std::sync::LazyLock;

/// Leading decimal literal of a quantity: sign, digits, fraction, exponent
static MAGNITUDE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?").expect("magnitude pattern is valid")
});

/// Parse a unit string into a Unit
///
/// Supported formats:
/// - Catalog entries: "m", "feet", "degree Celsius", "km/h"
/// - Powers: "m^2", "s^-1", "m²"
/// - Products: "kg*m", "N·m"
/// - Quotients: "m/s", "kg/m^2", "meters per second"
pub fn parse_unit(s: &str) -> Result<Unit> {
    let s = s.trim();

    if s.is_empty() {
        return Err(MensuraError::UnknownUnit(String::new()));
    }

    // Whole-string lookup first so catalog symbols containing '/' still resolve
    if let Some(unit) = UNITS.get(s) {
        return Ok(unit.clone());
    }

    parse_unit_expression(s)
}

/// Parse a compound expression like "kg*m/s^2"
fn parse_unit_expression(s: &str) -> Result<Unit> {
    let (numerator, denominator) = match s.split_once('/') {
        Some(parts) => parts,
        None => match s.split_once(" per ") {
            Some(parts) => parts,
            None => (s, ""),
        },
    };

    let numerator = parse_product(numerator, s)?;
    if denominator.trim().is_empty() {
        if s.contains('/') || s.contains(" per ") {
            return Err(MensuraError::UnknownUnit(s.to_string()));
        }
        return Ok(numerator);
    }

    // Everything after the first '/' divides: "kg/m/s" is kg per (m*s)
    let denominator = denominator
        .split('/')
        .map(|part| parse_product(part, s))
        .try_fold(None::<Unit>, |acc, unit| {
            let unit = unit?;
            Ok::<_, MensuraError>(Some(match acc {
                Some(acc) => acc.multiply(&unit)?,
                None => unit,
            }))
        })?
        .ok_or_else(|| MensuraError::UnknownUnit(s.to_string()))?;

    numerator.divide(&denominator)
}

/// Parse a product of factors like "kg*m" or "m^2*s"
fn parse_product(s: &str, whole: &str) -> Result<Unit> {
    let mut factors = s
        .split(['*', '·'])
        .map(str::trim)
        .filter(|f| !f.is_empty());

    let first = factors.next().ok_or_else(|| MensuraError::UnknownUnit(whole.to_string()))?;
    let mut result = parse_power(first, whole)?;
    for factor in factors {
        result = result.multiply(&parse_power(factor, whole)?)?;
    }

    Ok(result)
}

/// Largest exponent magnitude accepted on a single factor
const MAX_EXPONENT: u32 = 16;

/// Parse one factor with an optional exponent like "m^2", "s^-1" or "m³"
fn parse_power(s: &str, whole: &str) -> Result<Unit> {
    let (base, exp) = match s.split_once('^') {
        Some((base, exp)) => {
            let exp: i32 = exp
                .trim()
                .parse()
                .map_err(|_| MensuraError::UnknownUnit(whole.to_string()))?;
            (base, exp)
        }
        None => match split_superscript(s) {
            Some(split) => split,
            None => return lookup(s, whole),
        },
    };

    if exp.unsigned_abs() > MAX_EXPONENT {
        return Err(MensuraError::UnknownUnit(whole.to_string()));
    }
    lookup(base, whole)?.power(exp)
}

/// Split a trailing superscript exponent: "m²" -> ("m", 2), "s⁻¹" -> ("s", -1)
///
/// Catalog aliases such as "m²" are matched before this runs.
fn split_superscript(s: &str) -> Option<(&str, i32)> {
    const DIGITS: [char; 10] = ['⁰', '¹', '²', '³', '⁴', '⁵', '⁶', '⁷', '⁸', '⁹'];

    let digits_start = s
        .char_indices()
        .rev()
        .take_while(|(_, c)| DIGITS.contains(c))
        .last()
        .map(|(i, _)| i)?;

    let mut exp: i32 = 0;
    for c in s[digits_start..].chars() {
        let digit = DIGITS.iter().position(|d| *d == c)? as i32;
        exp = exp.checked_mul(10)?.checked_add(digit)?;
    }

    let head = &s[..digits_start];
    match head.strip_suffix('⁻') {
        Some(base) if !base.is_empty() => Some((base, -exp)),
        Some(_) => None,
        None if !head.is_empty() => Some((head, exp)),
        None => None,
    }
}

fn lookup(s: &str, whole: &str) -> Result<Unit> {
    let s = s.trim();
    if s.is_empty() {
        return Err(MensuraError::UnknownUnit(whole.to_string()));
    }

    UNITS
        .get(s)
        .cloned()
        .ok_or_else(|| MensuraError::UnknownUnit(s.to_string()))
}

/// Parse a quantity string like "5 m", "28g" or "-3.5 degC"
///
/// The magnitude must come first and a unit must follow it. Every failure,
/// including an unknown unit, is reported as `UnparsableQuantity`.
pub fn parse_quantity(s: &str) -> Result<Quantity> {
    let input = s.trim();

    let magnitude = MAGNITUDE
        .find(input)
        .ok_or_else(|| MensuraError::unparsable(input, "expected a number before the unit"))?;

    let value = Number::from_str(magnitude.as_str())
        .map_err(|e| MensuraError::unparsable(input, e.to_string()))?;

    let unit_text = input[magnitude.end()..].trim();
    if unit_text.is_empty() {
        return Err(MensuraError::unparsable(input, "missing unit"));
    }

    let unit = parse_unit(unit_text).map_err(|e| match e {
        MensuraError::UnknownUnit(token) => MensuraError::unparsable(input, format!("unknown unit '{}'", token)),
        other => MensuraError::unparsable(input, other.to_string()),
    })?;

    Ok(Quantity::new(value, unit))
}
