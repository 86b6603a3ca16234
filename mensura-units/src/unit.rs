//! Unit representation with conversion factors

use crate::Dimension;
use mensura_core::{MensuraError, Number, NumberError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A physical unit with its dimension and its affine map to SI base units
///
/// `value_si = value * to_si_factor + to_si_offset`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    /// The unit symbol (e.g., "m", "kg", "degF")
    pub symbol: String,
    /// Singular English name (e.g., "meter", "degree Fahrenheit")
    pub name: String,
    pub dimension: Dimension,
    pub to_si_factor: Number,
    /// Only non-zero for temperature scales with a shifted zero point
    pub to_si_offset: Number,
    /// Category for organization (e.g., "length", "angle")
    pub category: String,
}

impl Unit {
    /// Create a unit with proportional conversion (no offset)
    pub fn new(symbol: &str, name: &str, dimension: Dimension, to_si_factor: Number, category: &str) -> Self {
        Self::with_offset(symbol, name, dimension, to_si_factor, Number::from_i64(0), category)
    }

    /// Create a unit with offset (temperature scales)
    pub fn with_offset(
        symbol: &str,
        name: &str,
        dimension: Dimension,
        to_si_factor: Number,
        to_si_offset: Number,
        category: &str,
    ) -> Self {
        Unit {
            symbol: symbol.to_string(),
            name: name.to_string(),
            dimension,
            to_si_factor,
            to_si_offset,
            category: category.to_string(),
        }
    }

    /// The unit of pure numbers
    pub fn dimensionless() -> Self {
        Unit::new("", "", Dimension::DIMENSIONLESS, Number::from_i64(1), "dimensionless")
    }

    pub fn is_dimensionless(&self) -> bool {
        self.dimension.is_dimensionless()
    }

    pub fn has_offset(&self) -> bool {
        !self.to_si_offset.is_zero()
    }

    /// Check if two units are dimensionally compatible (can be converted)
    pub fn is_compatible(&self, other: &Unit) -> bool {
        self.dimension == other.dimension
    }

    /// Convert a value from this unit to SI base units
    pub fn to_si(&self, value: &Number) -> Number {
        value.mul(&self.to_si_factor).add(&self.to_si_offset)
    }

    /// Convert a value from SI base units to this unit
    pub fn from_si(&self, value_si: &Number) -> Result<Number> {
        let shifted = value_si.sub(&self.to_si_offset);
        Ok(shifted.checked_div(&self.to_si_factor)?)
    }

    /// Convert a value from this unit to another unit, honouring offsets
    pub fn convert_value(&self, value: &Number, target: &Unit) -> Result<Number> {
        if !self.is_compatible(target) {
            return Err(MensuraError::IncompatibleDimensions {
                from: self.symbol.clone(),
                to: target.symbol.clone(),
                from_dim: self.dimension_label(),
                to_dim: target.dimension_label(),
            });
        }

        target.from_si(&self.to_si(value))
    }

    /// "length", or the exponent form for unnamed dimensions
    pub fn dimension_label(&self) -> String {
        self.dimension
            .name()
            .map(str::to_string)
            .unwrap_or_else(|| self.dimension.to_string())
    }

    /// Product of two units (e.g., N * m). Composed units never carry an offset.
    pub fn multiply(&self, other: &Unit) -> Result<Unit> {
        let dimension = self.dimension.multiply(&other.dimension).ok_or(NumberError::Overflow)?;
        Ok(Unit::new(
            &format!("{}*{}", self.symbol, other.symbol),
            &format!("{} {}", self.name, other.name),
            dimension,
            self.to_si_factor.mul(&other.to_si_factor),
            "derived",
        ))
    }

    /// Quotient of two units (e.g., km / h)
    pub fn divide(&self, other: &Unit) -> Result<Unit> {
        let factor = self.to_si_factor.checked_div(&other.to_si_factor)?;
        let dimension = self.dimension.divide(&other.dimension).ok_or(NumberError::Overflow)?;
        let name = if self.is_dimensionless() {
            format!("per {}", other.name)
        } else {
            format!("{} per {}", self.name, other.name)
        };

        Ok(Unit::new(
            &format!("{}/{}", self.symbol, other.symbol),
            &name,
            dimension,
            factor,
            "derived",
        ))
    }

    /// Raise unit to an integer power (e.g., m^2, s^-1)
    pub fn power(&self, exp: i32) -> Result<Unit> {
        if exp == 1 {
            return Ok(self.clone());
        }

        let dimension = self.dimension.power(exp).ok_or(NumberError::Overflow)?;
        let name = match exp {
            2 => format!("square {}", self.name),
            3 => format!("cubic {}", self.name),
            -1 => format!("per {}", self.name),
            _ => format!("{} to the {}", self.name, exp),
        };

        Ok(Unit::new(
            &format!("{}^{}", self.symbol, exp),
            &name,
            dimension,
            self.to_si_factor.pow(exp)?,
            &self.category,
        ))
    }

    /// Same scale without the offset; used when a temperature unit is a factor of a compound
    pub fn without_offset(&self) -> Unit {
        Unit { to_si_offset: Number::from_i64(0), ..self.clone() }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol)
    }
}
