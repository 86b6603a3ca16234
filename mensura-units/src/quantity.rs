//! Quantity type - a value with an associated unit

use crate::{Dimension, Unit, UnitSystem};
use mensura_core::{Number, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A physical quantity: a finite numeric value with an associated unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    pub value: Number,
    pub unit: Unit,
}

impl Quantity {
    pub fn new(value: Number, unit: Unit) -> Self {
        Quantity { value, unit }
    }

    /// Create a dimensionless quantity (pure number)
    pub fn dimensionless(value: Number) -> Self {
        Quantity { value, unit: Unit::dimensionless() }
    }

    pub fn dimension(&self) -> Dimension {
        self.unit.dimension
    }

    pub fn is_dimensionless(&self) -> bool {
        self.unit.is_dimensionless()
    }

    pub fn is_compatible(&self, other: &Quantity) -> bool {
        self.unit.is_compatible(&other.unit)
    }

    /// Express this quantity in another unit of the same dimension
    pub fn convert_to(&self, target: &Unit) -> Result<Quantity> {
        let value = self.unit.convert_value(&self.value, target)?;
        Ok(Quantity::new(value, target.clone()))
    }

    /// Express this quantity in the base units of a unit system
    pub fn to_system(&self, system: UnitSystem) -> Result<Quantity> {
        let base = system.base_unit_for(&self.unit)?;
        self.convert_to(&base)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.unit.symbol.is_empty() {
            write!(f, "{}", self.value)
        } else {
            write!(f, "{} {}", self.value, self.unit.symbol)
        }
    }
}
