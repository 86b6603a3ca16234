//! Named unit systems and their base units

use crate::dimension::BASE_DIMENSIONS;
use crate::units::UNITS;
use crate::Unit;
use mensura_core::{MensuraError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A coherent set of base units used for implicit conversions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum UnitSystem {
    #[default]
    #[serde(rename = "SI")]
    Si,
    #[serde(rename = "cgs")]
    Cgs,
    #[serde(rename = "US")]
    Us,
    #[serde(rename = "imperial")]
    Imperial,
}

impl UnitSystem {
    pub const ALL: [UnitSystem; 4] = [UnitSystem::Si, UnitSystem::Cgs, UnitSystem::Us, UnitSystem::Imperial];

    /// Catalog symbols of the base units, in dimension exponent order
    pub fn base_symbols(&self) -> [&'static str; BASE_DIMENSIONS] {
        match self {
            UnitSystem::Si => ["m", "kg", "s", "A", "K", "mol", "cd"],
            UnitSystem::Cgs => ["cm", "g", "s", "A", "K", "mol", "cd"],
            UnitSystem::Us => ["ft", "lb", "s", "A", "degF", "mol", "cd"],
            UnitSystem::Imperial => ["yd", "lb", "s", "A", "degF", "mol", "cd"],
        }
    }

    pub fn identifier(&self) -> &'static str {
        match self {
            UnitSystem::Si => "SI",
            UnitSystem::Cgs => "cgs",
            UnitSystem::Us => "US",
            UnitSystem::Imperial => "imperial",
        }
    }

    /// The unit a quantity measured in `unit` takes in this system
    ///
    /// Pure temperature keeps the system's offset scale; every other dimension
    /// is composed from the base units (numerator factors first, then "per").
    /// Angles stay angles and come out in radians.
    pub fn base_unit_for(&self, unit: &Unit) -> Result<Unit> {
        let symbols = self.base_symbols();
        let lookup = |symbol: &str| {
            UNITS
                .get(symbol)
                .cloned()
                .ok_or_else(|| MensuraError::MissingCapability(format!("base unit '{}' is not in the catalog", symbol)))
        };

        if unit.dimension.is_temperature() {
            return lookup(symbols[4]);
        }

        if unit.is_dimensionless() {
            return if unit.category == "angle" { lookup("rad") } else { Ok(Unit::dimensionless()) };
        }

        let exponents = unit.dimension.exponents;
        let mut numerator: Option<Unit> = None;
        let mut denominator: Option<Unit> = None;

        for (index, &exp) in exponents.iter().enumerate() {
            if exp == 0 {
                continue;
            }
            let base = lookup(symbols[index])?.without_offset().power(exp.abs())?;
            let slot = if exp > 0 { &mut numerator } else { &mut denominator };
            *slot = Some(match slot.take() {
                Some(acc) => acc.multiply(&base)?,
                None => base,
            });
        }

        match (numerator, denominator) {
            (Some(num), Some(den)) => num.divide(&den),
            (Some(num), None) => Ok(num),
            (None, Some(den)) => Unit::dimensionless().divide(&den),
            (None, None) => Ok(Unit::dimensionless()),
        }
    }
}

impl FromStr for UnitSystem {
    type Err = MensuraError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "si" | "mks" | "metric" => Ok(UnitSystem::Si),
            "cgs" => Ok(UnitSystem::Cgs),
            "us" | "usc" | "customary" => Ok(UnitSystem::Us),
            "imperial" | "uk" => Ok(UnitSystem::Imperial),
            other => Err(MensuraError::Config(format!(
                "unknown unit system '{}', expected one of SI, cgs, US, imperial",
                other
            ))),
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.identifier())
    }
}
