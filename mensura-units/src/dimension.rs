//! Dimensional analysis types
//!
//! Each physical quantity has dimensions represented as a 7-element vector:
//! [length, mass, time, current, temperature, amount, luminosity]

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of SI base dimensions
pub const BASE_DIMENSIONS: usize = 7;

/// Short symbols of the base dimensions, in exponent order
const SYMBOLS: [&str; BASE_DIMENSIONS] = ["L", "M", "T", "I", "Θ", "N", "J"];

/// Exponents of the 7 SI base dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimension {
    pub exponents: [i32; BASE_DIMENSIONS],
}

impl Dimension {
    pub const DIMENSIONLESS: Dimension = Dimension::new([0, 0, 0, 0, 0, 0, 0]);
    pub const LENGTH: Dimension = Dimension::new([1, 0, 0, 0, 0, 0, 0]);
    pub const MASS: Dimension = Dimension::new([0, 1, 0, 0, 0, 0, 0]);
    pub const TIME: Dimension = Dimension::new([0, 0, 1, 0, 0, 0, 0]);
    pub const CURRENT: Dimension = Dimension::new([0, 0, 0, 1, 0, 0, 0]);
    pub const TEMPERATURE: Dimension = Dimension::new([0, 0, 0, 0, 1, 0, 0]);
    pub const AMOUNT: Dimension = Dimension::new([0, 0, 0, 0, 0, 1, 0]);
    pub const LUMINOSITY: Dimension = Dimension::new([0, 0, 0, 0, 0, 0, 1]);

    pub const AREA: Dimension = Dimension::new([2, 0, 0, 0, 0, 0, 0]);
    pub const VOLUME: Dimension = Dimension::new([3, 0, 0, 0, 0, 0, 0]);
    pub const VELOCITY: Dimension = Dimension::new([1, 0, -1, 0, 0, 0, 0]);
    pub const ACCELERATION: Dimension = Dimension::new([1, 0, -2, 0, 0, 0, 0]);
    pub const FORCE: Dimension = Dimension::new([1, 1, -2, 0, 0, 0, 0]);
    pub const ENERGY: Dimension = Dimension::new([2, 1, -2, 0, 0, 0, 0]);
    pub const POWER: Dimension = Dimension::new([2, 1, -3, 0, 0, 0, 0]);
    pub const PRESSURE: Dimension = Dimension::new([-1, 1, -2, 0, 0, 0, 0]);
    pub const FREQUENCY: Dimension = Dimension::new([0, 0, -1, 0, 0, 0, 0]);

    pub const fn new(exponents: [i32; BASE_DIMENSIONS]) -> Self {
        Dimension { exponents }
    }

    pub fn is_dimensionless(&self) -> bool {
        self.exponents.iter().all(|&e| e == 0)
    }

    /// True for plain temperature, the only dimension where unit offsets apply
    pub fn is_temperature(&self) -> bool {
        *self == Self::TEMPERATURE
    }

    /// Multiply dimensions (add exponents); `None` on exponent overflow
    pub fn multiply(&self, other: &Dimension) -> Option<Dimension> {
        self.zip_with(other, i32::checked_add)
    }

    /// Divide dimensions (subtract exponents); `None` on exponent overflow
    pub fn divide(&self, other: &Dimension) -> Option<Dimension> {
        self.zip_with(other, i32::checked_sub)
    }

    /// Raise to integer power (multiply exponents); `None` on exponent overflow
    pub fn power(&self, exp: i32) -> Option<Dimension> {
        let mut exponents = [0; BASE_DIMENSIONS];
        for (slot, e) in exponents.iter_mut().zip(self.exponents) {
            *slot = e.checked_mul(exp)?;
        }
        Some(Dimension::new(exponents))
    }

    fn zip_with(&self, other: &Dimension, f: impl Fn(i32, i32) -> Option<i32>) -> Option<Dimension> {
        let mut exponents = [0; BASE_DIMENSIONS];
        for (i, slot) in exponents.iter_mut().enumerate() {
            *slot = f(self.exponents[i], other.exponents[i])?;
        }
        Some(Dimension::new(exponents))
    }

    /// Common name of this dimension, if it has one
    pub fn name(&self) -> Option<&'static str> {
        let name = match *self {
            Self::DIMENSIONLESS => "dimensionless",
            Self::LENGTH => "length",
            Self::MASS => "mass",
            Self::TIME => "time",
            Self::CURRENT => "current",
            Self::TEMPERATURE => "temperature",
            Self::AMOUNT => "amount",
            Self::LUMINOSITY => "luminosity",
            Self::AREA => "area",
            Self::VOLUME => "volume",
            Self::VELOCITY => "velocity",
            Self::ACCELERATION => "acceleration",
            Self::FORCE => "force",
            Self::ENERGY => "energy",
            Self::POWER => "power",
            Self::PRESSURE => "pressure",
            Self::FREQUENCY => "frequency",
            _ => return None,
        };
        Some(name)
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .exponents
            .iter()
            .zip(SYMBOLS)
            .filter(|(exp, _)| **exp != 0)
            .map(|(&exp, symbol)| match exp {
                1 => symbol.to_string(),
                _ => format!("{}^{}", symbol, exp),
            })
            .collect();

        if parts.is_empty() {
            write!(f, "1")
        } else {
            write!(f, "{}", parts.join(" "))
        }
    }
}

impl Default for Dimension {
    fn default() -> Self {
        Self::DIMENSIONLESS
    }
}
