//! Mensura Units - Physical quantities and unit conversion
//!
//! Provides unit-aware quantities with dimensional analysis, an offset-aware
//! conversion model and named unit systems (SI, cgs, US, imperial).
//!
//! Categories:
//! - Length (m, km, ft, mi, etc.)
//! - Mass (kg, g, lb, oz, etc.)
//! - Time (s, min, h, d, etc.)
//! - Temperature (K, degC, degF, degR)
//! - Current, amount, luminosity (A, mol, cd)
//! - Area (m2, ft2, acre, etc.)
//! - Volume (L, mL, gal, etc.)
//! - Velocity (m/s, km/h, mph, etc.)
//! - Force, energy, power, pressure, frequency
//! - Angle (rad, deg, turn)

mod convert;
mod dimension;
mod parse;
mod quantity;
mod system;
mod unit;
mod units;

pub use convert::convert;
pub use dimension::Dimension;
pub use parse::{parse_quantity, parse_unit};
pub use quantity::Quantity;
pub use system::UnitSystem;
pub use unit::Unit;
pub use units::{UnitRegistry, UNITS};
