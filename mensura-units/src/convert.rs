//! Conversion of a quantity to explicit targets or to a unit system

use crate::{Quantity, Unit, UnitSystem};
use mensura_core::Result;

/// Convert `quantity` to every target in order
///
/// With no targets the result is a single quantity expressed in the base
/// units of `system`. The first incompatible target fails the whole call.
pub fn convert(quantity: &Quantity, targets: &[Unit], system: UnitSystem) -> Result<Vec<Quantity>> {
    if targets.is_empty() {
        return Ok(vec![quantity.to_system(system)?]);
    }

    targets.iter().map(|target| quantity.convert_to(target)).collect()
}
