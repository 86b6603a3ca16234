//! Pluralization formatter - "3.05 meters", "1 foot", "0.5 feet"

use mensura_inflect::Inflector;
use mensura_units::Quantity;

/// Render a quantity as rounded magnitude plus inflected unit name
///
/// The magnitude is rounded half away from zero to `precision` places and
/// printed without trailing zeros. Only a rounded value of exactly 1 takes the
/// singular. Dimensionless quantities print as the bare number.
pub fn format_quantity(quantity: &Quantity, precision: u32, inflector: &dyn Inflector) -> String {
    let rounded = quantity.value.round_to(precision);
    let number = rounded.as_trimmed(precision);

    if quantity.is_dimensionless() && quantity.unit.category != "angle" {
        return number;
    }

    let name = if quantity.unit.name.is_empty() {
        quantity.unit.symbol.clone()
    } else {
        inflector.inflect(&quantity.unit.name, rounded.is_one())
    };

    format!("{} {}", number, name)
}
