//! Unit conversion adapter - the seam between the core and the unit library

use mensura_core::Result;
use mensura_units::{Quantity, Unit, UnitSystem};

/// Dimensional-analysis capability used by the document processor
pub trait UnitBackend: Send + Sync {
    /// Build a quantity from "<number><unit>", e.g. "28g" or "10 ft"
    fn quantity(&self, expression: &str) -> Result<Quantity>;

    /// Resolve a unit identifier (symbol, name, alias or compound)
    fn unit(&self, identifier: &str) -> Result<Unit>;

    /// One quantity per target in order, or the base units of `system` when
    /// `targets` is empty
    fn convert(&self, quantity: &Quantity, targets: &[Unit], system: UnitSystem) -> Result<Vec<Quantity>>;
}

/// Backend over the built-in unit catalog
#[derive(Debug, Clone, Copy, Default)]
pub struct CatalogBackend;

impl UnitBackend for CatalogBackend {
    fn quantity(&self, expression: &str) -> Result<Quantity> {
        mensura_units::parse_quantity(expression)
    }

    fn unit(&self, identifier: &str) -> Result<Unit> {
        mensura_units::parse_unit(identifier)
    }

    fn convert(&self, quantity: &Quantity, targets: &[Unit], system: UnitSystem) -> Result<Vec<Quantity>> {
        mensura_units::convert(quantity, targets, system)
    }
}
