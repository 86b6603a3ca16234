//! Expression parser - splits an annotation body into source and targets

use crate::adapter::UnitBackend;
use mensura_core::Result;
use mensura_units::{Quantity, Unit};

/// Separator between the source quantity and each target unit
pub const TARGET_SEPARATOR: &str = "::";

/// A source quantity and the units to express it in
///
/// Empty targets mean "the base units of the configured system".
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionSpec {
    pub source: Quantity,
    pub targets: Vec<Unit>,
}

/// Parse "28g :: oz :: lb" into a source quantity and ordered targets
///
/// A bad source is `UnparsableQuantity`; an unknown or empty target is
/// `UnknownUnit`.
pub fn parse_expression(expression: &str, backend: &dyn UnitBackend) -> Result<ConversionSpec> {
    let mut segments = expression.trim().split(TARGET_SEPARATOR);

    // split always yields at least one segment
    let source = backend.quantity(segments.next().unwrap_or_default().trim())?;
    let targets = segments
        .map(|segment| backend.unit(segment.trim()))
        .collect::<Result<Vec<_>>>()?;

    Ok(ConversionSpec { source, targets })
}
