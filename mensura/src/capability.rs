//! Startup capability check
//!
//! Run once before the first document so a missing or broken backend fails
//! the build up front instead of on every annotation.

use crate::adapter::UnitBackend;
use crate::config::RenderConfig;
use mensura_core::{MensuraError, Number, Result};
use mensura_inflect::Inflector;
use tracing::debug;

/// Verify the backend and inflector can do everything the pipeline needs
pub fn ensure_capabilities(backend: &dyn UnitBackend, inflector: &dyn Inflector, config: &RenderConfig) -> Result<()> {
    let sample = backend
        .quantity("1 m")
        .map_err(|e| missing(format!("cannot construct quantities ({})", e)))?;

    backend
        .convert(&sample, &[], config.default_system)
        .map_err(|e| missing(format!("cannot convert to {} base units ({})", config.default_system, e)))?;

    // 0 degC must come out as 273.15 K, which proves offsets are applied
    let freezing = backend
        .quantity("0 degC")
        .and_then(|q| {
            let kelvin = backend.unit("K")?;
            backend.convert(&q, &[kelvin], config.default_system)
        })
        .map_err(|e| missing(format!("cannot convert temperatures ({})", e)))?;
    let expected = Number::decimal(27315, -2);
    match freezing.first() {
        Some(q) if q.value.round_to(6) == expected => {}
        Some(q) => {
            return Err(missing(format!(
                "temperature conversion is not affine: 0 degC gave {} K",
                q.value
            )))
        }
        None => return Err(missing("temperature conversion returned nothing".to_string())),
    }

    let plural = inflector.plural("foot");
    if plural != "feet" {
        return Err(missing(format!("pluralization is broken: 'foot' became '{}'", plural)));
    }

    debug!(system = %config.default_system, "unit capabilities verified");
    Ok(())
}

fn missing(reason: String) -> MensuraError {
    MensuraError::MissingCapability(reason)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::CatalogBackend;
    use mensura_inflect::English;
    use mensura_units::{Quantity, Unit, UnitSystem};

    /// Converts without applying offsets
    struct LinearOnly;

    impl UnitBackend for LinearOnly {
        fn quantity(&self, expression: &str) -> Result<Quantity> {
            CatalogBackend.quantity(expression)
        }

        fn unit(&self, identifier: &str) -> Result<Unit> {
            CatalogBackend.unit(identifier)
        }

        fn convert(&self, quantity: &Quantity, targets: &[Unit], system: UnitSystem) -> Result<Vec<Quantity>> {
            let stripped = Quantity::new(quantity.value.clone(), quantity.unit.without_offset());
            CatalogBackend.convert(&stripped, targets, system)
        }
    }

    struct NoQuantities;

    impl UnitBackend for NoQuantities {
        fn quantity(&self, expression: &str) -> Result<Quantity> {
            Err(MensuraError::unparsable(expression, "unsupported"))
        }

        fn unit(&self, identifier: &str) -> Result<Unit> {
            Err(MensuraError::UnknownUnit(identifier.to_string()))
        }

        fn convert(&self, _: &Quantity, _: &[Unit], _: UnitSystem) -> Result<Vec<Quantity>> {
            Ok(Vec::new())
        }
    }

    struct Lazy;

    impl Inflector for Lazy {
        fn plural(&self, noun: &str) -> String {
            format!("{}s", noun)
        }
    }

    #[test]
    fn test_catalog_passes() {
        for system in UnitSystem::ALL {
            let config = RenderConfig::default().with_system(system);
            ensure_capabilities(&CatalogBackend, &English, &config).unwrap();
        }
    }

    #[test]
    fn test_missing_quantities() {
        let err = ensure_capabilities(&NoQuantities, &English, &RenderConfig::default()).unwrap_err();
        assert_eq!(err.code(), mensura_core::codes::MISSING_CAPABILITY);
    }

    #[test]
    fn test_non_affine_temperature() {
        let err = ensure_capabilities(&LinearOnly, &English, &RenderConfig::default()).unwrap_err();
        assert!(err.to_string().contains("not affine"), "{err}");
    }

    #[test]
    fn test_broken_inflector() {
        let err = ensure_capabilities(&CatalogBackend, &Lazy, &RenderConfig::default()).unwrap_err();
        assert!(matches!(err, MensuraError::MissingCapability(_)));
    }
}
