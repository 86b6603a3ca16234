//! Document processor - scan, convert and substitute every annotation

use crate::adapter::{CatalogBackend, UnitBackend};
use crate::config::RenderConfig;
use crate::expression::parse_expression;
use crate::format::format_quantity;
use crate::scanner::{contains_marker, scan, Annotation};
use crate::template::escape_html;
use mensura_core::{MensuraError, Result};
use mensura_inflect::{English, Inflector};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, warn};

/// What happens to an annotation that cannot be converted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// The first failure aborts the document
    Abort,
    /// Leave the raw annotation in place and carry on
    #[default]
    Keep,
    /// Wrap the raw annotation in an error span and carry on
    Mark,
}

impl FailurePolicy {
    pub fn identifier(&self) -> &'static str {
        match self {
            FailurePolicy::Abort => "abort",
            FailurePolicy::Keep => "keep",
            FailurePolicy::Mark => "mark",
        }
    }
}

impl FromStr for FailurePolicy {
    type Err = MensuraError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "abort" | "strict" => Ok(FailurePolicy::Abort),
            "keep" | "skip" => Ok(FailurePolicy::Keep),
            "mark" => Ok(FailurePolicy::Mark),
            other => Err(MensuraError::Config(format!(
                "unknown failure policy '{}', expected one of abort, keep, mark",
                other
            ))),
        }
    }
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

/// An annotation left unconverted under a lenient policy
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotationFailure {
    pub offset: usize,
    pub raw: String,
    pub error: MensuraError,
}

/// Result of processing one document
#[derive(Debug, Clone, PartialEq)]
pub struct Processed<'a> {
    /// Borrowed when the document had nothing to convert
    pub text: Cow<'a, str>,
    pub converted: usize,
    pub failures: Vec<AnnotationFailure>,
}

impl Processed<'_> {
    pub fn is_changed(&self) -> bool {
        matches!(self.text, Cow::Owned(_))
    }
}

/// Stateless pipeline over a unit backend and an inflector
///
/// Shareable across threads; documents can be processed in parallel.
#[derive(Clone)]
pub struct DocumentProcessor {
    backend: Arc<dyn UnitBackend>,
    inflector: Arc<dyn Inflector>,
}

impl DocumentProcessor {
    pub fn new(backend: Arc<dyn UnitBackend>, inflector: Arc<dyn Inflector>) -> Self {
        Self { backend, inflector }
    }

    pub fn backend(&self) -> &dyn UnitBackend {
        self.backend.as_ref()
    }

    pub fn inflector(&self) -> &dyn Inflector {
        self.inflector.as_ref()
    }

    /// Replace every annotation in `text` with its rendered conversion
    pub fn process<'a>(&self, text: &'a str, config: &RenderConfig) -> Result<Processed<'a>> {
        if !contains_marker(text) {
            return Ok(Processed { text: Cow::Borrowed(text), converted: 0, failures: Vec::new() });
        }

        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        let mut converted = 0;
        let mut failures = Vec::new();

        for annotation in scan(text) {
            out.push_str(&text[last..annotation.start]);
            last = annotation.end;

            match self.render_annotation(annotation.expression, config) {
                Ok(html) => {
                    debug!(offset = annotation.start, raw = annotation.raw, "converted annotation");
                    out.push_str(&html);
                    converted += 1;
                }
                Err(err) => {
                    self.handle_failure(&annotation, err, config, &mut out, &mut failures)?;
                }
            }
        }

        if converted == 0 && failures.is_empty() {
            return Ok(Processed { text: Cow::Borrowed(text), converted, failures });
        }

        out.push_str(&text[last..]);
        Ok(Processed { text: Cow::Owned(out), converted, failures })
    }

    /// Parse, convert, format and render one annotation body
    pub fn render_annotation(&self, expression: &str, config: &RenderConfig) -> Result<String> {
        let conversion = parse_expression(expression, self.backend.as_ref())?;
        let results = self.backend.convert(&conversion.source, &conversion.targets, config.default_system)?;

        let inflector = self.inflector.as_ref();
        let original = format_quantity(&conversion.source, config.precision, inflector);
        let converted: Vec<String> = results
            .iter()
            .map(|q| format_quantity(q, config.precision, inflector))
            .collect();

        Ok(config.html_template.render(&original, &converted))
    }

    fn handle_failure(
        &self,
        annotation: &Annotation<'_>,
        err: MensuraError,
        config: &RenderConfig,
        out: &mut String,
        failures: &mut Vec<AnnotationFailure>,
    ) -> Result<()> {
        if config.failure_policy == FailurePolicy::Abort {
            return Err(err.at_annotation(annotation.start, annotation.raw));
        }

        warn!(
            offset = annotation.start,
            raw = annotation.raw,
            code = err.code(),
            "leaving annotation unconverted: {}",
            err
        );

        match config.failure_policy {
            FailurePolicy::Mark => {
                out.push_str(&format!(
                    r#"<span class="unit-error" title="{}">{}</span>"#,
                    escape_html(&err.to_string()),
                    annotation.raw
                ));
            }
            _ => out.push_str(annotation.raw),
        }

        failures.push(AnnotationFailure {
            offset: annotation.start,
            raw: annotation.raw.to_string(),
            error: err,
        });
        Ok(())
    }
}

impl Default for DocumentProcessor {
    fn default() -> Self {
        Self::new(Arc::new(CatalogBackend), Arc::new(English))
    }
}

impl fmt::Debug for DocumentProcessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentProcessor").finish_non_exhaustive()
    }
}

/// Process `text` with the built-in catalog and English inflection
pub fn process<'a>(text: &'a str, config: &RenderConfig) -> Result<Processed<'a>> {
    DocumentProcessor::default().process(text, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mensura_units::UnitSystem;

    fn config() -> RenderConfig {
        RenderConfig::default()
    }

    #[test]
    fn test_untouched_without_marker() {
        let text = "Nothing to convert here {not: 1 m}.";
        let processed = process(text, &config()).unwrap();
        assert_eq!(processed.text, text);
        assert!(!processed.is_changed());
        assert_eq!(processed.converted, 0);
    }

    #[test]
    fn test_default_system_conversion() {
        let processed = process("A {unit: 10 ft}.", &config()).unwrap();
        assert_eq!(processed.text, "A 10 feet (<em>3.05 meters</em>).");
        assert_eq!(processed.converted, 1);
    }

    #[test]
    fn test_multiple_targets() {
        let processed = process("{unit: 28g :: oz :: lb}", &config()).unwrap();
        assert_eq!(processed.text, "28 grams (<em>0.99 ounces, 0.06 pounds</em>)");
    }

    #[test]
    fn test_temperature() {
        let processed = process("{unit: 212 degF :: degC}", &config()).unwrap();
        assert_eq!(processed.text, "212 degrees Fahrenheit (<em>100 degrees Celsius</em>)");
    }

    #[test]
    fn test_singular() {
        let processed = process("{unit: 1 mi :: ft}", &config()).unwrap();
        assert_eq!(processed.text, "1 mile (<em>5280 feet</em>)");

        let processed = process("{unit: 0.3048 m :: ft}", &config()).unwrap();
        assert_eq!(processed.text, "0.3 meters (<em>1 foot</em>)");
    }

    #[test]
    fn test_configured_system_and_precision() {
        let config = config().with_system(UnitSystem::Us).with_precision(1);
        let processed = process("{unit: 100 km}", &config).unwrap();
        assert_eq!(processed.text, "100 kilometers (<em>328084 feet</em>)");
    }

    #[test]
    fn test_several_annotations_rebuilt_in_order() {
        let text = "Run {unit: 5 km :: mi}, then rest {unit: 1 h :: min}.";
        let processed = process(text, &config()).unwrap();
        assert_eq!(
            processed.text,
            "Run 5 kilometers (<em>3.11 miles</em>), then rest 1 hour (<em>60 minutes</em>)."
        );
        assert_eq!(processed.converted, 2);
    }

    #[test]
    fn test_keep_policy() {
        let text = "{unit: 28zz} and {unit: 10 ft :: kg} and {unit: 1 m :: cm}";
        let processed = process(text, &config()).unwrap();
        assert_eq!(
            processed.text,
            "{unit: 28zz} and {unit: 10 ft :: kg} and 1 meter (<em>100 centimeters</em>)"
        );
        assert_eq!(processed.converted, 1);
        assert_eq!(processed.failures.len(), 2);
        assert_eq!(processed.failures[0].offset, 0);
        assert_eq!(processed.failures[0].error.code(), mensura_core::codes::UNPARSABLE_QUANTITY);
        assert_eq!(processed.failures[1].error.code(), mensura_core::codes::INCOMPATIBLE_DIMENSIONS);
    }

    #[test]
    fn test_abort_policy() {
        let config = config().with_failure_policy(FailurePolicy::Abort);
        let err = process("ok {unit: 1 m} bad {unit: 10 ft :: kg}", &config).unwrap_err();
        match err {
            MensuraError::Annotation { offset, raw, source } => {
                assert_eq!(offset, 19);
                assert_eq!(raw, "{unit: 10 ft :: kg}");
                assert!(matches!(*source, MensuraError::IncompatibleDimensions { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_mark_policy() {
        let config = config().with_failure_policy(FailurePolicy::Mark);
        let processed = process("x {unit: 5 zz} y", &config).unwrap();
        assert!(processed.text.starts_with(r#"x <span class="unit-error" title="cannot parse quantity &#39;5 zz&#39;"#));
        assert!(processed.text.ends_with(r#">{unit: 5 zz}</span> y"#));
        assert_eq!(processed.failures.len(), 1);
    }

    #[test]
    fn test_large_magnitudes_keep_every_digit() {
        let processed = process("{unit: 123456789012345678901 m :: m}", &config()).unwrap();
        assert_eq!(
            processed.text,
            "123456789012345678901 meters (<em>123456789012345678901 meters</em>)"
        );
    }

    #[test]
    fn test_oversized_exponent_is_rejected() {
        let text = "{unit: 1 m^20000000 :: m^20000000} then {unit: 2 m^2 :: ft^2}";
        let processed = process(text, &config()).unwrap();
        assert!(processed.text.starts_with("{unit: 1 m^20000000 :: m^20000000} then 2 square meters"));
        assert_eq!(processed.converted, 1);
        assert_eq!(processed.failures.len(), 1);
        assert_eq!(processed.failures[0].error.code(), mensura_core::codes::UNPARSABLE_QUANTITY);
    }

    #[test]
    fn test_replacements_not_rescanned() {
        let config = config().with_template(crate::HtmlTemplate::parse("{{unit: {converted}}}").unwrap());
        let processed = process("{unit: 1 m :: cm}", &config).unwrap();
        assert_eq!(processed.text, "{unit: 100 centimeters}");
        assert_eq!(processed.converted, 1);
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("ABORT".parse::<FailurePolicy>().unwrap(), FailurePolicy::Abort);
        assert_eq!("mark".parse::<FailurePolicy>().unwrap(), FailurePolicy::Mark);
        assert!("explode".parse::<FailurePolicy>().is_err());
        assert_eq!(FailurePolicy::default(), FailurePolicy::Keep);
    }

    #[test]
    fn test_processor_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DocumentProcessor>();
        assert_send_sync::<RenderConfig>();
    }
}
