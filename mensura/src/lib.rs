//! Mensura - inline unit annotations for document pipelines
//!
//! Finds `{unit: <quantity> [:: <target>]...}` markers in text and replaces
//! each one with the original value and its conversion, rendered through an
//! HTML template:
//!
//! ```text
//! A {unit: 10 ft}.   ->   A 10 feet (<em>3.05 meters</em>).
//! ```
//!
//! Pipeline per document: scan, parse expression, convert, format, render,
//! substitute. Configuration is resolved once and shared read-only.

mod adapter;
mod capability;
mod config;
mod expression;
mod format;
mod plugin;
mod processor;
mod scanner;
mod template;

pub use adapter::{CatalogBackend, UnitBackend};
pub use capability::ensure_capabilities;
pub use config::{apply_defaults, keys, ConfigResolver, RenderConfig, DEFAULT_PRECISION, ENV_PREFIX};
pub use expression::{parse_expression, ConversionSpec, TARGET_SEPARATOR};
pub use format::format_quantity;
pub use plugin::UnitsPlugin;
pub use processor::{process, AnnotationFailure, DocumentProcessor, FailurePolicy, Processed};
pub use scanner::{contains_marker, scan, Annotation, MARKER};
pub use template::{escape_html, HtmlTemplate, CONVERTED_SEPARATOR, DEFAULT_HTML_WRAPPER};

pub use mensura_core::{codes, MensuraError, Number, Result};
pub use mensura_inflect::{English, Inflector};
pub use mensura_units::{Quantity, Unit, UnitSystem};
