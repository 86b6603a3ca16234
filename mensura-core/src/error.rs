//! Error taxonomy shared by every Mensura crate
//!
//! Each variant carries a stable machine-readable code so hosts can report
//! failures without matching on message text.

use crate::NumberError;
use serde::{Serialize, Serializer};
use thiserror::Error;

/// Standard error codes (machine-readable)
pub mod codes {
    pub const UNPARSABLE_QUANTITY: &str = "UNPARSABLE_QUANTITY";
    pub const UNKNOWN_UNIT: &str = "UNKNOWN_UNIT";
    pub const INCOMPATIBLE_DIMENSIONS: &str = "INCOMPATIBLE_DIMENSIONS";
    pub const TEMPLATE_ERROR: &str = "TEMPLATE_ERROR";
    pub const MISSING_CAPABILITY: &str = "MISSING_CAPABILITY";
    pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
    pub const NUMBER_ERROR: &str = "NUMBER_ERROR";
    pub const IO_ERROR: &str = "IO_ERROR";
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MensuraError {
    /// The magnitude or unit of a quantity expression could not be read
    #[error("cannot parse quantity '{input}': {reason}")]
    UnparsableQuantity { input: String, reason: String },

    /// A target unit identifier is not in the catalog
    #[error("unknown unit: '{0}'")]
    UnknownUnit(String),

    #[error("cannot convert {from} ({from_dim}) to {to} ({to_dim}): incompatible dimensions")]
    IncompatibleDimensions {
        from: String,
        to: String,
        from_dim: String,
        to_dim: String,
    },

    #[error("invalid HTML template: {0}")]
    Template(String),

    #[error("missing capability: {0}")]
    MissingCapability(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    /// A failure tied to one annotation of a document
    #[error("annotation '{raw}' at byte {offset}: {source}")]
    Annotation {
        offset: usize,
        raw: String,
        source: Box<MensuraError>,
    },

    #[error(transparent)]
    Number(#[from] NumberError),

    #[error("I/O error: {0}")]
    Io(String),
}

impl MensuraError {
    pub fn unparsable(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::UnparsableQuantity { input: input.into(), reason: reason.into() }
    }

    /// Attach the position and raw text of the annotation that failed
    pub fn at_annotation(self, offset: usize, raw: impl Into<String>) -> Self {
        Self::Annotation { offset, raw: raw.into(), source: Box::new(self) }
    }

    /// Machine-readable code; annotation wrappers report the code of their cause
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnparsableQuantity { .. } => codes::UNPARSABLE_QUANTITY,
            Self::UnknownUnit(_) => codes::UNKNOWN_UNIT,
            Self::IncompatibleDimensions { .. } => codes::INCOMPATIBLE_DIMENSIONS,
            Self::Template(_) => codes::TEMPLATE_ERROR,
            Self::MissingCapability(_) => codes::MISSING_CAPABILITY,
            Self::Config(_) => codes::CONFIG_ERROR,
            Self::Annotation { source, .. } => source.code(),
            Self::Number(_) => codes::NUMBER_ERROR,
            Self::Io(_) => codes::IO_ERROR,
        }
    }

    /// The underlying error with any annotation context removed
    pub fn root(&self) -> &MensuraError {
        match self {
            Self::Annotation { source, .. } => source.root(),
            other => other,
        }
    }
}

impl From<std::io::Error> for MensuraError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Serialized as `{ "code": ..., "message": ... }` for host reports
impl Serialize for MensuraError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("MensuraError", 2)?;
        state.serialize_field("code", self.code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

pub type Result<T, E = MensuraError> = std::result::Result<T, E>;
