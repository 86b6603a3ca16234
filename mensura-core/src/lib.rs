//! Mensura Core - Fundamental types
//!
//! This crate provides the types shared by the whole workspace:
//! - `Number`: arbitrary precision decimal magnitudes
//! - `MensuraError`: the error taxonomy with machine-readable codes

mod error;
mod number;

pub use error::{codes, MensuraError, Result};
pub use number::{Number, NumberError};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::error::codes;
    pub use crate::{MensuraError, Number, NumberError, Result};
}
