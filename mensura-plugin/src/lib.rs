//! Mensura Plugin System
//!
//! Host-side glue modelled on a static-site generator's content hook:
//! - `Content`: one document or asset flowing through the build
//! - `Settings`: the host's key/value configuration
//! - `ContentPlugin`: a transformation applied to text content
//! - `PluginRegistry`: ordered dispatch of content to plugins

mod content;
mod registry;
mod settings;
mod traits;

pub use content::{Content, ContentKind};
pub use registry::PluginRegistry;
pub use settings::Settings;
pub use traits::{ContentPlugin, PluginMeta};

/// Re-export core types for plugin authors
pub mod prelude {
    pub use crate::{Content, ContentKind, ContentPlugin, PluginMeta, PluginRegistry, Settings};
    pub use mensura_core::prelude::*;
}
