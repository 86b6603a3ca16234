//! Plugin traits

use crate::Content;
use mensura_core::Result;
use serde::Serialize;

/// Metadata for a content plugin
#[derive(Debug, Clone, Serialize)]
pub struct PluginMeta {
    pub name: &'static str,
    pub description: &'static str,
    /// Settings keys the plugin reads
    pub settings: &'static [&'static str],
}

/// Transformation applied to text content (articles and pages)
///
/// Plugins are shared across worker threads, so `process` takes `&self`.
pub trait ContentPlugin: Send + Sync {
    fn meta(&self) -> PluginMeta;
    fn process(&self, content: &mut Content) -> Result<()>;
}
