//! Plugin Registry

use crate::{Content, ContentPlugin, PluginMeta};
use mensura_core::Result;
use std::sync::Arc;
use tracing::debug;

/// Ordered list of content plugins
///
/// Cloning is cheap; plugins are shared behind `Arc`.
#[derive(Clone, Default)]
pub struct PluginRegistry {
    plugins: Vec<Arc<dyn ContentPlugin>>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self { plugins: Vec::new() }
    }

    pub fn with_plugin<P: ContentPlugin + 'static>(mut self, plugin: P) -> Self {
        self.plugins.push(Arc::new(plugin));
        self
    }

    pub fn with_shared(mut self, plugin: Arc<dyn ContentPlugin>) -> Self {
        self.plugins.push(plugin);
        self
    }

    pub fn get(&self, name: &str) -> Option<&dyn ContentPlugin> {
        self.plugins
            .iter()
            .find(|p| p.meta().name.eq_ignore_ascii_case(name))
            .map(|p| p.as_ref())
    }

    pub fn list(&self) -> Vec<PluginMeta> {
        self.plugins.iter().map(|p| p.meta()).collect()
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Apply every plugin to `content`, in registration order
    ///
    /// Static content is left untouched. The first plugin error stops the run
    /// and leaves the body as the previous plugin produced it.
    pub fn run(&self, content: &mut Content) -> Result<()> {
        if !content.kind.is_text() {
            debug!(path = %content.path.display(), "skipping static content");
            return Ok(());
        }

        for plugin in &self.plugins {
            plugin.process(content)?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.plugins.iter().map(|p| p.meta().name).collect();
        f.debug_struct("PluginRegistry").field("plugins", &names).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ContentKind;
    use mensura_core::MensuraError;

    struct Upper;

    impl ContentPlugin for Upper {
        fn meta(&self) -> PluginMeta {
            PluginMeta { name: "upper", description: "Uppercase the body", settings: &[] }
        }

        fn process(&self, content: &mut Content) -> Result<()> {
            content.body = content.body.to_uppercase();
            Ok(())
        }
    }

    struct Suffix(&'static str);

    impl ContentPlugin for Suffix {
        fn meta(&self) -> PluginMeta {
            PluginMeta { name: "suffix", description: "Append a suffix", settings: &[] }
        }

        fn process(&self, content: &mut Content) -> Result<()> {
            content.body.push_str(self.0);
            Ok(())
        }
    }

    struct Failing;

    impl ContentPlugin for Failing {
        fn meta(&self) -> PluginMeta {
            PluginMeta { name: "failing", description: "Always fails", settings: &[] }
        }

        fn process(&self, _content: &mut Content) -> Result<()> {
            Err(MensuraError::Config("broken".to_string()))
        }
    }

    #[test]
    fn test_runs_in_order() {
        let registry = PluginRegistry::new().with_plugin(Suffix("!")).with_plugin(Upper);
        let mut content = Content::article("a.md", "hi");
        registry.run(&mut content).unwrap();
        assert_eq!(content.body, "HI!");
    }

    #[test]
    fn test_skips_static() {
        let registry = PluginRegistry::new().with_plugin(Upper);
        let mut content = Content::new("logo.svg", ContentKind::Static, "<svg/>");
        registry.run(&mut content).unwrap();
        assert_eq!(content.body, "<svg/>");
    }

    #[test]
    fn test_stops_at_first_error() {
        let registry = PluginRegistry::new()
            .with_plugin(Suffix("1"))
            .with_plugin(Failing)
            .with_plugin(Suffix("2"));
        let mut content = Content::article("a.md", "x");
        assert!(registry.run(&mut content).is_err());
        assert_eq!(content.body, "x1");
    }

    #[test]
    fn test_lookup() {
        let registry = PluginRegistry::new().with_plugin(Upper);
        assert!(registry.get("UPPER").is_some());
        assert!(registry.get("missing").is_none());
        assert_eq!(registry.list().len(), 1);
        assert!(!registry.is_empty());
    }
}
