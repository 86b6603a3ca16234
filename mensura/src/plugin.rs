//! Units plugin - hooks the document processor into the content pipeline

use crate::capability::ensure_capabilities;
use crate::config::{keys, ConfigResolver, RenderConfig};
use crate::processor::DocumentProcessor;
use mensura_core::Result;
use mensura_plugin::{Content, ContentPlugin, PluginMeta, Settings};
use std::borrow::Cow;
use tracing::debug;

/// Converts `{unit: ...}` annotations in articles and pages
#[derive(Debug, Clone)]
pub struct UnitsPlugin {
    processor: DocumentProcessor,
    config: RenderConfig,
}

impl UnitsPlugin {
    /// Resolve configuration from host settings and the environment, then
    /// verify the backend before any content is touched
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let config = ConfigResolver::new().with_settings(settings).resolve()?;
        Self::with_processor(DocumentProcessor::default(), config)
    }

    pub fn with_processor(processor: DocumentProcessor, config: RenderConfig) -> Result<Self> {
        ensure_capabilities(processor.backend(), processor.inflector(), &config)?;
        Ok(Self { processor, config })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }
}

impl ContentPlugin for UnitsPlugin {
    fn meta(&self) -> PluginMeta {
        PluginMeta {
            name: "units",
            description: "Convert inline {unit: ...} annotations to another unit system",
            settings: &keys::ALL,
        }
    }

    fn process(&self, content: &mut Content) -> Result<()> {
        let processed = self.processor.process(&content.body, &self.config)?;
        debug!(
            path = %content.path.display(),
            converted = processed.converted,
            failed = processed.failures.len(),
            "processed content"
        );

        if let Cow::Owned(text) = processed.text {
            content.body = text;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FailurePolicy;
    use mensura_plugin::{ContentKind, PluginRegistry};

    fn plugin(settings: Settings) -> UnitsPlugin {
        let config = ConfigResolver::new().with_settings(&settings).without_env().resolve().unwrap();
        UnitsPlugin::with_processor(DocumentProcessor::default(), config).unwrap()
    }

    #[test]
    fn test_rewrites_articles() {
        let registry = PluginRegistry::new().with_plugin(plugin(Settings::new()));
        let mut content = Content::article("post.md", "A {unit: 10 ft}.");
        registry.run(&mut content).unwrap();
        assert_eq!(content.body, "A 10 feet (<em>3.05 meters</em>).");
    }

    #[test]
    fn test_static_untouched() {
        let registry = PluginRegistry::new().with_plugin(plugin(Settings::new()));
        let mut content = Content::new("raw.bin", ContentKind::Static, "{unit: 10 ft}");
        registry.run(&mut content).unwrap();
        assert_eq!(content.body, "{unit: 10 ft}");
    }

    #[test]
    fn test_settings_reach_processor() {
        let settings = Settings::new()
            .with(keys::UNIT_SYSTEM, "US")
            .with(keys::UNIT_PRECISION, 0)
            .with(keys::UNIT_FAILURE_POLICY, "abort");
        let plugin = plugin(settings);
        assert_eq!(plugin.config().failure_policy, FailurePolicy::Abort);

        let mut content = Content::article("page.html", "{unit: 2 m}");
        plugin.process(&mut content).unwrap();
        assert_eq!(content.body, "2 meters (<em>7 feet</em>)");

        let mut bad = Content::article("bad.md", "{unit: 2 zz}");
        assert!(plugin.process(&mut bad).is_err());
        assert_eq!(bad.body, "{unit: 2 zz}");
    }

    #[test]
    fn test_from_settings_rejects_bad_config() {
        let settings = Settings::new().with(keys::UNIT_HTML_WRAPPER, "{oops}");
        assert!(UnitsPlugin::from_settings(&settings).is_err());
    }
}
