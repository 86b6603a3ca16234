//! Configuration resolver
//!
//! Defaults, then host settings, then process environment. The resolved
//! `RenderConfig` is immutable and shared by every document of a run.

use crate::processor::FailurePolicy;
use crate::template::{HtmlTemplate, DEFAULT_HTML_WRAPPER};
use mensura_core::{MensuraError, Result};
use mensura_plugin::Settings;
use mensura_units::UnitSystem;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Digits after the decimal point when nothing is configured
pub const DEFAULT_PRECISION: u32 = 2;

/// Host settings keys
pub mod keys {
    pub const UNIT_SYSTEM: &str = "UNIT_SYSTEM";
    pub const UNIT_PRECISION: &str = "UNIT_PRECISION";
    pub const UNIT_HTML_WRAPPER: &str = "UNIT_HTML_WRAPPER";
    pub const UNIT_FAILURE_POLICY: &str = "UNIT_FAILURE_POLICY";

    pub const ALL: [&str; 4] = [UNIT_SYSTEM, UNIT_PRECISION, UNIT_HTML_WRAPPER, UNIT_FAILURE_POLICY];
}

/// Environment variables override settings keys of the same name
pub const ENV_PREFIX: &str = "MENSURA_";

/// Everything the pipeline needs to render annotations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    pub default_system: UnitSystem,
    pub precision: u32,
    pub html_template: HtmlTemplate,
    pub failure_policy: FailurePolicy,
}

impl RenderConfig {
    pub fn with_system(mut self, system: UnitSystem) -> Self {
        self.default_system = system;
        self
    }

    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }

    pub fn with_template(mut self, template: HtmlTemplate) -> Self {
        self.html_template = template;
        self
    }

    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            default_system: UnitSystem::Si,
            precision: DEFAULT_PRECISION,
            html_template: HtmlTemplate::default(),
            failure_policy: FailurePolicy::Keep,
        }
    }
}

/// Seed host settings with the defaults for every key the host left unset
pub fn apply_defaults(settings: &mut Settings) {
    settings.set_default(keys::UNIT_SYSTEM, UnitSystem::Si.identifier());
    settings.set_default(keys::UNIT_PRECISION, DEFAULT_PRECISION);
    settings.set_default(keys::UNIT_HTML_WRAPPER, DEFAULT_HTML_WRAPPER);
    settings.set_default(keys::UNIT_FAILURE_POLICY, FailurePolicy::Keep.identifier());
}

type EnvSource<'a> = Box<dyn Fn(&str) -> Option<String> + 'a>;

/// Layers settings and environment over the defaults
pub struct ConfigResolver<'a> {
    settings: Option<&'a Settings>,
    env: EnvSource<'a>,
}

impl<'a> ConfigResolver<'a> {
    /// Resolver reading the process environment
    pub fn new() -> Self {
        Self { settings: None, env: Box::new(|key| std::env::var(key).ok()) }
    }

    pub fn with_settings(mut self, settings: &'a Settings) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Replace the environment lookup (tests, embedding hosts)
    pub fn with_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + 'a,
    {
        self.env = Box::new(lookup);
        self
    }

    /// Ignore the process environment entirely
    pub fn without_env(self) -> Self {
        self.with_env(|_| None)
    }

    pub fn resolve(&self) -> Result<RenderConfig> {
        let mut config = RenderConfig::default();

        if let Some(settings) = self.settings {
            if let Some(system) = settings.get_str(keys::UNIT_SYSTEM)? {
                config.default_system = system.parse()?;
            }
            if let Some(precision) = settings.get_u32(keys::UNIT_PRECISION)? {
                config.precision = precision;
            }
            if let Some(template) = settings.get_str(keys::UNIT_HTML_WRAPPER)? {
                config.html_template = HtmlTemplate::parse(template)?;
            }
            if let Some(policy) = settings.get_str(keys::UNIT_FAILURE_POLICY)? {
                config.failure_policy = policy.parse()?;
            }
        }

        if let Some(system) = self.env_value(keys::UNIT_SYSTEM) {
            config.default_system = system.parse()?;
        }
        if let Some(precision) = self.env_value(keys::UNIT_PRECISION) {
            config.precision = precision.trim().parse().map_err(|_| {
                MensuraError::Config(format!(
                    "{}{} must be a non-negative integer, found '{}'",
                    ENV_PREFIX,
                    keys::UNIT_PRECISION,
                    precision
                ))
            })?;
        }
        if let Some(template) = self.env_value(keys::UNIT_HTML_WRAPPER) {
            config.html_template = HtmlTemplate::parse(&template)?;
        }
        if let Some(policy) = self.env_value(keys::UNIT_FAILURE_POLICY) {
            config.failure_policy = policy.parse()?;
        }

        info!(
            system = %config.default_system,
            precision = config.precision,
            template = config.html_template.source(),
            policy = %config.failure_policy,
            "resolved unit configuration"
        );
        Ok(config)
    }

    fn env_value(&self, key: &str) -> Option<String> {
        (self.env)(&format!("{}{}", ENV_PREFIX, key))
    }
}

impl Default for ConfigResolver<'_> {
    fn default() -> Self {
        Self::new()
    }
}
