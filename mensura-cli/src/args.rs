//! Command-line arguments

use clap::Parser;
use mensura::{keys, FailurePolicy, UnitSystem};
use mensura_plugin::Settings;
use std::path::PathBuf;

/// Convert inline {unit: ...} annotations in documents
#[derive(Debug, Parser)]
#[command(name = "mensura")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Convert inline {unit: ...} annotations to another unit system")]
pub struct Cli {
    /// JSON settings file (UNIT_SYSTEM, UNIT_PRECISION, UNIT_HTML_WRAPPER, UNIT_FAILURE_POLICY)
    #[arg(short, long, value_name = "FILE")]
    pub settings: Option<PathBuf>,

    /// Write results under this directory, mirroring the input layout
    #[arg(short, long, value_name = "DIR")]
    pub out: Option<PathBuf>,

    /// Unit system for annotations without explicit targets (SI, cgs, US, imperial)
    #[arg(long)]
    pub system: Option<UnitSystem>,

    /// Digits after the decimal point
    #[arg(short, long)]
    pub precision: Option<u32>,

    /// What to do with annotations that fail to convert (abort, keep, mark)
    #[arg(long)]
    pub policy: Option<FailurePolicy>,

    /// Files or directories to process; reads stdin when empty
    pub paths: Vec<PathBuf>,
}

impl Cli {
    /// Layer command-line flags over the settings file
    pub fn apply_overrides(&self, settings: &mut Settings) {
        if let Some(system) = self.system {
            settings.set(keys::UNIT_SYSTEM, system.identifier());
        }
        if let Some(precision) = self.precision {
            settings.set(keys::UNIT_PRECISION, precision);
        }
        if let Some(policy) = self.policy {
            settings.set(keys::UNIT_FAILURE_POLICY, policy.identifier());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        let cli = Cli::try_parse_from(["mensura", "--system", "us", "-p", "3", "--policy", "mark", "docs"]).unwrap();
        assert_eq!(cli.system, Some(UnitSystem::Us));
        assert_eq!(cli.precision, Some(3));
        assert_eq!(cli.policy, Some(FailurePolicy::Mark));
        assert_eq!(cli.paths, vec![PathBuf::from("docs")]);
    }

    #[test]
    fn test_rejects_unknown_system() {
        assert!(Cli::try_parse_from(["mensura", "--system", "martian"]).is_err());
    }

    #[test]
    fn test_overrides_win_over_settings() {
        let cli = Cli::try_parse_from(["mensura", "--precision", "0"]).unwrap();
        let mut settings = Settings::new().with(keys::UNIT_PRECISION, 4).with(keys::UNIT_SYSTEM, "cgs");
        cli.apply_overrides(&mut settings);
        assert_eq!(settings.get_u32(keys::UNIT_PRECISION).unwrap(), Some(0));
        assert_eq!(settings.get_str(keys::UNIT_SYSTEM).unwrap(), Some("cgs"));
    }
}
