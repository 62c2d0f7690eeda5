//! Configuration module

use crate::error::CliError;
use anyhow::{Context, Result};
use scriptprops_core::config::defaults;
use scriptprops_core::InferenceThresholds;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// CLI configuration structure
#[derive(Debug, Deserialize, Serialize, Default, PartialEq)]
pub struct CliConfig {
    /// Quotation inference thresholds
    #[serde(default)]
    pub thresholds: InferenceThresholds,

    /// Analysis configuration
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

/// Analysis-related configuration
#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Line count above which analysis runs in parallel
    pub parallel_threshold_lines: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            parallel_threshold_lines: defaults::PARALLEL_THRESHOLD_LINES,
        }
    }
}

impl CliConfig {
    /// Parse a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: CliConfig =
            toml::from_str(source).map_err(|e| CliError::ConfigError(e.to_string()))?;
        config.thresholds.validate()?;
        Ok(config)
    }

    /// Load a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml_str(&source)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }
}
