//! Configuration module

use crate::error::CliError;
use crate::output::OutputFormat;
use anyhow::{Context, Result};
use bleurs_core::ScorerConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Largest number of decimals printed for a score
pub const MAX_PRECISION: usize = 17;

/// CLI configuration structure
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,

    /// Performance configuration
    #[serde(default)]
    pub performance: PerformanceConfig,

    /// Scoring configuration
    #[serde(default)]
    pub scoring: ScorerConfig,
}

/// Output-related configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Default output format
    pub default_format: OutputFormat,

    /// Pretty print JSON output
    pub pretty_json: bool,

    /// Decimals printed for scores in text and markdown output
    pub precision: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_format: OutputFormat::Text,
            pretty_json: true,
            precision: 4,
        }
    }
}

/// Performance-related configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct PerformanceConfig {
    /// Minimum number of sentence pairs before corpus scoring goes parallel
    pub parallel_threshold: usize,

    /// Number of worker threads (0 = auto)
    pub worker_threads: usize,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            parallel_threshold: 1_000,
            worker_threads: 0,
        }
    }
}

impl PerformanceConfig {
    /// Worker threads to use, resolving 0 to the number of CPUs
    pub fn effective_threads(&self) -> usize {
        if self.worker_threads == 0 {
            num_cpus::get()
        } else {
            self.worker_threads
        }
    }
}

impl CliConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: CliConfig =
            toml::from_str(content).map_err(|e| CliError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Check every section
    pub fn validate(&self) -> Result<()> {
        self.scoring.validate()?;

        if self.output.precision > MAX_PRECISION {
            return Err(CliError::ConfigError(format!(
                "output.precision must be at most {MAX_PRECISION}, got {}",
                self.output.precision
            ))
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bleurs_core::{Smoothing, TokenizerKind};

    #[test]
    fn test_defaults() {
        let config = CliConfig::default();
        assert_eq!(config.output.default_format, OutputFormat::Text);
        assert_eq!(config.output.precision, 4);
        assert_eq!(config.performance.worker_threads, 0);
        assert!(config.performance.effective_threads() >= 1);
        assert_eq!(config.scoring, ScorerConfig::default());
    }

    #[test]
    fn test_partial_sections() {
        let config = CliConfig::from_toml_str(
            r#"
            [output]
            default_format = "json"

            [scoring]
            tokenizer = "whitespace"

            [scoring.smoothing]
            method = "exponential"
            "#,
        )
        .unwrap();

        assert_eq!(config.output.default_format, OutputFormat::Json);
        assert!(config.output.pretty_json);
        assert_eq!(config.scoring.tokenizer, TokenizerKind::Whitespace);
        assert_eq!(config.scoring.smoothing, Smoothing::Exponential);
        assert_eq!(config.performance, PerformanceConfig::default());
    }

    #[test]
    fn test_invalid_values() {
        assert!(CliConfig::from_toml_str("[output]\nprecision = 40").is_err());
        assert!(CliConfig::from_toml_str("[scoring]\nweights = []").is_err());
        assert!(CliConfig::from_toml_str("[processing]\nlanguage = \"en\"").is_err());
    }

    #[test]
    fn test_explicit_threads() {
        let performance = PerformanceConfig {
            worker_threads: 3,
            ..PerformanceConfig::default()
        };
        assert_eq!(performance.effective_threads(), 3);
    }
}
