//! Scorer configuration

use crate::error::{BleuError, Result};
use crate::smoothing::Smoothing;
use crate::tokenizer::TokenizerKind;
use crate::weights::{Weights, DEFAULT_MAX_ORDER};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings shared by every score a [`crate::BleuScorer`] produces
///
/// Loaded from TOML such as:
///
/// ```toml
/// max_order = 4
/// tokenizer = "simple"
///
/// [smoothing]
/// method = "epsilon"
/// epsilon = 0.1
/// ```
///
/// When `weights` is set it also fixes the maximum order and `max_order`
/// must agree with its length or be left at the default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScorerConfig {
    /// Highest n-gram order scored with uniform weights
    pub max_order: usize,
    /// Tokenizer used for raw text
    pub tokenizer: TokenizerKind,
    /// Explicit per-order weights
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weights: Option<Weights>,
    /// Smoothing strategy
    pub smoothing: Smoothing,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            max_order: DEFAULT_MAX_ORDER,
            tokenizer: TokenizerKind::default(),
            weights: None,
            smoothing: Smoothing::default(),
        }
    }
}

impl ScorerConfig {
    /// Create a builder
    pub fn builder() -> ScorerConfigBuilder {
        ScorerConfigBuilder::default()
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ScorerConfig = toml::from_str(content)
            .map_err(|e| BleuError::Config(format!("failed to parse scorer config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        log::debug!("loaded scorer config from {}", path.as_ref().display());
        Self::from_toml_str(&content)
    }

    /// Check that all settings are usable together
    pub fn validate(&self) -> Result<()> {
        if self.max_order == 0 {
            return Err(BleuError::InvalidOrder(0));
        }

        if let Some(weights) = &self.weights {
            if self.max_order != DEFAULT_MAX_ORDER && self.max_order != weights.max_order() {
                return Err(BleuError::Config(format!(
                    "max_order {} disagrees with {} weights",
                    self.max_order,
                    weights.max_order()
                )));
            }
        }

        self.smoothing.validate()
    }

    /// Weights applied to every score
    pub fn effective_weights(&self) -> Result<Weights> {
        match &self.weights {
            Some(weights) => Ok(weights.clone()),
            None => Weights::equal(self.max_order),
        }
    }
}

/// Builder for [`ScorerConfig`]
#[derive(Debug, Default)]
pub struct ScorerConfigBuilder {
    config: ScorerConfig,
}

impl ScorerConfigBuilder {
    /// Set the maximum order for uniform weights
    pub fn max_order(mut self, max_order: usize) -> Self {
        self.config.max_order = max_order;
        self
    }

    /// Set explicit weights
    pub fn weights(mut self, weights: Weights) -> Self {
        self.config.max_order = weights.max_order();
        self.config.weights = Some(weights);
        self
    }

    /// Set the smoothing strategy
    pub fn smoothing(mut self, smoothing: Smoothing) -> Self {
        self.config.smoothing = smoothing;
        self
    }

    /// Set the tokenizer
    pub fn tokenizer(mut self, tokenizer: TokenizerKind) -> Self {
        self.config.tokenizer = tokenizer;
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<ScorerConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = ScorerConfig::default();
        assert_eq!(config.max_order, 4);
        assert_eq!(config.smoothing, Smoothing::None);
        assert_eq!(config.tokenizer, TokenizerKind::Simple);
        assert_eq!(config.effective_weights().unwrap(), Weights::equal(4).unwrap());
    }

    #[test]
    fn test_from_toml() {
        let config = ScorerConfig::from_toml_str(
            r#"
            tokenizer = "whitespace"
            weights = [0.5, 0.5]

            [smoothing]
            method = "method4"
            "#,
        )
        .unwrap();

        assert_eq!(config.tokenizer, TokenizerKind::Whitespace);
        assert_eq!(config.smoothing, Smoothing::length_scaled());
        assert_eq!(config.effective_weights().unwrap().max_order(), 2);
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(ScorerConfig::from_toml_str("").unwrap(), ScorerConfig::default());
    }

    #[test]
    fn test_invalid_toml_rejected() {
        assert!(matches!(
            ScorerConfig::from_toml_str("max_order = 0"),
            Err(BleuError::InvalidOrder(0))
        ));
        assert!(matches!(
            ScorerConfig::from_toml_str("weights = [-0.5, 1.5]"),
            Err(BleuError::Config(_))
        ));
        assert!(matches!(
            ScorerConfig::from_toml_str("unknown_key = 1"),
            Err(BleuError::Config(_))
        ));
        assert!(matches!(
            ScorerConfig::from_toml_str("max_order = 3\nweights = [0.5, 0.5]"),
            Err(BleuError::Config(_))
        ));
        assert!(matches!(
            ScorerConfig::from_toml_str("[smoothing]\nmethod = \"epsilon\"\nepsilon = 0.0"),
            Err(BleuError::InvalidSmoothing(_))
        ));
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "max_order = 2").unwrap();
        let config = ScorerConfig::from_file(file.path()).unwrap();
        assert_eq!(config.max_order, 2);

        assert!(matches!(
            ScorerConfig::from_file("/nonexistent/bleurs.toml"),
            Err(BleuError::Io(_))
        ));
    }

    #[test]
    fn test_builder() {
        let config = ScorerConfig::builder()
            .weights(Weights::new([0.7, 0.3]).unwrap())
            .smoothing(Smoothing::Exponential)
            .build()
            .unwrap();
        assert_eq!(config.max_order, 2);
        assert_eq!(config.smoothing, Smoothing::Exponential);

        assert!(ScorerConfig::builder().max_order(0).build().is_err());
    }

    #[test]
    fn test_round_trip_through_toml() {
        let config = ScorerConfig::builder()
            .smoothing(Smoothing::Epsilon { epsilon: 0.25 })
            .build()
            .unwrap();
        let text = toml::to_string(&config).unwrap();
        assert_eq!(ScorerConfig::from_toml_str(&text).unwrap(), config);
    }
}
