//! Error types for BLEU scoring
//!
//! Usage errors are reported immediately. Degenerate inputs such as an empty
//! hypothesis or a complete lack of overlap are not errors; they score 0.

use thiserror::Error;

/// Errors raised by the scoring core
#[derive(Error, Debug)]
pub enum BleuError {
    /// A rational number was constructed with a zero denominator
    #[error("rational number denominator must be positive")]
    ZeroDenominator,

    /// No references were supplied for a hypothesis
    #[error("at least one reference is required")]
    EmptyReferences,

    /// N-gram order outside the valid range
    #[error("invalid n-gram order {0}: orders start at 1")]
    InvalidOrder(usize),

    /// Weight vector with no entries
    #[error("weight vector must not be empty")]
    EmptyWeights,

    /// Negative or non-finite weight
    #[error("invalid weight {value} at index {index}: weights must be finite and non-negative")]
    InvalidWeight {
        /// Position of the offending weight
        index: usize,
        /// The rejected value
        value: f64,
    },

    /// The weights covering the usable orders sum to zero
    #[error("weights for the first {usable} orders sum to zero")]
    UnresolvableWeights {
        /// Number of orders the hypothesis length allows
        usable: usize,
    },

    /// Smoothing parameter out of range
    #[error("invalid smoothing parameter: {0}")]
    InvalidSmoothing(String),

    /// Hypotheses and reference sets of different lengths in a corpus
    #[error("corpus has {hypotheses} hypotheses but {references} reference sets")]
    LengthMismatch {
        /// Number of hypotheses
        hypotheses: usize,
        /// Number of reference sets
        references: usize,
    },

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error while loading configuration
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for scoring operations
pub type Result<T> = std::result::Result<T, BleuError>;
