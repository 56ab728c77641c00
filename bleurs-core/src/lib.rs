//! Exact-precision BLEU scoring
//!
//! This crate scores a candidate token sequence (the *hypothesis*) against one
//! or more reference sequences using clipped n-gram precision. Precisions are
//! kept as exact, unreduced fractions until the final geometric mean, so the
//! intermediate values are reproducible and comparable without rounding.
//!
//! # Architecture
//!
//! Leaf components first:
//! - **rational**: exact fraction value type
//! - **ngram** / **precision**: clipped n-gram counts and modified precision
//! - **brevity**: closest reference length and the brevity penalty
//! - **smoothing** / **weights**: zero-count strategies and per-order weights
//! - **score**: sentence-level aggregation
//! - **corpus**: associative sufficient statistics for corpus-level scores
//! - **tokenizer** / **config** / **scorer**: text-level facade
//!
//! # Example
//!
//! ```rust
//! use bleurs_core::{sentence_bleu, Smoothing};
//!
//! let reference: Vec<&str> = "he was interested in world history because he read the book"
//!     .split(' ')
//!     .collect();
//! let hypothesis: Vec<&str> = "he read the book because he was interested in world history"
//!     .split(' ')
//!     .collect();
//!
//! let score = sentence_bleu(&[reference], &hypothesis, None, &Smoothing::None).unwrap();
//! assert!((score - 0.74009).abs() < 1e-4);
//! ```

#![warn(missing_docs)]

pub mod brevity;
pub mod config;
pub mod corpus;
pub mod error;
pub mod ngram;
pub mod precision;
pub mod rational;
pub mod score;
pub mod scorer;
pub mod smoothing;
pub mod tokenizer;
pub mod weights;

// Re-export key types
pub use brevity::{brevity_penalty, closest_ref_length};
pub use config::{ScorerConfig, ScorerConfigBuilder};
pub use corpus::{corpus_bleu, corpus_stats, CorpusStats};
pub use error::{BleuError, Result};
pub use precision::{modified_precision, modified_precisions};
pub use rational::RationalNumber;
pub use score::{sentence_bleu, sentence_bleu_detailed, BleuScore};
pub use scorer::BleuScorer;
pub use smoothing::{Smoothing, SmoothingFunction};
pub use tokenizer::{SimpleWordTokenizer, Tokenizer, TokenizerKind, WhitespaceTokenizer};
pub use weights::{Weights, DEFAULT_MAX_ORDER};

#[cfg(feature = "parallel")]
pub use corpus::{corpus_bleu_parallel, corpus_stats_parallel};
