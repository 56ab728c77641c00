//! Text-level scoring facade

use crate::config::ScorerConfig;
use crate::corpus::{check_lengths, CorpusStats};
use crate::error::Result;
use crate::score::{sentence_bleu_detailed, BleuScore};
use crate::tokenizer::Tokenizer;
use crate::weights::Weights;
use std::fmt;
use std::hash::Hash;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Scores raw text with a fixed configuration
///
/// The tokenizer is chosen by [`ScorerConfig::tokenizer`] and can be replaced
/// with any [`Tokenizer`] through [`BleuScorer::with_tokenizer`].
///
/// ```
/// use bleurs_core::BleuScorer;
///
/// let scorer = BleuScorer::new();
/// let score = scorer
///     .score_text(&["John loves Mary ."], "John loves Mary .")
///     .unwrap();
/// assert_eq!(score.score, 1.0);
/// ```
pub struct BleuScorer {
    config: ScorerConfig,
    weights: Weights,
    tokenizer: Box<dyn Tokenizer>,
}

impl fmt::Debug for BleuScorer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BleuScorer")
            .field("config", &self.config)
            .field("tokenizer", &self.tokenizer.name())
            .finish()
    }
}

impl Default for BleuScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl BleuScorer {
    /// Scorer with the default configuration
    pub fn new() -> Self {
        let config = ScorerConfig::default();
        Self {
            weights: Weights::default(),
            tokenizer: config.tokenizer.build(),
            config,
        }
    }

    /// Scorer with a validated configuration
    pub fn with_config(config: ScorerConfig) -> Result<Self> {
        config.validate()?;
        let weights = config.effective_weights()?;
        log::debug!(
            "scorer: {} orders, smoothing {}, tokenizer {}",
            weights.max_order(),
            config.smoothing,
            config.tokenizer
        );

        Ok(Self {
            weights,
            tokenizer: config.tokenizer.build(),
            config,
        })
    }

    /// Replace the tokenizer
    pub fn with_tokenizer(mut self, tokenizer: Box<dyn Tokenizer>) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    /// Active configuration
    pub fn config(&self) -> &ScorerConfig {
        &self.config
    }

    /// Weights applied to every score
    pub fn weights(&self) -> &Weights {
        &self.weights
    }

    /// Tokenize text with the configured tokenizer
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        self.tokenizer.tokenize(text)
    }

    /// Score pre-tokenized input
    pub fn score_tokens<T, R>(&self, references: &[R], hypothesis: &[T]) -> Result<BleuScore>
    where
        T: Eq + Hash,
        R: AsRef<[T]>,
    {
        sentence_bleu_detailed(
            references,
            hypothesis,
            Some(&self.weights),
            &self.config.smoothing,
        )
    }

    /// Tokenize and score one hypothesis against its references
    pub fn score_text<S: AsRef<str>>(&self, references: &[S], hypothesis: &str) -> Result<BleuScore> {
        let references = self.tokenize_all(references);
        let hypothesis = self.tokenize(hypothesis);
        self.score_tokens(&references, &hypothesis)
    }

    /// Sufficient statistics of one text pair, for corpus accumulation
    pub fn pair_stats<S: AsRef<str>>(&self, references: &[S], hypothesis: &str) -> Result<CorpusStats> {
        let references = self.tokenize_all(references);
        let hypothesis = self.tokenize(hypothesis);
        CorpusStats::from_pair(&references, &hypothesis, self.weights.max_order())
    }

    /// Corpus score from accumulated statistics
    pub fn score_stats(&self, stats: &CorpusStats) -> Result<BleuScore> {
        stats.score(Some(&self.weights), &self.config.smoothing)
    }

    /// Corpus score of line-aligned text
    pub fn score_corpus<RS, S>(&self, reference_sets: &[RS], hypotheses: &[S]) -> Result<BleuScore>
    where
        RS: AsRef<[S]>,
        S: AsRef<str>,
    {
        check_lengths(reference_sets.len(), hypotheses.len())?;
        let stats = reference_sets.iter().zip(hypotheses).try_fold(
            CorpusStats::identity(),
            |acc, (references, hypothesis)| -> Result<CorpusStats> {
                let pair = self.pair_stats(references.as_ref(), hypothesis.as_ref())?;
                Ok(acc.combine(&pair))
            },
        )?;
        self.score_stats(&stats)
    }

    /// Parallel [`BleuScorer::score_corpus`]
    #[cfg(feature = "parallel")]
    pub fn score_corpus_parallel<RS, S>(
        &self,
        reference_sets: &[RS],
        hypotheses: &[S],
    ) -> Result<BleuScore>
    where
        RS: AsRef<[S]> + Sync,
        S: AsRef<str> + Sync,
    {
        check_lengths(reference_sets.len(), hypotheses.len())?;
        let stats = reference_sets
            .par_iter()
            .zip(hypotheses.par_iter())
            .map(|(references, hypothesis)| {
                self.pair_stats(references.as_ref(), hypothesis.as_ref())
            })
            .try_reduce(CorpusStats::identity, |a, b| Ok(a.combine(&b)))?;
        self.score_stats(&stats)
    }

    fn tokenize_all<S: AsRef<str>>(&self, texts: &[S]) -> Vec<Vec<String>> {
        texts.iter().map(|text| self.tokenize(text.as_ref())).collect()
    }
}
