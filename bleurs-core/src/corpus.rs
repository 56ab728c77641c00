//! Corpus-level BLEU from accumulated sufficient statistics
//!
//! Each sentence pair contributes clipped match counts, window totals and
//! lengths. These statistics form a monoid under element-wise addition, so
//! they can be accumulated in any grouping:
//! - Identity: `CorpusStats::identity()` contributes nothing
//! - Associativity: `(a + b) + c == a + (b + c)` because all fields are sums
//!
//! The parallel reduction therefore yields exactly the sequential result.

use crate::brevity::closest_ref_length;
use crate::error::{BleuError, Result};
use crate::precision::modified_precisions;
use crate::rational::RationalNumber;
use crate::score::{aggregate, BleuScore};
use crate::smoothing::SmoothingFunction;
use crate::weights::{Weights, DEFAULT_MAX_ORDER};
use serde::Serialize;
use smallvec::SmallVec;
use std::hash::Hash;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Summed n-gram statistics for a set of sentence pairs
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct CorpusStats {
    /// Clipped matches per order, starting at 1
    matches: SmallVec<[u64; 4]>,
    /// Hypothesis windows per order, starting at 1
    totals: SmallVec<[u64; 4]>,
    hypothesis_length: usize,
    reference_length: usize,
    sentences: usize,
}

impl CorpusStats {
    /// Statistics of an empty corpus
    pub fn identity() -> Self {
        Self::default()
    }

    /// Statistics of a single sentence pair
    pub fn from_pair<T, R>(references: &[R], hypothesis: &[T], max_order: usize) -> Result<Self>
    where
        T: Eq + Hash,
        R: AsRef<[T]>,
    {
        let reference_length = closest_ref_length::<T, R>(references, hypothesis.len())?;
        let precisions = modified_precisions(references, hypothesis, max_order)?;

        Ok(Self {
            matches: precisions.iter().map(RationalNumber::numerator).collect(),
            totals: precisions.iter().map(RationalNumber::denominator).collect(),
            hypothesis_length: hypothesis.len(),
            reference_length,
            sentences: 1,
        })
    }

    /// Element-wise sum of two statistics
    pub fn combine(&self, other: &Self) -> Self {
        let orders = self.totals.len().max(other.totals.len());
        let at = |values: &SmallVec<[u64; 4]>, i: usize| values.get(i).copied().unwrap_or(0);

        Self {
            matches: (0..orders)
                .map(|i| at(&self.matches, i) + at(&other.matches, i))
                .collect(),
            totals: (0..orders)
                .map(|i| at(&self.totals, i) + at(&other.totals, i))
                .collect(),
            hypothesis_length: self.hypothesis_length + other.hypothesis_length,
            reference_length: self.reference_length + other.reference_length,
            sentences: self.sentences + other.sentences,
        }
    }

    /// Number of sentence pairs accumulated
    pub fn sentences(&self) -> usize {
        self.sentences
    }

    /// Total hypothesis tokens
    pub fn hypothesis_length(&self) -> usize {
        self.hypothesis_length
    }

    /// Total closest-reference tokens
    pub fn reference_length(&self) -> usize {
        self.reference_length
    }

    /// Corpus precision per achievable order
    pub fn precisions(&self) -> Result<Vec<RationalNumber>> {
        self.matches
            .iter()
            .zip(&self.totals)
            .take_while(|&(_, &total)| total > 0)
            .map(|(&matches, &total)| RationalNumber::new(matches, total))
            .collect()
    }

    /// Corpus BLEU from these statistics
    pub fn score<S>(&self, weights: Option<&Weights>, smoothing: &S) -> Result<BleuScore>
    where
        S: SmoothingFunction + ?Sized,
    {
        let precisions = self.precisions()?;
        aggregate(
            &precisions,
            self.hypothesis_length,
            self.reference_length,
            weights,
            smoothing,
        )
    }
}

pub(crate) fn check_lengths(reference_sets: usize, hypotheses: usize) -> Result<()> {
    if reference_sets != hypotheses {
        return Err(BleuError::LengthMismatch {
            hypotheses,
            references: reference_sets,
        });
    }
    Ok(())
}

/// Accumulate statistics over aligned reference sets and hypotheses
pub fn corpus_stats<T, R, RS, H>(
    reference_sets: &[RS],
    hypotheses: &[H],
    max_order: usize,
) -> Result<CorpusStats>
where
    T: Eq + Hash,
    R: AsRef<[T]>,
    RS: AsRef<[R]>,
    H: AsRef<[T]>,
{
    check_lengths(reference_sets.len(), hypotheses.len())?;

    reference_sets
        .iter()
        .zip(hypotheses)
        .try_fold(CorpusStats::identity(), |acc, (references, hypothesis)| {
            let pair = CorpusStats::from_pair(references.as_ref(), hypothesis.as_ref(), max_order)?;
            Ok(acc.combine(&pair))
        })
}

/// Parallel [`corpus_stats`]; each pair is counted on a rayon worker
#[cfg(feature = "parallel")]
pub fn corpus_stats_parallel<T, R, RS, H>(
    reference_sets: &[RS],
    hypotheses: &[H],
    max_order: usize,
) -> Result<CorpusStats>
where
    T: Eq + Hash + Sync,
    R: AsRef<[T]> + Sync,
    RS: AsRef<[R]> + Sync,
    H: AsRef<[T]> + Sync,
{
    check_lengths(reference_sets.len(), hypotheses.len())?;

    reference_sets
        .par_iter()
        .zip(hypotheses.par_iter())
        .map(|(references, hypothesis)| {
            CorpusStats::from_pair(references.as_ref(), hypothesis.as_ref(), max_order)
        })
        .try_reduce(CorpusStats::identity, |a, b| Ok(a.combine(&b)))
}

/// Corpus BLEU over aligned reference sets and hypotheses
///
/// Match counts, window totals and lengths are summed over all pairs before
/// precisions, smoothing and the brevity penalty are applied once.
pub fn corpus_bleu<T, R, RS, H, S>(
    reference_sets: &[RS],
    hypotheses: &[H],
    weights: Option<&Weights>,
    smoothing: &S,
) -> Result<BleuScore>
where
    T: Eq + Hash,
    R: AsRef<[T]>,
    RS: AsRef<[R]>,
    H: AsRef<[T]>,
    S: SmoothingFunction + ?Sized,
{
    let max_order = weights.map_or(DEFAULT_MAX_ORDER, Weights::max_order);
    corpus_stats(reference_sets, hypotheses, max_order)?.score(weights, smoothing)
}

/// Parallel [`corpus_bleu`]
#[cfg(feature = "parallel")]
pub fn corpus_bleu_parallel<T, R, RS, H, S>(
    reference_sets: &[RS],
    hypotheses: &[H],
    weights: Option<&Weights>,
    smoothing: &S,
) -> Result<BleuScore>
where
    T: Eq + Hash + Sync,
    R: AsRef<[T]> + Sync,
    RS: AsRef<[R]> + Sync,
    H: AsRef<[T]> + Sync,
    S: SmoothingFunction + ?Sized,
{
    let max_order = weights.map_or(DEFAULT_MAX_ORDER, Weights::max_order);
    corpus_stats_parallel(reference_sets, hypotheses, max_order)?.score(weights, smoothing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::sentence_bleu;
    use crate::smoothing::Smoothing;

    fn words(text: &str) -> Vec<&str> {
        text.split(' ').collect()
    }

    fn sample() -> (Vec<Vec<Vec<&'static str>>>, Vec<Vec<&'static str>>) {
        let reference_sets = vec![
            vec![
                words("It is a guide to action that ensures that the military will forever heed Party commands"),
                words("It is the practical guide for the army always to heed the directions of the party"),
            ],
            vec![words("he was interested in world history because he read the book")],
            vec![words("John loves Mary")],
        ];
        let hypotheses = vec![
            words("It is a guide to action which ensures that the military always obeys the commands of the party"),
            words("he read the book because he was interested in world history"),
            words("John loves"),
        ];
        (reference_sets, hypotheses)
    }

    #[test]
    fn test_identity_and_associativity() {
        let (reference_sets, hypotheses) = sample();
        let stats: Vec<CorpusStats> = reference_sets
            .iter()
            .zip(&hypotheses)
            .map(|(r, h)| CorpusStats::from_pair(r, h, 4).unwrap())
            .collect();

        let identity = CorpusStats::identity();
        assert_eq!(stats[0].combine(&identity), stats[0]);
        assert_eq!(identity.combine(&stats[0]), stats[0]);

        let left = stats[0].combine(&stats[1]).combine(&stats[2]);
        let right = stats[0].combine(&stats[1].combine(&stats[2]));
        assert_eq!(left, right);
        assert_eq!(left.sentences(), 3);
    }

    #[test]
    fn test_single_pair_matches_sentence_score() {
        let (reference_sets, hypotheses) = sample();
        for (references, hypothesis) in reference_sets.iter().zip(&hypotheses) {
            let sentence = sentence_bleu(references, hypothesis, None, &Smoothing::None).unwrap();
            let corpus = corpus_bleu(
                std::slice::from_ref(references),
                std::slice::from_ref(hypothesis),
                None,
                &Smoothing::None,
            )
            .unwrap();
            assert!((sentence - corpus.score).abs() < 1e-12);
        }
    }

    #[test]
    fn test_short_hypotheses_only_add_reachable_orders() {
        let (reference_sets, hypotheses) = sample();
        let stats = corpus_stats(&reference_sets, &hypotheses, 4).unwrap();
        let precisions = stats.precisions().unwrap();

        // "John loves" contributes two unigrams and one bigram only
        assert_eq!(precisions.len(), 4);
        assert_eq!(precisions[0].denominator(), 18 + 11 + 2);
        assert_eq!(precisions[1].denominator(), 17 + 10 + 1);
        assert_eq!(precisions[3].denominator(), 15 + 8);
        assert_eq!(stats.hypothesis_length(), 31);
    }

    #[test]
    fn test_corpus_score_in_range() {
        let (reference_sets, hypotheses) = sample();
        let score = corpus_bleu(&reference_sets, &hypotheses, None, &Smoothing::None).unwrap();
        assert!(score.score > 0.0 && score.score < 1.0);
        assert_eq!(score.max_order(), 4);
    }

    #[test]
    fn test_length_mismatch() {
        let (reference_sets, mut hypotheses) = sample();
        hypotheses.pop();
        assert!(matches!(
            corpus_bleu(&reference_sets, &hypotheses, None, &Smoothing::None),
            Err(BleuError::LengthMismatch {
                hypotheses: 2,
                references: 3
            })
        ));
    }

    #[test]
    fn test_empty_reference_set_in_corpus() {
        let reference_sets: Vec<Vec<Vec<&str>>> = vec![vec![]];
        let hypotheses = vec![words("a b")];
        assert!(matches!(
            corpus_bleu(&reference_sets, &hypotheses, None, &Smoothing::None),
            Err(BleuError::EmptyReferences)
        ));
    }

    #[test]
    fn test_empty_corpus_scores_zero() {
        let reference_sets: Vec<Vec<Vec<&str>>> = Vec::new();
        let hypotheses: Vec<Vec<&str>> = Vec::new();
        let score = corpus_bleu(&reference_sets, &hypotheses, None, &Smoothing::None).unwrap();
        assert_eq!(score.score, 0.0);
        assert_eq!(score.hypothesis_length, 0);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential() {
        let (reference_sets, hypotheses) = sample();
        let sequential = corpus_stats(&reference_sets, &hypotheses, 4).unwrap();
        let parallel = corpus_stats_parallel(&reference_sets, &hypotheses, 4).unwrap();
        assert_eq!(sequential, parallel);

        let smoothing = Smoothing::length_scaled();
        let a = corpus_bleu(&reference_sets, &hypotheses, None, &smoothing).unwrap();
        let b = corpus_bleu_parallel(&reference_sets, &hypotheses, None, &smoothing).unwrap();
        assert_eq!(a, b);
    }
}
