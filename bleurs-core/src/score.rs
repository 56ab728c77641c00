//! Sentence-level BLEU aggregation

use crate::brevity::{brevity_penalty, closest_ref_length};
use crate::error::{BleuError, Result};
use crate::precision::modified_precisions;
use crate::rational::RationalNumber;
use crate::smoothing::SmoothingFunction;
use crate::weights::{Weights, DEFAULT_MAX_ORDER};
use serde::Serialize;
use std::hash::Hash;

/// Score together with the quantities it was computed from
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BleuScore {
    /// Final score in [0, 1]
    pub score: f64,
    /// Exact modified precision of each scored order, starting at 1
    pub precisions: Vec<RationalNumber>,
    /// Precisions after smoothing (empty when scoring stopped early)
    pub smoothed: Vec<f64>,
    /// Weights applied, renormalised over the scored orders
    pub weights: Vec<f64>,
    /// Brevity penalty
    pub brevity_penalty: f64,
    /// Hypothesis length in tokens
    pub hypothesis_length: usize,
    /// Closest reference length in tokens
    pub reference_length: usize,
}

impl BleuScore {
    /// Highest order that contributed to the score
    pub fn max_order(&self) -> usize {
        self.precisions.len()
    }
}

/// Sentence BLEU of `hypothesis` against `references`
///
/// Scores orders `1..=N` with `N = min(weights.len(), hypothesis.len())`,
/// or `min(4, hypothesis.len())` with uniform weights when `weights` is
/// `None`.
pub fn sentence_bleu<T, R, S>(
    references: &[R],
    hypothesis: &[T],
    weights: Option<&Weights>,
    smoothing: &S,
) -> Result<f64>
where
    T: Eq + Hash,
    R: AsRef<[T]>,
    S: SmoothingFunction + ?Sized,
{
    sentence_bleu_detailed(references, hypothesis, weights, smoothing).map(|s| s.score)
}

/// Sentence BLEU with its intermediate values
pub fn sentence_bleu_detailed<T, R, S>(
    references: &[R],
    hypothesis: &[T],
    weights: Option<&Weights>,
    smoothing: &S,
) -> Result<BleuScore>
where
    T: Eq + Hash,
    R: AsRef<[T]>,
    S: SmoothingFunction + ?Sized,
{
    let hyp_len = hypothesis.len();
    let ref_len = closest_ref_length::<T, R>(references, hyp_len)?;
    let max_order = weights.map_or(DEFAULT_MAX_ORDER, Weights::max_order);
    let precisions = modified_precisions(references, hypothesis, max_order)?;

    aggregate(&precisions, hyp_len, ref_len, weights, smoothing)
}

/// Combine precisions, weights and brevity penalty into a score
///
/// `precisions` holds the achievable orders only. Shared by sentence and
/// corpus scoring, which differ only in how the inputs are accumulated.
pub(crate) fn aggregate<S>(
    precisions: &[RationalNumber],
    hyp_len: usize,
    ref_len: usize,
    weights: Option<&Weights>,
    smoothing: &S,
) -> Result<BleuScore>
where
    S: SmoothingFunction + ?Sized,
{
    let brevity_penalty = brevity_penalty(ref_len, hyp_len);
    let mut result = BleuScore {
        score: 0.0,
        precisions: precisions.to_vec(),
        smoothed: Vec::new(),
        weights: Vec::new(),
        brevity_penalty,
        hypothesis_length: hyp_len,
        reference_length: ref_len,
    };

    let usable = precisions.len();
    if usable == 0 {
        log::debug!("empty hypothesis scores 0");
        return Ok(result);
    }

    let weights = match weights {
        Some(weights) => weights.restrict(usable)?,
        None => Weights::equal(usable)?,
    };
    result.weights = weights.as_slice().to_vec();

    if precisions[0].is_zero() {
        log::debug!("no unigram matches; score is 0");
        return Ok(result);
    }

    let smoothed = smoothing.smooth(precisions, hyp_len);
    if smoothed.len() != usable {
        return Err(BleuError::InvalidSmoothing(format!(
            "{} returned {} values for {} orders",
            smoothing.name(),
            smoothed.len(),
            usable
        )));
    }
    log::debug!(
        "precisions {:?} smoothed by {} to {:?}",
        precisions.iter().map(ToString::to_string).collect::<Vec<_>>(),
        smoothing.name(),
        smoothed
    );

    let mut log_sum = 0.0;
    let mut collapsed = false;
    for (order, (&weight, &precision)) in weights.as_slice().iter().zip(&smoothed).enumerate() {
        if precision <= 0.0 || precision.is_nan() {
            log::debug!("order {} has zero precision; score is 0", order + 1);
            collapsed = true;
            break;
        }
        if weight > 0.0 {
            log_sum += weight * precision.ln();
        }
    }

    result.smoothed = smoothed;
    if collapsed {
        return Ok(result);
    }

    result.score = brevity_penalty * log_sum.exp();
    log::debug!(
        "score {:.6} (brevity penalty {:.6}, hyp {hyp_len}, ref {ref_len})",
        result.score,
        brevity_penalty
    );

    Ok(result)
}
