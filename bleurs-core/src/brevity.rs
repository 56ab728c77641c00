//! Brevity penalty for hypotheses shorter than their references

use crate::error::{BleuError, Result};

/// Reference length closest to `hyp_len`
///
/// When two reference lengths are equally distant the shorter one wins, so
/// the result does not depend on reference order.
pub fn closest_ref_length<T, R: AsRef<[T]>>(references: &[R], hyp_len: usize) -> Result<usize> {
    references
        .iter()
        .map(|reference| reference.as_ref().len())
        .min_by_key(|&ref_len| (ref_len.abs_diff(hyp_len), ref_len))
        .ok_or(BleuError::EmptyReferences)
}

/// Multiplicative penalty for a hypothesis shorter than the closest reference
///
/// Returns exactly 1.0 when the hypothesis is at least as long as the
/// reference, 0.0 for an empty hypothesis, and `exp(1 - r / c)` otherwise.
pub fn brevity_penalty(closest_ref_len: usize, hyp_len: usize) -> f64 {
    if hyp_len == 0 {
        return 0.0;
    }
    if hyp_len >= closest_ref_len {
        return 1.0;
    }

    (1.0 - closest_ref_len as f64 / hyp_len as f64).exp()
}
