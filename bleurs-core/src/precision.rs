//! Modified (clipped) n-gram precision

use crate::error::{BleuError, Result};
use crate::ngram::{window_count, MaxReferenceCounts, NGramCounts};
use crate::rational::RationalNumber;
use smallvec::SmallVec;
use std::hash::Hash;

/// Precision values for consecutive orders starting at 1
pub type PrecisionVec = SmallVec<[RationalNumber; 4]>;

/// Clipped n-gram precision of `hypothesis` against `references`
///
/// The numerator sums, over distinct hypothesis n-grams, the hypothesis count
/// clipped to the largest count found in any single reference. The
/// denominator is the number of hypothesis windows of this order. The result
/// is left unreduced.
///
/// Returns [`RationalNumber::NOT_APPLICABLE`] when the hypothesis is shorter
/// than `order`.
pub fn modified_precision<T, R>(
    references: &[R],
    hypothesis: &[T],
    order: usize,
) -> Result<RationalNumber>
where
    T: Eq + Hash,
    R: AsRef<[T]>,
{
    if order == 0 {
        return Err(BleuError::InvalidOrder(order));
    }
    if references.is_empty() {
        return Err(BleuError::EmptyReferences);
    }

    let total = window_count(hypothesis.len(), order);
    if total == 0 {
        return Ok(RationalNumber::NOT_APPLICABLE);
    }

    let hypothesis_counts = NGramCounts::new(hypothesis, order)?;
    let reference_counts = MaxReferenceCounts::new(references, order)?;
    let matches = reference_counts.clipped_matches(&hypothesis_counts);

    log::trace!("order {order}: {matches}/{total} clipped matches");

    RationalNumber::new(matches, total as u64)
}

/// Modified precisions for orders `1..=max_order` the hypothesis can reach
///
/// Orders longer than the hypothesis are omitted, so the result holds
/// `min(max_order, hypothesis.len())` applicable values.
pub fn modified_precisions<T, R>(
    references: &[R],
    hypothesis: &[T],
    max_order: usize,
) -> Result<PrecisionVec>
where
    T: Eq + Hash,
    R: AsRef<[T]>,
{
    if max_order == 0 {
        return Err(BleuError::InvalidOrder(max_order));
    }
    if references.is_empty() {
        return Err(BleuError::EmptyReferences);
    }

    let mut precisions = PrecisionVec::new();
    for order in 1..=max_order.min(hypothesis.len()) {
        let precision = modified_precision(references, hypothesis, order)?;
        if precision.is_applicable() {
            precisions.push(precision);
        }
    }

    Ok(precisions)
}
