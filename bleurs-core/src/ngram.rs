//! N-gram multisets and clipped matching

use crate::error::{BleuError, Result};
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

/// Borrowed window of `N` contiguous tokens
///
/// Two n-grams are equal when their tokens are equal position by position.
#[derive(Debug)]
pub struct NGram<'a, T>(&'a [T]);

impl<'a, T> NGram<'a, T> {
    /// Wrap a token window
    pub fn new(tokens: &'a [T]) -> Self {
        Self(tokens)
    }

    /// Tokens in this n-gram
    pub fn tokens(&self) -> &'a [T] {
        self.0
    }

    /// Order of this n-gram
    pub fn order(&self) -> usize {
        self.0.len()
    }
}

impl<T> Clone for NGram<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for NGram<'_, T> {}

impl<T: PartialEq> PartialEq for NGram<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T: Eq> Eq for NGram<'_, T> {}

impl<T: Hash> Hash for NGram<'_, T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

/// Iterate over all contiguous windows of `order` tokens
pub fn ngrams<T>(tokens: &[T], order: usize) -> Result<impl Iterator<Item = NGram<'_, T>>> {
    if order == 0 {
        return Err(BleuError::InvalidOrder(order));
    }

    Ok(tokens.windows(order).map(NGram::new))
}

/// Number of windows of `order` tokens in a sequence of `len` tokens
pub fn window_count(len: usize, order: usize) -> usize {
    if order == 0 || len < order {
        0
    } else {
        len - order + 1
    }
}

/// Multiset of the n-grams of one order in a token sequence
#[derive(Debug, Clone)]
pub struct NGramCounts<'a, T> {
    order: usize,
    counts: HashMap<NGram<'a, T>, u64>,
    total: u64,
}

impl<'a, T: Eq + Hash> NGramCounts<'a, T> {
    /// Count every window of `order` tokens
    pub fn new(tokens: &'a [T], order: usize) -> Result<Self> {
        let mut counts = HashMap::new();
        let mut total = 0;

        for ngram in ngrams(tokens, order)? {
            *counts.entry(ngram).or_insert(0) += 1;
            total += 1;
        }

        Ok(Self {
            order,
            counts,
            total,
        })
    }

    /// N-gram order counted
    pub fn order(&self) -> usize {
        self.order
    }

    /// Total windows, counting repetitions
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of distinct n-grams
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    /// Occurrences of an n-gram (0 when absent)
    pub fn get(&self, ngram: &NGram<'a, T>) -> u64 {
        self.counts.get(ngram).copied().unwrap_or(0)
    }

    /// Distinct n-grams with their counts, in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (&NGram<'a, T>, u64)> {
        self.counts.iter().map(|(ngram, &count)| (ngram, count))
    }
}

/// Per-n-gram maximum count over a set of references
///
/// Clipping against the best single reference prevents an n-gram from being
/// credited more often than any one reference contains it.
#[derive(Debug, Clone)]
pub struct MaxReferenceCounts<'a, T> {
    order: usize,
    counts: HashMap<NGram<'a, T>, u64>,
}

impl<'a, T: Eq + Hash> MaxReferenceCounts<'a, T> {
    /// Build the maximum counts for `order` across all references
    pub fn new<R: AsRef<[T]>>(references: &'a [R], order: usize) -> Result<Self> {
        if references.is_empty() {
            return Err(BleuError::EmptyReferences);
        }

        let mut counts: HashMap<NGram<'a, T>, u64> = HashMap::new();
        for reference in references {
            let reference_counts = NGramCounts::new(reference.as_ref(), order)?;
            for (ngram, count) in reference_counts.counts {
                let best = counts.entry(ngram).or_insert(0);
                *best = (*best).max(count);
            }
        }

        Ok(Self { order, counts })
    }

    /// N-gram order counted
    pub fn order(&self) -> usize {
        self.order
    }

    /// Highest count of `ngram` in any single reference
    pub fn get(&self, ngram: &NGram<'a, T>) -> u64 {
        self.counts.get(ngram).copied().unwrap_or(0)
    }

    /// Sum over hypothesis n-grams of `min(hypothesis count, reference max)`
    pub fn clipped_matches(&self, hypothesis: &NGramCounts<'a, T>) -> u64 {
        debug_assert_eq!(self.order, hypothesis.order());

        hypothesis
            .iter()
            .map(|(ngram, count)| count.min(self.get(ngram)))
            .sum()
    }
}
