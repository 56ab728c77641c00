//! Exact fractions for n-gram precision values
//!
//! Precisions are kept as unreduced `matches / total` pairs so that
//! comparisons and smoothing decisions never depend on floating-point
//! rounding.

use crate::error::{BleuError, Result};
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

/// Immutable, unreduced fraction with a non-negative numerator
///
/// Equality and ordering compare exact values by cross-multiplication, so
/// `1/2 == 2/4` while the stored components stay untouched.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RationalNumber {
    numerator: u64,
    denominator: u64,
}

impl RationalNumber {
    /// Precision of an n-gram order the hypothesis is too short to contain
    ///
    /// This is the only value with a zero denominator. It is never produced by
    /// [`RationalNumber::new`] and must be excluded before scoring.
    pub const NOT_APPLICABLE: RationalNumber = RationalNumber {
        numerator: 0,
        denominator: 0,
    };

    /// Create a fraction, rejecting a zero denominator
    pub fn new(numerator: u64, denominator: u64) -> Result<Self> {
        if denominator == 0 {
            return Err(BleuError::ZeroDenominator);
        }

        Ok(Self {
            numerator,
            denominator,
        })
    }

    /// Numerator as constructed
    pub fn numerator(&self) -> u64 {
        self.numerator
    }

    /// Denominator as constructed
    pub fn denominator(&self) -> u64 {
        self.denominator
    }

    /// Whether this value describes an achievable order
    pub fn is_applicable(&self) -> bool {
        self.denominator > 0
    }

    /// Whether the fraction is exactly zero
    pub fn is_zero(&self) -> bool {
        self.is_applicable() && self.numerator == 0
    }

    /// Floating-point value; NaN for [`RationalNumber::NOT_APPLICABLE`]
    pub fn to_f64(&self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }
}

impl PartialEq for RationalNumber {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for RationalNumber {}

impl PartialOrd for RationalNumber {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RationalNumber {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.is_applicable(), other.is_applicable()) {
            (false, false) => Ordering::Equal,
            (false, true) => Ordering::Less,
            (true, false) => Ordering::Greater,
            (true, true) => {
                let lhs = u128::from(self.numerator) * u128::from(other.denominator);
                let rhs = u128::from(other.numerator) * u128::from(self.denominator);
                lhs.cmp(&rhs)
            }
        }
    }
}

impl fmt::Display for RationalNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}
