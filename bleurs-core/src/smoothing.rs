//! Smoothing strategies for zero-count n-gram orders
//!
//! Without smoothing a single unmatched order forces the geometric mean, and
//! therefore the score, to zero. Each strategy maps the exact precision
//! vector to floating-point values that are safe to take the logarithm of.

use crate::error::{BleuError, Result};
use crate::rational::RationalNumber;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default numerator added by [`Smoothing::Epsilon`]
pub const DEFAULT_EPSILON: f64 = 0.1;

/// Default scale constant of [`Smoothing::LengthScaled`]
pub const DEFAULT_LENGTH_SCALE: f64 = 5.0;

/// Maps exact precisions to smoothed floating-point precisions
///
/// `precisions[i]` is the precision of order `i + 1`. Implementations only
/// receive achievable orders and must return one value per input.
pub trait SmoothingFunction: Send + Sync {
    /// Smooth a precision vector for a hypothesis of `hyp_len` tokens
    fn smooth(&self, precisions: &[RationalNumber], hyp_len: usize) -> Vec<f64>;

    /// Short identifier used in configuration and reports
    fn name(&self) -> &'static str;
}

/// Built-in smoothing strategies
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "kebab-case")]
pub enum Smoothing {
    /// Zero precisions stay zero
    #[default]
    #[serde(alias = "method0")]
    None,

    /// Zero numerators become `epsilon`
    #[serde(alias = "method1")]
    Epsilon {
        /// Value substituted for a zero numerator
        #[serde(default = "default_epsilon")]
        epsilon: f64,
    },

    /// Add one to numerator and denominator of every order above unigrams
    #[serde(alias = "method2")]
    AddOne,

    /// Each zero order becomes `1 / (2^k * denominator)` for k = 1, 2, ...
    #[serde(alias = "method3")]
    Exponential,

    /// Like [`Smoothing::Exponential`], scaled by the hypothesis length
    ///
    /// The `j`-th zero order (counting from 1) becomes
    /// `ln(hyp_len) / (2^j * k) / denominator`. Shorter hypotheses receive
    /// smaller substitutes. Hypotheses of a single token are left unsmoothed.
    #[serde(alias = "method4")]
    LengthScaled {
        /// Scale constant dividing the length term
        #[serde(default = "default_length_scale")]
        k: f64,
    },
}

fn default_epsilon() -> f64 {
    DEFAULT_EPSILON
}

fn default_length_scale() -> f64 {
    DEFAULT_LENGTH_SCALE
}

impl Smoothing {
    /// Every strategy with default parameters
    pub const ALL: [Smoothing; 5] = [
        Smoothing::None,
        Smoothing::Epsilon {
            epsilon: DEFAULT_EPSILON,
        },
        Smoothing::AddOne,
        Smoothing::Exponential,
        Smoothing::LengthScaled {
            k: DEFAULT_LENGTH_SCALE,
        },
    ];

    /// Epsilon strategy with the default epsilon
    pub fn epsilon() -> Self {
        Smoothing::Epsilon {
            epsilon: DEFAULT_EPSILON,
        }
    }

    /// Length-scaled strategy with the default scale
    pub fn length_scaled() -> Self {
        Smoothing::LengthScaled {
            k: DEFAULT_LENGTH_SCALE,
        }
    }

    /// Check strategy parameters
    pub fn validate(&self) -> Result<()> {
        match *self {
            Smoothing::Epsilon { epsilon } if !(epsilon.is_finite() && epsilon > 0.0) => Err(
                BleuError::InvalidSmoothing(format!("epsilon must be positive, got {epsilon}")),
            ),
            Smoothing::LengthScaled { k } if !(k.is_finite() && k > 0.0) => Err(
                BleuError::InvalidSmoothing(format!("k must be positive, got {k}")),
            ),
            _ => Ok(()),
        }
    }

    /// Configuration name
    pub fn as_str(&self) -> &'static str {
        match self {
            Smoothing::None => "none",
            Smoothing::Epsilon { .. } => "epsilon",
            Smoothing::AddOne => "add-one",
            Smoothing::Exponential => "exponential",
            Smoothing::LengthScaled { .. } => "length-scaled",
        }
    }

    /// Numbered alias
    pub fn alias(&self) -> &'static str {
        match self {
            Smoothing::None => "method0",
            Smoothing::Epsilon { .. } => "method1",
            Smoothing::AddOne => "method2",
            Smoothing::Exponential => "method3",
            Smoothing::LengthScaled { .. } => "method4",
        }
    }

    /// One-line description for listings
    pub fn description(&self) -> &'static str {
        match self {
            Smoothing::None => "no smoothing; any unmatched order scores 0",
            Smoothing::Epsilon { .. } => "replace zero match counts with epsilon",
            Smoothing::AddOne => "add one to counts of orders above unigrams",
            Smoothing::Exponential => "halve the substitute for each successive zero order",
            Smoothing::LengthScaled { .. } => {
                "exponential substitutes scaled by ln(hypothesis length) / k"
            }
        }
    }
}

impl SmoothingFunction for Smoothing {
    fn smooth(&self, precisions: &[RationalNumber], hyp_len: usize) -> Vec<f64> {
        match *self {
            Smoothing::None => precisions.iter().map(RationalNumber::to_f64).collect(),
            Smoothing::Epsilon { epsilon } => precisions
                .iter()
                .map(|p| {
                    if p.numerator() == 0 {
                        epsilon / p.denominator() as f64
                    } else {
                        p.to_f64()
                    }
                })
                .collect(),
            Smoothing::AddOne => precisions
                .iter()
                .enumerate()
                .map(|(i, p)| {
                    if i == 0 {
                        p.to_f64()
                    } else {
                        (p.numerator() + 1) as f64 / (p.denominator() + 1) as f64
                    }
                })
                .collect(),
            Smoothing::Exponential => {
                let mut zero_orders = 0;
                precisions
                    .iter()
                    .map(|p| {
                        if p.numerator() == 0 {
                            zero_orders += 1;
                            1.0 / (2f64.powi(zero_orders) * p.denominator() as f64)
                        } else {
                            p.to_f64()
                        }
                    })
                    .collect()
            }
            Smoothing::LengthScaled { k } => {
                let length_term = (hyp_len as f64).ln();
                let mut zero_orders = 0;
                precisions
                    .iter()
                    .map(|p| {
                        if p.numerator() == 0 && hyp_len > 1 {
                            zero_orders += 1;
                            length_term / (2f64.powi(zero_orders) * k) / p.denominator() as f64
                        } else {
                            p.to_f64()
                        }
                    })
                    .collect()
            }
        }
    }

    fn name(&self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for Smoothing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Smoothing::Epsilon { epsilon } => write!(f, "epsilon ({epsilon})"),
            Smoothing::LengthScaled { k } => write!(f, "length-scaled (k = {k})"),
            other => f.write_str(other.as_str()),
        }
    }
}

impl FromStr for Smoothing {
    type Err = BleuError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Smoothing::ALL
            .into_iter()
            .find(|method| method.as_str() == wanted || method.alias() == wanted)
            .ok_or_else(|| BleuError::Config(format!("unknown smoothing method '{s}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rationals(pairs: &[(u64, u64)]) -> Vec<RationalNumber> {
        pairs
            .iter()
            .map(|&(n, d)| RationalNumber::new(n, d).unwrap())
            .collect()
    }

    fn assert_all_close(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-4, "expected {expected:?}, got {actual:?}");
        }
    }

    #[test]
    fn test_length_scaled_reference_vectors() {
        let method4 = Smoothing::length_scaled();

        let smoothed = method4.smooth(&rationals(&[(0, 1), (0, 2)]), 10);
        assert_all_close(&smoothed, &[0.2303, 0.0576]);

        let smoothed = method4.smooth(&rationals(&[(4, 5), (2, 4)]), 10);
        assert_all_close(&smoothed, &[0.8000, 0.5]);

        let smoothed = method4.smooth(&rationals(&[(10, 14), (7, 13), (5, 12), (4, 11)]), 20);
        assert_all_close(&smoothed, &[0.7143, 0.5385, 0.4167, 0.3636]);

        let smoothed = method4.smooth(&rationals(&[(10, 14), (7, 13), (0, 12), (0, 11)]), 20);
        assert_all_close(&smoothed, &[0.7143, 0.5385, 0.02496, 0.01362]);
    }

    #[test]
    fn test_length_scaled_formula_with_custom_k() {
        let method = Smoothing::LengthScaled { k: 2.0 };
        let smoothed = method.smooth(&rationals(&[(1, 2), (0, 4), (0, 5)]), 8);

        let ln8 = 8f64.ln();
        assert_all_close(&smoothed, &[0.5, ln8 / (2.0 * 2.0) / 4.0, ln8 / (4.0 * 2.0) / 5.0]);
    }

    #[test]
    fn test_length_scaled_single_token_hypothesis_is_unsmoothed() {
        let smoothed = Smoothing::length_scaled().smooth(&rationals(&[(0, 1)]), 1);
        assert_eq!(smoothed, vec![0.0]);
    }

    #[test]
    fn test_none_keeps_zeros() {
        let smoothed = Smoothing::None.smooth(&rationals(&[(3, 4), (0, 3)]), 4);
        assert_eq!(smoothed, vec![0.75, 0.0]);
    }

    #[test]
    fn test_epsilon() {
        let smoothed = Smoothing::epsilon().smooth(&rationals(&[(3, 4), (0, 3)]), 4);
        assert_all_close(&smoothed, &[0.75, 0.1 / 3.0]);
    }

    #[test]
    fn test_add_one_skips_unigrams() {
        let smoothed = Smoothing::AddOne.smooth(&rationals(&[(0, 4), (1, 3), (0, 2)]), 4);
        assert_all_close(&smoothed, &[0.0, 0.5, 1.0 / 3.0]);
    }

    #[test]
    fn test_exponential_halves_each_zero_order() {
        let smoothed = Smoothing::Exponential.smooth(&rationals(&[(2, 5), (0, 4), (0, 3), (0, 2)]), 5);
        assert_all_close(&smoothed, &[0.4, 1.0 / 8.0, 1.0 / 12.0, 1.0 / 16.0]);
    }

    #[test]
    fn test_nonzero_precisions_pass_through() {
        let precisions = rationals(&[(4, 5), (2, 4), (1, 3)]);
        for method in Smoothing::ALL.into_iter().filter(|m| *m != Smoothing::AddOne) {
            assert_all_close(&method.smooth(&precisions, 6), &[0.8, 0.5, 1.0 / 3.0]);
        }
    }

    #[test]
    fn test_validate() {
        assert!(Smoothing::epsilon().validate().is_ok());
        assert!(Smoothing::Epsilon { epsilon: 0.0 }.validate().is_err());
        assert!(Smoothing::LengthScaled { k: f64::NAN }.validate().is_err());
        assert!(Smoothing::LengthScaled { k: -1.0 }.validate().is_err());
    }

    #[test]
    fn test_parse_names_and_aliases() {
        assert_eq!("none".parse::<Smoothing>().unwrap(), Smoothing::None);
        assert_eq!("method4".parse::<Smoothing>().unwrap(), Smoothing::length_scaled());
        assert_eq!("Add-One".parse::<Smoothing>().unwrap(), Smoothing::AddOne);
        assert!("method9".parse::<Smoothing>().is_err());
    }

    #[test]
    fn test_serde_tagged_representation() {
        let method: Smoothing = serde_json::from_str(r#"{"method":"method4"}"#).unwrap();
        assert_eq!(method, Smoothing::length_scaled());

        let method: Smoothing = serde_json::from_str(r#"{"method":"epsilon","epsilon":0.5}"#).unwrap();
        assert_eq!(method, Smoothing::Epsilon { epsilon: 0.5 });

        let json = serde_json::to_string(&Smoothing::AddOne).unwrap();
        assert_eq!(json, r#"{"method":"add-one"}"#);
    }
}
