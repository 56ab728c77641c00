//! Per-order weights for the geometric mean

use crate::error::{BleuError, Result};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::str::FromStr;

/// Highest n-gram order scored when no weights are given
pub const DEFAULT_MAX_ORDER: usize = 4;

/// Validated, order-indexed weight vector
///
/// `weights[i]` applies to order `i + 1`. Every weight is finite and
/// non-negative and the sum is positive. The sum is expected to be 1 but is
/// not required to be: weights are renormalised over the orders actually
/// scored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct Weights(SmallVec<[f64; 4]>);

impl Weights {
    /// Validate an explicit weight vector
    pub fn new<I: IntoIterator<Item = f64>>(values: I) -> Result<Self> {
        let values: SmallVec<[f64; 4]> = values.into_iter().collect();
        if values.is_empty() {
            return Err(BleuError::EmptyWeights);
        }

        for (index, &value) in values.iter().enumerate() {
            if !value.is_finite() || value < 0.0 {
                return Err(BleuError::InvalidWeight { index, value });
            }
        }

        if values.iter().sum::<f64>() <= 0.0 {
            return Err(BleuError::UnresolvableWeights {
                usable: values.len(),
            });
        }

        Ok(Self(values))
    }

    /// Uniform weights over orders `1..=orders`
    pub fn equal(orders: usize) -> Result<Self> {
        if orders == 0 {
            return Err(BleuError::EmptyWeights);
        }

        Ok(Self(SmallVec::from_elem(1.0 / orders as f64, orders)))
    }

    /// Highest order these weights cover
    pub fn max_order(&self) -> usize {
        self.0.len()
    }

    /// Weights as a slice
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Weights for the first `usable` orders, renormalised to sum to 1
    pub fn restrict(&self, usable: usize) -> Result<Self> {
        let kept = &self.0[..usable.min(self.0.len())];
        let sum: f64 = kept.iter().sum();
        if kept.is_empty() || sum <= 0.0 {
            return Err(BleuError::UnresolvableWeights { usable });
        }

        Ok(Self(kept.iter().map(|w| w / sum).collect()))
    }
}

impl Default for Weights {
    /// Uniform weights over orders `1..=4`
    fn default() -> Self {
        Self(SmallVec::from_elem(
            1.0 / DEFAULT_MAX_ORDER as f64,
            DEFAULT_MAX_ORDER,
        ))
    }
}

impl TryFrom<Vec<f64>> for Weights {
    type Error = BleuError;

    fn try_from(values: Vec<f64>) -> Result<Self> {
        Self::new(values)
    }
}

impl From<Weights> for Vec<f64> {
    fn from(weights: Weights) -> Self {
        weights.0.into_vec()
    }
}

impl FromStr for Weights {
    type Err = BleuError;

    /// Parse a comma-separated list such as `0.25,0.25,0.25,0.25`
    fn from_str(s: &str) -> Result<Self> {
        let values = s
            .split(',')
            .map(|part| {
                part.trim()
                    .parse::<f64>()
                    .map_err(|e| BleuError::Config(format!("invalid weight '{}': {e}", part.trim())))
            })
            .collect::<Result<Vec<_>>>()?;

        Self::new(values)
    }
}
