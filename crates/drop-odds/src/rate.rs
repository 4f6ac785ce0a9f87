//! Drop rate type.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Errors raised when building drop odds.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OddsError {
    /// The "1 in N" denominator was zero, negative, NaN or infinite.
    #[error("invalid drop rate {0}: must be a positive finite number")]
    InvalidRate(f64),
}

/// "1 in N" odds of a drop on a single trial.
///
/// Stores the denominator `N`, not the probability. Only constructible
/// through [`DropRate::new`], so every value satisfies `N > 0`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct DropRate(f64);

impl DropRate {
    /// Validates and wraps a "1 in N" denominator.
    pub fn new(one_in: f64) -> Result<Self, OddsError> {
        if one_in.is_finite() && one_in > 0.0 {
            Ok(Self(one_in))
        } else {
            Err(OddsError::InvalidRate(one_in))
        }
    }

    /// Returns `N`.
    pub fn one_in(self) -> f64 {
        self.0
    }

    /// Chance of the drop on a single trial, `1/N`.
    ///
    /// Capped at 1: a rate below 1 means every trial drops.
    pub fn chance_per_trial(self) -> f64 {
        (1.0 / self.0).min(1.0)
    }
}

impl TryFrom<f64> for DropRate {
    type Error = OddsError;

    fn try_from(one_in: f64) -> Result<Self, Self::Error> {
        Self::new(one_in)
    }
}

impl From<DropRate> for f64 {
    fn from(rate: DropRate) -> Self {
        rate.0
    }
}

impl fmt::Display for DropRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "1/{}", self.0)
    }
}
