use serde::{Deserialize, Serialize};

use crate::error::LinalgError;

/// Tolerance settings shared by every numeric decision in the engine.
///
/// A single `epsilon` drives both the zero tests (pivot selection, zero rows,
/// singularity) and the output-shaping snap rules applied during inversion.
/// The epsilon is always positive and finite; every constructor, including
/// deserialization, enforces that.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq)]
#[serde(try_from = "PolicyFields")]
pub struct NumericPolicy {
    epsilon: f64,
}

/// Unchecked on-disk form of `NumericPolicy`.
#[derive(Deserialize)]
#[serde(default)]
struct PolicyFields {
    epsilon: f64,
}

impl Default for PolicyFields {
    fn default() -> Self {
        Self {
            epsilon: NumericPolicy::DEFAULT_EPSILON,
        }
    }
}

impl TryFrom<PolicyFields> for NumericPolicy {
    type Error = LinalgError;

    fn try_from(fields: PolicyFields) -> Result<Self, Self::Error> {
        NumericPolicy::new(fields.epsilon)
    }
}

impl NumericPolicy {
    pub const DEFAULT_EPSILON: f64 = 1e-10;

    /// A negative epsilon is taken by magnitude. Zero, NaN and infinities
    /// are rejected: with any of them `is_zero` could never hold and every
    /// singularity check would pass.
    pub fn new(epsilon: f64) -> Result<Self, LinalgError> {
        let epsilon = epsilon.abs();
        if !epsilon.is_finite() || epsilon == 0.0 {
            return Err(LinalgError::InvalidEpsilon { value: epsilon });
        }
        Ok(Self { epsilon })
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// `true` when `value` should be treated as exactly zero.
    #[inline]
    pub fn is_zero(&self, value: f64) -> bool {
        value.abs() < self.epsilon
    }

    #[inline]
    pub fn snap_zero(&self, value: f64) -> f64 {
        if self.is_zero(value) {
            0.0
        } else {
            value
        }
    }

    /// Round `value` to the nearest integer when it lies within epsilon of it.
    #[inline]
    pub fn snap_integer(&self, value: f64) -> f64 {
        let nearest = value.round();
        if (value - nearest).abs() < self.epsilon {
            nearest
        } else {
            value
        }
    }

    /// Integer-snap followed by zero-snap.
    #[inline]
    pub fn snap(&self, value: f64) -> f64 {
        self.snap_zero(self.snap_integer(value))
    }
}

impl Default for NumericPolicy {
    fn default() -> Self {
        Self {
            epsilon: Self::DEFAULT_EPSILON,
        }
    }
}
