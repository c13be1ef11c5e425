//! Confidence value object (probability of manipulation, 0.0-1.0).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Vendor scores at or above this are reported as deepfakes.
pub const DEEPFAKE_THRESHOLD: f64 = 0.5;

/// A probability in [0, 1], rounded to four decimal places.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Confidence(f64);

impl Confidence {
    pub const ZERO: Self = Self(0.0);

    /// Creates a new Confidence, clamping to the valid range.
    ///
    /// NaN is treated as zero.
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self::ZERO;
        }
        let clamped = value.clamp(0.0, 1.0);
        Self((clamped * 10_000.0).round() / 10_000.0)
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    pub fn is_deepfake(&self) -> bool {
        self.0 >= DEEPFAKE_THRESHOLD
    }

    /// Highest of the given scores, or zero when empty.
    pub fn max_of(values: &[Confidence]) -> Self {
        values.iter().copied().fold(Self::ZERO, |acc, c| if c.0 > acc.0 { c } else { acc })
    }

    /// Arithmetic mean of the given scores, or zero when empty.
    pub fn mean_of(values: &[Confidence]) -> Self {
        if values.is_empty() {
            return Self::ZERO;
        }
        let sum: f64 = values.iter().map(|c| c.0).sum();
        Self::new(sum / values.len() as f64)
    }
}

impl Default for Confidence {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<f64> for Confidence {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}%", self.0 * 100.0)
    }
}
