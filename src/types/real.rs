//! Real numbers as they appear on cards.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A floating point value stored on a card.
///
/// Equality is bitwise (every NaN equals every other NaN) so that two decks
/// compare equal exactly when they render to the same text: `0.0` and `-0.0`
/// are different values here because they serialize differently.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Real(pub f64);

impl Real {
    pub fn new(value: f64) -> Self {
        Self(value)
    }

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }
}

impl PartialEq for Real {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits() || (self.0.is_nan() && other.0.is_nan())
    }
}

impl Eq for Real {}

impl From<f64> for Real {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl From<Real> for f64 {
    fn from(value: Real) -> Self {
        value.0
    }
}

/// Canonical card form: the shortest text that reads back to the same
/// value, in exponent form for very small or very large magnitudes.
impl fmt::Display for Real {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = self.0;
        let magnitude = v.abs();
        if v != 0.0 && v.is_finite() && !(1e-4..1e9).contains(&magnitude) {
            write!(f, "{:e}", v)
        } else {
            write!(f, "{}", v)
        }
    }
}
