//! Fixed-point hour quantities.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A non-negative number of hours with a resolution of 0.01h.
///
/// Serialized as a plain floating-point number of hours.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(into = "f64", try_from = "f64")]
pub struct Hours(u64);

impl Hours {
    /// Zero hours.
    pub const ZERO: Self = Self(0);

    const SCALE: f64 = 100.0;

    /// Largest tracked value, kept within the signed 64-bit storage column.
    const MAX_HUNDREDTHS: u64 = i64::MAX.unsigned_abs();

    /// Creates a value from hundredths of an hour.
    #[must_use]
    pub const fn from_hundredths(hundredths: u64) -> Self {
        Self(hundredths)
    }

    /// Returns the value in hundredths of an hour.
    #[must_use]
    pub const fn hundredths(self) -> u64 {
        self.0
    }

    /// Converts a floating-point hour value, rounding to the nearest 0.01h.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidHours`] when `value` is negative,
    /// NaN, infinite, or beyond the trackable range.
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss,
        reason = "range is checked before the cast and rounding is explicit"
    )]
    pub fn from_f64(value: f64) -> Result<Self, TaskDomainError> {
        if !value.is_finite() || value < 0.0 {
            return Err(TaskDomainError::InvalidHours(value));
        }
        let scaled = (value * Self::SCALE).round();
        if scaled >= Self::MAX_HUNDREDTHS as f64 {
            return Err(TaskDomainError::InvalidHours(value));
        }
        Ok(Self(scaled as u64))
    }

    /// Returns the value as floating-point hours.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "presentation conversion; storage stays fixed-point"
    )]
    pub fn as_f64(self) -> f64 {
        self.0 as f64 / Self::SCALE
    }

    /// Returns whether the value is zero.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Adds two quantities, returning `None` past the trackable range.
    #[must_use]
    pub const fn checked_add(self, other: Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(sum) if sum <= Self::MAX_HUNDREDTHS => Some(Self(sum)),
            _ => None,
        }
    }
}

impl From<Hours> for f64 {
    fn from(hours: Hours) -> Self {
        hours.as_f64()
    }
}

impl TryFrom<f64> for Hours {
    type Error = TaskDomainError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::from_f64(value)
    }
}

impl fmt::Display for Hours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0.checked_div(100).unwrap_or_default();
        let fraction = self.0.checked_rem(100).unwrap_or_default();
        write!(f, "{whole}.{fraction:02}h")
    }
}
