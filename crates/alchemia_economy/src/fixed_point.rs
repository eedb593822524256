//! # Fixed-Point Loss Factor
//!
//! **NO FLOATING POINT IN EMC ARITHMETIC.**
//!
//! The covalence loss comes from configuration as a decimal, so it is
//! converted exactly once into parts per [`LOSS_SCALE`]. Every sale after
//! that is integer math on `u128`, exact for the whole `u64` range.

use std::fmt;

use crate::error::{EconomyError, EconomyResult};

/// Denominator of a [`LossFactor`]: nine decimal places.
pub const LOSS_SCALE: u64 = 1_000_000_000;

/// Fraction of value kept when selling, in `(0, 1]`.
///
/// Internally stores `fraction * LOSS_SCALE`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct LossFactor(u64);

impl LossFactor {
    /// Selling keeps the full value.
    pub const LOSSLESS: Self = Self(LOSS_SCALE);

    /// Creates a factor from parts per [`LOSS_SCALE`].
    ///
    /// # Errors
    ///
    /// Returns `EconomyError::InvalidConfig` unless `0 < parts <= LOSS_SCALE`.
    pub fn from_parts(parts: u64) -> EconomyResult<Self> {
        if parts == 0 || parts > LOSS_SCALE {
            return Err(EconomyError::InvalidConfig(format!(
                "covalence loss must be in (0, 1], got {parts}/{LOSS_SCALE}"
            )));
        }
        Ok(Self(parts))
    }

    /// Converts a configured decimal, rounding to the nearest part.
    ///
    /// # Errors
    ///
    /// Returns `EconomyError::InvalidConfig` for NaN, values outside
    /// `(0, 1]`, or values too small to represent.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    pub fn from_decimal(fraction: f64) -> EconomyResult<Self> {
        if !(fraction > 0.0 && fraction <= 1.0) {
            return Err(EconomyError::InvalidConfig(format!(
                "covalence loss must be in (0, 1], got {fraction}"
            )));
        }
        // In range, so the product lies in [0, LOSS_SCALE].
        Self::from_parts((fraction * LOSS_SCALE as f64).round() as u64)
    }

    /// Parts per [`LOSS_SCALE`].
    #[inline]
    #[must_use]
    pub const fn parts(self) -> u64 {
        self.0
    }

    /// True if selling keeps the full value.
    #[inline]
    #[must_use]
    pub const fn is_lossless(self) -> bool {
        self.0 == LOSS_SCALE
    }

    /// `floor(value * fraction)`, exact.
    #[must_use]
    pub fn apply(self, value: u64) -> u64 {
        let kept = u128::from(value) * u128::from(self.0) / u128::from(LOSS_SCALE);
        // parts <= LOSS_SCALE, so the result never exceeds `value`.
        u64::try_from(kept).unwrap_or(value)
    }
}

impl Default for LossFactor {
    fn default() -> Self {
        Self::LOSSLESS
    }
}

impl fmt::Display for LossFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / LOSS_SCALE;
        let frac = self.0 % LOSS_SCALE;
        if frac == 0 {
            return write!(f, "{whole}");
        }
        let digits = format!("{frac:09}");
        write!(f, "{whole}.{}", digits.trim_end_matches('0'))
    }
}
