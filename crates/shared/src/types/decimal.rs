//! Decimal helpers for monetary figures.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Everything here works on `rust_decimal::Decimal`.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Round a decimal value using Banker's Rounding (round half to even).
///
/// Only used at presentation time; intermediate values are never rounded.
#[must_use]
pub fn round_half_even(value: Decimal, decimal_places: u32) -> Decimal {
    value.round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointNearestEven)
}

/// Relative tolerance for comparing totals that should foot.
///
/// Two values agree when `|expected - actual| <= relative * max(|expected|, |actual|, 1)`.
/// The floor of 1 turns the check into an absolute one for values close to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tolerance {
    relative: Decimal,
}

impl Tolerance {
    /// 1e-6 relative.
    pub const DEFAULT: Self = Self {
        relative: Decimal::from_parts(1, 0, 0, false, 6),
    };

    /// Creates a tolerance from a relative bound. Negative bounds are treated as zero.
    #[must_use]
    pub fn new(relative: Decimal) -> Self {
        Self {
            relative: relative.max(Decimal::ZERO),
        }
    }

    /// Returns the relative bound.
    #[must_use]
    pub const fn relative(&self) -> Decimal {
        self.relative
    }

    /// Returns true if `actual` agrees with `expected` within this tolerance.
    #[must_use]
    pub fn within(&self, expected: Decimal, actual: Decimal) -> bool {
        let diff = (expected - actual).abs();
        if diff.is_zero() {
            return true;
        }
        let scale = expected.abs().max(actual.abs()).max(Decimal::ONE);
        diff <= scale * self.relative
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}
