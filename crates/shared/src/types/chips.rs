//! Integer chip-count money type.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Chip counts are whole currency units; all ledger arithmetic is `i64`.

use serde::{Deserialize, Serialize};

/// A chip amount in whole currency units.
///
/// Amounts may be negative (a delta or a session loss); individual stacks
/// are kept non-negative by [`Chips::saturating_add_clamped`].
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Chips(pub i64);

impl Chips {
    /// Zero chips.
    pub const ZERO: Self = Self(0);

    /// Creates a chip amount from whole currency units.
    #[must_use]
    pub const fn new(units: i64) -> Self {
        Self(units)
    }

    /// Returns the inner unit count.
    #[must_use]
    pub const fn into_inner(self) -> i64 {
        self.0
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Returns true if the amount is strictly positive.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Returns true if the amount is negative.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Adds a (possibly negative) delta, clamping the result at zero.
    ///
    /// This backs the stack invariant: a chip adjustment can never drive a
    /// stack below zero, regardless of the delta magnitude.
    #[must_use]
    pub const fn saturating_add_clamped(self, delta: Self) -> Self {
        let sum = self.0.saturating_add(delta.0);
        if sum < 0 { Self::ZERO } else { Self(sum) }
    }
}

impl std::ops::Add for Chips {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl std::ops::Sub for Chips {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl std::ops::AddAssign for Chips {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl std::ops::SubAssign for Chips {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl std::ops::Neg for Chips {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl std::iter::Sum for Chips {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, c| acc + c)
    }
}

impl std::fmt::Display for Chips {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for Chips {
    fn from(units: i64) -> Self {
        Self(units)
    }
}
