//! Token amount type.
//!
//! Amounts are represented as fixed-point integers (u64 raw units) to avoid
//! floating-point errors. Vote aggregates use a wider 128-bit domain; see
//! [`TokenAmount::as_weight`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// A quantity of the system token, in raw units.
///
/// Stake quantities are never negative, so the type is unsigned. Actions
/// that the host would reject for a non-positive quantity reject the zero
/// amount here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TokenAmount(u64);

impl TokenAmount {
    pub const ZERO: Self = Self(0);

    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Lift this quantity into the 128-bit vote-weight domain.
    ///
    /// Producer totals and proxied votes accumulate many stakes, so they
    /// are kept twice as wide as any single quantity.
    pub fn as_weight(&self) -> u128 {
        self.0 as u128
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }
}

impl Add for TokenAmount {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for TokenAmount {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} QRM", self.0)
    }
}
