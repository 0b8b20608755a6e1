//! 64-bit account identifier.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A chain account identifier.
///
/// Accounts are opaque 64-bit names assigned by the host runtime. The
/// election core never interprets the bits; it only compares and orders
/// them (producer lists are kept in ascending name order).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AccountName(u64);

impl AccountName {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for AccountName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for AccountName {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}
