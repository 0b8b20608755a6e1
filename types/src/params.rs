//! Protocol limits.
//!
//! These are hard consensus constants, not tunable configuration: every
//! node must enforce the same bounds or the chains diverge.

/// Maximum number of producers a single direct vote may name.
pub const MAX_VOTED_PRODUCERS: usize = 30;

/// Maximum number of open unstake requests per account.
pub const MAX_UNSTAKE_REQUESTS: u16 = 10;

/// Size of the elected active producer set.
pub const ACTIVE_SET_SIZE: usize = 21;

/// Number of weekly installments an unstake refund is spread across.
pub const UNSTAKE_PAYMENTS: u64 = 26;

/// Seconds between successive refund installments (one week).
pub const UNSTAKE_PAY_PERIOD_SECS: u64 = 7 * 24 * 3600;
