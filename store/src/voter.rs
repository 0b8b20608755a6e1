//! Voter account record.

use quorum_types::{AccountName, Timestamp, TokenAmount};
use serde::{Deserialize, Serialize};

use crate::table::Row;

/// Voting record for an account that has staked or registered as a proxy.
///
/// Rows are created on first stake or proxy registration and never
/// deleted: the `is_proxy` flag and any residual `proxied_votes` must
/// survive unstaking and proxy unregistration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VoterInfo {
    pub owner: AccountName,
    /// The proxy this account delegates to, if any. An account with a
    /// proxy set keeps an empty `producers` list.
    pub proxy: Option<AccountName>,
    pub is_proxy: bool,
    pub last_update: Timestamp,
    pub staked: TokenAmount,
    /// Sum of the staked amounts of accounts currently delegating here.
    /// Retained across proxy unregistration so a re-enabled proxy keeps
    /// continuity; it counts toward producer totals only while
    /// `is_proxy` is set.
    pub proxied_votes: u128,
    /// Ascending, duplicate-free list of voted producers. Empty while a
    /// proxy is set.
    pub producers: Vec<AccountName>,
}

impl VoterInfo {
    /// Fresh record for an account staking for the first time.
    pub fn new(owner: AccountName, staked: TokenAmount, now: Timestamp) -> Self {
        Self {
            owner,
            proxy: None,
            is_proxy: false,
            last_update: now,
            staked,
            proxied_votes: 0,
            producers: Vec::new(),
        }
    }

    /// Fresh record for an account registering as a proxy before ever
    /// staking.
    pub fn new_proxy(owner: AccountName, now: Timestamp) -> Self {
        Self {
            owner,
            proxy: None,
            is_proxy: true,
            last_update: now,
            staked: TokenAmount::ZERO,
            proxied_votes: 0,
            producers: Vec::new(),
        }
    }
}

impl Row for VoterInfo {
    type Key = AccountName;

    fn primary_key(&self) -> AccountName {
        self.owner
    }
}
