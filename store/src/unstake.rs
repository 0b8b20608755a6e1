//! Unstake refund request rows.

use quorum_types::{AccountName, Timestamp, TokenAmount};
use serde::{Deserialize, Serialize};

use crate::table::{Ranked, Row};

/// One outstanding unstake refund schedule.
///
/// Created by `unstake_vote`, drained weekly by the per-block refund
/// processor, removed on full refund or cancellation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UnstakeRequest {
    /// Synthetic primary key, host-assigned, monotonic.
    pub id: u64,
    pub account: AccountName,
    /// Remaining amount still owed to the account.
    pub current_amount: TokenAmount,
    pub weekly_refund_amount: TokenAmount,
    pub next_refund_time: Timestamp,
}

impl Row for UnstakeRequest {
    type Key = u64;

    fn primary_key(&self) -> u64 {
        self.id
    }
}

impl Ranked for UnstakeRequest {
    type Rank = u64;

    fn rank(&self) -> u64 {
        self.next_refund_time.as_secs()
    }
}

/// Number of open unstake requests per account, capped by
/// [`quorum_types::params::MAX_UNSTAKE_REQUESTS`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UnstakeCount {
    pub account: AccountName,
    pub count: u16,
}

impl Row for UnstakeCount {
    type Key = AccountName;

    fn primary_key(&self) -> AccountName {
        self.account
    }
}
