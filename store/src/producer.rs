//! Producer record and producer-config rows.

use quorum_types::{AccountName, ProducerPreferences};
use serde::{Deserialize, Serialize};

use crate::table::{Ranked, Row};

/// One registered block-producer candidate.
///
/// `total_votes` is the stake-weighted accumulator maintained by the vote
/// aggregation engine. Whether the producer is *active* is not stored
/// here: it is derived from the presence of a non-empty signing key in
/// the config table, so a producer can be deactivated without losing its
/// accumulated votes.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProducerInfo {
    pub owner: AccountName,
    pub total_votes: u128,
    pub prefs: ProducerPreferences,
}

impl ProducerInfo {
    pub fn new(owner: AccountName, prefs: ProducerPreferences) -> Self {
        Self {
            owner,
            total_votes: 0,
            prefs,
        }
    }
}

impl Row for ProducerInfo {
    type Key = AccountName;

    fn primary_key(&self) -> AccountName {
        self.owner
    }
}

impl Ranked for ProducerInfo {
    type Rank = u128;

    fn rank(&self) -> u128 {
        self.total_votes
    }
}

/// Signing key for a producer, kept in its own table so preference
/// updates never rewrite the key and key changes never rewrite votes.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProducerConfig {
    pub owner: AccountName,
    /// Packed public key bytes, opaque to the election core.
    pub signing_key: Vec<u8>,
}

impl ProducerConfig {
    /// A producer is active iff it has a non-empty signing key.
    pub fn is_active(&self) -> bool {
        !self.signing_key.is_empty()
    }
}

impl Row for ProducerConfig {
    type Key = AccountName;

    fn primary_key(&self) -> AccountName {
        self.owner
    }
}
