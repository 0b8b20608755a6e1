//! Actions accepted by the dispatcher.

use quorum_types::{AccountName, ProducerPreferences, TokenAmount};
use serde::{Deserialize, Serialize};

/// An authenticated action routed by [`crate::ElectionEngine::apply`].
///
/// Wire-level payload encoding is owned by the host; these are the
/// decoded forms.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Action {
    RegisterProducer {
        producer: AccountName,
        signing_key: Vec<u8>,
        prefs: ProducerPreferences,
    },
    /// `signing_key` is carried for payload compatibility but never
    /// applied; preference changes do not touch the key.
    ChangeProducerPreferences {
        producer: AccountName,
        signing_key: Vec<u8>,
        prefs: ProducerPreferences,
    },
    StakeVote {
        voter: AccountName,
        amount: TokenAmount,
    },
    UnstakeVote {
        voter: AccountName,
        amount: TokenAmount,
    },
    CancelUnstakeRequest {
        request_id: u64,
    },
    VoteProducer {
        voter: AccountName,
        proxy: Option<AccountName>,
        producers: Vec<AccountName>,
    },
    RegisterProxy {
        proxy: AccountName,
    },
    UnregisterProxy {
        proxy: AccountName,
    },
}
