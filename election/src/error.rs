use quorum_store::StoreError;
use quorum_types::{AccountName, TokenAmount};
use thiserror::Error;

/// Action-aborting failures.
///
/// Every variant aborts the enclosing action; the dispatcher discards the
/// action's writes. [`ElectionError::Corruption`] means a table invariant
/// was found broken and should be treated as fatal by operators.
#[derive(Debug, Error)]
pub enum ElectionError {
    #[error("missing authority for account {0}")]
    Auth(AccountName),

    #[error("producer {0} is already registered")]
    AlreadyRegistered(AccountName),

    #[error("producer {0} is not registered")]
    NotRegistered(AccountName),

    #[error("account {0} is already a proxy")]
    AlreadyProxy(AccountName),

    #[error("account {0} has not elected to be a proxy")]
    NotProxy(AccountName),

    #[error("account {0} delegates through a proxy")]
    DelegatesToProxy(AccountName),

    #[error("amount must be positive")]
    BadAmount,

    #[error("attempt to unstake more than the staked amount: have {available}, requested {requested}")]
    Overstake {
        available: TokenAmount,
        requested: TokenAmount,
    },

    #[error("unstake request limit exceeded")]
    QuotaExceeded,

    #[error("invalid producer list: {0}")]
    BadProducerList(&'static str),

    #[error("can vote only for active producers: {0} is inactive")]
    InactiveProducer(AccountName),

    #[error("account {0} has no stake to vote")]
    NoStake(AccountName),

    #[error("unstake request {0} not found")]
    RequestNotFound(u64),

    #[error("token transfer failed: {0}")]
    Transfer(String),

    #[error("state corruption: {0}")]
    Corruption(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ElectionError {
    pub(crate) fn corruption(msg: impl Into<String>) -> Self {
        Self::Corruption(msg.into())
    }
}
