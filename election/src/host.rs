//! Host runtime interface.
//!
//! The chain runtime supplies everything the election core cannot do
//! itself: authority checks, the clock, inline token transfers,
//! publication of the elected set, and recipient notifications. Tests
//! swap in [`NullHost`], which is fully deterministic and records every
//! outbound effect.

use std::collections::BTreeSet;

use quorum_types::{AccountName, Timestamp, TokenAmount};

use crate::error::ElectionError;

/// Primitives provided by the host chain runtime.
pub trait Host {
    /// Whether the current action carries authority for `account`.
    fn has_authority(&self, account: AccountName) -> bool;

    /// Current wall-clock seconds.
    fn now(&self) -> Timestamp;

    /// Inline token transfer. A failure aborts the enclosing action.
    fn transfer(
        &mut self,
        from: AccountName,
        to: AccountName,
        amount: TokenAmount,
        memo: &str,
    ) -> Result<(), ElectionError>;

    /// Publish the elected active producer set (0..=21 accounts, highest
    /// votes first).
    fn set_active_producers(&mut self, producers: &[AccountName]);

    /// Notify an account that an action names it as a recipient.
    fn require_recipient(&mut self, account: AccountName);
}

/// A transfer recorded by [`NullHost`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransferRecord {
    pub from: AccountName,
    pub to: AccountName,
    pub amount: TokenAmount,
    pub memo: String,
}

/// Deterministic host for tests and simulation.
///
/// Time only advances when told to. Every account is authorized unless an
/// explicit authority set is installed. Transfers, publications and
/// notifications are recorded instead of performed.
#[derive(Clone, Debug, Default)]
pub struct NullHost {
    now_secs: u64,
    authorized: Option<BTreeSet<AccountName>>,
    pub transfers: Vec<TransferRecord>,
    pub published: Vec<Vec<AccountName>>,
    pub notified: Vec<AccountName>,
}

impl NullHost {
    pub fn new(initial_secs: u64) -> Self {
        Self {
            now_secs: initial_secs,
            ..Self::default()
        }
    }

    /// Advance the clock by `secs`.
    pub fn advance(&mut self, secs: u64) {
        self.now_secs += secs;
    }

    pub fn set_now(&mut self, secs: u64) {
        self.now_secs = secs;
    }

    /// Restrict authority to exactly these accounts. Without this call,
    /// every account is considered authorized.
    pub fn authorize_only(&mut self, accounts: impl IntoIterator<Item = AccountName>) {
        self.authorized = Some(accounts.into_iter().collect());
    }

    /// The most recently published active producer set, if any.
    pub fn last_published(&self) -> Option<&[AccountName]> {
        self.published.last().map(|v| v.as_slice())
    }
}

impl Host for NullHost {
    fn has_authority(&self, account: AccountName) -> bool {
        match &self.authorized {
            Some(set) => set.contains(&account),
            None => true,
        }
    }

    fn now(&self) -> Timestamp {
        Timestamp::new(self.now_secs)
    }

    fn transfer(
        &mut self,
        from: AccountName,
        to: AccountName,
        amount: TokenAmount,
        memo: &str,
    ) -> Result<(), ElectionError> {
        self.transfers.push(TransferRecord {
            from,
            to,
            amount,
            memo: memo.to_string(),
        });
        Ok(())
    }

    fn set_active_producers(&mut self, producers: &[AccountName]) {
        self.published.push(producers.to_vec());
    }

    fn require_recipient(&mut self, account: AccountName) {
        self.notified.push(account);
    }
}
