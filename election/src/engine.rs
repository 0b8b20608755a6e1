//! The election engine: shared state, helpers, and the action dispatcher.

use quorum_store::{StakingStore, Table, VoterInfo};
use quorum_types::AccountName;

use crate::action::Action;
use crate::error::ElectionError;
use crate::host::Host;
use crate::tabulator::ElectionOutcome;

/// The election state machine.
///
/// Owns the staking store and routes authenticated actions to the
/// registry, voting, proxy and unstake handlers. All handler methods are
/// public so hosts can wire actions directly, but going through
/// [`ElectionEngine::apply`] is what makes an action atomic.
pub struct ElectionEngine<S> {
    pub(crate) store: S,
    system_account: AccountName,
}

impl<S: StakingStore> ElectionEngine<S> {
    /// Create an engine over `store`. `system_account` holds staked
    /// tokens and pays refunds.
    pub fn new(store: S, system_account: AccountName) -> Self {
        Self {
            store,
            system_account,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn system_account(&self) -> AccountName {
        self.system_account
    }

    pub(crate) fn require_auth(
        &self,
        host: &dyn Host,
        account: AccountName,
    ) -> Result<(), ElectionError> {
        if host.has_authority(account) {
            Ok(())
        } else {
            Err(ElectionError::Auth(account))
        }
    }

    /// Whether `producer` currently has a non-empty signing key.
    ///
    /// Callers pass producers whose record row exists, so a missing
    /// config row means the two producer tables diverged.
    pub(crate) fn producer_is_active(&self, producer: AccountName) -> Result<bool, ElectionError> {
        let cfg = self.store.configs().find(producer)?.ok_or_else(|| {
            ElectionError::corruption(format!("producer {producer} has no config row"))
        })?;
        Ok(cfg.is_active())
    }

    /// Add or subtract `weight` on every producer in `producers`.
    ///
    /// The list must be sorted; iteration order is list order so the
    /// 128-bit totals are bit-exactly reproducible. A listed producer
    /// missing from the table is a broken invariant.
    pub(crate) fn shift_producer_votes(
        &mut self,
        producers: &[AccountName],
        weight: u128,
        add: bool,
    ) -> Result<(), ElectionError> {
        for &p in producers {
            let mut row = self.store.producers().find(p)?.ok_or_else(|| {
                ElectionError::corruption(format!("voted producer {p} was never registered"))
            })?;
            row.total_votes = if add {
                row.total_votes
                    .checked_add(weight)
                    .ok_or_else(|| ElectionError::corruption("producer vote total overflow"))?
            } else {
                row.total_votes
                    .checked_sub(weight)
                    .ok_or_else(|| ElectionError::corruption("producer vote total underflow"))?
            };
            self.store.producers_mut().update(row)?;
        }
        Ok(())
    }

    /// Apply a stake delta for a voter through its direct or proxy path.
    ///
    /// The proxy's `proxied_votes` always tracks the delta; producer
    /// totals only move while the proxy is registered. A proxy that has
    /// unregistered already had its weight pulled off the producers, so
    /// nothing propagates until it re-registers and re-votes.
    pub(crate) fn propagate_stake_delta(
        &mut self,
        record: &VoterInfo,
        weight: u128,
        add: bool,
    ) -> Result<(), ElectionError> {
        if let Some(proxy_name) = record.proxy {
            let mut proxy = self.store.voters().find(proxy_name)?.ok_or_else(|| {
                ElectionError::corruption(format!("proxy {proxy_name} has no voter record"))
            })?;
            proxy.proxied_votes = if add {
                proxy
                    .proxied_votes
                    .checked_add(weight)
                    .ok_or_else(|| ElectionError::corruption("proxied vote total overflow"))?
            } else {
                proxy
                    .proxied_votes
                    .checked_sub(weight)
                    .ok_or_else(|| ElectionError::corruption("proxied vote total underflow"))?
            };
            let targets = if proxy.is_proxy {
                proxy.producers.clone()
            } else {
                Vec::new()
            };
            self.store.voters_mut().update(proxy)?;
            self.shift_producer_votes(&targets, weight, add)
        } else {
            let targets = record.producers.clone();
            self.shift_producer_votes(&targets, weight, add)
        }
    }
}

impl<S: StakingStore + Clone> ElectionEngine<S> {
    /// Route an action to its handler, atomically.
    ///
    /// The store is snapshotted first; any failure restores the snapshot
    /// so partially applied writes are never observable to later actions.
    pub fn apply(&mut self, host: &mut dyn Host, action: Action) -> Result<(), ElectionError> {
        let snapshot = self.store.clone();
        let result = self.dispatch(host, action);
        if result.is_err() {
            self.store = snapshot;
        }
        result
    }

    fn dispatch(&mut self, host: &mut dyn Host, action: Action) -> Result<(), ElectionError> {
        match action {
            Action::RegisterProducer {
                producer,
                signing_key,
                prefs,
            } => self.register_producer(&*host, producer, signing_key, prefs),
            Action::ChangeProducerPreferences {
                producer,
                signing_key: _,
                prefs,
            } => self.change_producer_preferences(&*host, producer, prefs),
            Action::StakeVote { voter, amount } => self.stake_vote(host, voter, amount),
            Action::UnstakeVote { voter, amount } => self.unstake_vote(&*host, voter, amount),
            Action::CancelUnstakeRequest { request_id } => {
                self.cancel_unstake_request(&*host, request_id)
            }
            Action::VoteProducer {
                voter,
                proxy,
                producers,
            } => self.vote_producer(host, voter, proxy, producers),
            Action::RegisterProxy { proxy } => self.register_proxy(&*host, proxy),
            Action::UnregisterProxy { proxy } => self.unregister_proxy(&*host, proxy),
        }
    }

    /// Per-block maintenance: re-run the election, then pay due refunds.
    ///
    /// A failure aborts the whole block; the store is restored to its
    /// pre-block state.
    pub fn on_block(&mut self, host: &mut dyn Host) -> Result<ElectionOutcome, ElectionError> {
        let snapshot = self.store.clone();
        let result = self.run_block(host);
        if let Err(e) = &result {
            tracing::warn!(error = %e, "block maintenance aborted");
            self.store = snapshot;
        }
        result
    }

    fn run_block(&mut self, host: &mut dyn Host) -> Result<ElectionOutcome, ElectionError> {
        let outcome = self.update_elected_producers(host)?;
        self.process_unstake_requests(host)?;
        Ok(outcome)
    }
}
