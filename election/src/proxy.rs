//! Proxy registration and unregistration.

use quorum_store::{StakingStore, Table, VoterInfo};
use quorum_types::AccountName;

use crate::engine::ElectionEngine;
use crate::error::ElectionError;
use crate::host::Host;

impl<S: StakingStore> ElectionEngine<S> {
    /// Enable `account` to vote on behalf of its delegators.
    ///
    /// An account that itself delegates may not become a proxy. A
    /// re-enabled proxy keeps any `proxied_votes` retained from a
    /// previous registration, but the retained weight does not return to
    /// its producers until the next delegation change or re-vote.
    pub fn register_proxy(
        &mut self,
        host: &dyn Host,
        account: AccountName,
    ) -> Result<(), ElectionError> {
        self.require_auth(host, account)?;

        let now = host.now();
        match self.store.voters().find(account)? {
            Some(mut rec) => {
                if rec.is_proxy {
                    return Err(ElectionError::AlreadyProxy(account));
                }
                if rec.proxy.is_some() {
                    return Err(ElectionError::DelegatesToProxy(account));
                }
                rec.is_proxy = true;
                rec.last_update = now;
                self.store.voters_mut().update(rec)?;
            }
            None => {
                self.store
                    .voters_mut()
                    .insert(VoterInfo::new_proxy(account, now))?;
            }
        }

        tracing::info!(proxy = %account, "proxy registered");
        Ok(())
    }

    /// Disable a proxy.
    ///
    /// Pulls the delegated weight off every producer the proxy names,
    /// then clears the flag. `proxied_votes` and the producer list are
    /// retained so the proxy can be re-enabled later.
    pub fn unregister_proxy(
        &mut self,
        host: &dyn Host,
        account: AccountName,
    ) -> Result<(), ElectionError> {
        self.require_auth(host, account)?;

        let mut rec = self
            .store
            .voters()
            .find(account)?
            .ok_or(ElectionError::NotProxy(account))?;
        if !rec.is_proxy {
            return Err(ElectionError::NotProxy(account));
        }

        let producers = rec.producers.clone();
        self.shift_producer_votes(&producers, rec.proxied_votes, false)?;

        rec.is_proxy = false;
        rec.last_update = host.now();
        self.store.voters_mut().update(rec)?;

        tracing::info!(proxy = %account, "proxy unregistered");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::NullHost;
    use quorum_store_mem::MemStakingStore;
    use quorum_types::{ProducerPreferences, TokenAmount};

    fn acct(raw: u64) -> AccountName {
        AccountName::new(raw)
    }

    fn setup() -> (ElectionEngine<MemStakingStore>, NullHost) {
        let mut engine = ElectionEngine::new(MemStakingStore::new(), acct(0));
        let host = NullHost::new(1_000);
        for i in 0..2 {
            engine
                .register_producer(&host, acct(10 + i), vec![1], ProducerPreferences::default())
                .unwrap();
        }
        (engine, host)
    }

    fn total_votes(engine: &ElectionEngine<MemStakingStore>, producer: u64) -> u128 {
        engine
            .store()
            .producers()
            .find(acct(producer))
            .unwrap()
            .unwrap()
            .total_votes
    }

    #[test]
    fn register_creates_record_without_stake() {
        let (mut engine, host) = setup();

        engine.register_proxy(&host, acct(5)).unwrap();

        let rec = engine.store().voters().find(acct(5)).unwrap().unwrap();
        assert!(rec.is_proxy);
        assert_eq!(rec.staked, TokenAmount::ZERO);
        assert_eq!(rec.proxied_votes, 0);
    }

    #[test]
    fn register_twice_rejected() {
        let (mut engine, host) = setup();
        engine.register_proxy(&host, acct(5)).unwrap();

        let err = engine.register_proxy(&host, acct(5)).unwrap_err();
        assert!(matches!(err, ElectionError::AlreadyProxy(_)));
    }

    #[test]
    fn delegating_account_cannot_become_proxy() {
        let (mut engine, mut host) = setup();
        engine.register_proxy(&host, acct(5)).unwrap();
        engine
            .stake_vote(&mut host, acct(1), TokenAmount::new(10))
            .unwrap();
        engine
            .vote_producer(&mut host, acct(1), Some(acct(5)), Vec::new())
            .unwrap();

        let err = engine.register_proxy(&host, acct(1)).unwrap_err();
        assert!(matches!(err, ElectionError::DelegatesToProxy(_)));
    }

    #[test]
    fn staked_voter_can_become_proxy() {
        let (mut engine, mut host) = setup();
        engine
            .stake_vote(&mut host, acct(1), TokenAmount::new(10))
            .unwrap();

        engine.register_proxy(&host, acct(1)).unwrap();

        let rec = engine.store().voters().find(acct(1)).unwrap().unwrap();
        assert!(rec.is_proxy);
        assert_eq!(rec.staked, TokenAmount::new(10));
    }

    #[test]
    fn unregister_unknown_rejected() {
        let (mut engine, host) = setup();
        let err = engine.unregister_proxy(&host, acct(5)).unwrap_err();
        assert!(matches!(err, ElectionError::NotProxy(_)));
    }

    #[test]
    fn unregister_pulls_delegated_weight_off_producers() {
        let (mut engine, mut host) = setup();
        engine.register_proxy(&host, acct(5)).unwrap();
        engine
            .vote_producer(&mut host, acct(5), None, vec![acct(10), acct(11)])
            .unwrap();
        engine
            .stake_vote(&mut host, acct(1), TokenAmount::new(50))
            .unwrap();
        engine
            .vote_producer(&mut host, acct(1), Some(acct(5)), Vec::new())
            .unwrap();
        assert_eq!(total_votes(&engine, 10), 50);

        engine.unregister_proxy(&host, acct(5)).unwrap();

        assert_eq!(total_votes(&engine, 10), 0);
        assert_eq!(total_votes(&engine, 11), 0);
        let rec = engine.store().voters().find(acct(5)).unwrap().unwrap();
        assert!(!rec.is_proxy);
        assert_eq!(rec.proxied_votes, 50, "proxied votes are retained");
        assert_eq!(rec.producers, vec![acct(10), acct(11)]);
    }

    #[test]
    fn reregister_keeps_retained_votes_unpropagated() {
        let (mut engine, mut host) = setup();
        engine.register_proxy(&host, acct(5)).unwrap();
        engine
            .vote_producer(&mut host, acct(5), None, vec![acct(10)])
            .unwrap();
        engine
            .stake_vote(&mut host, acct(1), TokenAmount::new(50))
            .unwrap();
        engine
            .vote_producer(&mut host, acct(1), Some(acct(5)), Vec::new())
            .unwrap();
        engine.unregister_proxy(&host, acct(5)).unwrap();

        engine.register_proxy(&host, acct(5)).unwrap();

        let rec = engine.store().voters().find(acct(5)).unwrap().unwrap();
        assert!(rec.is_proxy);
        assert_eq!(rec.proxied_votes, 50);
        assert_eq!(total_votes(&engine, 10), 0, "retained votes do not return by themselves");
    }
}
