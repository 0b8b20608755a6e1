//! Stake increases and vote designation.
//!
//! Vote weight flows along one of two paths: directly from a voter to the
//! producers it names, or through a proxy that names producers on behalf
//! of its delegators. Every stake change applies the same delta to both
//! the proxy bookkeeping and the producer totals, so the aggregates stay
//! consistent under arbitrary interleavings.

use quorum_store::{StakingStore, Table, VoterInfo};
use quorum_types::params::MAX_VOTED_PRODUCERS;
use quorum_types::{AccountName, Timestamp, TokenAmount};

use crate::engine::ElectionEngine;
use crate::error::ElectionError;
use crate::host::Host;

/// Whether `list` is ascending and duplicate-free.
fn is_strictly_ascending(list: &[AccountName]) -> bool {
    list.windows(2).all(|w| w[0] < w[1])
}

/// Elements of `a` not present in `b`. Both inputs must be sorted; the
/// result preserves `a`'s order.
fn sorted_difference(a: &[AccountName], b: &[AccountName]) -> Vec<AccountName> {
    let mut out = Vec::new();
    let mut bi = b.iter().peekable();
    for &x in a {
        while bi.peek().is_some_and(|&&y| y < x) {
            bi.next();
        }
        if bi.peek() != Some(&&x) {
            out.push(x);
        }
    }
    out
}

impl<S: StakingStore> ElectionEngine<S> {
    /// Stake `amount` tokens for voting.
    ///
    /// Tokens move from the voter to the system account and the voter's
    /// current vote designation is weighted up by `amount`.
    pub fn stake_vote(
        &mut self,
        host: &mut dyn Host,
        voter: AccountName,
        amount: TokenAmount,
    ) -> Result<(), ElectionError> {
        self.require_auth(&*host, voter)?;
        if amount.is_zero() {
            return Err(ElectionError::BadAmount);
        }

        self.increase_voting_power(host.now(), voter, amount)?;
        host.transfer(voter, self.system_account(), amount, "stake for voting")?;

        tracing::debug!(voter = %voter, amount = %amount, "stake added");
        Ok(())
    }

    /// Add `amount` to `voter`'s stake and push the delta along its
    /// current voting path.
    ///
    /// When the voter delegates to a proxy, the proxy's `proxied_votes`
    /// always absorbs the delta; producer totals only move while the
    /// proxy is registered. Also used by unstake cancellation to restore
    /// a refund's remaining amount.
    pub(crate) fn increase_voting_power(
        &mut self,
        now: Timestamp,
        voter: AccountName,
        amount: TokenAmount,
    ) -> Result<(), ElectionError> {
        let record = match self.store.voters().find(voter)? {
            Some(mut rec) => {
                rec.staked = rec
                    .staked
                    .checked_add(amount)
                    .ok_or_else(|| ElectionError::corruption("staked amount overflow"))?;
                rec.last_update = now;
                self.store.voters_mut().update(rec.clone())?;
                rec
            }
            None => {
                let rec = VoterInfo::new(voter, amount, now);
                self.store.voters_mut().insert(rec.clone())?;
                rec
            }
        };

        self.propagate_stake_delta(&record, amount.as_weight(), true)
    }

    /// Designate a vote: either a proxy, or up to 30 producers.
    ///
    /// `producers` must be ascending and duplicate-free, and empty when a
    /// proxy is named. Switching designations revokes weight from
    /// producers no longer named and elects the newly named ones; the
    /// unchanged intersection is untouched. Re-designating the same
    /// non-zero proxy is a no-op.
    pub fn vote_producer(
        &mut self,
        host: &mut dyn Host,
        voter: AccountName,
        proxy: Option<AccountName>,
        producers: Vec<AccountName>,
    ) -> Result<(), ElectionError> {
        self.require_auth(&*host, voter)?;

        match proxy {
            Some(p) => {
                if !producers.is_empty() {
                    return Err(ElectionError::BadProducerList(
                        "cannot vote for producers and a proxy at the same time",
                    ));
                }
                host.require_recipient(p);
            }
            None => {
                if producers.len() > MAX_VOTED_PRODUCERS {
                    return Err(ElectionError::BadProducerList("more than 30 producers"));
                }
                if !is_strictly_ascending(&producers) {
                    return Err(ElectionError::BadProducerList(
                        "producer list must be ascending and duplicate-free",
                    ));
                }
            }
        }

        let record = self
            .store
            .voters()
            .find(voter)?
            .ok_or(ElectionError::NoStake(voter))?;
        if record.is_proxy && proxy.is_some() {
            return Err(ElectionError::DelegatesToProxy(voter));
        }

        // A registered proxy's producer list carries its delegators'
        // weight along with its own stake, so moving the list moves both.
        let weight = if record.is_proxy {
            record.staked.as_weight() + record.proxied_votes
        } else {
            record.staked.as_weight()
        };

        // Old side: release the previous proxy and work out which list
        // currently carries this voter's weight.
        let old_producers: Vec<AccountName> = match record.proxy {
            Some(old_proxy) => {
                if proxy == Some(old_proxy) {
                    return Ok(()); // same proxy, nothing changes
                }
                let mut old = self.store.voters().find(old_proxy)?.ok_or_else(|| {
                    ElectionError::corruption(format!("proxy {old_proxy} has no voter record"))
                })?;
                old.proxied_votes = old
                    .proxied_votes
                    .checked_sub(weight)
                    .ok_or_else(|| ElectionError::corruption("proxied vote total underflow"))?;
                // An unregistered proxy already had its weight pulled off
                // the producers, so there is nothing to revoke from.
                let carried = if old.is_proxy {
                    old.producers.clone()
                } else {
                    Vec::new()
                };
                self.store.voters_mut().update(old)?;
                carried
            }
            None => record.producers.clone(),
        };

        // New side: charge the new proxy, or take the supplied list.
        let new_producers: Vec<AccountName> = match proxy {
            Some(new_proxy) => {
                let mut new = self
                    .store
                    .voters()
                    .find(new_proxy)?
                    .ok_or(ElectionError::NotProxy(new_proxy))?;
                if !new.is_proxy {
                    return Err(ElectionError::NotProxy(new_proxy));
                }
                new.proxied_votes = new
                    .proxied_votes
                    .checked_add(weight)
                    .ok_or_else(|| ElectionError::corruption("proxied vote total overflow"))?;
                let carried = new.producers.clone();
                self.store.voters_mut().update(new)?;
                carried
            }
            None => producers.clone(),
        };

        // Revoke weight from producers no longer named.
        let revoked = sorted_difference(&old_producers, &new_producers);
        self.shift_producer_votes(&revoked, weight, false)?;

        // Elect the newly named. Direct votes may only name active
        // producers; proxy-carried weight lands even on inactive ones.
        let elected = sorted_difference(&new_producers, &old_producers);
        for &p in &elected {
            let mut row = self.store.producers().find(p)?.ok_or_else(|| {
                ElectionError::corruption(format!("voted producer {p} was never registered"))
            })?;
            if proxy.is_none() && !self.producer_is_active(p)? {
                return Err(ElectionError::InactiveProducer(p));
            }
            row.total_votes = row
                .total_votes
                .checked_add(weight)
                .ok_or_else(|| ElectionError::corruption("producer vote total overflow"))?;
            self.store.producers_mut().update(row)?;
        }

        let mut record = record;
        record.proxy = proxy;
        record.producers = producers;
        record.last_update = host.now();
        self.store.voters_mut().update(record)?;

        tracing::debug!(voter = %voter, "vote designation updated");
        Ok(())
    }
}
