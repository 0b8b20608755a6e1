//! Unstake lifecycle: request creation, cancellation, weekly refunds.
//!
//! Unstaking removes the amount from the voter's voting weight
//! immediately and schedules the tokens to flow back over up to 26
//! weekly installments. A request can be cancelled while it still has a
//! remaining balance, which restores that balance as stake.

use quorum_store::{RankedTable, SequencedTable, StakingStore, Table, UnstakeCount, UnstakeRequest};
use quorum_types::params::{MAX_UNSTAKE_REQUESTS, UNSTAKE_PAYMENTS, UNSTAKE_PAY_PERIOD_SECS};
use quorum_types::{AccountName, TokenAmount};

use crate::engine::ElectionEngine;
use crate::error::ElectionError;
use crate::host::Host;

/// The weekly installment for a refund of `amount`.
///
/// The division remainder is folded into the installment so that 26
/// payments always cover the full amount; the first payments simply run
/// larger, and amounts below 26 refund in a single installment.
fn weekly_refund(amount: TokenAmount) -> TokenAmount {
    TokenAmount::new(amount.raw() / UNSTAKE_PAYMENTS + amount.raw() % UNSTAKE_PAYMENTS)
}

impl<S: StakingStore> ElectionEngine<S> {
    /// Schedule `amount` of `voter`'s stake for refund.
    ///
    /// The amount stops counting toward votes immediately; tokens return
    /// through the weekly refund processor. Each account may have at most
    /// 10 requests open.
    pub fn unstake_vote(
        &mut self,
        host: &dyn Host,
        voter: AccountName,
        amount: TokenAmount,
    ) -> Result<(), ElectionError> {
        self.require_auth(host, voter)?;
        if amount.is_zero() {
            return Err(ElectionError::BadAmount);
        }

        let open = self
            .store
            .counts()
            .find(voter)?
            .map(|c| c.count)
            .unwrap_or(0);
        if open >= MAX_UNSTAKE_REQUESTS {
            return Err(ElectionError::QuotaExceeded);
        }

        let mut record = self
            .store
            .voters()
            .find(voter)?
            .ok_or(ElectionError::NoStake(voter))?;
        if record.staked < amount {
            return Err(ElectionError::Overstake {
                available: record.staked,
                requested: amount,
            });
        }

        let now = host.now();
        let id = self.store.requests_mut().next_id();
        self.store.requests_mut().insert(UnstakeRequest {
            id,
            account: voter,
            current_amount: amount,
            weekly_refund_amount: weekly_refund(amount),
            next_refund_time: now.plus_secs(UNSTAKE_PAY_PERIOD_SECS),
        })?;

        match self.store.counts().find(voter)? {
            Some(mut c) => {
                c.count += 1;
                self.store.counts_mut().update(c)?;
            }
            None => {
                self.store.counts_mut().insert(UnstakeCount {
                    account: voter,
                    count: 1,
                })?;
            }
        }

        // Mirror of the stake-increase path: pull the weight back off the
        // producers (directly or through the proxy), then shrink the stake.
        self.propagate_stake_delta(&record, amount.as_weight(), false)?;

        record.staked = record
            .staked
            .checked_sub(amount)
            .ok_or_else(|| ElectionError::corruption("staked amount underflow"))?;
        record.last_update = now;
        self.store.voters_mut().update(record)?;

        tracing::debug!(voter = %voter, amount = %amount, request = id, "unstake scheduled");
        Ok(())
    }

    /// Cancel an open unstake request, restoring its remaining amount as
    /// stake along the account's current voting path.
    pub fn cancel_unstake_request(
        &mut self,
        host: &dyn Host,
        request_id: u64,
    ) -> Result<(), ElectionError> {
        let req = self
            .store
            .requests()
            .find(request_id)?
            .ok_or(ElectionError::RequestNotFound(request_id))?;
        self.require_auth(host, req.account)?;

        self.increase_voting_power(host.now(), req.account, req.current_amount)?;
        self.store.requests_mut().remove(request_id)?;
        self.decrement_unstake_count(req.account)?;

        tracing::debug!(account = %req.account, request = request_id, "unstake request cancelled");
        Ok(())
    }

    /// Pay every refund whose time has elapsed. Invoked once per block.
    ///
    /// Requests are walked in ascending `next_refund_time` order; each due
    /// request pays one installment and advances one period. A request
    /// several periods overdue catches up one installment per block.
    pub fn process_unstake_requests(&mut self, host: &mut dyn Host) -> Result<(), ElectionError> {
        let now = host.now();
        let system = self.system_account();

        for id in self.store.requests().keys_by_rank()? {
            let mut req = self
                .store
                .requests()
                .find(id)?
                .ok_or_else(|| ElectionError::corruption("refund index points at missing row"))?;
            if !req.next_refund_time.is_due(now) {
                break;
            }

            let pay = req.weekly_refund_amount.min(req.current_amount);
            host.transfer(system, req.account, pay, "unstake refund")?;

            req.current_amount = req
                .current_amount
                .checked_sub(pay)
                .ok_or_else(|| ElectionError::corruption("refund amount underflow"))?;

            if req.current_amount.is_zero() {
                let account = req.account;
                self.store.requests_mut().remove(id)?;
                self.decrement_unstake_count(account)?;
                tracing::debug!(account = %account, request = id, "unstake request fully refunded");
            } else {
                req.next_refund_time = req.next_refund_time.plus_secs(UNSTAKE_PAY_PERIOD_SECS);
                self.store.requests_mut().update(req)?;
            }
        }
        Ok(())
    }

    fn decrement_unstake_count(&mut self, account: AccountName) -> Result<(), ElectionError> {
        let mut row = self.store.counts().find(account)?.ok_or_else(|| {
            ElectionError::corruption(format!("unstake count missing for {account}"))
        })?;
        if row.count <= 1 {
            self.store.counts_mut().remove(account)?;
        } else {
            row.count -= 1;
            self.store.counts_mut().update(row)?;
        }
        Ok(())
    }
}
