//! Election tabulation: top-21 selection and publication.

use quorum_store::{RankedTable, StakingStore, Table};
use quorum_types::params::ACTIVE_SET_SIZE;
use quorum_types::{AccountName, ProducerPreferences};

use crate::engine::ElectionEngine;
use crate::error::ElectionError;
use crate::host::Host;

/// Result of one tabulation pass.
///
/// `active` holds up to 21 producers in descending vote order;
/// `preferences` is the matching per-seat preference vector. The
/// collected order is authoritative for median selection, so repeated
/// tabulations over identical state are bit-identical.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ElectionOutcome {
    pub active: Vec<AccountName>,
    pub preferences: Vec<ProducerPreferences>,
}

impl ElectionOutcome {
    /// The preference vector at the median position `⌊n/2⌋` of the
    /// collected sequence. The host may apply these fields to the chain
    /// parameters.
    pub fn median_preferences(&self) -> Option<&ProducerPreferences> {
        self.preferences.get(self.active.len() / 2)
    }
}

impl<S: StakingStore> ElectionEngine<S> {
    /// Scan the vote-ordered index from the top and collect up to 21
    /// active producers.
    ///
    /// Inactive producers (empty or missing signing key) are skipped but
    /// keep their position in the index; fewer than 21 active producers
    /// is not an error.
    pub fn tabulate(&self) -> Result<ElectionOutcome, ElectionError> {
        // A config row without a producer record means the two producer
        // tables diverged.
        for cfg in self.store.configs().iter_rows()? {
            if !self.store.producers().contains(cfg.owner)? {
                return Err(ElectionError::corruption(format!(
                    "producer config {} has no producer record",
                    cfg.owner
                )));
            }
        }

        let mut active = Vec::with_capacity(ACTIVE_SET_SIZE);
        let mut preferences = Vec::with_capacity(ACTIVE_SET_SIZE);

        for owner in self.store.producers().keys_by_rank_rev()? {
            if active.len() == ACTIVE_SET_SIZE {
                break;
            }
            if !self.producer_is_active(owner)? {
                continue;
            }
            let row = self
                .store
                .producers()
                .find(owner)?
                .ok_or_else(|| ElectionError::corruption("vote index points at missing row"))?;
            active.push(owner);
            preferences.push(row.prefs);
        }

        Ok(ElectionOutcome {
            active,
            preferences,
        })
    }

    /// Tabulate and publish the result to the host.
    pub fn update_elected_producers(
        &mut self,
        host: &mut dyn Host,
    ) -> Result<ElectionOutcome, ElectionError> {
        let outcome = self.tabulate()?;
        host.set_active_producers(&outcome.active);
        tracing::debug!(elected = outcome.active.len(), "active producer set published");
        Ok(outcome)
    }
}
