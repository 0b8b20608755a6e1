//! Producer registration and preference updates.

use quorum_store::{ProducerConfig, ProducerInfo, StakingStore, Table};
use quorum_types::{AccountName, ProducerPreferences};

use crate::engine::ElectionEngine;
use crate::error::ElectionError;
use crate::host::Host;

impl<S: StakingStore> ElectionEngine<S> {
    /// Register `producer` with a signing key and preference vector.
    ///
    /// Creates the producer record with zero votes and the config row
    /// holding the key. An empty key registers the producer in an
    /// inactive state; it accumulates votes but is skipped by the
    /// tabulator.
    pub fn register_producer(
        &mut self,
        host: &dyn Host,
        producer: AccountName,
        signing_key: Vec<u8>,
        prefs: ProducerPreferences,
    ) -> Result<(), ElectionError> {
        self.require_auth(host, producer)?;

        if self.store.producers().contains(producer)? {
            return Err(ElectionError::AlreadyRegistered(producer));
        }

        self.store
            .producers_mut()
            .insert(ProducerInfo::new(producer, prefs))?;
        self.store.configs_mut().insert(ProducerConfig {
            owner: producer,
            signing_key,
        })?;

        tracing::info!(producer = %producer, "producer registered");
        Ok(())
    }

    /// Replace `producer`'s preference vector.
    ///
    /// Votes and the signing key are untouched.
    pub fn change_producer_preferences(
        &mut self,
        host: &dyn Host,
        producer: AccountName,
        prefs: ProducerPreferences,
    ) -> Result<(), ElectionError> {
        self.require_auth(host, producer)?;

        let mut row = self
            .store
            .producers()
            .find(producer)?
            .ok_or(ElectionError::NotRegistered(producer))?;
        row.prefs = prefs;
        self.store.producers_mut().update(row)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::NullHost;
    use quorum_store_mem::MemStakingStore;

    fn engine() -> ElectionEngine<MemStakingStore> {
        ElectionEngine::new(MemStakingStore::new(), AccountName::new(0))
    }

    fn acct(raw: u64) -> AccountName {
        AccountName::new(raw)
    }

    #[test]
    fn register_creates_record_and_config() {
        let mut engine = engine();
        let host = NullHost::new(1000);

        engine
            .register_producer(&host, acct(10), vec![0xAB], ProducerPreferences::default())
            .unwrap();

        let info = engine.store().producers().find(acct(10)).unwrap().unwrap();
        assert_eq!(info.total_votes, 0);
        let cfg = engine.store().configs().find(acct(10)).unwrap().unwrap();
        assert!(cfg.is_active());
    }

    #[test]
    fn register_twice_rejected() {
        let mut engine = engine();
        let host = NullHost::new(1000);

        engine
            .register_producer(&host, acct(10), vec![0xAB], ProducerPreferences::default())
            .unwrap();
        let err = engine
            .register_producer(&host, acct(10), vec![0xCD], ProducerPreferences::default())
            .unwrap_err();

        assert!(matches!(err, ElectionError::AlreadyRegistered(a) if a == acct(10)));
    }

    #[test]
    fn register_requires_authority() {
        let mut engine = engine();
        let mut host = NullHost::new(1000);
        host.authorize_only([acct(1)]);

        let err = engine
            .register_producer(&host, acct(10), vec![0xAB], ProducerPreferences::default())
            .unwrap_err();
        assert!(matches!(err, ElectionError::Auth(_)));
    }

    #[test]
    fn register_with_empty_key_is_inactive() {
        let mut engine = engine();
        let host = NullHost::new(1000);

        engine
            .register_producer(&host, acct(10), Vec::new(), ProducerPreferences::default())
            .unwrap();

        let cfg = engine.store().configs().find(acct(10)).unwrap().unwrap();
        assert!(!cfg.is_active());
    }

    #[test]
    fn change_preferences_replaces_prefs_only() {
        let mut engine = engine();
        let host = NullHost::new(1000);

        engine
            .register_producer(&host, acct(10), vec![0xAB], ProducerPreferences::default())
            .unwrap();

        let prefs = ProducerPreferences {
            target_block_size: 1024,
            inflation_rate: 500,
            ..ProducerPreferences::default()
        };
        engine
            .change_producer_preferences(&host, acct(10), prefs)
            .unwrap();

        let info = engine.store().producers().find(acct(10)).unwrap().unwrap();
        assert_eq!(info.prefs.target_block_size, 1024);
        assert_eq!(info.total_votes, 0);
        let cfg = engine.store().configs().find(acct(10)).unwrap().unwrap();
        assert_eq!(cfg.signing_key, vec![0xAB]);
    }

    #[test]
    fn change_preferences_unregistered_rejected() {
        let mut engine = engine();
        let host = NullHost::new(1000);

        let err = engine
            .change_producer_preferences(&host, acct(10), ProducerPreferences::default())
            .unwrap_err();
        assert!(matches!(err, ElectionError::NotRegistered(_)));
    }
}
