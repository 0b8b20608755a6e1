//! The five election tables bundled into one cloneable store.

use quorum_store::{
    ProducerConfig, ProducerInfo, StakingStore, UnstakeCount, UnstakeRequest, VoterInfo,
};

use crate::table::{MemTable, RankedMemTable};

/// In-memory implementation of [`StakingStore`].
///
/// Cloning snapshots the entire state; the dispatcher restores a snapshot
/// to discard a failed action's writes.
#[derive(Clone, Debug, Default)]
pub struct MemStakingStore {
    producers: RankedMemTable<ProducerInfo>,
    configs: MemTable<ProducerConfig>,
    voters: MemTable<VoterInfo>,
    requests: RankedMemTable<UnstakeRequest>,
    counts: MemTable<UnstakeCount>,
}

impl MemStakingStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StakingStore for MemStakingStore {
    type Producers = RankedMemTable<ProducerInfo>;
    type Configs = MemTable<ProducerConfig>;
    type Voters = MemTable<VoterInfo>;
    type Requests = RankedMemTable<UnstakeRequest>;
    type Counts = MemTable<UnstakeCount>;

    fn producers(&self) -> &Self::Producers {
        &self.producers
    }

    fn producers_mut(&mut self) -> &mut Self::Producers {
        &mut self.producers
    }

    fn configs(&self) -> &Self::Configs {
        &self.configs
    }

    fn configs_mut(&mut self) -> &mut Self::Configs {
        &mut self.configs
    }

    fn voters(&self) -> &Self::Voters {
        &self.voters
    }

    fn voters_mut(&mut self) -> &mut Self::Voters {
        &mut self.voters
    }

    fn requests(&self) -> &Self::Requests {
        &self.requests
    }

    fn requests_mut(&mut self) -> &mut Self::Requests {
        &mut self.requests
    }

    fn counts(&self) -> &Self::Counts {
        &self.counts
    }

    fn counts_mut(&mut self) -> &mut Self::Counts {
        &mut self.counts
    }
}
