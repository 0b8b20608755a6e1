//! Abstract storage traits for the election tables.
//!
//! The host chain provides persistent, transactional key-value storage;
//! every backend (the in-memory reference backend, or a host binding)
//! implements these traits. The election core depends only on the traits.

pub mod error;
pub mod producer;
pub mod table;
pub mod unstake;
pub mod voter;

pub use error::StoreError;
pub use producer::{ProducerConfig, ProducerInfo};
pub use table::{Ranked, RankedTable, Row, SequencedTable, Table};
pub use unstake::{UnstakeCount, UnstakeRequest};
pub use voter::VoterInfo;

/// Aggregated access to the election tables.
///
/// Implementors expose the producer, producer-config, voter, unstake-request
/// and unstake-count tables. Handlers take rows out by value, mutate them,
/// and write them back, so only one table is borrowed at a time.
pub trait StakingStore {
    type Producers: RankedTable<ProducerInfo>;
    type Configs: Table<ProducerConfig>;
    type Voters: Table<VoterInfo>;
    type Requests: RankedTable<UnstakeRequest> + SequencedTable<UnstakeRequest>;
    type Counts: Table<UnstakeCount>;

    fn producers(&self) -> &Self::Producers;
    fn producers_mut(&mut self) -> &mut Self::Producers;

    fn configs(&self) -> &Self::Configs;
    fn configs_mut(&mut self) -> &mut Self::Configs;

    fn voters(&self) -> &Self::Voters;
    fn voters_mut(&mut self) -> &mut Self::Voters;

    fn requests(&self) -> &Self::Requests;
    fn requests_mut(&mut self) -> &mut Self::Requests;

    fn counts(&self) -> &Self::Counts;
    fn counts_mut(&mut self) -> &mut Self::Counts;
}
