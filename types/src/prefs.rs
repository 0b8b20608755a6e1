//! Producer preference vector.

use serde::{Deserialize, Serialize};

/// Block and resource policy preferences declared by a producer.
///
/// Each elected producer carries one of these; the host may apply the
/// median-position vector of the active set to the chain parameters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProducerPreferences {
    pub max_block_size: u32,
    pub target_block_size: u32,

    pub max_storage_size: u64,
    pub resource_window_size: u64,

    pub max_block_cpu: u32,
    pub target_block_cpu: u32,

    /// Inflation in percent × 10000.
    pub inflation_rate: u16,

    pub max_trx_lifetime: u32,
    pub max_trx_recursion: u16,
}
