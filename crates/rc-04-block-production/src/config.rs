//! Configuration types for block production

use serde::Deserialize;
use shared_types::GENESIS_PREVIOUS_HASH;

/// Default number of leading zero hex digits a proof digest must carry.
pub const DEFAULT_DIFFICULTY: usize = 4;

/// Default confirmation count a record needs before it can be sealed.
pub const DEFAULT_QUORUM: usize = 1;

/// Proof seeded into the genesis block.
pub const GENESIS_PROOF: u64 = 100;

/// Runtime configuration for block production
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MiningConfig {
    /// Leading zero hex digits required by the proof-of-work predicate.
    /// Fixed for the life of the process.
    pub difficulty: usize,

    /// Distinct confirmations a pending record needs to be sealed.
    pub quorum: usize,

    /// Proof of the genesis block
    pub genesis_proof: u64,

    /// `previous_hash` of the genesis block
    pub genesis_previous_hash: String,
}

impl Default for MiningConfig {
    fn default() -> Self {
        Self {
            difficulty: DEFAULT_DIFFICULTY,
            quorum: DEFAULT_QUORUM,
            genesis_proof: GENESIS_PROOF,
            genesis_previous_hash: GENESIS_PREVIOUS_HASH.to_string(),
        }
    }
}

impl MiningConfig {
    /// Default configuration at another difficulty.
    pub fn with_difficulty(difficulty: usize) -> Self {
        Self {
            difficulty,
            ..Self::default()
        }
    }
}
