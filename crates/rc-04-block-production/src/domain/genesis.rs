//! Genesis Block Creation

use crate::config::MiningConfig;
use shared_types::Block;

/// Builds the first block of a fresh chain.
///
/// Genesis carries no records, the configured seed proof and the sentinel
/// `previous_hash`; it is trusted by definition and never mined.
pub fn create_genesis_block(config: &MiningConfig, miner: &str, timestamp: u64) -> Block {
    Block {
        index: 1,
        timestamp,
        records: Vec::new(),
        proof: config.genesis_proof,
        previous_hash: config.genesis_previous_hash.clone(),
        miner: miner.to_string(),
    }
}
