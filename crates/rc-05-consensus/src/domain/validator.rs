//! # Chain Validation
//!
//! Structural and proof-of-work validation of a candidate chain. Answers
//! with a boolean; it never fails.

use rc_04_block_production::ProofOfWork;
use shared_types::Block;
use tracing::debug;

/// Checks hash links and proofs of a whole chain.
#[derive(Debug, Clone, Copy)]
pub struct ChainValidator {
    pow: ProofOfWork,
}

impl ChainValidator {
    /// Validator using the same puzzle the local node mines with.
    pub fn new(pow: ProofOfWork) -> Self {
        Self { pow }
    }

    /// Whether every adjacent pair is hash-linked and carries a valid proof.
    ///
    /// A genesis-only chain is valid; an empty one is not. Stops at the
    /// first violation.
    pub fn is_valid(&self, chain: &[Block]) -> bool {
        if chain.is_empty() {
            return false;
        }
        for pair in chain.windows(2) {
            let (previous, block) = (&pair[0], &pair[1]);
            if block.previous_hash != previous.hash() {
                debug!(index = block.index, "previous_hash does not match");
                return false;
            }
            if !self.pow.is_valid(previous.proof, block.proof) {
                debug!(index = block.index, "proof does not verify");
                return false;
            }
        }
        true
    }
}
