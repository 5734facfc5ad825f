//! # Ledger Service
//!
//! Owns the chain. Every chain mutation (append, replacement) runs under
//! one lock and is saved before it becomes visible.
//!
//! ## Lock Order
//!
//! chain → pool. Block construction takes the chain lock, then drains the
//! pool while still holding it, so no confirmation can land on a record
//! that is being sealed and no replacement can interleave with an append.
//! The proof-of-work search runs with no lock held.

use crate::config::MiningConfig;
use crate::domain::{
    create_genesis_block, queries, NodeActivity, ProofOfWork, RecordQuery, SealedRecord,
};
use crate::error::{LedgerError, Result};
use parking_lot::Mutex;
use rc_02_ledger_storage::LedgerStore;
use rc_03_record_pool::RecordPool;
use shared_types::{now_ms, Block, BlockHash, ChainSnapshot, NodeId};
use std::sync::Arc;
use tracing::{debug, error, info};

/// Chain plus its redundant length. Never empty.
struct ChainState {
    chain: Vec<Block>,
    length: u64,
}

impl ChainState {
    fn new(chain: Vec<Block>) -> Result<Self> {
        if chain.is_empty() {
            return Err(LedgerError::EmptyChain);
        }
        let length = chain.len() as u64;
        Ok(Self { chain, length })
    }

    fn tip(&self) -> &Block {
        // Non-empty: checked in `new`, and blocks are only ever appended.
        &self.chain[self.chain.len() - 1]
    }
}

/// The node's hash-linked chain of sealed blocks.
pub struct Ledger {
    state: Mutex<ChainState>,
    pool: Arc<RecordPool>,
    store: Arc<dyn LedgerStore>,
    pow: ProofOfWork,
    config: MiningConfig,
    miner: NodeId,
}

impl Ledger {
    /// Loads the stored chain, or creates and saves a genesis block if none
    /// was stored.
    ///
    /// # Errors
    /// - `Storage` if the stored chain cannot be read or genesis cannot be
    ///   saved
    /// - `CorruptChain` if the stored chain is empty or its length is wrong
    /// - `Pool` if pending records already sealed in the loaded chain could
    ///   not be dropped from the pool
    pub fn open(
        config: MiningConfig,
        miner: impl Into<NodeId>,
        pool: Arc<RecordPool>,
        store: Arc<dyn LedgerStore>,
    ) -> Result<Self> {
        let miner = miner.into();
        let state = match store.load_chain()? {
            Some(snapshot) => {
                if !snapshot.is_consistent() {
                    return Err(LedgerError::CorruptChain(format!(
                        "length {} but {} blocks",
                        snapshot.length,
                        snapshot.chain.len()
                    )));
                }
                let state = ChainState::new(snapshot.chain)
                    .map_err(|_| LedgerError::CorruptChain("no genesis block".into()))?;
                let dropped = pool.discard_sealed(&state.chain)?;
                info!(length = state.length, dropped, "Loaded chain");
                state
            }
            None => {
                let genesis = create_genesis_block(&config, &miner, now_ms());
                store.save_chain(std::slice::from_ref(&genesis), 1)?;
                info!(miner = %miner, "Created genesis block");
                ChainState::new(vec![genesis])?
            }
        };

        Ok(Self {
            state: Mutex::new(state),
            pool,
            store,
            pow: ProofOfWork::new(config.difficulty),
            config,
            miner,
        })
    }

    /// This node's id, recorded as `miner` on mined blocks.
    pub fn miner(&self) -> &str {
        &self.miner
    }

    pub fn pow(&self) -> &ProofOfWork {
        &self.pow
    }

    pub fn pool(&self) -> &Arc<RecordPool> {
        &self.pool
    }

    /// The most recently sealed block.
    pub fn last_block(&self) -> Block {
        self.state.lock().tip().clone()
    }

    /// Number of sealed blocks.
    pub fn length(&self) -> u64 {
        self.state.lock().length
    }

    /// The whole chain with its length.
    pub fn snapshot(&self) -> ChainSnapshot {
        let state = self.state.lock();
        ChainSnapshot {
            chain: state.chain.clone(),
            length: state.length,
        }
    }

    /// Block at 1-based `index`, or `None` when out of range.
    pub fn block(&self, index: u64) -> Option<Block> {
        let position = usize::try_from(index.checked_sub(1)?).ok()?;
        self.state.lock().chain.get(position).cloned()
    }

    /// Seals a block with `proof`, taking every eligible pending record.
    ///
    /// `previous_hash` defaults to the digest of the current tip. The chain
    /// is saved before the records leave the pool; if that save fails
    /// nothing changes and the error is returned.
    pub fn new_block(
        &self,
        proof: u64,
        previous_hash: Option<BlockHash>,
        miner: &str,
    ) -> Result<Block> {
        let mut state = self.state.lock();
        self.append(&mut state, proof, previous_hash, miner)
    }

    /// Searches a proof against the tip and seals a block with it.
    ///
    /// The search runs unlocked. If the tip moved meanwhile (another append
    /// or a chain replacement) the search is repeated against the new tip.
    #[tracing::instrument(skip(self), fields(miner = %self.miner))]
    pub fn mine(&self) -> Result<Block> {
        let mut last_proof = self.state.lock().tip().proof;
        loop {
            let proof = self.pow.search(last_proof);

            let mut state = self.state.lock();
            let tip_proof = state.tip().proof;
            if tip_proof != last_proof {
                debug!(last_proof, tip_proof, "Tip moved during search, searching again");
                last_proof = tip_proof;
                continue;
            }
            return self.append(&mut state, proof, None, &self.miner);
        }
    }

    fn append(
        &self,
        state: &mut ChainState,
        proof: u64,
        previous_hash: Option<BlockHash>,
        miner: &str,
    ) -> Result<Block> {
        let previous_hash = previous_hash.unwrap_or_else(|| state.tip().hash());
        let index = state.length + 1;

        self.pool.drain_eligible_with(self.config.quorum, |records| {
            let block = Block {
                index,
                timestamp: now_ms(),
                records,
                proof,
                previous_hash,
                miner: miner.to_string(),
            };

            state.chain.push(block.clone());
            state.length += 1;
            if let Err(e) = self.store.save_chain(&state.chain, state.length) {
                state.chain.pop();
                state.length -= 1;
                error!(index, error = %e, "Could not save chain, block discarded");
                return Err(LedgerError::from(e));
            }

            info!(
                index,
                records = block.records.len(),
                proof,
                "Sealed block"
            );
            Ok(block)
        })
    }

    /// Substitutes the whole chain, saving it first.
    ///
    /// # Errors
    /// `EmptyChain`, or `Storage` (the local chain is then left untouched).
    pub fn replace_chain(&self, chain: Vec<Block>) -> Result<()> {
        let replacement = ChainState::new(chain)?;
        let mut state = self.state.lock();
        self.store
            .save_chain(&replacement.chain, replacement.length)?;
        info!(
            old_length = state.length,
            new_length = replacement.length,
            "Chain replaced"
        );
        *state = replacement;
        Ok(())
    }

    /// Replaces the chain only if `chain` is strictly longer than the local
    /// one at the moment the chain lock is held.
    ///
    /// Callers validate `chain` beforehand. Returns whether it was adopted.
    pub fn adopt_if_longer(&self, chain: Vec<Block>) -> Result<bool> {
        let mut state = self.state.lock();
        if (chain.len() as u64) <= state.length {
            debug!(
                candidate = chain.len(),
                local = state.length,
                "Candidate no longer longer than local chain"
            );
            return Ok(false);
        }
        let replacement = ChainState::new(chain)?;
        self.store
            .save_chain(&replacement.chain, replacement.length)?;
        info!(
            old_length = state.length,
            new_length = replacement.length,
            "Adopted longer chain"
        );
        *state = replacement;
        Ok(true)
    }

    /// Sealed records matching `query`, newest first.
    pub fn sealed_records(&self, query: &RecordQuery) -> Vec<SealedRecord> {
        queries::sealed_records(&self.state.lock().chain, query)
    }

    /// Activity counts for `node_id` over the sealed chain.
    pub fn activity(&self, node_id: &str) -> NodeActivity {
        queries::activity(&self.state.lock().chain, node_id)
    }
}

impl std::fmt::Debug for Ledger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ledger")
            .field("length", &self.length())
            .field("miner", &self.miner)
            .field("difficulty", &self.pow.difficulty())
            .finish()
    }
}
