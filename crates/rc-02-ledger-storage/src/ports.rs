//! # Outbound Ports (Driven Ports)
//!
//! The load/save contract the ledger engine requires from its host.
//!
//! Production: [`crate::JsonFileStore`]
//! Testing: [`crate::MemoryStore`]

use crate::error::Result;
use shared_types::{Block, ChainSnapshot, Record};
use std::collections::BTreeSet;

/// Abstract interface over durable ledger state.
///
/// Saves are synchronous and unbatched: each one is called right after the
/// mutation it records, and returning `Ok` means the state is durable.
pub trait LedgerStore: Send + Sync {
    /// Load the sealed chain. `Ok(None)` when nothing was stored yet.
    fn load_chain(&self) -> Result<Option<ChainSnapshot>>;

    /// Replace the stored chain.
    fn save_chain(&self, chain: &[Block], length: u64) -> Result<()>;

    /// Load the pending records. `Ok(None)` when nothing was stored yet.
    fn load_pending(&self) -> Result<Option<Vec<Record>>>;

    /// Replace the stored pending records.
    fn save_pending(&self, records: &[Record]) -> Result<()>;

    /// Load the known peer endpoints. `Ok(None)` when nothing was stored yet.
    fn load_peers(&self) -> Result<Option<BTreeSet<String>>>;

    /// Replace the stored peer endpoints.
    fn save_peers(&self, peers: &BTreeSet<String>) -> Result<()>;
}
